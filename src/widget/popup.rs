use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{types::place_detail::PlaceDetail, utils::html::escape_html};

pub const PLACEHOLDER_PHOTO_URL: &str = "https://files.readme.io/c163d6e-placeholder.svg";
pub const PHOTO_SIZE: &str = "56";

const MARKER_HEIGHT: f64 = 35.0;
const MARKER_RADIUS: f64 = 14.0;
const LINEAR_OFFSET: f64 = 8.0;
const VERTICAL_OFFSET: f64 = 8.0;

/// Side of the popup that points at the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    Top,
    TopLeft,
    TopRight,
    Bottom,
    BottomLeft,
    BottomRight,
    Left,
    Right,
}

impl Anchor {
    pub const ALL: [Anchor; 8] = [
        Anchor::Top,
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::Bottom,
        Anchor::BottomLeft,
        Anchor::BottomRight,
        Anchor::Left,
        Anchor::Right,
    ];

    /// Pixel offset `[x, y]` keeping the popup clear of the marker glyph.
    pub fn offset(self) -> [f64; 2] {
        match self {
            Anchor::Top | Anchor::TopLeft | Anchor::TopRight => [0.0, VERTICAL_OFFSET],
            Anchor::Bottom => [0.0, -(MARKER_HEIGHT + VERTICAL_OFFSET)],
            Anchor::BottomLeft | Anchor::BottomRight => [
                0.0,
                -(MARKER_HEIGHT + VERTICAL_OFFSET - MARKER_RADIUS + LINEAR_OFFSET),
            ],
            Anchor::Left => [MARKER_RADIUS + LINEAR_OFFSET, -(MARKER_HEIGHT - MARKER_RADIUS)],
            Anchor::Right => [
                -(MARKER_RADIUS + LINEAR_OFFSET),
                -(MARKER_HEIGHT - MARKER_RADIUS),
            ],
        }
    }
}

pub fn anchor_offsets() -> BTreeMap<Anchor, [f64; 2]> {
    Anchor::ALL.iter().map(|a| (*a, a.offset())).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupSpec {
    pub html: String,
    pub offsets: BTreeMap<Anchor, [f64; 2]>,
    pub close_button: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub photo_url: String,
    pub name: String,
    pub address: String,
    pub rating: Option<f64>,
}

impl PopupContent {
    pub fn from_detail(detail: &PlaceDetail) -> Self {
        let photo_url = detail
            .photos
            .first()
            .map(|p| format!("{}{}{}", p.prefix, PHOTO_SIZE, p.suffix))
            .unwrap_or_else(|| PLACEHOLDER_PHOTO_URL.to_string());

        PopupContent {
            photo_url,
            name: detail.name.clone(),
            address: detail.address.clone().unwrap_or_default(),
            rating: detail.rating,
        }
    }

    pub fn to_html(&self) -> String {
        let name = escape_html(&self.name);
        let rating = self
            .rating
            .map(|r| format!(r#"<div class="explorer--popup-rating">{}</div>"#, r))
            .unwrap_or_default();

        format!(
            concat!(
                r#"<div class="explorer--popup explorer--text">"#,
                r#"<img class="explorer--popup-image" src="{photo}" alt="photo of {name}"/>"#,
                r#"<div class="explorer--popup-description">"#,
                r#"<div class="explorer--bold">{name}</div>"#,
                r#"<div class="explorer--secondary-text">{address}</div>"#,
                r#"</div>{rating}</div>"#,
            ),
            photo = escape_html(&self.photo_url),
            name = name,
            address = escape_html(&self.address),
            rating = rating,
        )
    }

    pub fn into_spec(self) -> PopupSpec {
        PopupSpec {
            html: self.to_html(),
            offsets: anchor_offsets(),
            close_button: false,
        }
    }
}
