use serde::{Deserialize, Serialize};
use urlencoding::encode;

use crate::{
    types::{
        candidate::{Candidate, HighlightSpan},
        lat_lng::LatLng,
    },
    utils::html::escape_html,
};

pub const ADD_PLACE_URL: &str = "https://foursquare.com/add-place";

/// A selectable row of the suggestion list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionEntry {
    pub fsq_id: String,
    pub location: LatLng,
    pub label: String,
    pub primary_html: String,
    pub secondary: String,
}

/// Builds list entries, skipping candidates that cannot be placed on the map.
pub fn render_suggestions(candidates: &[Candidate]) -> Vec<SuggestionEntry> {
    candidates
        .iter()
        .filter_map(|c| {
            let location = c.location?;
            let fsq_id = c.id.clone()?;
            Some(SuggestionEntry {
                fsq_id,
                location,
                label: c.text.primary.clone(),
                primary_html: highlight(&c.text.primary, &c.text.highlight),
                secondary: c.text.secondary.clone(),
            })
        })
        .collect()
}

/// Wraps each highlighted span of `primary` in `<b>` tags.
///
/// Offsets count UTF-16 code units, as the places API reports them. An offset
/// inside a surrogate pair moves to the end of that character. Spans are
/// expected sorted and non-overlapping; anything else is clamped to the text
/// already emitted and to the end of the string.
pub fn highlight(primary: &str, spans: &[HighlightSpan]) -> String {
    let chars: Vec<char> = primary.chars().collect();
    let slice = |from: usize, to: usize| -> String { chars[from..to].iter().collect() };

    // UTF-16 offset at which each char starts, then the total length.
    let mut unit_starts = Vec::with_capacity(chars.len() + 1);
    let mut units = 0;
    for c in &chars {
        unit_starts.push(units);
        units += c.len_utf16();
    }
    unit_starts.push(units);
    let char_at_unit =
        |unit: usize| unit_starts.partition_point(|&u| u < unit).min(chars.len());

    let mut out = String::with_capacity(primary.len() + spans.len() * 7);
    let mut cursor = 0;
    for span in spans {
        let start = char_at_unit(span.start).max(cursor);
        let end = char_at_unit(span.start.saturating_add(span.length)).max(start);
        out.push_str(&escape_html(&slice(cursor, start)));
        out.push_str("<b>");
        out.push_str(&escape_html(&slice(start, end)));
        out.push_str("</b>");
        cursor = end;
    }
    out.push_str(&escape_html(&slice(cursor, chars.len())));
    out
}

pub fn render_list_html(entries: &[SuggestionEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            let data_object = serde_json::json!({
                "latitude": e.location.lat,
                "longitude": e.location.lng,
                "fsqId": e.fsq_id,
            });
            format!(
                r#"<li class="explorer--dropdown-item" data-object="{}"><div>{}</div><div class="explorer--secondary-text">{}</div></li>"#,
                escape_html(&data_object.to_string()),
                e.primary_html,
                escape_html(&e.secondary),
            )
        })
        .collect()
}

/// Message shown when a search returns nothing placeable, with a link for
/// submitting the missing place to the catalog.
pub fn not_found_html(query: &str, center: LatLng) -> String {
    format!(
        r#"Foursquare can't find {}. Make sure your search is spelled correctly. <a href="{}?ll={}%2C{}&amp;venuename={}" target="_blank" rel="noopener noreferrer">Don't see the place you're looking for?</a>."#,
        escape_html(query),
        ADD_PLACE_URL,
        center.lat,
        center.lng,
        encode(query),
    )
}
