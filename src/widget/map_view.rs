use serde::{Deserialize, Serialize};

use super::popup::PopupSpec;
use crate::types::lat_lng::LatLng;

pub const DEFAULT_MAP_STYLE: &str = "mapbox://styles/mapbox/light-v10";
pub const DEFAULT_ZOOM: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: f64,
    pub style: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        MapOptions {
            center: LatLng::FALLBACK,
            zoom: DEFAULT_ZOOM,
            style: DEFAULT_MAP_STYLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapControl {
    Navigation,
    Geolocate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub color: String,
    pub popup: PopupSpec,
}

/// The slice of a map rendering library the widget drives.
///
/// Implementations own their own interior mutability; the widget only holds a
/// shared reference.
pub trait MapView: Send + Sync {
    /// Current center of the visible viewport.
    fn center(&self) -> LatLng;

    /// Animated recenter.
    fn fly_to(&self, center: LatLng);

    fn add_control(&self, control: MapControl);

    fn add_marker(&self, marker: MarkerSpec) -> MarkerId;

    fn remove_marker(&self, id: MarkerId);

    fn open_popup(&self, id: MarkerId);
}
