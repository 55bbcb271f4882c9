use tracing::debug;

use super::{
    map_view::{MapView, MarkerId, MarkerSpec},
    popup::PopupContent,
};
use crate::types::{lat_lng::LatLng, place_detail::PlaceDetail};

pub const MARKER_COLOR: &str = "#3333FF";

/// Owns the single marker the widget shows.
#[derive(Debug, Default)]
pub struct MapPresenter {
    current: Option<MarkerId>,
}

impl MapPresenter {
    pub fn current_marker(&self) -> Option<MarkerId> {
        self.current
    }

    pub fn present(&mut self, map: &dyn MapView, location: LatLng, detail: &PlaceDetail) {
        self.clear(map);

        let id = map.add_marker(MarkerSpec {
            position: location,
            color: MARKER_COLOR.to_string(),
            popup: PopupContent::from_detail(detail).into_spec(),
        });
        map.open_popup(id);
        self.current = Some(id);
        debug!("Placed marker {:?} for {} at {}", id, detail.fsq_id, location);

        map.fly_to(location);
    }

    pub fn clear(&mut self, map: &dyn MapView) {
        if let Some(previous) = self.current.take() {
            map.remove_marker(previous);
        }
    }
}
