use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use super::map_view::{MapControl, MapOptions, MapView, MarkerId, MarkerSpec};
use crate::types::lat_lng::LatLng;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedMarker {
    pub id: MarkerId,
    pub spec: MarkerSpec,
    pub popup_open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub center: LatLng,
    pub zoom: f64,
    pub style: String,
    pub controls: Vec<MapControl>,
    pub markers: Vec<PlacedMarker>,
    /// Target of the most recent animated recenter.
    pub last_flight: Option<LatLng>,
    pub flight_count: u64,
}

/// In-memory map that records what a rendering library would draw.
pub struct HeadlessMap {
    state: Mutex<MapSnapshot>,
    next_marker: Mutex<u64>,
}

impl HeadlessMap {
    pub fn new(options: MapOptions) -> Self {
        HeadlessMap {
            state: Mutex::new(MapSnapshot {
                center: options.center,
                zoom: options.zoom,
                style: options.style,
                controls: vec![],
                markers: vec![],
                last_flight: None,
                flight_count: 0,
            }),
            next_marker: Mutex::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, MapSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> MapSnapshot {
        self.state().clone()
    }

    /// Moves the view without animation, as a user drag would.
    pub fn pan_to(&self, center: LatLng) {
        self.state().center = center;
    }
}

impl MapView for HeadlessMap {
    fn center(&self) -> LatLng {
        self.state().center
    }

    fn fly_to(&self, center: LatLng) {
        let mut state = self.state();
        state.center = center;
        state.last_flight = Some(center);
        state.flight_count += 1;
    }

    fn add_control(&self, control: MapControl) {
        self.state().controls.push(control);
    }

    fn add_marker(&self, marker: MarkerSpec) -> MarkerId {
        let id = {
            let mut next = self.next_marker.lock().unwrap_or_else(PoisonError::into_inner);
            *next += 1;
            MarkerId(*next)
        };
        self.state().markers.push(PlacedMarker {
            id,
            spec: marker,
            popup_open: false,
        });
        id
    }

    fn remove_marker(&self, id: MarkerId) {
        self.state().markers.retain(|m| m.id != id);
    }

    fn open_popup(&self, id: MarkerId) {
        if let Some(marker) = self.state().markers.iter_mut().find(|m| m.id == id) {
            marker.popup_open = true;
        }
    }
}
