use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard, PoisonError, Weak,
    },
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::{
    debouncer::Debouncer,
    geolocation::{locate, Geolocator, PositionOptions},
    map_view::{MapControl, MapView},
    presenter::MapPresenter,
    session_token::SessionToken,
    suggestions::{not_found_html, render_list_html, render_suggestions, SuggestionEntry},
};
use crate::{
    services::places_client::{
        places_service::{AutocompleteSearchInput, PlacesService},
        types::places_service_error::PlacesServiceError,
    },
    types::{candidate::Candidate, lat_lng::LatLng},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    Idle,
    Fetching,
    ShowingResults,
    ShowingNotFound,
    ShowingError,
}

/// What each mount point of the widget currently shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub phase: SearchPhase,
    pub input: String,
    pub dropdown_visible: bool,
    pub suggestions: Vec<SuggestionEntry>,
    pub suggestions_html: String,
    pub error_visible: bool,
    pub not_found_html: Option<String>,
    pub center: LatLng,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub fsq_id: String,
    pub location: LatLng,
    pub label: String,
}

impl From<&SuggestionEntry> for Selection {
    fn from(entry: &SuggestionEntry) -> Self {
        Selection {
            fsq_id: entry.fsq_id.clone(),
            location: entry.location,
            label: entry.label.clone(),
        }
    }
}

struct WidgetState {
    phase: SearchPhase,
    input: String,
    /// Bumped by every input event and by selections.
    input_seq: u64,
    /// The latest input still needs an autocomplete request.
    pending_search: bool,
    dropdown_visible: bool,
    suggestions: Vec<SuggestionEntry>,
    error_visible: bool,
    not_found_html: Option<String>,
    center: LatLng,
    session_token: SessionToken,
    presenter: MapPresenter,
}

impl WidgetState {
    fn new(center: LatLng) -> Self {
        WidgetState {
            phase: SearchPhase::Idle,
            input: String::new(),
            input_seq: 0,
            pending_search: false,
            dropdown_visible: false,
            suggestions: vec![],
            error_visible: false,
            not_found_html: None,
            center,
            session_token: SessionToken::generate(),
            presenter: MapPresenter::default(),
        }
    }

    fn clear_indicators(&mut self) {
        self.suggestions.clear();
        self.error_visible = false;
        self.not_found_html = None;
    }
}

/// One mounted search widget: input handling, suggestion panel, selected
/// marker and the session token that ties a search together.
pub struct SearchWidget {
    places: PlacesService,
    map: Arc<dyn MapView>,
    debouncer: Debouncer<String>,
    state: Mutex<WidgetState>,
    busy: AtomicBool,
}

impl SearchWidget {
    pub fn mount(places: PlacesService, map: Arc<dyn MapView>, debounce: Duration) -> Arc<Self> {
        map.add_control(MapControl::Geolocate);
        map.add_control(MapControl::Navigation);
        let center = map.center();

        Arc::new_cyclic(|weak: &Weak<SearchWidget>| {
            let weak = weak.clone();
            let debouncer = Debouncer::new(debounce, move |value: String| {
                let widget = weak.upgrade();
                async move {
                    if let Some(widget) = widget {
                        widget.handle_input(value).await;
                    }
                }
            });

            SearchWidget {
                places,
                map,
                debouncer,
                state: Mutex::new(WidgetState::new(center)),
                busy: AtomicBool::new(false),
            }
        })
    }

    fn state(&self) -> MutexGuard<'_, WidgetState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn panel(&self) -> PanelSnapshot {
        let state = self.state();
        PanelSnapshot {
            phase: state.phase,
            input: state.input.clone(),
            dropdown_visible: state.dropdown_visible,
            suggestions_html: render_list_html(&state.suggestions),
            suggestions: state.suggestions.clone(),
            error_visible: state.error_visible,
            not_found_html: state.not_found_html.clone(),
            center: state.center,
        }
    }

    pub fn session_token(&self) -> SessionToken {
        self.state().session_token.clone()
    }

    /// Input event entry point; the search runs once typing pauses.
    pub fn on_input(&self, value: String) {
        self.debouncer.call(value);
    }

    pub async fn handle_input(&self, value: String) {
        let wants_search = !value.is_empty();
        {
            let mut state = self.state();
            state.input = value;
            state.input_seq += 1;
            state.pending_search = wants_search;
            state.clear_indicators();
            if !wants_search {
                state.phase = SearchPhase::Idle;
                state.dropdown_visible = false;
            }
        }

        if !wants_search {
            return;
        }
        if self.busy.swap(true, Ordering::SeqCst) {
            debug!("Autocomplete request in flight, deferring input");
            return;
        }
        self.run_search().await;
    }

    /// Runs with the busy flag held and releases it before returning.
    async fn run_search(&self) {
        loop {
            let request = {
                let mut state = self.state();
                if state.pending_search {
                    state.pending_search = false;
                    state.phase = SearchPhase::Fetching;
                    state.center = self.map.center();
                    Some((
                        state.input_seq,
                        state.input.clone(),
                        state.center,
                        state.session_token.clone(),
                    ))
                } else {
                    None
                }
            };

            let Some((seq, query, center, token)) = request else {
                self.busy.store(false, Ordering::SeqCst);
                return;
            };

            let result = self
                .places
                .get_autocomplete(AutocompleteSearchInput {
                    query: &query,
                    center,
                    session_token: &token,
                })
                .await;
            self.finish_search(seq, &query, center, result);

            self.busy.store(false, Ordering::SeqCst);
            let pending = self.state().pending_search;
            if !pending || self.busy.swap(true, Ordering::SeqCst) {
                return;
            }
            debug!("Input changed during autocomplete, searching again");
        }
    }

    fn finish_search(
        &self,
        seq: u64,
        query: &str,
        center: LatLng,
        result: Result<Vec<Candidate>, PlacesServiceError>,
    ) {
        let mut state = self.state();
        if state.input_seq != seq {
            debug!("Discarding stale autocomplete response for {:?}", query);
            return;
        }

        match result {
            Ok(candidates) => {
                let entries = render_suggestions(&candidates);
                if entries.is_empty() {
                    state.not_found_html = Some(not_found_html(query, center));
                    state.phase = SearchPhase::ShowingNotFound;
                } else {
                    state.suggestions = entries;
                    state.phase = SearchPhase::ShowingResults;
                }
            }
            Err(e) => {
                error!("Failed to fetch autocomplete for {:?}: {}", query, e);
                state.error_visible = true;
                state.phase = SearchPhase::ShowingError;
            }
        }
        state.dropdown_visible = true;
    }

    /// Places the selected entry on the map. Returns `false` when its details
    /// could not be fetched, in which case nothing changes.
    pub async fn select(&self, selection: Selection) -> bool {
        let token = self.session_token();
        let detail = match self.places.get_place_detail(&selection.fsq_id, &token).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!("Failed to fetch place details for {}: {}", selection.fsq_id, e);
                return false;
            }
        };
        let location = detail.location.unwrap_or(selection.location);

        let mut state = self.state();
        state.presenter.present(self.map.as_ref(), location, &detail);
        state.session_token = SessionToken::generate();
        state.input = selection.label;
        state.input_seq += 1;
        state.pending_search = false;
        state.clear_indicators();
        state.phase = SearchPhase::Idle;
        state.dropdown_visible = false;
        info!("Selected place {} ({})", detail.name, detail.fsq_id);
        true
    }

    /// Centers the widget on the device position, keeping the current center
    /// if no fix is available.
    pub async fn bootstrap_location(&self, geolocator: &dyn Geolocator) {
        match locate(geolocator, PositionOptions::default()).await {
            Ok(position) => {
                self.state().center = position;
                self.map.fly_to(position);
                info!("Centered map on device position {}", position);
            }
            Err(e) => warn!("ERROR({}): {}", e.code(), e),
        }
    }

    /// Tears the widget down: pending input is dropped and the marker removed.
    pub fn shutdown(&self) {
        self.debouncer.shutdown();
        let mut state = self.state();
        state.presenter.clear(self.map.as_ref());
        state.pending_search = false;
        state.input_seq += 1;
        state.clear_indicators();
        state.phase = SearchPhase::Idle;
        state.dropdown_visible = false;
    }
}
