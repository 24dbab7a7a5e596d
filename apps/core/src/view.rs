use crate::domain::{
    display_markers, sample_markers, BackendHealth, BackendRecord, DisplayMarker, HealthStatus,
    MarkerId,
};
use crate::error::FetchError;

/// What a marker fetch outcome did to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerUpdate {
    /// The marker list was replaced with this many markers.
    Replaced(usize),
    /// The response was an empty array; the previous markers stay.
    KeptEmpty,
    /// The request was cancelled; the result is dropped without logging.
    Discarded,
    /// The request failed; the caller should log the error.
    Failed(FetchError),
}

/// State of the map component: markers on screen, the open panel and the
/// backend badge.
#[derive(Debug, Clone)]
pub struct MapView {
    markers: Vec<DisplayMarker>,
    selected: Option<DisplayMarker>,
    health: BackendHealth,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

impl MapView {
    pub fn new() -> Self {
        Self::with_markers(sample_markers())
    }

    pub const fn with_markers(markers: Vec<DisplayMarker>) -> Self {
        Self {
            markers,
            selected: None,
            health: BackendHealth::Loading,
        }
    }

    pub fn markers(&self) -> &[DisplayMarker] {
        &self.markers
    }

    pub const fn health(&self) -> BackendHealth {
        self.health
    }

    pub const fn selected(&self) -> Option<&DisplayMarker> {
        self.selected.as_ref()
    }

    pub fn apply_health(&mut self, outcome: Result<HealthStatus, FetchError>) -> BackendHealth {
        self.health = match outcome {
            Ok(status) if status.is_ok() => BackendHealth::Ok,
            Ok(_) | Err(_) => BackendHealth::Fail,
        };
        self.health
    }

    /// Applies the outcome of the marker request. The list is only ever
    /// replaced wholesale, and only by a non-empty response.
    pub fn apply_markers(&mut self, outcome: Result<Vec<BackendRecord>, FetchError>) -> MarkerUpdate {
        match outcome {
            Ok(records) => {
                let markers = display_markers(records);
                if markers.is_empty() {
                    return MarkerUpdate::KeptEmpty;
                }
                let count = markers.len();
                self.markers = markers;
                MarkerUpdate::Replaced(count)
            }
            Err(error) if error.is_abort() => MarkerUpdate::Discarded,
            Err(error) => MarkerUpdate::Failed(error),
        }
    }

    /// Opens the panel for the marker at `index`. Returns false when out of range.
    pub fn select(&mut self, index: usize) -> bool {
        match self.markers.get(index) {
            Some(marker) => {
                self.selected = Some(marker.clone());
                true
            }
            None => false,
        }
    }

    pub fn select_id(&mut self, id: &MarkerId) -> bool {
        self.markers
            .iter()
            .position(|marker| &marker.id == id)
            .is_some_and(|index| self.select(index))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}
