//! Mount-time requests of the map view.
//!
//! Mounting spawns the health check and the marker fetch. Their outcomes
//! arrive as [`ViewEvent`]s which the event loop applies to its `MapView`.
//! Unmounting aborts the marker fetch; the health check is left to finish and
//! its result is dropped because nobody is listening any more.

use crate::api::UniversityBackend;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use uni_map_core::{BackendRecord, FetchError, HealthStatus, MapView, MarkerUpdate};

#[derive(Debug)]
pub enum ViewEvent {
    Health(Result<HealthStatus, FetchError>),
    Markers(Result<Vec<BackendRecord>, FetchError>),
}

#[derive(Debug)]
pub struct MapEffects {
    events: mpsc::UnboundedReceiver<ViewEvent>,
    markers_task: JoinHandle<()>,
}

impl MapEffects {
    pub fn mount(backend: Arc<dyn UniversityBackend>) -> Self {
        let (tx, events) = mpsc::unbounded_channel();

        let health_backend = Arc::clone(&backend);
        let health_tx = tx.clone();
        tokio::spawn(async move {
            let outcome = health_backend.health().await;
            deliver(&health_tx, ViewEvent::Health(outcome));
        });

        let markers_task = tokio::spawn(async move {
            let outcome = backend.universities().await;
            deliver(&tx, ViewEvent::Markers(outcome));
        });

        Self {
            events,
            markers_task,
        }
    }

    /// Waits for the next outcome. Returns `None` once both requests are done.
    pub async fn next(&mut self) -> Option<ViewEvent> {
        self.events.recv().await
    }

    /// Applies every outcome that has already arrived. Returns how many were applied.
    pub fn drain_into(&mut self, view: &mut MapView) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            apply(view, event);
            applied += 1;
        }
        applied
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for MapEffects {
    fn drop(&mut self) {
        self.markers_task.abort();
    }
}

/// Hands `event` to the view. Returns false once the view has unmounted.
fn deliver(tx: &mpsc::UnboundedSender<ViewEvent>, event: ViewEvent) -> bool {
    let request = match &event {
        ViewEvent::Health(_) => "health",
        ViewEvent::Markers(_) => "markers",
    };
    if tx.send(event).is_err() {
        debug!(request, "result arrived after unmount");
        return false;
    }
    true
}

pub fn apply(view: &mut MapView, event: ViewEvent) {
    match event {
        ViewEvent::Health(outcome) => {
            if let Err(e) = &outcome {
                debug!(error = %e, "health check failed");
            }
            let health = view.apply_health(outcome);
            info!(%health, "backend health resolved");
        }
        ViewEvent::Markers(outcome) => match view.apply_markers(outcome) {
            MarkerUpdate::Replaced(count) => info!(count, "loaded markers"),
            MarkerUpdate::KeptEmpty => info!("backend returned no markers, keeping current ones"),
            MarkerUpdate::Discarded => {}
            MarkerUpdate::Failed(e) => error!(error = %e, "failed to fetch markers"),
        },
    }
}
