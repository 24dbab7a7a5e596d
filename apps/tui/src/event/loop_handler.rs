use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use serde::Serialize;
use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uni_map::effects::{self, MapEffects};
use uni_map::UniversityBackend;
use uni_map_core::{BackendHealth, DisplayMarker, MapView, Viewport};

use crate::app::layout::MapLayout;
use crate::app::{handle_key, handle_mouse, App};
use crate::ui;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);
/// Upper bound on how long headless mode waits for the backend.
const HEADLESS_TIMEOUT: Duration = Duration::from_secs(30);
/// Screen size used to cluster markers when there is no terminal.
const HEADLESS_SCREEN: Rect = Rect {
    x: 0,
    y: 0,
    width: 120,
    height: 40,
};

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    backend: Arc<dyn UniversityBackend>,
) -> Result<()> {
    let mut requests = MapEffects::mount(backend);

    while app.running {
        if requests.drain_into(&mut app.view) > 0 {
            debug!(markers = app.view.markers().len(), "view updated");
        }
        app.update();

        let size = terminal.size()?;
        app.relayout(Rect::new(0, 0, size.width, size.height));

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if !event::poll(EVENT_POLL_TIMEOUT)? {
            // Let the spawned requests make progress between frames.
            tokio::task::yield_now().await;
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
            Event::Mouse(mouse) => handle_mouse(app, mouse),
            // Resize is picked up by the relayout at the top of the loop.
            _ => {}
        }
    }

    requests.unmount();
    Ok(())
}

/// Fetch once without a UI and print what the map would show.
pub async fn run_headless(backend: Arc<dyn UniversityBackend>, json: bool) -> Result<()> {
    let mut view = MapView::new();
    let mut requests = MapEffects::mount(backend);

    let collect = async {
        while let Some(event) = requests.next().await {
            effects::apply(&mut view, event);
        }
    };
    if tokio::time::timeout(HEADLESS_TIMEOUT, collect).await.is_err() {
        warn!("backend did not answer in time, printing current view");
    }
    requests.unmount();

    let summary = build_summary(&view);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &HeadlessSummary) {
    println!("\nUniversity Map");
    println!("==============");
    println!("Backend: {}", summary.health);
    println!("Markers: {}", summary.marker_count);
    println!("Clusters at default zoom: {}", summary.clusters.len());

    println!("\nMarkers:");
    for marker in &summary.markers {
        println!("- {} | {} | {}", marker.id, marker.popup_title(), marker.position);
    }

    println!("\nClusters:");
    for cluster in &summary.clusters {
        println!("- {} at {:.4}, {:.4}", cluster.count, cluster.lat, cluster.lon);
    }
}

fn build_summary(view: &MapView) -> HeadlessSummary {
    let layout = MapLayout::compute(view.markers(), &Viewport::default(), HEADLESS_SCREEN);

    let clusters = layout
        .clusters
        .iter()
        .map(|placed| {
            let position = placed.cluster.position();
            HeadlessCluster {
                count: placed.cluster.count(),
                lat: position.lat,
                lon: position.lon,
            }
        })
        .collect();

    HeadlessSummary {
        health: view.health(),
        marker_count: view.markers().len(),
        markers: view.markers().to_vec(),
        clusters,
    }
}

#[derive(Debug, Serialize)]
struct HeadlessSummary {
    health: BackendHealth,
    marker_count: usize,
    markers: Vec<DisplayMarker>,
    clusters: Vec<HeadlessCluster>,
}

#[derive(Debug, Serialize)]
struct HeadlessCluster {
    count: usize,
    lat: f64,
    lon: f64,
}
