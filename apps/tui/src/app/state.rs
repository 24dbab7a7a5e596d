use crate::app::layout::{MapLayout, PlacedCluster};
use crate::ui;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;
use uni_map_core::viewport::MAX_ZOOM;
use uni_map_core::{MapView, Viewport};

const THROBBER_STEP: Duration = Duration::from_millis(120);
/// Fraction of the visible width moved per pan step.
const PAN_STEP: f64 = 0.1;

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub view: MapView,
    pub viewport: Viewport,
    pub layout: MapLayout,
    /// Index into `layout.clusters` of the keyboard-focused cluster.
    pub focus: Option<usize>,
    pub show_help: bool,
    pub status_message: String,
    pub throbber: ThrobberState,
    pub last_frame: Instant,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            view: MapView::new(),
            viewport: Viewport::default(),
            layout: MapLayout::default(),
            focus: None,
            show_help: false,
            status_message: String::new(),
            throbber: ThrobberState::default(),
            last_frame: Instant::now(),
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_frame) >= THROBBER_STEP {
            self.throbber.calc_next();
            self.last_frame = now;
        }
    }

    /// Recomputes marker placement for a terminal of the given size.
    pub fn relayout(&mut self, screen: Rect) {
        let areas = ui::split_screen(screen);
        self.layout = MapLayout::compute(self.view.markers(), &self.viewport, areas.map);
        if self.focus.is_some_and(|index| index >= self.layout.clusters.len()) {
            self.focus = None;
        }
    }

    pub fn focused_cluster(&self) -> Option<&PlacedCluster> {
        self.focus.and_then(|index| self.layout.clusters.get(index))
    }

    pub fn focus_next(&mut self) {
        let count = self.layout.clusters.len();
        if count == 0 {
            self.focus = None;
            return;
        }
        self.focus = Some(self.focus.map_or(0, |index| (index + 1) % count));
    }

    pub fn focus_prev(&mut self) {
        let count = self.layout.clusters.len();
        if count == 0 {
            self.focus = None;
            return;
        }
        self.focus = Some(self.focus.map_or(count - 1, |index| (index + count - 1) % count));
    }

    /// Opens the panel for a single marker, or zooms into a cluster.
    pub fn activate(&mut self, index: usize) {
        let Some(placed) = self.layout.clusters.get(index) else {
            return;
        };
        let count = placed.cluster.count();
        let first = placed.cluster.members()[0];
        let position = placed.cluster.position();

        if count == 1 || self.viewport.zoom >= MAX_ZOOM {
            self.view.select(first);
            self.focus = Some(index);
            self.status_message = if count == 1 {
                String::new()
            } else {
                format!("{count} institutions share this spot")
            };
            return;
        }

        self.viewport.center_on(position);
        self.viewport.zoom_in();
        self.focus = None;
        self.status_message = format!("Zoomed into {count} institutions");
    }

    pub fn activate_focused(&mut self) {
        if let Some(index) = self.focus {
            self.activate(index);
        }
    }

    pub fn close_panel(&mut self) {
        self.view.clear_selection();
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        self.focus = None;
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
        self.focus = None;
    }

    pub fn pan(&mut self, dx: i8, dy: i8) {
        self.viewport
            .pan(f64::from(dx) * PAN_STEP, f64::from(dy) * PAN_STEP);
        self.focus = None;
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.focus = None;
        self.status_message.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uni_map_core::viewport::DEFAULT_ZOOM;

    fn app() -> App {
        let mut app = App::new();
        app.relayout(Rect::new(0, 0, 120, 40));
        app
    }

    #[test]
    fn focus_cycles_through_clusters() {
        let mut app = app();
        assert_eq!(app.layout.clusters.len(), 3);

        app.focus_next();
        assert_eq!(app.focus, Some(0));
        app.focus_next();
        app.focus_next();
        app.focus_next();
        assert_eq!(app.focus, Some(0));
        app.focus_prev();
        assert_eq!(app.focus, Some(2));
    }

    #[test]
    fn activating_a_single_marker_selects_it() {
        let mut app = app();
        app.activate(1);

        let selected = app.view.selected().unwrap();
        let expected = &app.view.markers()[app.layout.clusters[1].cluster.members()[0]];
        assert_eq!(selected, expected);
        assert_eq!(app.focus, Some(1));
    }

    #[test]
    fn activating_a_cluster_zooms_in() {
        let mut app = app();
        app.viewport.zoom = 1.0;
        app.relayout(Rect::new(0, 0, 120, 40));
        let index = app
            .layout
            .clusters
            .iter()
            .position(|placed| placed.cluster.count() == 2)
            .unwrap();
        let target = app.layout.clusters[index].cluster.position();

        app.activate(index);

        assert!(app.view.selected().is_none());
        assert!((app.viewport.zoom - 2.0).abs() < f64::EPSILON);
        assert_eq!(app.viewport.center, target);
        assert_eq!(app.status_message, "Zoomed into 2 institutions");
    }

    #[test]
    fn cluster_at_max_zoom_selects_first_member() {
        let mut app = app();
        app.viewport.zoom = 1.0;
        app.relayout(Rect::new(0, 0, 120, 40));
        let index = app
            .layout
            .clusters
            .iter()
            .position(|placed| placed.cluster.count() == 2)
            .unwrap();
        app.viewport.zoom = MAX_ZOOM;

        app.activate(index);

        assert_eq!(
            app.view.selected().map(uni_map_core::DisplayMarker::panel_title),
            Some("Sample University Toronto")
        );
        assert_eq!(app.status_message, "2 institutions share this spot");
    }

    #[test]
    fn select_then_close_clears_selection() {
        let mut app = app();
        app.activate(0);
        assert!(app.view.selected().is_some());
        app.close_panel();
        assert!(app.view.selected().is_none());
    }

    #[test]
    fn stale_focus_is_dropped_on_relayout() {
        let mut app = app();
        app.focus = Some(2);
        app.viewport.zoom = 1.0;
        app.relayout(Rect::new(0, 0, 120, 40));
        assert_eq!(app.focus, None);
    }

    #[test]
    fn view_changes_reset_focus() {
        let mut app = app();
        app.focus_next();
        app.zoom_in();
        assert_eq!(app.focus, None);

        app.reset_view();
        assert!((app.viewport.zoom - DEFAULT_ZOOM).abs() < f64::EPSILON);
    }
}
