use ratzilla::event::{KeyCode, KeyEvent};
use uni_map_core::viewport::MAX_ZOOM;
use uni_map_core::{place_clusters, Bounds, MapView, PlacedCluster, Viewport};

const PAN_STEP: f64 = 0.1;

#[derive(Debug, Default)]
pub struct WebState {
    pub view: MapView,
    pub viewport: Viewport,
    /// Index into `clusters` of the focused cluster.
    pub focus: Option<usize>,
    pub show_help: bool,
    pub status: String,
    /// Placement from the last draw, relative to the map's inner area.
    pub clusters: Vec<PlacedCluster>,
    pub bounds: Option<Bounds>,
}

impl WebState {
    /// Clusters the markers for a drawable area of `cols` x `rows` cells.
    pub fn place(&mut self, cols: u16, rows: u16) {
        if cols == 0 || rows == 0 {
            self.clusters.clear();
            self.bounds = None;
            return;
        }

        let bounds = self.viewport.bounds(cols, rows);
        self.clusters = place_clusters(self.view.markers(), &bounds, cols, rows);
        self.bounds = Some(bounds);

        if self.focus.is_some_and(|index| index >= self.clusters.len()) {
            self.focus = None;
        }
    }

    pub fn handle_key(&mut self, event: &KeyEvent) {
        if self.show_help {
            if matches!(event.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match event.code {
            KeyCode::F(1) | KeyCode::Char('?') => self.show_help = true,
            KeyCode::Esc | KeyCode::Char('x') => {
                if self.view.selected().is_some() {
                    self.view.clear_selection();
                } else {
                    self.focus = None;
                }
            }
            KeyCode::Tab if event.shift => self.focus_step(false),
            KeyCode::Tab => self.focus_step(true),
            KeyCode::Enter => self.activate_focused(),
            KeyCode::Char('+' | '=') => self.zoom(true),
            KeyCode::Char('-' | '_') => self.zoom(false),
            KeyCode::Char('0') => {
                self.viewport.reset();
                self.focus = None;
                self.status.clear();
            }
            KeyCode::Left | KeyCode::Char('h') => self.pan(-1.0, 0.0),
            KeyCode::Right | KeyCode::Char('l') => self.pan(1.0, 0.0),
            KeyCode::Up | KeyCode::Char('k') => self.pan(0.0, 1.0),
            KeyCode::Down | KeyCode::Char('j') => self.pan(0.0, -1.0),
            _ => {}
        }
    }

    fn focus_step(&mut self, forward: bool) {
        let count = self.clusters.len();
        if count == 0 {
            self.focus = None;
            return;
        }
        self.focus = Some(match (self.focus, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(index), true) => (index + 1) % count,
            (Some(index), false) => (index + count - 1) % count,
        });
    }

    fn activate_focused(&mut self) {
        let Some(placed) = self.focus.and_then(|index| self.clusters.get(index)) else {
            return;
        };
        let count = placed.cluster.count();

        if count == 1 || self.viewport.zoom >= MAX_ZOOM {
            let first = placed.cluster.members()[0];
            self.view.select(first);
            self.status = if count == 1 {
                String::new()
            } else {
                format!("{count} institutions share this spot")
            };
            return;
        }

        let position = placed.cluster.position();
        self.viewport.center_on(position);
        self.viewport.zoom_in();
        self.focus = None;
        self.status = format!("Zoomed into {count} institutions");
    }

    fn zoom(&mut self, inward: bool) {
        if inward {
            self.viewport.zoom_in();
        } else {
            self.viewport.zoom_out();
        }
        self.focus = None;
    }

    fn pan(&mut self, dx: f64, dy: f64) {
        self.viewport.pan(dx * PAN_STEP, dy * PAN_STEP);
        self.focus = None;
    }
}
