use crate::ui;
use ratatui::layout::Rect;
use uni_map_core::placement::ROW_SCALE;
use uni_map_core::{place_clusters, Bounds, DisplayMarker, Viewport};

pub use uni_map_core::PlacedCluster;

/// How far from a marker a click still hits it, in columns.
const HIT_RADIUS: f64 = 2.0;

/// Where everything sits on screen for the current frame. Rendering and
/// mouse hit-testing both read from this so they always agree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapLayout {
    /// The bordered map block.
    pub frame: Rect,
    /// Drawable area inside the border.
    pub inner: Rect,
    pub bounds: Option<Bounds>,
    /// Placed clusters, in absolute terminal cells.
    pub clusters: Vec<PlacedCluster>,
}

impl MapLayout {
    pub fn compute(markers: &[DisplayMarker], viewport: &Viewport, frame: Rect) -> Self {
        let inner = ui::map_inner(frame);
        if inner.width == 0 || inner.height == 0 {
            return Self {
                frame,
                inner,
                ..Self::default()
            };
        }

        let bounds = viewport.bounds(inner.width, inner.height);
        let clusters = place_clusters(markers, &bounds, inner.width, inner.height)
            .into_iter()
            .map(|placed| PlacedCluster {
                col: inner.x + placed.col,
                row: inner.y + placed.row,
                ..placed
            })
            .collect();

        Self {
            frame,
            inner,
            bounds: Some(bounds),
            clusters,
        }
    }

    /// Index of the cluster drawn closest to a clicked cell, if any is close enough.
    pub fn hit(&self, column: u16, row: u16) -> Option<usize> {
        self.clusters
            .iter()
            .enumerate()
            .map(|(index, placed)| {
                let dx = f64::from(column) - f64::from(placed.col);
                let dy = (f64::from(row) - f64::from(placed.row)) * ROW_SCALE;
                (index, dx.hypot(dy))
            })
            .filter(|(_, distance)| *distance <= HIT_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}
