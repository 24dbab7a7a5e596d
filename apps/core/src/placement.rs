//! Where clusters land inside a map area of `cols` x `rows` cells.
//!
//! Only markers inside the visible bounds take part, so every cluster's
//! centre is itself on screen.

use crate::cluster::{cluster_points, Cluster};
use crate::domain::DisplayMarker;
use crate::viewport::Bounds;

/// Clustering radius in cells.
pub const CLUSTER_RADIUS: f64 = 4.0;
/// Rows are scaled by this to make distances isotropic; cells are twice as
/// tall as they are wide.
pub const ROW_SCALE: f64 = 2.0;

/// A cluster and its cell, relative to the top-left of the map area.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCluster {
    pub cluster: Cluster,
    pub col: u16,
    pub row: u16,
}

pub fn place_clusters(
    markers: &[DisplayMarker],
    bounds: &Bounds,
    cols: u16,
    rows: u16,
) -> Vec<PlacedCluster> {
    if cols == 0 || rows == 0 {
        return Vec::new();
    }

    let visible = markers
        .iter()
        .enumerate()
        .filter(|(_, marker)| bounds.contains(marker.position))
        .map(|(index, marker)| (index, bounds.normalize(marker.position)));

    cluster_points(visible, CLUSTER_RADIUS, |position| {
        let (x, y) = bounds.project(position, cols, rows);
        (x, y * ROW_SCALE)
    })
    .into_iter()
    .map(|cluster| {
        let (x, scaled_y) = cluster.screen();
        // The east and south edges project onto `cols` and `rows` exactly.
        let col = (x.max(0.0) as u16).min(cols - 1);
        let row = ((scaled_y / ROW_SCALE).max(0.0) as u16).min(rows - 1);
        PlacedCluster { cluster, col, row }
    })
    .collect()
}
