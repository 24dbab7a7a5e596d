//! Screen-space marker clustering.
//!
//! Markers are visited in list order. Each one joins the nearest cluster whose
//! centre lies within `radius` screen units, or starts a new cluster. The
//! projection is supplied by the caller, so terminal cells and browser cells
//! share one algorithm.

use crate::domain::{DisplayMarker, LatLon};

#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    members: Vec<usize>,
    position: LatLon,
    screen: (f64, f64),
}

impl Cluster {
    fn start(index: usize, position: LatLon, screen: (f64, f64)) -> Self {
        Self {
            members: vec![index],
            position,
            screen,
        }
    }

    fn absorb(&mut self, index: usize, position: LatLon, screen: (f64, f64)) {
        self.members.push(index);
        let n = self.members.len() as f64;
        self.screen.0 += (screen.0 - self.screen.0) / n;
        self.screen.1 += (screen.1 - self.screen.1) / n;
        self.position.lat += (position.lat - self.position.lat) / n;
        self.position.lon += (position.lon - self.position.lon) / n;
    }

    /// Indices into the marker slice that was clustered.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn is_single(&self) -> bool {
        self.members.len() == 1
    }

    /// Mean geographic position of the members.
    pub const fn position(&self) -> LatLon {
        self.position
    }

    /// Mean projected position of the members.
    pub const fn screen(&self) -> (f64, f64) {
        self.screen
    }

    pub fn size(&self) -> ClusterSize {
        ClusterSize::for_count(self.count())
    }

    pub fn label(&self) -> String {
        self.count().to_string()
    }
}

/// Icon size class for a cluster count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterSize {
    Small,
    Medium,
    Large,
}

impl ClusterSize {
    pub const fn for_count(count: usize) -> Self {
        if count < 10 {
            Self::Small
        } else if count < 100 {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

pub fn cluster_markers<F>(markers: &[DisplayMarker], radius: f64, project: F) -> Vec<Cluster>
where
    F: Fn(LatLon) -> (f64, f64),
{
    cluster_points(
        markers.iter().map(|marker| marker.position).enumerate(),
        radius,
        project,
    )
}

/// Clusters `(index, position)` pairs, keeping the caller's indices as members.
pub fn cluster_points<I, F>(points: I, radius: f64, project: F) -> Vec<Cluster>
where
    I: IntoIterator<Item = (usize, LatLon)>,
    F: Fn(LatLon) -> (f64, f64),
{
    let mut clusters: Vec<Cluster> = Vec::new();

    for (index, position) in points {
        let screen = project(position);

        let nearest = clusters
            .iter()
            .enumerate()
            .map(|(slot, cluster)| (slot, distance(cluster.screen, screen)))
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(slot, _)| slot);

        match nearest {
            Some(slot) => clusters[slot].absorb(index, position, screen),
            None => clusters.push(Cluster::start(index, position, screen)),
        }
    }

    clusters
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(id: usize, lat: f64, lon: f64) -> DisplayMarker {
        DisplayMarker::new(id, None, lat, lon)
    }

    // x = lon, y = -lat, one unit per degree
    fn flat(position: LatLon) -> (f64, f64) {
        (position.lon, -position.lat)
    }

    #[test]
    fn nearby_markers_share_a_cluster() {
        let markers = vec![marker(0, 45.0, -73.0), marker(1, 45.5, -73.5), marker(2, 49.0, -123.0)];
        let clusters = cluster_markers(&markers, 2.0, flat);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members(), &[0, 1]);
        assert!(clusters[1].is_single());
        assert_eq!(clusters[1].members(), &[2]);
    }

    #[test]
    fn cluster_position_is_member_mean() {
        let markers = vec![marker(0, 44.0, -74.0), marker(1, 46.0, -72.0)];
        let clusters = cluster_markers(&markers, 5.0, flat);

        assert_eq!(clusters.len(), 1);
        let position = clusters[0].position();
        assert!((position.lat - 45.0).abs() < 1e-9);
        assert!((position.lon + 73.0).abs() < 1e-9);
        assert_eq!(clusters[0].screen(), (-73.0, -45.0));
        assert_eq!(clusters[0].label(), "2");
    }

    #[test]
    fn marker_joins_the_nearest_cluster() {
        let markers = vec![marker(0, 0.0, 0.0), marker(1, 0.0, 10.0), marker(2, 0.0, 7.0)];
        let clusters = cluster_markers(&markers, 4.0, flat);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[1].members(), &[1, 2]);
    }

    #[test]
    fn counts_sum_to_marker_count() {
        let markers: Vec<_> = (0..50)
            .map(|i| marker(i, f64::from(i as u8 % 7), f64::from(i as u8) * 0.9))
            .collect();
        let clusters = cluster_markers(&markers, 3.0, flat);

        let total: usize = clusters.iter().map(Cluster::count).sum();
        assert_eq!(total, markers.len());
    }

    #[test]
    fn zero_radius_only_merges_identical_points() {
        let markers = vec![marker(0, 1.0, 1.0), marker(1, 1.0, 1.0), marker(2, 1.0, 1.1)];
        let clusters = cluster_markers(&markers, 0.0, flat);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].count(), 2);
    }

    #[test]
    fn no_markers_no_clusters() {
        assert!(cluster_markers(&[], 10.0, flat).is_empty());
    }

    #[test]
    fn points_keep_caller_indices() {
        let points = vec![(4, LatLon::new(1.0, 1.0)), (9, LatLon::new(1.0, 1.5))];
        let clusters = cluster_points(points, 1.0, flat);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members(), &[4, 9]);
    }

    #[test]
    fn size_classes() {
        assert_eq!(ClusterSize::for_count(2), ClusterSize::Small);
        assert_eq!(ClusterSize::for_count(10), ClusterSize::Medium);
        assert_eq!(ClusterSize::for_count(99), ClusterSize::Medium);
        assert_eq!(ClusterSize::for_count(100), ClusterSize::Large);
    }
}
