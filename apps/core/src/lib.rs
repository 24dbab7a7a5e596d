//! Shared model for the university map front ends.
//!
//! Nothing in here does I/O: the terminal and web apps perform the requests
//! and feed the outcomes into [`MapView`].

pub mod cluster;
pub mod domain;
pub mod error;
pub mod placement;
pub mod view;
pub mod viewport;

pub use cluster::{cluster_markers, cluster_points, Cluster, ClusterSize};
pub use domain::{
    display_markers, sample_markers, BackendHealth, BackendRecord, DisplayMarker, HealthStatus,
    LatLon, MarkerId,
};
pub use error::FetchError;
pub use placement::{place_clusters, PlacedCluster};
pub use view::{MapView, MarkerUpdate};
pub use viewport::{Bounds, Viewport};
