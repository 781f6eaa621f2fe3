//! Point clustering
//!
//! - **dbscan**: density-based clusters with core/edge/noise labels
//! - **kmeans**: k-means partitioning with cluster centroids
//! - **filter**: selecting and iterating tagged clusters

mod dbscan;
mod filter;
mod kmeans;

pub use dbscan::{clusters_dbscan, ClustersDbscan, DbscanParams};
pub use filter::{cluster_each, get_cluster, ClusterFilter};
pub use kmeans::{clusters_kmeans, ClustersKmeans, KmeansParams};

use geo::Point;
use spatialkit_core::{Error, FeatureCollection, Result};

/// Every feature of `fc` as a point, failing on anything else
pub(crate) fn points_of(fc: &FeatureCollection, operation: &'static str) -> Result<Vec<Point<f64>>> {
    fc.iter()
        .map(|f| f.as_point().ok_or_else(|| Error::unsupported(operation, f.geometry_type())))
        .collect()
}
