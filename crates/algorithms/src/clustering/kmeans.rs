//! K-means clustering of points
//!
//! Partitions points into k clusters by planar distance to iteratively
//! refined cluster means.

use geo::Point;
use serde::{Deserialize, Serialize};
use spatialkit_core::{Algorithm, Error, FeatureCollection, Result};
use tracing::debug;

use super::points_of;
use crate::maybe_rayon::*;

/// Parameters for [`clusters_kmeans`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KmeansParams {
    /// Number of clusters (default: `round(sqrt(n / 2))`, capped at n)
    pub number_of_clusters: Option<usize>,
    /// Maximum iterations (default: 100)
    pub max_iterations: usize,
}

impl Default for KmeansParams {
    fn default() -> Self {
        Self {
            number_of_clusters: None,
            max_iterations: 100,
        }
    }
}

/// K-means clustering
pub struct ClustersKmeans;

impl Algorithm for ClustersKmeans {
    type Input = FeatureCollection;
    type Output = FeatureCollection;
    type Params = KmeansParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "ClustersKmeans"
    }

    fn description(&self) -> &'static str {
        "K-means partitioning of points"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        clusters_kmeans(&input, &params)
    }
}

/// Cluster points with k-means.
///
/// The first k points seed the centroids, so results are deterministic.
/// Each output point gets a zero-based `cluster` id and the `[x, y]`
/// `centroid` of its cluster. Input properties are kept.
pub fn clusters_kmeans(points: &FeatureCollection, params: &KmeansParams) -> Result<FeatureCollection> {
    let coords = points_of(points, "clusters_kmeans")?;
    if coords.is_empty() {
        return Err(Error::EmptyInput("clusters_kmeans"));
    }

    let n = coords.len();
    let k = match params.number_of_clusters {
        Some(0) => return Err(Error::invalid_parameter("number_of_clusters", 0, "must be at least 1")),
        Some(k) => k.min(n),
        None => ((n as f64 / 2.0).sqrt().round() as usize).clamp(1, n),
    };

    let mut centroids: Vec<Point<f64>> = coords[..k].to_vec();
    let mut labels: Vec<usize> = vec![usize::MAX; n];

    for iteration in 0..params.max_iterations.max(1) {
        // Assignment step
        let assigned: Vec<usize> = coords
            .clone()
            .into_par_iter()
            .map(|p| nearest(p, &centroids))
            .collect();
        if assigned == labels {
            debug!("clusters_kmeans: converged after {} iterations", iteration);
            break;
        }
        labels = assigned;

        // Update step; empty clusters keep their centroid
        let mut sums = vec![(0.0, 0.0, 0usize); k];
        for (p, &label) in coords.iter().zip(&labels) {
            sums[label].0 += p.x();
            sums[label].1 += p.y();
            sums[label].2 += 1;
        }
        for (centroid, &(sx, sy, count)) in centroids.iter_mut().zip(&sums) {
            if count > 0 {
                *centroid = Point::new(sx / count as f64, sy / count as f64);
            }
        }
    }

    Ok(points
        .iter()
        .zip(&labels)
        .map(|(feature, &label)| {
            let mut feature = feature.clone();
            let c = centroids[label];
            feature.set_property("cluster", label);
            feature.set_property("centroid", [c.x(), c.y()]);
            feature
        })
        .collect())
}

fn nearest(p: Point<f64>, centroids: &[Point<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = (p.x() - c.x()).powi(2) + (p.y() - c.y()).powi(2);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use spatialkit_core::{AttributeValue, Feature};

    fn points(coords: &[(f64, f64)]) -> FeatureCollection {
        coords.iter().map(|&(x, y)| Feature::new(Point::new(x, y))).collect()
    }

    fn centroid(f: &Feature) -> (f64, f64) {
        let values: Vec<f64> = f
            .get_property("centroid")
            .and_then(AttributeValue::as_array)
            .unwrap()
            .iter()
            .filter_map(AttributeValue::as_f64)
            .collect();
        (values[0], values[1])
    }

    #[test]
    fn test_two_groups() {
        let fc = points(&[(0.0, 0.0), (10.0, 10.0), (0.0, 1.0), (1.0, 0.0), (10.0, 11.0), (11.0, 10.0)]);
        let out = clusters_kmeans(&fc, &KmeansParams::default()).unwrap();

        let clusters: Vec<f64> = out.iter().filter_map(|f| f.property_f64("cluster")).collect();
        assert_eq!(clusters, vec![0.0, 1.0, 0.0, 0.0, 1.0, 1.0]);

        let (x, y) = centroid(&out.features[0]);
        assert_relative_eq!(x, 1.0 / 3.0);
        assert_relative_eq!(y, 1.0 / 3.0);
        let (x, y) = centroid(&out.features[4]);
        assert_relative_eq!(x, 31.0 / 3.0);
        assert_relative_eq!(y, 31.0 / 3.0);
    }

    #[test]
    fn test_cluster_count() {
        let fc = points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);

        let out = clusters_kmeans(&fc, &KmeansParams { number_of_clusters: Some(10), ..Default::default() }).unwrap();
        let mut ids: Vec<f64> = out.iter().filter_map(|f| f.property_f64("cluster")).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);

        let out = clusters_kmeans(&fc, &KmeansParams::default()).unwrap();
        assert!(out.iter().all(|f| f.property_f64("cluster") == Some(0.0)));
        assert_relative_eq!(centroid(&out.features[0]).0, 1.0);
    }

    #[test]
    fn test_invalid_input() {
        assert!(clusters_kmeans(&FeatureCollection::new(), &KmeansParams::default()).is_err());
        let fc = points(&[(0.0, 0.0)]);
        assert!(clusters_kmeans(&fc, &KmeansParams { number_of_clusters: Some(0), ..Default::default() }).is_err());
    }
}
