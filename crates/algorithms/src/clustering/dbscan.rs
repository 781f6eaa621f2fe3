use serde::{Deserialize, Serialize};
use spatialkit_core::units::convert_length;
use spatialkit_core::{Algorithm, Error, FeatureCollection, Result, Units};
use std::collections::VecDeque;
use tracing::debug;

use super::points_of;
use crate::maybe_rayon::*;
use crate::measurement::distance;

/// Parameters for [`clusters_dbscan`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DbscanParams {
    /// Units of `max_distance` (default: kilometers)
    pub units: Units,
    /// Neighbours, the point itself included, that make a point a core point (default: 3)
    pub min_points: usize,
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self {
            units: Units::Kilometers,
            min_points: 3,
        }
    }
}

/// DBSCAN clustering
pub struct ClustersDbscan {
    pub max_distance: f64,
}

impl Algorithm for ClustersDbscan {
    type Input = FeatureCollection;
    type Output = FeatureCollection;
    type Params = DbscanParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "ClustersDbscan"
    }

    fn description(&self) -> &'static str {
        "Density-based clustering of points by great-circle distance"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        clusters_dbscan(&input, self.max_distance, &params)
    }
}

/// Point classification in a DBSCAN run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Core,
    Edge,
    Noise,
}

impl Role {
    fn as_str(self) -> &'static str {
        match self {
            Role::Core => "core",
            Role::Edge => "edge",
            Role::Noise => "noise",
        }
    }
}

/// Cluster points with DBSCAN.
///
/// Two points are neighbours when their great-circle distance is below
/// `max_distance`. Every output point gets a `dbscan` property (`"core"`,
/// `"edge"` or `"noise"`); clustered points also get a zero-based
/// `cluster` id. Input properties are kept.
pub fn clusters_dbscan(points: &FeatureCollection, max_distance: f64, params: &DbscanParams) -> Result<FeatureCollection> {
    if !max_distance.is_finite() || max_distance <= 0.0 {
        return Err(Error::invalid_parameter("max_distance", max_distance, "must be a positive number"));
    }
    if params.min_points == 0 {
        return Err(Error::invalid_parameter("min_points", 0, "must be at least 1"));
    }

    let coords = points_of(points, "clusters_dbscan")?;
    let radius = convert_length(max_distance, params.units, Units::Kilometers);

    let neighbours: Vec<Vec<usize>> = (0..coords.len())
        .into_par_iter()
        .map(|i| {
            (0..coords.len())
                .filter(|&j| distance(coords[i], coords[j], Units::Kilometers) < radius)
                .collect()
        })
        .collect();
    let is_core: Vec<bool> = neighbours.iter().map(|n| n.len() >= params.min_points).collect();

    let mut labels: Vec<Option<usize>> = vec![None; coords.len()];
    let mut next_cluster = 0;
    for seed in 0..coords.len() {
        if labels[seed].is_some() || !is_core[seed] {
            continue;
        }
        labels[seed] = Some(next_cluster);
        let mut queue: VecDeque<usize> = neighbours[seed].iter().copied().collect();
        while let Some(p) = queue.pop_front() {
            if labels[p].is_some() {
                continue;
            }
            labels[p] = Some(next_cluster);
            if is_core[p] {
                queue.extend(neighbours[p].iter().copied());
            }
        }
        next_cluster += 1;
    }
    debug!("clusters_dbscan: {} clusters from {} points", next_cluster, coords.len());

    Ok(points
        .iter()
        .zip(labels.iter().zip(&is_core))
        .map(|(feature, (&label, &core))| {
            let mut feature = feature.clone();
            let role = match label {
                Some(cluster) => {
                    feature.set_property("cluster", cluster);
                    if core {
                        Role::Core
                    } else {
                        Role::Edge
                    }
                }
                None => Role::Noise,
            };
            feature.set_property("dbscan", role.as_str());
            feature
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;
    use spatialkit_core::Feature;

    fn points(coords: &[(f64, f64)]) -> FeatureCollection {
        coords.iter().map(|&(x, y)| Feature::new(Point::new(x, y))).collect()
    }

    fn role(f: &spatialkit_core::Feature) -> &str {
        f.get_property("dbscan").and_then(|v| v.as_str()).unwrap()
    }

    #[test]
    fn test_two_clusters_and_noise() {
        let fc = points(&[
            (0.0, 0.0),
            (0.01, 0.0),
            (0.0, 0.01),
            (0.01, 0.01),
            (5.0, 5.0),
            (10.0, 10.0),
            (10.01, 10.0),
            (10.0, 10.01),
            (10.01, 10.01),
        ]);
        let out = clusters_dbscan(&fc, 2.0, &DbscanParams::default()).unwrap();

        for f in &out.features[0..4] {
            assert_eq!(f.property_f64("cluster"), Some(0.0));
            assert_eq!(role(f), "core");
        }
        for f in &out.features[5..9] {
            assert_eq!(f.property_f64("cluster"), Some(1.0));
        }
        assert_eq!(role(&out.features[4]), "noise");
        assert!(out.features[4].get_property("cluster").is_none());
    }

    #[test]
    fn test_edge_points() {
        let fc = points(&[(0.0, 0.0), (0.01, 0.0), (0.02, 0.0), (0.03, 0.0)]);
        let out = clusters_dbscan(&fc, 1.5, &DbscanParams::default()).unwrap();

        let roles: Vec<&str> = out.iter().map(role).collect();
        assert_eq!(roles, vec!["edge", "core", "core", "edge"]);
        assert!(out.iter().all(|f| f.property_f64("cluster") == Some(0.0)));
    }

    #[test]
    fn test_units() {
        let fc = points(&[(0.0, 0.0), (0.01, 0.0), (0.0, 0.01)]);
        let params = DbscanParams { units: Units::Meters, ..Default::default() };
        let out = clusters_dbscan(&fc, 2000.0, &params).unwrap();
        assert!(out.iter().all(|f| role(f) == "core"));

        let out = clusters_dbscan(&fc, 500.0, &params).unwrap();
        assert!(out.iter().all(|f| role(f) == "noise"));
    }

    #[test]
    fn test_invalid_input() {
        let fc = points(&[(0.0, 0.0)]);
        assert!(clusters_dbscan(&fc, 0.0, &DbscanParams::default()).is_err());
        assert!(clusters_dbscan(&fc, 1.0, &DbscanParams { min_points: 0, ..Default::default() }).is_err());

        let lines: FeatureCollection =
            vec![Feature::new(geo::LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]))].into();
        assert!(clusters_dbscan(&lines, 1.0, &DbscanParams::default()).is_err());
    }
}
