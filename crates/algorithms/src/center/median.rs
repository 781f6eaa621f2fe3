//! Weighted median center (Weiszfeld iteration)
//!
//! Reference:
//! Weiszfeld, E. (1937). Sur le point pour lequel la somme des distances
//! de n points donnés est minimum. Tohoku Mathematical Journal.

use geo::Point;
use spatialkit_core::{AttributeValue, Error, Feature, FeatureCollection, Result, Units};

use super::center::{center_mean, centroid, feature_weight};
use crate::measurement::distance;

/// Parameters for [`center_median`]
#[derive(Debug, Clone)]
pub struct CenterMedianParams {
    /// Numeric property used to weight each feature
    pub weight: Option<String>,
    /// Stop once a candidate moves less than this in both x and y (default: 0.001)
    pub tolerance: f64,
    /// Maximum number of iterations (default: 10)
    pub counter: usize,
}

impl Default for CenterMedianParams {
    fn default() -> Self {
        Self {
            weight: None,
            tolerance: 0.001,
            counter: 10,
        }
    }
}

/// Point minimising the weighted distance to every feature's centroid.
///
/// Starts at the weighted mean center. The result carries every
/// intermediate candidate under `medianCandidates`.
pub fn center_median(fc: &FeatureCollection, params: CenterMedianParams) -> Result<Feature> {
    let weight = params.weight.as_deref();
    let mut candidate = center_mean(fc, weight)?;

    let mut centroids: Vec<(Point<f64>, f64)> = Vec::with_capacity(fc.len());
    for (i, feature) in fc.iter().enumerate() {
        let Some(c) = feature.geometry.as_ref().and_then(centroid) else { continue };
        let w = feature_weight(feature, i, weight)?;
        if w > 0.0 {
            centroids.push((c, w));
        }
    }
    if centroids.is_empty() {
        return Err(Error::EmptyInput("no features to measure"));
    }

    let mut candidates: Vec<AttributeValue> = Vec::new();
    let mut remaining = params.counter;
    loop {
        let (mut sum_x, mut sum_y, mut sum_k) = (0.0, 0.0, 0.0);
        for &(c, w) in &centroids {
            let mut d = w * distance(c, candidate, Units::Kilometers);
            if d == 0.0 {
                d = 1.0;
            }
            let k = w / d;
            sum_x += c.x() * k;
            sum_y += c.y() * k;
            sum_k += k;
        }
        let next = Point::new(sum_x / sum_k, sum_y / sum_k);

        let converged = (next.x() - candidate.x()).abs() < params.tolerance
            && (next.y() - candidate.y()).abs() < params.tolerance;
        if centroids.len() == 1 || remaining == 0 || converged {
            let mut median = Feature::new(next);
            median.set_property("medianCandidates", AttributeValue::Array(candidates));
            return Ok(median);
        }

        tracing::trace!(x = next.x(), y = next.y(), "median candidate");
        candidates.push([next.x(), next.y()].into());
        candidate = next;
        remaining -= 1;
    }
}
