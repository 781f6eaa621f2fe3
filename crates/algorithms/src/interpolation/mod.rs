//! Spatial interpolation over point features
//!
//! - IDW: inverse distance weighting onto point, square, hex or triangle grids
//! - Plane point: linear value inside a triangle
//! - TIN: Delaunay triangulation (Bowyer-Watson)
//! - Voronoi: nearest-site cells clipped to a bounding box

mod idw;
mod planepoint;
mod tin;
mod voronoi;

pub use idw::{interpolate, GridType, Interpolate, InterpolateParams};
pub use planepoint::planepoint;
pub use tin::tin;
pub use voronoi::voronoi;

use spatialkit_core::{meta, Error, FeatureCollection, Result};

/// A sample point with x, y coordinates and a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }

    /// Read point features, taking each value from `property`.
    ///
    /// Non-point geometries and missing or non-numeric values are errors.
    pub fn from_features(points: &FeatureCollection, property: &str) -> Result<Vec<SamplePoint>> {
        points
            .iter()
            .enumerate()
            .map(|(i, feature)| {
                let pt = feature
                    .as_point()
                    .ok_or_else(|| Error::unsupported("interpolation", feature.geometry_type()))?;
                let value = feature.property_f64(property).ok_or_else(|| {
                    Error::MissingProperty(format!("feature {} has no numeric '{}'", i, property))
                })?;
                Ok(SamplePoint::new(pt.x(), pt.y(), value))
            })
            .collect()
    }
}

/// Every feature must be a point
pub(crate) fn check_points(points: &FeatureCollection, operation: &'static str) -> Result<()> {
    for feature in points {
        if feature.as_point().is_none() {
            let found = feature.geometry.as_ref().map(meta::geometry_type).unwrap_or("None");
            return Err(Error::unsupported(operation, found));
        }
    }
    Ok(())
}
