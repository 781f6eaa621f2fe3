//! Inverse Distance Weighting (IDW) interpolation
//!
//! Estimates values at unknown locations as a weighted average of the
//! sample points, where weights are inversely proportional to distance
//! raised to a power parameter.
//!
//! Reference:
//! Shepard, D. (1968). A two-dimensional interpolation function for
//! irregularly-spaced data. ACM National Conference.

use geo::Point;
use serde::{Deserialize, Serialize};
use spatialkit_core::{bbox_of, Algorithm, Error, Feature, FeatureCollection, Result, Units};
use std::str::FromStr;

use super::SamplePoint;
use crate::center::centroid;
use crate::grid::{hex_grid, point_grid, square_grid, triangle_grid, GridParams, HexGridParams};
use crate::maybe_rayon::*;
use crate::measurement::distance;

/// Output cell shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridType {
    Point,
    #[default]
    Square,
    Hex,
    Triangle,
}

impl FromStr for GridType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "point" | "points" => Ok(GridType::Point),
            "square" | "squares" => Ok(GridType::Square),
            "hex" | "hexes" => Ok(GridType::Hex),
            "triangle" | "triangles" => Ok(GridType::Triangle),
            _ => Err(Error::invalid_parameter("grid_type", s, "invalid grid type")),
        }
    }
}

/// Parameters for IDW interpolation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpolateParams {
    /// Output cell shape (default: square)
    pub grid_type: GridType,
    /// Property holding each sample's value, written back on each cell
    /// (default: "elevation")
    pub property: String,
    /// Units of the cell size and of the weighting distances
    pub units: Units,
    /// Power parameter (default: 1.0).
    /// Higher values give more weight to nearby points.
    pub weight: f64,
}

impl Default for InterpolateParams {
    fn default() -> Self {
        Self {
            grid_type: GridType::Square,
            property: "elevation".to_string(),
            units: Units::Kilometers,
            weight: 1.0,
        }
    }
}

/// IDW interpolation algorithm
pub struct Interpolate {
    pub cell_size: f64,
}

impl Algorithm for Interpolate {
    type Input = FeatureCollection;
    type Output = FeatureCollection;
    type Params = InterpolateParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Interpolate"
    }

    fn description(&self) -> &'static str {
        "Inverse distance weighted interpolation of point values onto a grid"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        interpolate(&input, self.cell_size, &params)
    }
}

/// Interpolate point values onto a grid covering the points.
///
/// # Algorithm
///
/// For each output cell with center (x, y):
///
/// ```text
/// z(x,y) = Σ(wi * zi) / Σ(wi)
/// where wi = 1 / d(x,y, xi,yi)^p
/// ```
///
/// Distances are great-circle distances in `params.units`. A cell center
/// that coincides with a sample takes that sample's value.
pub fn interpolate(points: &FeatureCollection, cell_size: f64, params: &InterpolateParams) -> Result<FeatureCollection> {
    if !params.weight.is_finite() {
        return Err(Error::invalid_parameter("weight", params.weight, "weight must be a number"));
    }
    let samples = SamplePoint::from_features(points, &params.property)?;
    let bbox = bbox_of(points).ok_or(Error::EmptyInput("interpolate requires at least one point"))?;

    let grid_params = GridParams {
        units: params.units,
        ..Default::default()
    };
    let grid = match params.grid_type {
        GridType::Point => point_grid(&bbox, cell_size, &grid_params)?,
        GridType::Square => square_grid(&bbox, cell_size, &grid_params)?,
        GridType::Hex => hex_grid(&bbox, cell_size, &HexGridParams { grid: grid_params, triangles: false })?,
        GridType::Triangle => triangle_grid(&bbox, cell_size, &grid_params)?,
    };

    let cells: Vec<Feature> = grid
        .features
        .into_par_iter()
        .map(|mut cell| {
            let target = match (params.grid_type, cell.as_point()) {
                (GridType::Point, Some(pt)) => Some(pt),
                _ => cell.geometry.as_ref().and_then(centroid),
            };
            if let Some(target) = target {
                let z = idw_value(target, &samples, params.weight, params.units);
                cell.set_property(params.property.clone(), z);
            }
            cell
        })
        .collect();

    Ok(cells.into())
}

/// Weighted average of the samples seen from `target`
fn idw_value(target: Point<f64>, samples: &[SamplePoint], power: f64, units: Units) -> f64 {
    let mut sum_w = 0.0;
    let mut sum_wz = 0.0;

    for s in samples {
        let d = distance(target, Point::new(s.x, s.y), units);
        if d == 0.0 {
            return s.value;
        }
        let w = 1.0 / d.powf(power);
        sum_w += w;
        sum_wz += w * s.value;
    }

    if sum_w > 0.0 {
        sum_wz / sum_w
    } else {
        f64::NAN
    }
}
