//! Contouring of gridded point values
//!
//! - **matrix**: rectangular point grid to `ndarray::Array2`
//! - **isolines**: contour lines by marching squares
//! - **isobands**: filled regions between consecutive breaks

mod field;
mod isobands;
mod isolines;
mod matrix;

pub use isobands::{isobands, Isobands};
pub use isolines::{isolines, Isolines};
pub use matrix::{grid_to_matrix, GridToMatrixParams};

use spatialkit_core::{AttributeValue, Properties};

/// Parameters shared by [`isolines`] and [`isobands`]
#[derive(Debug, Clone)]
pub struct ContourParams {
    /// Property holding each grid point's value, and naming each output's
    /// break (default: "elevation")
    pub z_property: String,
    /// Properties copied onto every output feature
    pub common_properties: Properties,
    /// Per-break properties, matched by position
    pub breaks_properties: Vec<Properties>,
}

impl Default for ContourParams {
    fn default() -> Self {
        Self {
            z_property: "elevation".to_string(),
            common_properties: Properties::new(),
            breaks_properties: Vec::new(),
        }
    }
}

/// Properties of output `index`: common, then per-break, then the break itself
pub(crate) fn band_properties(params: &ContourParams, index: usize, value: AttributeValue) -> Properties {
    let mut properties = params.common_properties.clone();
    if let Some(extra) = params.breaks_properties.get(index) {
        properties.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    properties.insert(params.z_property.clone(), value);
    properties
}
