//! # spatialkit Core
//!
//! Core types, helpers and traits for the spatialkit geometry library.
//!
//! This crate provides:
//! - `Feature` / `FeatureCollection`: GeoJSON-shaped features over `geo` geometries
//! - `Units`: length and area unit conversions on a spherical earth
//! - `BBox`: axis-aligned bounding boxes
//! - `meta`: coordinate, segment and part iteration over any geometry
//! - Algorithm traits for consistent API

pub mod bbox;
pub mod error;
pub mod meta;
pub mod units;
pub mod vector;

pub use bbox::{bbox, bbox_of, BBox};
pub use error::{Error, Result};
pub use units::{AreaUnits, Units, EARTH_RADIUS};
pub use vector::{AttributeValue, Feature, FeatureCollection, Properties};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bbox::{bbox, bbox_of, BBox};
    pub use crate::error::{Error, Result};
    pub use crate::units::{AreaUnits, Units};
    pub use crate::vector::{AttributeValue, Feature, FeatureCollection, Properties};
    pub use crate::Algorithm;
    pub use geo::{Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
}

/// Core trait for operators in spatialkit.
///
/// Operators are pure functions that transform input geometry according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
