//! Coordinate transformations and feature restructuring
//!
//! - **affine**: rhumb-line rotate, scale, translate
//! - **clean / truncate / rewind / flip**: per-coordinate rewrites
//! - **combine / collect / sample**: reshape feature collections
//! - **projection**: Web Mercator <-> WGS84

mod affine;
mod clean;
mod collect;
mod combine;
mod flip;
mod projection;
mod rewind;
mod sample;
mod truncate;

pub use affine::{transform_rotate, transform_scale, transform_translate, ScaleOrigin};
pub use clean::clean_coords;
pub(crate) use clean::clean_line;
pub use collect::collect;
pub use combine::{combine, explode};
pub use flip::flip;
pub use projection::{to_mercator, to_mercator_coord, to_wgs84, to_wgs84_coord};
pub use rewind::rewind;
pub use sample::sample;
pub use truncate::{truncate, TruncateParams};
