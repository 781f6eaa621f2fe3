//! Boolean predicates over geometries
//!
//! Point-in-polygon and point-on-line tests are exact (no tolerance);
//! the rest are built from them plus segment intersections.

mod clockwise;
mod contains;
mod crosses;
mod disjoint;
mod equal;
mod overlap;
mod parallel;
mod point_in_polygon;
mod point_on_line;

pub use clockwise::boolean_clockwise;
pub use contains::{boolean_contains, boolean_within};
pub use crosses::boolean_crosses;
pub use disjoint::boolean_disjoint;
pub use equal::boolean_equal;
pub use overlap::boolean_overlap;
pub use parallel::boolean_parallel;
pub use point_in_polygon::boolean_point_in_polygon;
pub(crate) use point_in_polygon::{in_ring, point_in_polygon};
pub use point_on_line::boolean_point_on_line;
