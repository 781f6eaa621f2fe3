//! Line operations: segmentation, intersection, slicing, offsetting,
//! overlap detection and splitting

mod chunk;
mod intersect;
mod offset;
mod overlap;
mod segment;
mod slice;
mod split;

pub use chunk::line_chunk;
pub use intersect::{kinks, line_intersect};
pub(crate) use intersect::{segment_crossings, segment_intersection};
pub use offset::line_offset;
pub use overlap::line_overlap;
pub use segment::line_segment;
pub use slice::{line_slice, line_slice_along};
pub use split::line_split;
