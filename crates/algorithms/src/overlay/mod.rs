//! Polygon overlay and construction
//!
//! - **boolean_ops**: intersect, union, difference (`geo::BooleanOps`)
//! - **clip**: bounding-box clipping for lines and polygons
//! - **dissolve**: merge polygons sharing a property value
//! - **convex / tesselate**: hulls and ear-clipping triangulation
//! - **polygonize / unkink**: polygons from planar line work

mod boolean_ops;
mod clip;
mod convex;
mod dissolve;
mod graph;
mod polygonize;
mod tesselate;
mod unkink;

pub use boolean_ops::{difference, intersect, union, Difference, Intersect, Union};
pub(crate) use boolean_ops::to_multi_polygon;
pub use clip::bbox_clip;
pub use convex::{convex, ConvexParams};
pub use dissolve::dissolve;
pub use polygonize::polygonize;
pub use tesselate::tesselate;
pub use unkink::unkink_polygon;
