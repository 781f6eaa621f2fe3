//! Shape constructors: boxes, circles, ellipses, arcs and curves

mod bbox_polygon;
mod bezier;
mod circle;
mod great_circle;

pub use bbox_polygon::{bbox_polygon, envelope, square};
pub use bezier::{bezier_spline, BezierParams};
pub use circle::{circle, ellipse, line_arc, sector, CircleParams, EllipseParams};
pub use great_circle::{great_circle, GreatCircleParams};
