//! Distance, bearing, area and nearest-feature measurements on a spherical earth

mod area;
mod distance;
mod nearest;
mod rhumb;
mod tangents;

pub use area::{along, area, length};
pub use distance::{bearing, destination, distance, midpoint};
pub use nearest::{
    nearest_point, nearest_point_on_line, nearest_point_to_line, point_to_line_distance,
    PointToLineParams,
};
pub use rhumb::{rhumb_bearing, rhumb_destination, rhumb_distance};
pub use tangents::polygon_tangents;
