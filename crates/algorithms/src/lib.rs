//! # spatialkit Algorithms
//!
//! Geospatial analysis on `geo` geometries and GeoJSON-shaped features.
//!
//! ## Available Algorithm Categories
//!
//! - **measurement**: Distance, bearing, destination, area, length, rhumb lines
//! - **center**: Centroid, center of mass, mean and median centers, ellipses
//! - **boolean**: Spatial predicates (contains, crosses, overlap, ...)
//! - **transform**: Rotate, scale, translate, clean, truncate, projections
//! - **shapes**: Circles, sectors, arcs, Bézier splines, great circles
//! - **line**: Chunk, slice, split, offset, overlap, intersections
//! - **overlay**: Intersect, union, difference, clip, dissolve, polygonize
//! - **grid**: Point, square, triangle and hexagon grids
//! - **interpolation**: IDW, TIN, Voronoi, plane point
//! - **contour**: Isolines and isobands
//! - **clustering**: DBSCAN and k-means
//! - **routing**: Shortest path around obstacles

pub mod boolean;
pub mod center;
pub mod clustering;
pub mod contour;
pub mod grid;
mod index;
pub mod interpolation;
pub mod line;
mod maybe_rayon;
pub mod measurement;
pub mod overlay;
pub mod routing;
pub mod shapes;
pub mod transform;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::boolean::{
        boolean_clockwise, boolean_contains, boolean_crosses, boolean_disjoint, boolean_equal,
        boolean_overlap, boolean_parallel, boolean_point_in_polygon, boolean_point_on_line, boolean_within,
    };
    pub use crate::center::{center, center_mean, center_median, center_of_mass, centroid};
    pub use crate::clustering::{
        cluster_each, clusters_dbscan, clusters_kmeans, get_cluster, ClustersDbscan, ClustersKmeans,
        DbscanParams, KmeansParams,
    };
    pub use crate::contour::{grid_to_matrix, isobands, isolines, ContourParams, Isobands, Isolines};
    pub use crate::grid::{hex_grid, point_grid, square_grid, triangle_grid, GridParams, HexGridParams};
    pub use crate::interpolation::{interpolate, planepoint, tin, voronoi, GridType, Interpolate, InterpolateParams};
    pub use crate::line::{line_chunk, line_intersect, line_offset, line_overlap, line_slice, line_split, kinks};
    pub use crate::measurement::{along, area, bearing, destination, distance, length, midpoint};
    pub use crate::overlay::{
        bbox_clip, convex, difference, dissolve, intersect, polygonize, tesselate, union, unkink_polygon,
        Difference, Intersect, Union,
    };
    pub use crate::routing::{shortest_path, ShortestPath, ShortestPathParams};
    pub use crate::shapes::{bbox_polygon, circle, line_arc, sector, CircleParams};
    pub use crate::transform::{transform_rotate, transform_scale, transform_translate, truncate};
    pub use spatialkit_core::prelude::*;
}
