//! Regular grids over a bounding box
//!
//! Cell sizes are given as ground distances and converted to degrees
//! along the south and west edges of the box, so cells are evenly spaced
//! in longitude/latitude rather than on the ground.

mod hex;
mod point;
mod square;
mod triangle;

pub use hex::{hex_grid, HexGridParams};
pub use point::point_grid;
pub use square::square_grid;
pub use triangle::triangle_grid;

use geo::{Geometry, Intersects, Point, Polygon};
use spatialkit_core::{meta, BBox, Error, Properties, Result, Units};

use crate::measurement::distance;

/// Options shared by the grid generators
#[derive(Debug, Clone, Default)]
pub struct GridParams {
    /// Units of `cell_side` (default: kilometers)
    pub units: Units,
    /// Only keep cells inside (points) or touching (polygons) this polygon
    pub mask: Option<Geometry<f64>>,
    /// Copied onto every cell
    pub properties: Properties,
}

/// Validated mask as a list of polygons
pub(crate) struct Mask(Vec<Polygon<f64>>);

impl Mask {
    pub(crate) fn from_params(mask: Option<&Geometry<f64>>) -> Result<Option<Self>> {
        match mask {
            None => Ok(None),
            Some(Geometry::Polygon(p)) => Ok(Some(Mask(vec![p.clone()]))),
            Some(Geometry::MultiPolygon(mp)) => Ok(Some(Mask(mp.0.clone()))),
            Some(other) => Err(Error::invalid_parameter(
                "mask",
                meta::geometry_type(other),
                "mask must be a Polygon or MultiPolygon",
            )),
        }
    }

    /// Point strictly inside the mask
    pub(crate) fn contains(&self, pt: Point<f64>) -> bool {
        self.0.iter().any(|p| crate::boolean::point_in_polygon(pt.0, p, true))
    }

    pub(crate) fn touches(&self, cell: &Polygon<f64>) -> bool {
        self.0.iter().any(|p| p.intersects(cell))
    }
}

pub(crate) fn check_cell_side(cell_side: f64) -> Result<()> {
    if !cell_side.is_finite() || cell_side <= 0.0 {
        return Err(Error::invalid_parameter(
            "cell_side",
            cell_side,
            "cell side must be a positive number",
        ));
    }
    Ok(())
}

/// Cell width and height in degrees for a ground `cell_side`
pub(crate) fn cell_size(bbox: &BBox, cell_side: f64, units: Units) -> (f64, f64) {
    let south_west = Point::new(bbox.min_x, bbox.min_y);
    let x_fraction = cell_side / distance(south_west, Point::new(bbox.max_x, bbox.min_y), units);
    let y_fraction = cell_side / distance(south_west, Point::new(bbox.min_x, bbox.max_y), units);
    (x_fraction * bbox.width(), y_fraction * bbox.height())
}
