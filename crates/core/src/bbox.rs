//! Axis-aligned bounding boxes

use geo::{Coord, Geometry, LineString, Polygon};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::meta;
use crate::vector::FeatureCollection;

/// Axis-aligned bounding box in `[west, south, east, north]` order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Build from a `[minX, minY, maxX, maxY]` slice.
    ///
    /// Fails when the slice does not hold exactly four finite numbers.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() != 4 {
            return Err(Error::invalid_parameter(
                "bbox",
                format!("{:?}", values),
                "bbox must contain 4 numbers",
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::invalid_parameter(
                "bbox",
                format!("{:?}", values),
                "bbox must contain finite numbers",
            ));
        }
        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }

    /// Degenerate box around a single coordinate
    pub fn from_coord(c: Coord<f64>) -> Self {
        Self::new(c.x, c.y, c.x, c.y)
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn intersects(&self, other: &BBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Whether `other` lies entirely inside this box
    pub fn contains(&self, other: &BBox) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    pub fn expand_to_include(&mut self, c: Coord<f64>) {
        self.min_x = self.min_x.min(c.x);
        self.min_y = self.min_y.min(c.y);
        self.max_x = self.max_x.max(c.x);
        self.max_y = self.max_y.max(c.y);
    }

    /// Counter-clockwise ring starting at the south-west corner
    pub fn to_polygon(&self) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![
                (self.min_x, self.min_y),
                (self.max_x, self.min_y),
                (self.max_x, self.max_y),
                (self.min_x, self.max_y),
                (self.min_x, self.min_y),
            ]),
            vec![],
        )
    }
}

fn bbox_of_coords(coords: impl IntoIterator<Item = Coord<f64>>) -> Option<BBox> {
    let mut iter = coords.into_iter();
    let first = iter.next()?;
    let mut bb = BBox::from_coord(first);
    for c in iter {
        bb.expand_to_include(c);
    }
    Some(bb)
}

/// Compute the bounding box of a geometry.
///
/// Returns `None` for empty geometries.
pub fn bbox(geom: &Geometry<f64>) -> Option<BBox> {
    bbox_of_coords(meta::coords(geom, false))
}

/// Compute the bounding box of every geometry in a collection
pub fn bbox_of(fc: &FeatureCollection) -> Option<BBox> {
    bbox_of_coords(meta::collection_coords(fc, false))
}
