use geo::Polygon;
use spatialkit_core::{bbox_of, BBox, Error, FeatureCollection, Result};

use crate::measurement::distance;
use geo::Point;
use spatialkit_core::Units;

/// Rectangle polygon covering a bounding box
pub fn bbox_polygon(bbox: &BBox) -> Polygon<f64> {
    bbox.to_polygon()
}

/// Rectangle polygon enclosing every feature of a collection
pub fn envelope(fc: &FeatureCollection) -> Result<Polygon<f64>> {
    bbox_of(fc)
        .map(|bb| bbox_polygon(&bb))
        .ok_or(Error::EmptyInput("envelope requires at least one coordinate"))
}

/// Smallest square box, centered on `bbox`, that contains it.
///
/// Width and height are compared as great-circle distances along the
/// southern and western edges.
pub fn square(bbox: &BBox) -> BBox {
    let (west, south, east, north) = (bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y);
    let horizontal = distance(Point::new(west, south), Point::new(east, south), Units::Kilometers);
    let vertical = distance(Point::new(west, south), Point::new(west, north), Units::Kilometers);

    if horizontal >= vertical {
        let mid = (south + north) / 2.0;
        let half = (east - west) / 2.0;
        BBox::new(west, mid - half, east, mid + half)
    } else {
        let mid = (west + east) / 2.0;
        let half = (north - south) / 2.0;
        BBox::new(mid - half, south, mid + half, north)
    }
}
