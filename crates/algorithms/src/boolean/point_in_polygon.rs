//! Ray-casting point-in-polygon with exact boundary detection

use geo::{BoundingRect, Coord, Geometry, LineString, Point, Polygon};
use spatialkit_core::{meta, Error, Result};

/// Whether a point lies inside a (multi)polygon.
///
/// Points inside a hole are outside. Points exactly on a ring count as
/// inside unless `ignore_boundary` is set.
pub fn boolean_point_in_polygon(pt: Point<f64>, polygon: &Geometry<f64>, ignore_boundary: bool) -> Result<bool> {
    match polygon {
        Geometry::Polygon(p) => Ok(point_in_polygon(pt.0, p, ignore_boundary)),
        Geometry::MultiPolygon(mp) => Ok(mp.0.iter().any(|p| point_in_polygon(pt.0, p, ignore_boundary))),
        Geometry::Rect(r) => Ok(point_in_polygon(pt.0, &r.to_polygon(), ignore_boundary)),
        Geometry::Triangle(t) => Ok(point_in_polygon(pt.0, &t.to_polygon(), ignore_boundary)),
        other => Err(Error::unsupported("boolean_point_in_polygon", meta::geometry_type(other))),
    }
}

pub(crate) fn point_in_polygon(c: Coord<f64>, poly: &Polygon<f64>, ignore_boundary: bool) -> bool {
    if let Some(r) = poly.bounding_rect() {
        if c.x < r.min().x || c.x > r.max().x || c.y < r.min().y || c.y > r.max().y {
            return false;
        }
    }
    if !in_ring(c, poly.exterior(), ignore_boundary) {
        return false;
    }
    !poly.interiors().iter().any(|hole| in_ring(c, hole, !ignore_boundary))
}

/// Ray-casting test against one ring; boundary points return `!ignore_boundary`
pub(crate) fn in_ring(pt: Coord<f64>, ring: &LineString<f64>, ignore_boundary: bool) -> bool {
    let mut coords: &[Coord<f64>] = &ring.0;
    if coords.len() > 1 && coords[0] == coords[coords.len() - 1] {
        coords = &coords[..coords.len() - 1];
    }
    if coords.is_empty() {
        return false;
    }

    let mut inside = false;
    let mut j = coords.len() - 1;
    for i in 0..coords.len() {
        let (xi, yi) = (coords[i].x, coords[i].y);
        let (xj, yj) = (coords[j].x, coords[j].y);

        let on_boundary = pt.y * (xi - xj) + yi * (xj - pt.x) + yj * (pt.x - xi) == 0.0
            && (xi - pt.x) * (xj - pt.x) <= 0.0
            && (yi - pt.y) * (yj - pt.y) <= 0.0;
        if on_boundary {
            return !ignore_boundary;
        }

        let crosses = (yi > pt.y) != (yj > pt.y) && pt.x < (xj - xi) * (pt.y - yi) / (yj - yi) + xi;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}
