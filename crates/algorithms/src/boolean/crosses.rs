//! Crossing predicate between geometries of different dimension or two lines

use geo::{Coord, Geometry, LineString, MultiPoint, Point};
use spatialkit_core::{meta, Error, Result};

use super::point_in_polygon::boolean_point_in_polygon;
use super::point_on_line::boolean_point_on_line;
use crate::line::segment_crossings;

/// Whether two geometries cross: they share some interior points, but not all.
///
/// Supported pairs (in either order): MultiPoint/LineString,
/// MultiPoint/Polygon, LineString/LineString and LineString/Polygon.
pub fn boolean_crosses(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
    match (a, b) {
        (Geometry::MultiPoint(mp), Geometry::LineString(ls)) | (Geometry::LineString(ls), Geometry::MultiPoint(mp)) => {
            Ok(multipoint_crosses_line(mp, ls))
        }
        (Geometry::MultiPoint(mp), poly @ Geometry::Polygon(_))
        | (poly @ Geometry::Polygon(_), Geometry::MultiPoint(mp)) => multipoint_crosses_polygon(mp, poly),
        (Geometry::LineString(la), Geometry::LineString(lb)) => Ok(lines_cross(la, lb)),
        (Geometry::LineString(ls), poly @ Geometry::Polygon(_))
        | (poly @ Geometry::Polygon(_), Geometry::LineString(ls)) => line_crosses_polygon(ls, poly),
        _ => Err(Error::unsupported(
            "boolean_crosses",
            format!("{} / {}", meta::geometry_type(a), meta::geometry_type(b)),
        )),
    }
}

fn multipoint_crosses_line(mp: &MultiPoint<f64>, line: &LineString<f64>) -> bool {
    let interior = mp.0.iter().any(|p| boolean_point_on_line(*p, line, true));
    let exterior = mp.0.iter().any(|p| !boolean_point_on_line(*p, line, false));
    interior && exterior
}

fn multipoint_crosses_polygon(mp: &MultiPoint<f64>, polygon: &Geometry<f64>) -> Result<bool> {
    let mut interior = false;
    let mut exterior = false;
    for p in &mp.0 {
        interior |= boolean_point_in_polygon(*p, polygon, true)?;
        exterior |= !boolean_point_in_polygon(*p, polygon, false)?;
    }
    Ok(interior && exterior)
}

/// Lines cross at a point interior to both
fn lines_cross(a: &LineString<f64>, b: &LineString<f64>) -> bool {
    let segs_a: Vec<_> = a.lines().collect();
    let segs_b: Vec<_> = b.lines().collect();
    segment_crossings(&segs_a, &segs_b).into_iter().any(|c| {
        let p = Point::from(c);
        boolean_point_on_line(p, a, true) && boolean_point_on_line(p, b, true)
    })
}

/// Part of the line runs inside the polygon and part outside
fn line_crosses_polygon(line: &LineString<f64>, polygon: &Geometry<f64>) -> Result<bool> {
    let boundary = meta::segments(polygon);
    let mut inside = false;
    let mut outside = false;

    for seg in line.lines() {
        // break the segment at its boundary crossings and test each piece
        let mut stops: Vec<Coord<f64>> = segment_crossings(&[seg], &boundary);
        stops.push(seg.start);
        stops.push(seg.end);
        let delta = seg.delta();
        let along = |c: &Coord<f64>| {
            if delta.x.abs() >= delta.y.abs() {
                (c.x - seg.start.x) / delta.x
            } else {
                (c.y - seg.start.y) / delta.y
            }
        };
        stops.sort_by(|p, q| along(p).total_cmp(&along(q)));

        for w in stops.windows(2) {
            if w[0] == w[1] {
                continue;
            }
            let mid = Point::from((w[0] + w[1]) / 2.0);
            inside |= boolean_point_in_polygon(mid, polygon, true)?;
            outside |= !boolean_point_in_polygon(mid, polygon, false)?;
        }
        if inside && outside {
            return Ok(true);
        }
    }
    Ok(false)
}
