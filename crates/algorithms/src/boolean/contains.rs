//! Containment predicates

use geo::{Coord, Geometry, LineString, MultiPoint, Point, Relate};
use spatialkit_core::{meta, Error, Result};

use super::point_in_polygon::boolean_point_in_polygon;
use super::point_on_line::boolean_point_on_line;

/// Whether `b` lies completely inside `a` with no point on `a`'s exterior
/// and at least one interior point shared.
///
/// Supported pairs: point in point/multipoint, point/multipoint/line in
/// line, and point/multipoint/line/polygon in polygon.
pub fn boolean_contains(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
    match (a, b) {
        (Geometry::Point(pa), Geometry::Point(pb)) => Ok(pa == pb),
        (Geometry::MultiPoint(mp), Geometry::Point(p)) => Ok(mp.0.contains(p)),
        (Geometry::MultiPoint(ma), Geometry::MultiPoint(mb)) => Ok(mb.0.iter().all(|p| ma.0.contains(p))),

        (Geometry::LineString(ls), Geometry::Point(p)) => Ok(boolean_point_on_line(*p, ls, true)),
        (Geometry::LineString(ls), Geometry::MultiPoint(mp)) => Ok(multipoint_on_line(mp, ls)),
        (Geometry::LineString(outer), Geometry::LineString(inner)) => Ok(line_on_line(inner, outer)),

        (Geometry::Polygon(_) | Geometry::MultiPolygon(_), Geometry::Point(p)) => {
            boolean_point_in_polygon(*p, a, true)
        }
        (Geometry::Polygon(_) | Geometry::MultiPolygon(_), Geometry::MultiPoint(mp)) => {
            multipoint_in_polygon(mp, a)
        }
        (
            Geometry::Polygon(_) | Geometry::MultiPolygon(_),
            Geometry::LineString(_) | Geometry::MultiLineString(_) | Geometry::Polygon(_) | Geometry::MultiPolygon(_),
        ) => Ok(a.relate(b).is_contains()),

        _ => Err(Error::unsupported(
            "boolean_contains",
            format!("{} / {}", meta::geometry_type(a), meta::geometry_type(b)),
        )),
    }
}

/// Whether `a` lies completely inside `b`; the converse of [`boolean_contains`]
pub fn boolean_within(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
    boolean_contains(b, a).map_err(|err| match err {
        Error::UnsupportedGeometry { found, .. } => Error::unsupported("boolean_within", found),
        other => other,
    })
}

fn multipoint_on_line(mp: &MultiPoint<f64>, line: &LineString<f64>) -> bool {
    mp.0.iter().all(|p| boolean_point_on_line(*p, line, false))
        && mp.0.iter().any(|p| boolean_point_on_line(*p, line, true))
}

fn multipoint_in_polygon(mp: &MultiPoint<f64>, polygon: &Geometry<f64>) -> Result<bool> {
    let mut interior = false;
    for p in &mp.0 {
        if !boolean_point_in_polygon(*p, polygon, false)? {
            return Ok(false);
        }
        interior |= boolean_point_in_polygon(*p, polygon, true)?;
    }
    Ok(interior)
}

/// Every vertex of `inner` on `outer`, and `inner` not just one of `outer`'s end vertices
fn line_on_line(inner: &LineString<f64>, outer: &LineString<f64>) -> bool {
    let on_outer = |c: &Coord<f64>| boolean_point_on_line(Point::from(*c), outer, false);
    if !inner.0.iter().all(on_outer) {
        return false;
    }
    inner.lines().any(|seg| {
        let mid = Point::from((seg.start + seg.end) / 2.0);
        boolean_point_on_line(mid, outer, true)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square() -> Geometry<f64> {
        Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)
        ])
    }

    #[test]
    fn test_polygon_contains_point() {
        assert!(boolean_contains(&square(), &Geometry::Point(Point::new(5.0, 5.0))).unwrap());
        assert!(!boolean_contains(&square(), &Geometry::Point(Point::new(0.0, 5.0))).unwrap());
        assert!(boolean_within(&Geometry::Point(Point::new(5.0, 5.0)), &square()).unwrap());
    }

    #[test]
    fn test_polygon_contains_polygon() {
        let inner = Geometry::Polygon(polygon![
            (x: 2.0, y: 2.0), (x: 4.0, y: 2.0), (x: 4.0, y: 4.0), (x: 2.0, y: 2.0)
        ]);
        let crossing = Geometry::Polygon(polygon![
            (x: 8.0, y: 8.0), (x: 12.0, y: 8.0), (x: 12.0, y: 12.0), (x: 8.0, y: 8.0)
        ]);
        assert!(boolean_contains(&square(), &inner).unwrap());
        assert!(!boolean_contains(&square(), &crossing).unwrap());
        assert!(boolean_within(&inner, &square()).unwrap());
    }

    #[test]
    fn test_polygon_contains_line() {
        let inside = Geometry::LineString(LineString::from(vec![(1.0, 1.0), (9.0, 9.0)]));
        let leaving = Geometry::LineString(LineString::from(vec![(1.0, 1.0), (11.0, 9.0)]));
        assert!(boolean_contains(&square(), &inside).unwrap());
        assert!(!boolean_contains(&square(), &leaving).unwrap());
    }

    #[test]
    fn test_line_contains() {
        let line = Geometry::LineString(LineString::from(vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]));
        let sub = Geometry::LineString(LineString::from(vec![(1.0, 0.0), (2.0, 0.0), (2.0, 1.0)]));
        assert!(boolean_contains(&line, &sub).unwrap());
        assert!(boolean_contains(&line, &Geometry::Point(Point::new(1.0, 0.0))).unwrap());
        assert!(!boolean_contains(&line, &Geometry::Point(Point::new(0.0, 0.0))).unwrap());

        let pts = Geometry::MultiPoint(MultiPoint::from(vec![(0.0, 0.0), (1.0, 0.0)]));
        assert!(boolean_contains(&line, &pts).unwrap());
        let ends = Geometry::MultiPoint(MultiPoint::from(vec![(0.0, 0.0), (2.0, 2.0)]));
        assert!(!boolean_contains(&line, &ends).unwrap());
    }

    #[test]
    fn test_multipoint_contains() {
        let mp = Geometry::MultiPoint(MultiPoint::from(vec![(0.0, 0.0), (1.0, 1.0)]));
        assert!(boolean_contains(&mp, &Geometry::Point(Point::new(1.0, 1.0))).unwrap());
        assert!(!boolean_contains(&mp, &Geometry::Point(Point::new(2.0, 1.0))).unwrap());
    }

    #[test]
    fn test_unsupported_pair() {
        let pt = Geometry::Point(Point::new(1.0, 1.0));
        assert!(matches!(
            boolean_contains(&pt, &square()),
            Err(Error::UnsupportedGeometry { operation: "boolean_contains", .. })
        ));
        assert!(matches!(
            boolean_within(&square(), &pt),
            Err(Error::UnsupportedGeometry { operation: "boolean_within", .. })
        ));
    }
}
