use geo::Geometry;
use spatialkit_core::{meta, Error, Result};

use super::equal::boolean_equal;
use crate::line::{line_overlap, segment_intersection};

/// Whether two geometries of the same type share part of their extent
/// without being equal.
///
/// MultiPoints overlap when they share a point, lines when they share a
/// stretch, polygons when their boundaries meet. Points are rejected.
pub fn boolean_overlap(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
    let type_a = meta::geometry_type(a);
    let type_b = meta::geometry_type(b);
    if type_a != type_b {
        return Err(Error::InvalidGeometry(format!(
            "features must be of the same type, found {} and {}",
            type_a, type_b
        )));
    }
    if type_a == "Point" || type_a == "GeometryCollection" {
        return Err(Error::unsupported("boolean_overlap", type_a));
    }

    if boolean_equal(a, b) {
        return Ok(false);
    }

    match a {
        Geometry::MultiPoint(_) => {
            let cb = meta::coords(b, false);
            Ok(meta::coords(a, false).iter().any(|c| cb.contains(c)))
        }
        Geometry::LineString(_) | Geometry::MultiLineString(_) | Geometry::Line(_) => {
            let segs_b = meta::segments(b);
            for s1 in meta::segments(a) {
                let g1 = Geometry::Line(s1);
                for s2 in &segs_b {
                    if !line_overlap(&g1, &Geometry::Line(*s2), 0.0)?.0.is_empty() {
                        return Ok(true);
                    }
                }
            }
            Ok(false)
        }
        _ => {
            let segs_b = meta::segments(b);
            Ok(meta::segments(a)
                .into_iter()
                .any(|s1| segs_b.iter().any(|s2| segment_intersection(s1, *s2).is_some())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, LineString, MultiPoint, Point};

    #[test]
    fn test_polygons() {
        let a = Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0), (x: 0.0, y: 0.0)
        ]);
        let b = Geometry::Polygon(polygon![
            (x: 1.0, y: 1.0), (x: 3.0, y: 1.0), (x: 3.0, y: 3.0), (x: 1.0, y: 3.0), (x: 1.0, y: 1.0)
        ]);
        let far = Geometry::Polygon(polygon![
            (x: 10.0, y: 10.0), (x: 11.0, y: 10.0), (x: 11.0, y: 11.0), (x: 10.0, y: 10.0)
        ]);
        assert!(boolean_overlap(&a, &b).unwrap());
        assert!(!boolean_overlap(&a, &far).unwrap());
        assert!(!boolean_overlap(&a, &a).unwrap());
    }

    #[test]
    fn test_lines() {
        let a = Geometry::LineString(LineString::from(vec![(0.0, 0.0), (2.0, 0.0), (3.0, 1.0)]));
        let b = Geometry::LineString(LineString::from(vec![(1.0, 1.0), (1.0, 0.0), (2.0, 0.0)]));
        let c = Geometry::LineString(LineString::from(vec![(0.0, 1.0), (2.0, 1.0)]));
        assert!(boolean_overlap(&a, &b).unwrap());
        assert!(!boolean_overlap(&a, &c).unwrap());
    }

    #[test]
    fn test_multipoints() {
        let a = Geometry::MultiPoint(MultiPoint::from(vec![(0.0, 0.0), (1.0, 1.0)]));
        let b = Geometry::MultiPoint(MultiPoint::from(vec![(1.0, 1.0), (5.0, 5.0)]));
        assert!(boolean_overlap(&a, &b).unwrap());
    }

    #[test]
    fn test_rejects_points_and_mixed_types() {
        let p = Geometry::Point(Point::new(0.0, 0.0));
        assert!(boolean_overlap(&p, &p).is_err());
        let l = Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]));
        assert!(boolean_overlap(&p, &l).is_err());
    }
}
