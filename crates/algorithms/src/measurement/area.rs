//! Geodesic area, length and distance-along-line

use geo::{Geometry, LineString, Point, Polygon};
use spatialkit_core::meta;
use spatialkit_core::units::degrees_to_radians;
use spatialkit_core::Units;

use super::distance::{bearing, destination, distance};

/// WGS84 equatorial radius used for area integration
const AREA_RADIUS: f64 = 6_378_137.0;

/// Geodesic area of a geometry in square meters.
///
/// Points and lines have no area. Polygon holes are subtracted from
/// their shell.
///
/// Reference:
/// Chamberlain, R. & Duquette, W. (2007). Some algorithms for polygons on
/// a sphere. JPL Publication 07-03.
pub fn area(geom: &Geometry<f64>) -> f64 {
    match geom {
        Geometry::Polygon(p) => polygon_area(p),
        Geometry::MultiPolygon(mp) => mp.0.iter().map(polygon_area).sum(),
        Geometry::Rect(r) => polygon_area(&r.to_polygon()),
        Geometry::Triangle(t) => polygon_area(&t.to_polygon()),
        Geometry::GeometryCollection(gc) => gc.0.iter().map(area).sum(),
        _ => 0.0,
    }
}

fn polygon_area(poly: &Polygon<f64>) -> f64 {
    let shell = ring_area(poly.exterior()).abs();
    let holes: f64 = poly.interiors().iter().map(|r| ring_area(r).abs()).sum();
    shell - holes
}

/// Signed spherical area of a closed ring
fn ring_area(ring: &LineString<f64>) -> f64 {
    let coords = &ring.0;
    let n = coords.len();
    if n <= 2 {
        return 0.0;
    }

    let mut total = 0.0;
    for i in 0..n {
        let (lower, middle, upper) = if i == n - 2 {
            (n - 2, n - 1, 0)
        } else if i == n - 1 {
            (n - 1, 0, 1)
        } else {
            (i, i + 1, i + 2)
        };
        let p1 = coords[lower];
        let p2 = coords[middle];
        let p3 = coords[upper];
        total += (degrees_to_radians(p3.x) - degrees_to_radians(p1.x)) * degrees_to_radians(p2.y).sin();
    }

    total * AREA_RADIUS * AREA_RADIUS / 2.0
}

/// Length of every segment of a geometry, summed.
///
/// Polygon rings count their full perimeter; points contribute nothing.
pub fn length(geom: &Geometry<f64>, units: Units) -> f64 {
    meta::segments(geom)
        .iter()
        .map(|seg| distance(seg.start.into(), seg.end.into(), units))
        .sum()
}

/// Point at `dist` along a line.
///
/// Distances past the end of the line return the last vertex. Returns
/// `None` for an empty line.
pub fn along(line: &LineString<f64>, dist: f64, units: Units) -> Option<Point<f64>> {
    let coords = &line.0;
    let last = *coords.last()?;
    let mut travelled = 0.0;

    for i in 0..coords.len() {
        if dist >= travelled && i == coords.len() - 1 {
            break;
        } else if travelled >= dist {
            let overshot = dist - travelled;
            if overshot == 0.0 || i == 0 {
                return Some(coords[i].into());
            }
            let direction = bearing(coords[i].into(), coords[i - 1].into(), false) - 180.0;
            return Some(destination(coords[i].into(), overshot, direction, units));
        } else {
            travelled += distance(coords[i].into(), coords[i + 1].into(), units);
        }
    }

    Some(last.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{polygon, Line};
    use spatialkit_core::units::length_to_degrees;

    fn unit_square() -> Polygon<f64> {
        polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0), (x: 0.0, y: 0.0)]
    }

    #[test]
    fn test_area_square_degree() {
        let a = area(&Geometry::Polygon(unit_square()));
        assert_relative_eq!(a, 12391399902.071104, max_relative = 1e-12);
    }

    #[test]
    fn test_area_subtracts_holes() {
        let hole = LineString::from(vec![
            (0.25, 0.25),
            (0.75, 0.25),
            (0.75, 0.75),
            (0.25, 0.75),
            (0.25, 0.25),
        ]);
        let poly = Polygon::new(unit_square().exterior().clone(), vec![hole]);
        assert_relative_eq!(area(&Geometry::Polygon(poly)), 9293520436.973568, max_relative = 1e-12);
    }

    #[test]
    fn test_area_of_line_is_zero() {
        let line = Geometry::Line(Line::new((0.0, 0.0), (1.0, 1.0)));
        assert_eq!(area(&line), 0.0);
    }

    #[test]
    fn test_length() {
        let line = Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]));
        assert_relative_eq!(length(&line, Units::Kilometers), 222.3901604670658, epsilon = 1e-9);

        let perimeter = length(&Geometry::Polygon(unit_square()), Units::Kilometers);
        assert_relative_eq!(perimeter, 444.7633849550064, epsilon = 1e-9);
    }

    #[test]
    fn test_along() {
        let line = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let p = along(&line, 50.0, Units::Kilometers).unwrap();
        assert_relative_eq!(p.x(), length_to_degrees(50.0, Units::Kilometers), epsilon = 1e-9);
        assert_relative_eq!(p.y(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_along_past_end_returns_last_vertex() {
        let line = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let p = along(&line, 10_000.0, Units::Kilometers).unwrap();
        assert_eq!(p, Point::new(1.0, 1.0));
        assert_eq!(along(&line, 0.0, Units::Kilometers).unwrap(), Point::new(0.0, 0.0));
        assert!(along(&LineString::new(vec![]), 1.0, Units::Kilometers).is_none());
    }
}
