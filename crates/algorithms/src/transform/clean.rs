//! Redundant vertex removal

use geo::{Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use spatialkit_core::{meta, Error, Result};

/// Remove duplicate and collinear vertices.
///
/// Multi-points lose repeated positions. Rings that collapse below four
/// positions are an error.
pub fn clean_coords(geom: &Geometry<f64>) -> Result<Geometry<f64>> {
    Ok(match geom {
        Geometry::Point(p) => Geometry::Point(*p),
        Geometry::MultiPoint(mp) => {
            let mut seen: Vec<Point<f64>> = Vec::with_capacity(mp.0.len());
            for p in &mp.0 {
                if !seen.contains(p) {
                    seen.push(*p);
                }
            }
            Geometry::MultiPoint(MultiPoint::new(seen))
        }
        Geometry::Line(l) => Geometry::LineString(clean_line(&LineString::new(vec![l.start, l.end]))?),
        Geometry::LineString(ls) => Geometry::LineString(clean_line(ls)?),
        Geometry::MultiLineString(mls) => Geometry::MultiLineString(MultiLineString::new(
            mls.0.iter().map(clean_line).collect::<Result<_>>()?,
        )),
        Geometry::Polygon(p) => Geometry::Polygon(clean_polygon(p)?),
        Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(MultiPolygon::new(
            mp.0.iter().map(clean_polygon).collect::<Result<_>>()?,
        )),
        Geometry::Rect(r) => Geometry::Polygon(clean_polygon(&r.to_polygon())?),
        Geometry::Triangle(t) => Geometry::Polygon(clean_polygon(&t.to_polygon())?),
        Geometry::GeometryCollection(_) => {
            return Err(Error::unsupported("clean_coords", meta::geometry_type(geom)))
        }
    })
}

fn clean_polygon(poly: &Polygon<f64>) -> Result<Polygon<f64>> {
    let exterior = clean_line(poly.exterior())?;
    let interiors = poly.interiors().iter().map(clean_line).collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Clean a single line or ring, keeping its first and last position
pub(crate) fn clean_line(line: &LineString<f64>) -> Result<LineString<f64>> {
    let points = &line.0;
    if points.len() < 2 || (points.len() == 2 && points[0] != points[1]) {
        return Ok(line.clone());
    }

    let last = points[points.len() - 1];
    let mut cleaned: Vec<Coord<f64>> = vec![points[0]];
    for &p in &points[1..points.len() - 1] {
        if cleaned.last() == Some(&p) {
            continue;
        }
        cleaned.push(p);
        drop_collinear_middle(&mut cleaned);
    }
    cleaned.push(last);

    if points[0] == last && cleaned.len() < 4 {
        return Err(Error::InvalidGeometry("invalid polygon".into()));
    }
    drop_collinear_middle(&mut cleaned);

    Ok(LineString::new(cleaned))
}

/// Remove the second-to-last vertex when it lies on the segment between its neighbours
fn drop_collinear_middle(coords: &mut Vec<Coord<f64>>) {
    let n = coords.len();
    if n > 2 && is_point_on_segment(coords[n - 3], coords[n - 1], coords[n - 2]) {
        coords.remove(n - 2);
    }
}

fn is_point_on_segment(start: Coord<f64>, end: Coord<f64>, p: Coord<f64>) -> bool {
    let cross = (p.x - start.x) * (end.y - start.y) - (p.y - start.y) * (end.x - start.x);
    if cross != 0.0 {
        return false;
    }
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx.abs() >= dy.abs() {
        if dx > 0.0 {
            start.x <= p.x && p.x <= end.x
        } else {
            end.x <= p.x && p.x <= start.x
        }
    } else if dy > 0.0 {
        start.y <= p.y && p.y <= end.y
    } else {
        end.y <= p.y && p.y <= start.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn test_clean_line_removes_duplicates_and_collinear() {
        let line = Geometry::LineString(LineString::from(vec![
            (0.0, 0.0),
            (0.0, 2.0),
            (0.0, 5.0),
            (0.0, 8.0),
            (0.0, 8.0),
            (0.0, 10.0),
        ]));
        let cleaned = clean_coords(&line).unwrap();
        assert_eq!(
            cleaned,
            Geometry::LineString(LineString::from(vec![(0.0, 0.0), (0.0, 10.0)]))
        );
    }

    #[test]
    fn test_clean_polygon() {
        let poly = Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 5.0),
            (x: 0.0, y: 10.0),
            (x: 10.0, y: 10.0),
            (x: 10.0, y: 10.0),
            (x: 10.0, y: 0.0),
            (x: 0.0, y: 0.0),
        ]);
        let cleaned = clean_coords(&poly).unwrap();
        assert_eq!(meta::coords(&cleaned, false).len(), 5);
    }

    #[test]
    fn test_clean_multipoint() {
        let mp = Geometry::MultiPoint(MultiPoint::from(vec![(0.0, 0.0), (0.0, 0.0), (2.0, 2.0)]));
        let cleaned = clean_coords(&mp).unwrap();
        assert_eq!(cleaned, Geometry::MultiPoint(MultiPoint::from(vec![(0.0, 0.0), (2.0, 2.0)])));
    }

    #[test]
    fn test_collapsed_ring_is_invalid() {
        let ring = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 0.0)]);
        assert!(clean_line(&ring).is_err());
    }
}
