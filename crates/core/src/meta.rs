//! Coordinate, segment and part iteration over geometries.
//!
//! Every operation in spatialkit reduces its input to one of these views:
//! all coordinates, all 2-vertex segments, or the single-part geometries
//! that make up a multi-part one.

use geo::{Coord, Geometry, Line, LineString, Polygon};

use crate::vector::FeatureCollection;

/// GeoJSON type name of a geometry
pub fn geometry_type(geom: &Geometry<f64>) -> &'static str {
    match geom {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "LineString",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Polygon",
        Geometry::Triangle(_) => "Polygon",
    }
}

/// All coordinates of a geometry in document order.
///
/// With `exclude_wrap`, the closing coordinate of every polygon ring is skipped.
pub fn coords(geom: &Geometry<f64>, exclude_wrap: bool) -> Vec<Coord<f64>> {
    let mut out = Vec::new();
    push_coords(geom, exclude_wrap, &mut out);
    out
}

fn push_ring(ring: &LineString<f64>, exclude_wrap: bool, out: &mut Vec<Coord<f64>>) {
    let n = ring.0.len();
    let take = if exclude_wrap && n > 1 && ring.is_closed() { n - 1 } else { n };
    out.extend(ring.0.iter().take(take).copied());
}

fn push_polygon(poly: &Polygon<f64>, exclude_wrap: bool, out: &mut Vec<Coord<f64>>) {
    push_ring(poly.exterior(), exclude_wrap, out);
    for hole in poly.interiors() {
        push_ring(hole, exclude_wrap, out);
    }
}

fn push_coords(geom: &Geometry<f64>, exclude_wrap: bool, out: &mut Vec<Coord<f64>>) {
    match geom {
        Geometry::Point(p) => out.push(p.0),
        Geometry::Line(l) => {
            out.push(l.start);
            out.push(l.end);
        }
        Geometry::LineString(ls) => out.extend(ls.0.iter().copied()),
        Geometry::Polygon(p) => push_polygon(p, exclude_wrap, out),
        Geometry::MultiPoint(mp) => out.extend(mp.0.iter().map(|p| p.0)),
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                out.extend(ls.0.iter().copied());
            }
        }
        Geometry::MultiPolygon(mp) => {
            for p in &mp.0 {
                push_polygon(p, exclude_wrap, out);
            }
        }
        Geometry::GeometryCollection(gc) => {
            for g in &gc.0 {
                push_coords(g, exclude_wrap, out);
            }
        }
        Geometry::Rect(r) => push_polygon(&r.to_polygon(), exclude_wrap, out),
        Geometry::Triangle(t) => push_polygon(&t.to_polygon(), exclude_wrap, out),
    }
}

/// All coordinates of every feature in a collection
pub fn collection_coords(fc: &FeatureCollection, exclude_wrap: bool) -> Vec<Coord<f64>> {
    let mut out = Vec::new();
    for geom in fc.geometries() {
        push_coords(geom, exclude_wrap, &mut out);
    }
    out
}

/// Every 2-vertex segment of the linear parts of a geometry.
///
/// Points produce no segments; polygon rings produce their closing segment.
pub fn segments(geom: &Geometry<f64>) -> Vec<Line<f64>> {
    let mut out = Vec::new();
    push_segments(geom, &mut out);
    out
}

fn push_line_segments(ls: &LineString<f64>, out: &mut Vec<Line<f64>>) {
    out.extend(ls.0.windows(2).map(|w| Line::new(w[0], w[1])));
}

fn push_segments(geom: &Geometry<f64>, out: &mut Vec<Line<f64>>) {
    match geom {
        Geometry::Point(_) | Geometry::MultiPoint(_) => {}
        Geometry::Line(l) => out.push(*l),
        Geometry::LineString(ls) => push_line_segments(ls, out),
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                push_line_segments(ls, out);
            }
        }
        Geometry::Polygon(p) => {
            for ring in rings(p) {
                push_line_segments(ring, out);
            }
        }
        Geometry::MultiPolygon(mp) => {
            for p in &mp.0 {
                for ring in rings(p) {
                    push_line_segments(ring, out);
                }
            }
        }
        Geometry::GeometryCollection(gc) => {
            for g in &gc.0 {
                push_segments(g, out);
            }
        }
        Geometry::Rect(r) => push_segments(&Geometry::Polygon(r.to_polygon()), out),
        Geometry::Triangle(t) => push_segments(&Geometry::Polygon(t.to_polygon()), out),
    }
}

/// Exterior ring followed by interior rings
pub fn rings(poly: &Polygon<f64>) -> impl Iterator<Item = &LineString<f64>> {
    std::iter::once(poly.exterior()).chain(poly.interiors().iter())
}

/// Split multi-part geometries and collections into single-part geometries
pub fn flatten(geom: &Geometry<f64>) -> Vec<Geometry<f64>> {
    match geom {
        Geometry::MultiPoint(mp) => mp.0.iter().map(|p| Geometry::Point(*p)).collect(),
        Geometry::MultiLineString(mls) => {
            mls.0.iter().cloned().map(Geometry::LineString).collect()
        }
        Geometry::MultiPolygon(mp) => mp.0.iter().cloned().map(Geometry::Polygon).collect(),
        Geometry::GeometryCollection(gc) => gc.0.iter().flat_map(flatten).collect(),
        Geometry::Line(l) => vec![Geometry::LineString(LineString::new(vec![l.start, l.end]))],
        Geometry::Rect(r) => vec![Geometry::Polygon(r.to_polygon())],
        Geometry::Triangle(t) => vec![Geometry::Polygon(t.to_polygon())],
        other => vec![other.clone()],
    }
}

/// Apply `f` to every coordinate, preserving structure
pub fn map_coords(geom: &Geometry<f64>, f: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Geometry<f64> {
    use geo::MapCoords;
    geom.map_coords(f)
}

/// Planar equality of two coordinates
#[inline]
pub fn coords_equal(a: Coord<f64>, b: Coord<f64>) -> bool {
    a.x == b.x && a.y == b.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{MultiPoint, MultiPolygon, Point};

    fn square() -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            vec![],
        )
    }

    #[test]
    fn test_coords_exclude_wrap() {
        let g = Geometry::Polygon(square());
        assert_eq!(coords(&g, false).len(), 5);
        assert_eq!(coords(&g, true).len(), 4);
    }

    #[test]
    fn test_segments_polygon() {
        let g = Geometry::Polygon(square());
        assert_eq!(segments(&g).len(), 4);
        let pts = Geometry::MultiPoint(MultiPoint::from(vec![Point::new(0.0, 0.0)]));
        assert!(segments(&pts).is_empty());
    }

    #[test]
    fn test_flatten_multi() {
        let mp = Geometry::MultiPolygon(MultiPolygon::new(vec![square(), square()]));
        let parts = flatten(&mp);
        assert_eq!(parts.len(), 2);
        assert_eq!(geometry_type(&parts[0]), "Polygon");
    }

    #[test]
    fn test_map_coords() {
        let g = Geometry::Point(Point::new(1.0, 2.0));
        let moved = map_coords(&g, |c| Coord { x: c.x + 1.0, y: c.y * 2.0 });
        assert_eq!(moved, Geometry::Point(Point::new(2.0, 4.0)));
    }
}
