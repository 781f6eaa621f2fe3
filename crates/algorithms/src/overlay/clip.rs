//! Clipping by a bounding box
//!
//! Clip geometries by a rectangular extent using Cohen-Sutherland
//! for lines and Sutherland-Hodgman for polygons.

use geo::{Coord, Geometry, LineString, MultiLineString, MultiPolygon, Polygon};
use spatialkit_core::{meta, BBox, Error, Result};

/// Cohen-Sutherland region codes
const INSIDE: u8 = 0b0000;
const LEFT: u8 = 0b0001;
const RIGHT: u8 = 0b0010;
const BOTTOM: u8 = 0b0100;
const TOP: u8 = 0b1000;

fn outcode(p: Coord<f64>, bbox: &BBox) -> u8 {
    let mut code = INSIDE;
    if p.x < bbox.min_x {
        code |= LEFT;
    } else if p.x > bbox.max_x {
        code |= RIGHT;
    }
    if p.y < bbox.min_y {
        code |= BOTTOM;
    } else if p.y > bbox.max_y {
        code |= TOP;
    }
    code
}

/// Point where segment `a`-`b` crosses the box edge named by `edge`
fn intersect_edge(a: Coord<f64>, b: Coord<f64>, edge: u8, bbox: &BBox) -> Coord<f64> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;

    if edge & TOP != 0 {
        Coord { x: a.x + dx * (bbox.max_y - a.y) / dy, y: bbox.max_y }
    } else if edge & BOTTOM != 0 {
        Coord { x: a.x + dx * (bbox.min_y - a.y) / dy, y: bbox.min_y }
    } else if edge & RIGHT != 0 {
        Coord { x: bbox.max_x, y: a.y + dy * (bbox.max_x - a.x) / dx }
    } else {
        Coord { x: bbox.min_x, y: a.y + dy * (bbox.min_x - a.x) / dx }
    }
}

/// Clip a polyline, starting a new part each time it leaves the box
fn clip_polyline(points: &[Coord<f64>], bbox: &BBox, parts: &mut Vec<LineString<f64>>) {
    if points.len() < 2 {
        return;
    }

    let mut code_a = outcode(points[0], bbox);
    let mut part: Vec<Coord<f64>> = Vec::new();

    for i in 1..points.len() {
        let mut a = points[i - 1];
        let mut b = points[i];
        let last_code = outcode(b, bbox);
        let mut code_b = last_code;

        loop {
            if code_a | code_b == 0 {
                // trivially accepted
                part.push(a);
                if code_b != last_code {
                    // left the box
                    part.push(b);
                    if i < points.len() - 1 {
                        parts.push(LineString::new(std::mem::take(&mut part)));
                    }
                } else if i == points.len() - 1 {
                    part.push(b);
                }
                break;
            } else if code_a & code_b != 0 {
                break;
            } else if code_a != 0 {
                a = intersect_edge(a, b, code_a, bbox);
                code_a = outcode(a, bbox);
            } else {
                b = intersect_edge(a, b, code_b, bbox);
                code_b = outcode(b, bbox);
            }
        }
        code_a = last_code;
    }

    if !part.is_empty() {
        parts.push(LineString::new(part));
    }
}

/// Clip a ring against one edge (Sutherland-Hodgman step)
fn clip_ring_edge(vertices: &[Coord<f64>], edge: u8, bbox: &BBox) -> Vec<Coord<f64>> {
    let mut output = Vec::with_capacity(vertices.len());
    let Some(&last) = vertices.last() else {
        return output;
    };

    let mut prev = last;
    let mut prev_inside = outcode(prev, bbox) & edge == 0;
    for &current in vertices {
        let inside = outcode(current, bbox) & edge == 0;
        if inside != prev_inside {
            output.push(intersect_edge(prev, current, edge, bbox));
        }
        if inside {
            output.push(current);
        }
        prev = current;
        prev_inside = inside;
    }
    output
}

/// Clip a closed ring, returning `None` when fewer than four positions remain
fn clip_ring(ring: &LineString<f64>, bbox: &BBox) -> Option<LineString<f64>> {
    let mut vertices: Vec<Coord<f64>> = ring.0.clone();

    // Remove closing vertex for the edge passes
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }

    for edge in [LEFT, RIGHT, BOTTOM, TOP] {
        vertices = clip_ring_edge(&vertices, edge, bbox);
        if vertices.is_empty() {
            return None;
        }
    }

    vertices.push(vertices[0]);
    (vertices.len() >= 4).then(|| LineString::new(vertices))
}

fn clip_polygon(poly: &Polygon<f64>, bbox: &BBox) -> Option<Polygon<f64>> {
    let exterior = clip_ring(poly.exterior(), bbox)?;
    let interiors = poly.interiors().iter().filter_map(|r| clip_ring(r, bbox)).collect();
    Some(Polygon::new(exterior, interiors))
}

fn lines_result(mut parts: Vec<LineString<f64>>) -> Geometry<f64> {
    if parts.len() == 1 {
        Geometry::LineString(parts.remove(0))
    } else {
        Geometry::MultiLineString(MultiLineString::new(parts))
    }
}

/// Clip a line or polygon to a bounding box.
///
/// Lines that leave and re-enter the box come back as multi-lines. Rings
/// with fewer than four positions after clipping are dropped; a polygon
/// whose exterior disappears comes back empty.
pub fn bbox_clip(geom: &Geometry<f64>, bbox: &BBox) -> Result<Geometry<f64>> {
    match geom {
        Geometry::Line(l) => {
            let mut parts = Vec::new();
            clip_polyline(&[l.start, l.end], bbox, &mut parts);
            Ok(lines_result(parts))
        }
        Geometry::LineString(ls) => {
            let mut parts = Vec::new();
            clip_polyline(&ls.0, bbox, &mut parts);
            Ok(lines_result(parts))
        }
        Geometry::MultiLineString(mls) => {
            let mut parts = Vec::new();
            for ls in &mls.0 {
                clip_polyline(&ls.0, bbox, &mut parts);
            }
            Ok(Geometry::MultiLineString(MultiLineString::new(parts)))
        }
        Geometry::Polygon(poly) => Ok(Geometry::Polygon(
            clip_polygon(poly, bbox).unwrap_or_else(|| Polygon::new(LineString::new(vec![]), vec![])),
        )),
        Geometry::MultiPolygon(mp) => Ok(Geometry::MultiPolygon(MultiPolygon::new(
            mp.0.iter().filter_map(|p| clip_polygon(p, bbox)).collect(),
        ))),
        Geometry::Rect(r) => bbox_clip(&Geometry::Polygon(r.to_polygon()), bbox),
        Geometry::Triangle(t) => bbox_clip(&Geometry::Polygon(t.to_polygon()), bbox),
        other => Err(Error::unsupported("bbox_clip", meta::geometry_type(other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{Area, Point};

    fn unit_box() -> BBox {
        BBox::new(0.0, 0.0, 10.0, 10.0)
    }

    fn square(min: f64, max: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(min, min), (max, min), (max, max), (min, max), (min, min)]),
            vec![],
        )
    }

    #[test]
    fn test_clip_polygon_fully_inside() {
        let poly = Geometry::Polygon(square(2.0, 8.0));
        assert_eq!(bbox_clip(&poly, &unit_box()).unwrap(), poly);
    }

    #[test]
    fn test_clip_polygon_partial() {
        let result = bbox_clip(&Geometry::Polygon(square(-5.0, 5.0)), &unit_box()).unwrap();
        let Geometry::Polygon(clipped) = result else {
            panic!("expected polygon");
        };
        assert_relative_eq!(clipped.unsigned_area(), 25.0);
        assert!(clipped.exterior().is_closed());
        for c in clipped.exterior().0.iter() {
            assert!(unit_box().contains_point(c.x, c.y), "({}, {}) outside box", c.x, c.y);
        }
    }

    #[test]
    fn test_clip_polygon_fully_outside() {
        let result = bbox_clip(&Geometry::Polygon(square(20.0, 30.0)), &unit_box()).unwrap();
        let Geometry::Polygon(clipped) = result else {
            panic!("expected polygon");
        };
        assert!(clipped.exterior().0.is_empty());
    }

    #[test]
    fn test_clip_hole_outside_dropped() {
        let poly = Polygon::new(square(-5.0, 20.0).exterior().clone(), vec![square(12.0, 15.0).exterior().clone()]);
        let Geometry::Polygon(clipped) = bbox_clip(&Geometry::Polygon(poly), &unit_box()).unwrap() else {
            panic!("expected polygon");
        };
        assert!(clipped.interiors().is_empty());
        assert_relative_eq!(clipped.unsigned_area(), 100.0);
    }

    #[test]
    fn test_clip_line_partial() {
        let line = Geometry::LineString(LineString::from(vec![(-5.0, 5.0), (15.0, 5.0)]));
        let result = bbox_clip(&line, &unit_box()).unwrap();
        assert_eq!(result, Geometry::LineString(LineString::from(vec![(0.0, 5.0), (10.0, 5.0)])));
    }

    #[test]
    fn test_clip_line_reenters() {
        let line = Geometry::LineString(LineString::from(vec![(-5.0, 5.0), (15.0, 5.0), (15.0, 8.0), (5.0, 8.0)]));
        let result = bbox_clip(&line, &unit_box()).unwrap();
        assert_eq!(
            result,
            Geometry::MultiLineString(MultiLineString::new(vec![
                LineString::from(vec![(0.0, 5.0), (10.0, 5.0)]),
                LineString::from(vec![(10.0, 8.0), (5.0, 8.0)]),
            ]))
        );
    }

    #[test]
    fn test_clip_line_fully_outside() {
        let line = Geometry::LineString(LineString::from(vec![(20.0, 20.0), (30.0, 30.0)]));
        let result = bbox_clip(&line, &unit_box()).unwrap();
        assert_eq!(result, Geometry::MultiLineString(MultiLineString::new(vec![])));
    }

    #[test]
    fn test_clip_point_unsupported() {
        assert!(bbox_clip(&Geometry::Point(Point::new(1.0, 1.0)), &unit_box()).is_err());
    }
}
