//! Segment and line intersections

use geo::{Coord, Geometry, Line, MultiPoint, Point};
use spatialkit_core::meta;

use crate::index::{line_bbox, BoxIndex};

/// Single intersection point of two segments, endpoints included.
///
/// Parallel and collinear segments return `None`.
pub(crate) fn segment_intersection(a: Line<f64>, b: Line<f64>) -> Option<Coord<f64>> {
    let (x1, y1, x2, y2) = (a.start.x, a.start.y, a.end.x, a.end.y);
    let (x3, y3, x4, y4) = (b.start.x, b.start.y, b.end.x, b.end.y);

    let denom = (y4 - y3) * (x2 - x1) - (x4 - x3) * (y2 - y1);
    if denom == 0.0 {
        return None;
    }
    let ua = ((x4 - x3) * (y1 - y3) - (y4 - y3) * (x1 - x3)) / denom;
    let ub = ((x2 - x1) * (y1 - y3) - (y2 - y1) * (x1 - x3)) / denom;

    if (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub) {
        Some(Coord {
            x: x1 + ua * (x2 - x1),
            y: y1 + ua * (y2 - y1),
        })
    } else {
        None
    }
}

/// Intersection points between the segments of two geometries.
///
/// Polygon rings are treated as lines. Duplicate points are reported once,
/// in the order they are found.
pub fn line_intersect(a: &Geometry<f64>, b: &Geometry<f64>) -> MultiPoint<f64> {
    let segs_a = meta::segments(a);
    let segs_b = meta::segments(b);
    MultiPoint::new(segment_crossings(&segs_a, &segs_b).into_iter().map(Point::from).collect())
}

/// Unique crossing points between two segment sets, R-tree accelerated
pub(crate) fn segment_crossings(segs_a: &[Line<f64>], segs_b: &[Line<f64>]) -> Vec<Coord<f64>> {
    let mut found: Vec<Coord<f64>> = Vec::new();
    let mut push = |c: Coord<f64>| {
        if !found.contains(&c) {
            found.push(c);
        }
    };

    if segs_a.len() == 1 && segs_b.len() == 1 {
        if let Some(c) = segment_intersection(segs_a[0], segs_b[0]) {
            push(c);
        }
        return found;
    }

    let index = BoxIndex::from_lines(segs_b);
    for seg in segs_a {
        for j in index.search(&line_bbox(seg)) {
            if let Some(c) = segment_intersection(*seg, segs_b[j]) {
                push(c);
            }
        }
    }
    found
}

/// Self-intersection points of a line or polygon.
///
/// Adjacent segments sharing a vertex are not reported, nor is the
/// closing vertex of a ring.
pub fn kinks(geom: &Geometry<f64>) -> MultiPoint<f64> {
    let mut found: Vec<Coord<f64>> = Vec::new();

    for part in meta::flatten(geom) {
        let rings: Vec<Vec<Line<f64>>> = match &part {
            Geometry::LineString(ls) => vec![ls.lines().collect()],
            Geometry::Polygon(p) => meta::rings(p).map(|r| r.lines().collect()).collect(),
            _ => continue,
        };
        let closed: Vec<bool> = match &part {
            Geometry::Polygon(_) => vec![true; rings.len()],
            _ => vec![false],
        };

        for (ri, ring_a) in rings.iter().enumerate() {
            for (rj, ring_b) in rings.iter().enumerate().skip(ri) {
                for (i, seg_a) in ring_a.iter().enumerate() {
                    for (j, seg_b) in ring_b.iter().enumerate() {
                        if ri == rj && !is_distinct_pair(i, j, ring_a.len(), closed[ri]) {
                            continue;
                        }
                        if let Some(c) = segment_intersection(*seg_a, *seg_b) {
                            if !found.contains(&c) {
                                found.push(c);
                            }
                        }
                    }
                }
            }
        }
    }

    MultiPoint::new(found.into_iter().map(Point::from).collect())
}

/// Segments `i < j` of one ring that do not share a vertex
fn is_distinct_pair(i: usize, j: usize, len: usize, closed: bool) -> bool {
    if j <= i + 1 {
        return false;
    }
    !(closed && i == 0 && j == len - 1)
}
