//! Splitting a line at points or at crossings with another geometry

use geo::{Coord, Geometry, Line, LineString, Point};
use spatialkit_core::{bbox, meta, BBox, Error, Result, Units};
use tracing::trace;

use super::intersect::line_intersect;
use crate::index::BoxIndex;
use crate::measurement::nearest_point_on_line;
use crate::shapes::square;
use crate::transform::{truncate, TruncateParams};

/// Split a line by a point, points, lines or polygons.
///
/// Splitter coordinates are rounded to 7 decimals first. Line and polygon
/// splitters split the line at every crossing with their boundary.
pub fn line_split(line: &LineString<f64>, splitter: &Geometry<f64>) -> Result<Vec<LineString<f64>>> {
    let splitter = truncate(splitter, TruncateParams { precision: 7 });

    match &splitter {
        Geometry::Point(p) => Ok(split_line_with_point(line, *p)),
        Geometry::MultiPoint(mp) => split_line_with_points(line, &mp.0),
        Geometry::LineString(_)
        | Geometry::MultiLineString(_)
        | Geometry::Polygon(_)
        | Geometry::MultiPolygon(_)
        | Geometry::Line(_)
        | Geometry::Rect(_)
        | Geometry::Triangle(_) => {
            let crossings = line_intersect(&Geometry::LineString(line.clone()), &splitter);
            trace!(crossings = crossings.0.len(), "splitting line at crossings");
            split_line_with_points(line, &crossings.0)
        }
        Geometry::GeometryCollection(_) => Err(Error::unsupported("line_split", "GeometryCollection")),
    }
}

fn split_line_with_points(line: &LineString<f64>, points: &[Point<f64>]) -> Result<Vec<LineString<f64>>> {
    let mut results: Vec<LineString<f64>> = Vec::new();

    for (i, pt) in points.iter().enumerate() {
        if i == 0 {
            results = split_line_with_point(line, *pt);
            continue;
        }

        let boxes: Vec<BBox> = results.iter().map(piece_bbox).collect::<Result<_>>()?;
        let candidates = BoxIndex::new(boxes).search(&BBox::from_coord(pt.0));
        if candidates.is_empty() {
            continue;
        }

        let closest = closest_line(*pt, &candidates, |j| LineString::clone(&results[j]))?;
        let piece = results.remove(candidates[closest]);
        results.extend(split_line_with_point(&piece, *pt));
    }

    if results.is_empty() {
        results.push(line.clone());
    }
    Ok(results)
}

fn piece_bbox(piece: &LineString<f64>) -> Result<BBox> {
    bbox(&Geometry::LineString(piece.clone()))
        .map(|bb| square(&bb))
        .ok_or(Error::InvalidGeometry("split produced an empty line".into()))
}

fn split_line_with_point(line: &LineString<f64>, splitter: Point<f64>) -> Vec<LineString<f64>> {
    let (Some(&first), Some(&last)) = (line.0.first(), line.0.last()) else {
        return vec![line.clone()];
    };
    if meta::coords_equal(first, splitter.0) || meta::coords_equal(last, splitter.0) {
        return vec![line.clone()];
    }

    let segments: Vec<Line<f64>> = line.lines().collect();
    let candidates = BoxIndex::from_lines(&segments).search(&BBox::from_coord(splitter.0));
    if candidates.is_empty() {
        return vec![line.clone()];
    }
    let Ok(closest) = closest_line(splitter, &candidates, |j| {
        LineString::new(vec![segments[j].start, segments[j].end])
    }) else {
        return vec![line.clone()];
    };
    let closest = candidates[closest];

    let mut results = Vec::new();
    let mut current: Vec<Coord<f64>> = vec![first];
    for (i, seg) in segments.iter().enumerate() {
        if i == closest {
            current.push(splitter.0);
            results.push(LineString::new(std::mem::take(&mut current)));
            current.push(splitter.0);
            if !meta::coords_equal(splitter.0, seg.end) {
                current.push(seg.end);
            }
        } else {
            current.push(seg.end);
        }
    }
    if current.len() > 1 {
        results.push(LineString::new(current));
    }
    results
}

/// Position within `candidates` of the line nearest to `pt`
fn closest_line(
    pt: Point<f64>,
    candidates: &[usize],
    line_at: impl Fn(usize) -> LineString<f64>,
) -> Result<usize> {
    if candidates.len() == 1 {
        return Ok(0);
    }
    let mut best = (0, f64::INFINITY);
    for (k, &j) in candidates.iter().enumerate() {
        let nearest = nearest_point_on_line(&Geometry::LineString(line_at(j)), pt, Units::Kilometers)?;
        let dist = nearest.property_f64("dist").unwrap_or(f64::INFINITY);
        if dist < best.1 {
            best = (k, dist);
        }
    }
    Ok(best.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, MultiPoint};

    fn line() -> LineString<f64> {
        LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)])
    }

    #[test]
    fn test_split_by_point() {
        let parts = line_split(&line(), &Geometry::Point(Point::new(2.0, 0.0))).unwrap();
        assert_eq!(
            parts,
            vec![
                LineString::from(vec![(0.0, 0.0), (2.0, 0.0)]),
                LineString::from(vec![(2.0, 0.0), (4.0, 0.0), (4.0, 4.0)]),
            ]
        );
    }

    #[test]
    fn test_split_by_endpoint_is_noop() {
        let parts = line_split(&line(), &Geometry::Point(Point::new(0.0, 0.0))).unwrap();
        assert_eq!(parts, vec![line()]);
    }

    #[test]
    fn test_split_by_vertex() {
        let parts = line_split(&line(), &Geometry::Point(Point::new(4.0, 0.0))).unwrap();
        assert_eq!(
            parts,
            vec![
                LineString::from(vec![(0.0, 0.0), (4.0, 0.0)]),
                LineString::from(vec![(4.0, 0.0), (4.0, 4.0)]),
            ]
        );
    }

    #[test]
    fn test_split_by_multipoint() {
        let splitter = Geometry::MultiPoint(MultiPoint::from(vec![(1.0, 0.0), (4.0, 2.0)]));
        let parts = line_split(&line(), &splitter).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]));
        assert!(parts.contains(&LineString::from(vec![(1.0, 0.0), (4.0, 0.0), (4.0, 2.0)])));
        assert!(parts.contains(&LineString::from(vec![(4.0, 2.0), (4.0, 4.0)])));
    }

    #[test]
    fn test_split_by_polygon() {
        let splitter = Geometry::Polygon(polygon![
            (x: 1.0, y: -1.0), (x: 3.0, y: -1.0), (x: 3.0, y: 1.0), (x: 1.0, y: 1.0), (x: 1.0, y: -1.0)
        ]);
        let parts = line_split(&line(), &splitter).unwrap();
        assert_eq!(parts.len(), 3);
        assert!(parts.contains(&LineString::from(vec![(1.0, 0.0), (3.0, 0.0)])));
    }

    #[test]
    fn test_split_rejects_collection() {
        let splitter = Geometry::GeometryCollection(geo::GeometryCollection(vec![]));
        assert!(line_split(&line(), &splitter).is_err());
    }
}
