//! Point-to-line distances and nearest-point searches

use geo::{Coord, Geometry, Line, LineString, Point};
use spatialkit_core::units::{bearing_to_azimuth, convert_length, degrees_to_radians};
use spatialkit_core::{Error, Feature, FeatureCollection, Result, Units};

use super::distance::{bearing, destination, distance};
use super::rhumb::{rhumb_bearing, rhumb_distance};
use crate::line::segment_intersection;
use crate::transform::{to_mercator_coord, to_wgs84_coord};

/// Parameters for [`point_to_line_distance`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PointToLineParams {
    /// Output units
    pub units: Units,
    /// Measure on the Mercator plane (rhumb lines) instead of great circles
    pub mercator: bool,
}

/// Minimum distance from a point to any segment of a line.
///
/// The foot of the perpendicular is used when it falls inside a segment,
/// otherwise the nearer segment end.
pub fn point_to_line_distance(pt: Point<f64>, line: &LineString<f64>, params: PointToLineParams) -> Result<f64> {
    if line.0.len() < 2 {
        return Err(Error::InvalidGeometry(
            "line must contain at least 2 positions".into(),
        ));
    }

    Ok(line
        .lines()
        .map(|seg| distance_to_segment(pt, seg.start.into(), seg.end.into(), params))
        .fold(f64::INFINITY, f64::min))
}

fn distance_to_segment(p: Point<f64>, a: Point<f64>, b: Point<f64>, params: PointToLineParams) -> f64 {
    let mercator = params.mercator;
    let measure = |from: Point<f64>, to: Point<f64>| {
        if mercator {
            euclidean_distance(from, to, params.units)
        } else {
            distance(from, to, params.units)
        }
    };
    let azimuth = |from: Point<f64>, to: Point<f64>| {
        let b = if mercator { rhumb_bearing(from, to, false) } else { bearing(from, to, false) };
        bearing_to_azimuth(b)
    };

    let distance_ap = measure(a, p);
    let azimuth_ab = azimuth(a, b);
    let mut angle_a = (azimuth(a, p) - azimuth_ab).abs();
    if angle_a > 180.0 {
        angle_a = (angle_a - 360.0).abs();
    }
    // foot of the perpendicular falls before A
    if angle_a > 90.0 {
        return distance_ap;
    }

    let azimuth_ba = (azimuth_ab + 180.0) % 360.0;
    let mut angle_b = (azimuth(b, p) - azimuth_ba).abs();
    if angle_b > 180.0 {
        angle_b = (angle_b - 360.0).abs();
    }
    // ... or past B
    if angle_b > 90.0 {
        return measure(p, b);
    }

    if mercator {
        mercator_perpendicular(a, b, p, params.units)
    } else {
        distance_ap * degrees_to_radians(angle_a).sin()
    }
}

/// Longitude shift that brings points across the antimeridian back into range
fn antimeridian_delta(points: &[Point<f64>]) -> f64 {
    if points.iter().any(|p| p.x().abs() >= 180.0) {
        if points.iter().any(|p| p.x() > 0.0) {
            -180.0
        } else {
            180.0
        }
    } else {
        0.0
    }
}

fn mercator_perpendicular(a: Point<f64>, b: Point<f64>, p: Point<f64>, units: Units) -> f64 {
    let delta = antimeridian_delta(&[a, b, p]);
    let shift = |pt: Point<f64>| to_mercator_coord(Coord { x: pt.x() + delta, y: pt.y() });

    let ma = shift(a);
    let mb = shift(b);
    let mp = shift(p);

    let px = mb.x - ma.x;
    let py = mb.y - ma.y;
    let u = ((mp.x - ma.x) * px + (mp.y - ma.y) * py) / (px * px + py * py);
    let mut h = to_wgs84_coord(Coord { x: ma.x + u * px, y: ma.y + u * py });
    h.x -= delta;

    rhumb_distance(p, h.into(), units)
}

fn euclidean_distance(from: Point<f64>, to: Point<f64>, units: Units) -> f64 {
    let delta = antimeridian_delta(&[from, to]);
    let p1 = to_mercator_coord(Coord { x: from.x() + delta, y: from.y() });
    let p2 = to_mercator_coord(Coord { x: to.x() + delta, y: to.y() });
    let d = ((p1.x - p2.x).powi(2) + (p1.y - p2.y).powi(2)).sqrt();
    convert_length(d, Units::Meters, units)
}

/// Closest point on a (multi)line to `pt`.
///
/// The returned feature carries `dist` (distance to `pt`), `index` (segment
/// index of the match) and `location` (distance along the line) properties.
pub fn nearest_point_on_line(lines: &Geometry<f64>, pt: Point<f64>, units: Units) -> Result<Feature> {
    let parts: Vec<&LineString<f64>> = match lines {
        Geometry::LineString(ls) => vec![ls],
        Geometry::MultiLineString(mls) => mls.0.iter().collect(),
        other => {
            return Err(Error::unsupported(
                "nearest_point_on_line",
                spatialkit_core::meta::geometry_type(other),
            ))
        }
    };

    let mut best: Option<(Point<f64>, f64, usize, f64)> = None;
    let mut travelled = 0.0;
    let mut consider = |candidate: Point<f64>, dist: f64, index: usize, location: f64| {
        if best.map_or(true, |(_, d, _, _)| dist < d) {
            best = Some((candidate, dist, index, location));
        }
    };

    for line in parts {
        for (i, seg) in line.lines().enumerate() {
            let start: Point<f64> = seg.start.into();
            let stop: Point<f64> = seg.end.into();
            let start_dist = distance(pt, start, units);
            let stop_dist = distance(pt, stop, units);
            let section = distance(start, stop, units);

            let height = start_dist.max(stop_dist);
            let direction = bearing(start, stop, false);
            let perp1 = destination(pt, height, direction + 90.0, units);
            let perp2 = destination(pt, height, direction - 90.0, units);
            let foot = segment_intersection(Line::new(perp1.0, perp2.0), seg);

            consider(start, start_dist, i, travelled);
            consider(stop, stop_dist, i + 1, travelled + section);
            if let Some(foot) = foot {
                let foot: Point<f64> = foot.into();
                consider(foot, distance(pt, foot, units), i, travelled + distance(start, foot, units));
            }

            travelled += section;
        }
    }

    let (point, dist, index, location) =
        best.ok_or(Error::EmptyInput("nearest_point_on_line requires at least one segment"))?;
    let mut feature = Feature::new(point);
    feature.set_property("dist", dist);
    feature.set_property("index", index);
    feature.set_property("location", location);
    Ok(feature)
}

/// Closest point feature of `points` to `target`.
///
/// Adds `featureIndex` and `distanceToPoint` (kilometers) properties to
/// a copy of the winning feature.
pub fn nearest_point(target: Point<f64>, points: &FeatureCollection) -> Result<Feature> {
    let (index, feature, dist) = points
        .iter()
        .enumerate()
        .filter_map(|(i, f)| f.as_point().map(|p| (i, f, distance(target, p, Units::Kilometers))))
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .ok_or(Error::EmptyInput("points must contain at least one point"))?;

    let mut nearest = feature.clone();
    nearest.set_property("featureIndex", index);
    nearest.set_property("distanceToPoint", dist);
    Ok(nearest)
}

/// Point feature of `points` closest to `line`, with a `dist` property
pub fn nearest_point_to_line(points: &FeatureCollection, line: &LineString<f64>, units: Units) -> Result<Feature> {
    let params = PointToLineParams { units, mercator: false };
    let mut best: Option<(&Feature, f64)> = None;

    for feature in points {
        let Some(p) = feature.as_point() else { continue };
        let d = point_to_line_distance(p, line, params)?;
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((feature, d));
        }
    }

    let (feature, dist) = best.ok_or(Error::EmptyInput("points must contain features"))?;
    let mut nearest = feature.clone();
    nearest.set_property("dist", dist);
    Ok(nearest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn elbow() -> LineString<f64> {
        LineString::from(vec![(1.0, 0.0), (1.0, 1.0), (2.0, 1.0)])
    }

    #[test]
    fn test_point_to_line_distance_perpendicular() {
        let d = point_to_line_distance(Point::new(0.0, 0.5), &elbow(), PointToLineParams::default()).unwrap();
        assert_relative_eq!(d, 111.19225744135184, epsilon = 1e-8);
    }

    #[test]
    fn test_point_to_line_distance_mercator() {
        let params = PointToLineParams { units: Units::Kilometers, mercator: true };
        let d = point_to_line_distance(Point::new(0.0, 0.5), &elbow(), params).unwrap();
        assert_relative_eq!(d, 111.19084626559842, epsilon = 1e-6);
    }

    #[test]
    fn test_point_to_line_distance_beyond_start() {
        let d = point_to_line_distance(Point::new(-1.0, -1.0), &elbow(), PointToLineParams::default()).unwrap();
        let to_start = distance(Point::new(-1.0, -1.0), Point::new(1.0, 0.0), Units::Kilometers);
        assert_relative_eq!(d, to_start, epsilon = 1e-9);
    }

    #[test]
    fn test_point_to_line_distance_rejects_degenerate_line() {
        let line = LineString::from(vec![(0.0, 0.0)]);
        assert!(point_to_line_distance(Point::new(1.0, 1.0), &line, PointToLineParams::default()).is_err());
    }

    #[test]
    fn test_nearest_point_on_line_perpendicular_foot() {
        let line = Geometry::LineString(LineString::from(vec![(0.0, 0.0), (2.0, 0.0)]));
        let snapped = nearest_point_on_line(&line, Point::new(1.0, 1.0), Units::Kilometers).unwrap();

        let p = snapped.as_point().unwrap();
        assert_relative_eq!(p.x(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.y(), 0.0, epsilon = 1e-9);
        assert_eq!(snapped.property_f64("index"), Some(0.0));
        let location = snapped.property_f64("location").unwrap();
        assert_relative_eq!(location, distance(Point::new(0.0, 0.0), p, Units::Kilometers), epsilon = 1e-9);
    }

    #[test]
    fn test_nearest_point_on_line_vertex() {
        let line = Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]));
        let snapped = nearest_point_on_line(&line, Point::new(2.0, 2.0), Units::Kilometers).unwrap();
        assert_eq!(snapped.as_point(), Some(Point::new(1.0, 1.0)));
        assert_eq!(snapped.property_f64("index"), Some(2.0));
    }

    #[test]
    fn test_nearest_point() {
        let fc: FeatureCollection = vec![
            Feature::new(Point::new(10.0, 10.0)),
            Feature::new(Point::new(1.0, 1.0)),
            Feature::new(Point::new(-5.0, 3.0)),
        ]
        .into();
        let nearest = nearest_point(Point::new(0.0, 0.0), &fc).unwrap();
        assert_eq!(nearest.as_point(), Some(Point::new(1.0, 1.0)));
        assert_eq!(nearest.property_f64("featureIndex"), Some(1.0));
        assert!(nearest_point(Point::new(0.0, 0.0), &FeatureCollection::new()).is_err());
    }

    #[test]
    fn test_nearest_point_to_line() {
        let fc: FeatureCollection = vec![
            Feature::new(Point::new(0.0, 0.5)),
            Feature::new(Point::new(1.5, 1.2)),
            Feature::new(Point::new(3.0, 3.0)),
        ]
        .into();
        let nearest = nearest_point_to_line(&fc, &elbow(), Units::Kilometers).unwrap();
        assert_eq!(nearest.as_point(), Some(Point::new(1.5, 1.2)));
        assert_relative_eq!(nearest.property_f64("dist").unwrap(), 22.235064905624927, epsilon = 1e-8);
    }
}
