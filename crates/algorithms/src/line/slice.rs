//! Sub-lines between two points or two distances

use geo::{Coord, Geometry, LineString, Point};
use spatialkit_core::{Error, Result, Units};

use crate::measurement::{bearing, destination, distance, nearest_point_on_line};

/// Portion of a line between the points nearest to `start` and `stop`.
///
/// The points need not lie on the line; the result always runs in the
/// line's own direction.
pub fn line_slice(start: Point<f64>, stop: Point<f64>, line: &LineString<f64>) -> Result<LineString<f64>> {
    let geom = Geometry::LineString(line.clone());
    let start_vertex = nearest_point_on_line(&geom, start, Units::Kilometers)?;
    let stop_vertex = nearest_point_on_line(&geom, stop, Units::Kilometers)?;

    let index_of = |f: &spatialkit_core::Feature| f.property_f64("index").unwrap_or(0.0) as usize;
    let (first, last) = if index_of(&start_vertex) <= index_of(&stop_vertex) {
        (start_vertex, stop_vertex)
    } else {
        (stop_vertex, start_vertex)
    };

    let mut coords: Vec<Coord<f64>> = Vec::new();
    coords.extend(first.as_point().map(|p| p.0));
    coords.extend(line.0.iter().take(index_of(&last) + 1).skip(index_of(&first) + 1).copied());
    coords.extend(last.as_point().map(|p| p.0));

    Ok(LineString::new(coords))
}

/// Portion of a line between two distances measured from its start.
///
/// A `stop` past the end clips to the last vertex; a `start` past the end
/// is an error.
pub fn line_slice_along(line: &LineString<f64>, start: f64, stop: f64, units: Units) -> Result<LineString<f64>> {
    let coords = &line.0;
    if coords.len() < 2 {
        return Err(Error::InvalidGeometry("line must contain at least 2 positions".into()));
    }

    let mut slice: Vec<Coord<f64>> = Vec::new();
    let mut travelled = 0.0;
    // point `overshot` before coords[i], walking back along the previous segment
    let interpolate = |i: usize, overshot: f64| -> Coord<f64> {
        let direction = bearing(coords[i].into(), coords[i - 1].into(), false) - 180.0;
        destination(coords[i].into(), overshot, direction, units).0
    };

    for i in 0..coords.len() {
        if start >= travelled && i == coords.len() - 1 {
            break;
        }
        if travelled > start && slice.is_empty() {
            slice.push(interpolate(i, start - travelled));
        }
        if travelled >= stop {
            let overshot = stop - travelled;
            if overshot == 0.0 {
                slice.push(coords[i]);
            } else {
                slice.push(interpolate(i, overshot));
            }
            return Ok(LineString::new(slice));
        }
        if travelled >= start {
            slice.push(coords[i]);
        }
        if i == coords.len() - 1 {
            return Ok(LineString::new(slice));
        }
        travelled += distance(coords[i].into(), coords[i + 1].into(), units);
    }

    if travelled < start {
        return Err(Error::invalid_parameter("start", start, "start position is beyond line"));
    }
    let last = coords[coords.len() - 1];
    Ok(LineString::new(vec![last, last]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use spatialkit_core::units::length_to_degrees;

    fn equator() -> LineString<f64> {
        LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)])
    }

    #[test]
    fn test_line_slice() {
        let sliced = line_slice(Point::new(0.5, 0.1), Point::new(2.5, -0.1), &equator()).unwrap();
        let c = &sliced.0;

        assert_eq!(c.len(), 4);
        assert_relative_eq!(c[0].x, 0.5, epsilon = 1e-6);
        assert_eq!(c[1], Coord { x: 1.0, y: 0.0 });
        assert_eq!(c[2], Coord { x: 2.0, y: 0.0 });
        assert_relative_eq!(c[3].x, 2.5, epsilon = 1e-6);
    }

    #[test]
    fn test_line_slice_reversed_points() {
        let sliced = line_slice(Point::new(2.5, 0.0), Point::new(0.5, 0.0), &equator()).unwrap();
        assert!(sliced.0[0].x < sliced.0[sliced.0.len() - 1].x);
    }

    #[test]
    fn test_line_slice_along() {
        let km = 111.19508023353292;
        let sliced = line_slice_along(&equator(), 0.5 * km, 2.5 * km, Units::Kilometers).unwrap();
        let c = &sliced.0;

        assert_eq!(c.len(), 4);
        assert_relative_eq!(c[0].x, 0.5, epsilon = 1e-9);
        assert_eq!(c[1], Coord { x: 1.0, y: 0.0 });
        assert_relative_eq!(c[3].x, 2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_line_slice_along_stop_past_end() {
        let sliced = line_slice_along(&equator(), 100.0, 10_000.0, Units::Kilometers).unwrap();
        assert_relative_eq!(sliced.0[0].x, length_to_degrees(100.0, Units::Kilometers), epsilon = 1e-9);
        assert_eq!(sliced.0.last(), Some(&Coord { x: 3.0, y: 0.0 }));
    }

    #[test]
    fn test_line_slice_along_start_past_end() {
        assert!(line_slice_along(&equator(), 10_000.0, 20_000.0, Units::Kilometers).is_err());
    }
}
