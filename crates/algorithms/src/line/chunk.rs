use geo::{Geometry, LineString};
use spatialkit_core::{meta, Error, Result, Units};

use super::slice::line_slice_along;
use crate::measurement::length;

/// Divide every line of a geometry into pieces of `segment_length`.
///
/// The last piece of each line holds the remainder. With `reverse`, lines
/// are chunked from their last vertex.
pub fn line_chunk(geom: &Geometry<f64>, segment_length: f64, units: Units, reverse: bool) -> Result<Vec<LineString<f64>>> {
    if !(segment_length > 0.0) {
        return Err(Error::invalid_parameter(
            "segment_length",
            segment_length,
            "segment length must be greater than 0",
        ));
    }

    let mut chunks = Vec::new();
    for part in meta::flatten(geom) {
        let Geometry::LineString(mut line) = part else {
            return Err(Error::unsupported("line_chunk", meta::geometry_type(&part)));
        };
        if reverse {
            line.0.reverse();
        }

        let total = length(&Geometry::LineString(line.clone()), units);
        if total <= segment_length {
            chunks.push(line);
            continue;
        }

        let ratio = total / segment_length;
        let count = if ratio.fract() == 0.0 { ratio as usize } else { ratio.floor() as usize + 1 };
        for i in 0..count {
            let start = segment_length * i as f64;
            chunks.push(line_slice_along(&line, start, start + segment_length, units)?);
        }
    }
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{Coord, MultiLineString};

    const KM_PER_DEGREE: f64 = 111.19508023353292;

    fn equator() -> LineString<f64> {
        LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)])
    }

    #[test]
    fn test_line_chunk_with_remainder() {
        let chunks = line_chunk(&Geometry::LineString(equator()), 1.2 * KM_PER_DEGREE, Units::Kilometers, false).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].0[0], Coord { x: 0.0, y: 0.0 });
        assert_relative_eq!(chunks[0].0.last().unwrap().x, 1.2, epsilon = 1e-9);
        assert_eq!(chunks[2].0.last(), Some(&Coord { x: 3.0, y: 0.0 }));
    }

    #[test]
    fn test_line_chunk_reverse() {
        let chunks = line_chunk(&Geometry::LineString(equator()), 2.0 * KM_PER_DEGREE, Units::Kilometers, true).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].0[0], Coord { x: 3.0, y: 0.0 });
    }

    #[test]
    fn test_line_chunk_short_line_and_multi() {
        let multi = Geometry::MultiLineString(MultiLineString::new(vec![
            equator(),
            LineString::from(vec![(0.0, 1.0), (0.5, 1.0)]),
        ]));
        let chunks = line_chunk(&multi, 1000.0, Units::Kilometers, false).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].0.len(), 2);
    }

    #[test]
    fn test_line_chunk_rejects_zero_length() {
        assert!(line_chunk(&Geometry::LineString(equator()), 0.0, Units::Kilometers, false).is_err());
    }
}
