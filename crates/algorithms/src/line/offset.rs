use geo::{Coord, Geometry, Line, LineString, MultiLineString};
use spatialkit_core::units::length_to_degrees;
use spatialkit_core::{meta, Error, Result, Units};

/// Parallel copy of a line at `distance`; positive distances offset to the right.
///
/// Offsetting happens in degrees, and consecutive offset segments are joined
/// at the intersection of their supporting lines.
pub fn line_offset(geom: &Geometry<f64>, distance: f64, units: Units) -> Result<Geometry<f64>> {
    let offset = length_to_degrees(distance, units);
    match geom {
        Geometry::LineString(ls) => Ok(Geometry::LineString(offset_line(ls, offset))),
        Geometry::MultiLineString(mls) => Ok(Geometry::MultiLineString(MultiLineString::new(
            mls.0.iter().map(|ls| offset_line(ls, offset)).collect(),
        ))),
        other => Err(Error::unsupported("line_offset", meta::geometry_type(other))),
    }
}

fn offset_line(line: &LineString<f64>, offset: f64) -> LineString<f64> {
    let coords = &line.0;
    let mut segments: Vec<Line<f64>> = Vec::with_capacity(coords.len().saturating_sub(1));
    let mut out: Vec<Coord<f64>> = Vec::with_capacity(coords.len());

    for (i, w) in coords.windows(2).enumerate() {
        let mut segment = offset_segment(w[0], w[1], offset);
        if i > 0 {
            let previous = &mut segments[i - 1];
            if let Some(joint) = line_intersection(segment, *previous) {
                previous.end = joint;
                segment.start = joint;
            }
            out.push(previous.start);
            if i == coords.len() - 2 {
                out.push(segment.start);
                out.push(segment.end);
            }
        }
        if coords.len() == 2 {
            out.push(segment.start);
            out.push(segment.end);
        }
        segments.push(segment);
    }
    LineString::new(out)
}

fn offset_segment(a: Coord<f64>, b: Coord<f64>, offset: f64) -> Line<f64> {
    let len = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
    let dx = offset * (b.y - a.y) / len;
    let dy = offset * (a.x - b.x) / len;
    Line::new(
        Coord { x: a.x + dx, y: a.y + dy },
        Coord { x: b.x + dx, y: b.y + dy },
    )
}

/// Intersection of the infinite lines through two segments
fn line_intersection(a: Line<f64>, b: Line<f64>) -> Option<Coord<f64>> {
    let r = a.delta();
    let s = b.delta();
    let cross = r.x * s.y - s.x * r.y;
    if cross == 0.0 {
        return None;
    }
    let qp = b.start - a.start;
    let t = (qp.x * s.y - s.x * qp.y) / cross;
    Some(a.start + r * t)
}
