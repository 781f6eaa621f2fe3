use geo::{Coord, LineString, Point};

/// Which segment endpoints are excluded when testing a point against a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exclude {
    None,
    Start,
    End,
    Both,
}

/// Whether a point lies on a line.
///
/// With `ignore_end_vertices`, the first and last vertex of the line do
/// not count.
pub fn boolean_point_on_line(pt: Point<f64>, line: &LineString<f64>, ignore_end_vertices: bool) -> bool {
    let coords = &line.0;
    if coords.len() < 2 {
        return false;
    }
    let last = coords.len() - 2;
    (0..=last).any(|i| {
        let exclude = if !ignore_end_vertices {
            Exclude::None
        } else if i == 0 && i == last {
            Exclude::Both
        } else if i == 0 {
            Exclude::Start
        } else if i == last {
            Exclude::End
        } else {
            Exclude::None
        };
        is_point_on_segment(coords[i], coords[i + 1], pt.0, exclude)
    })
}

/// Exact collinearity test followed by a range check along the dominant axis
pub(crate) fn is_point_on_segment(start: Coord<f64>, end: Coord<f64>, pt: Coord<f64>, exclude: Exclude) -> bool {
    let dxc = pt.x - start.x;
    let dyc = pt.y - start.y;
    let dxl = end.x - start.x;
    let dyl = end.y - start.y;
    if dxc * dyl - dyc * dxl != 0.0 {
        return false;
    }

    let (lo, hi, v) = if dxl.abs() >= dyl.abs() {
        if dxl > 0.0 {
            (start.x, end.x, pt.x)
        } else {
            (end.x, start.x, pt.x)
        }
    } else if dyl > 0.0 {
        (start.y, end.y, pt.y)
    } else {
        (end.y, start.y, pt.y)
    };
    let forward = if dxl.abs() >= dyl.abs() { dxl > 0.0 } else { dyl > 0.0 };
    // which bound belongs to the segment start depends on direction
    let (exclude_lo, exclude_hi) = match (exclude, forward) {
        (Exclude::None, _) => (false, false),
        (Exclude::Both, _) => (true, true),
        (Exclude::Start, true) | (Exclude::End, false) => (true, false),
        (Exclude::Start, false) | (Exclude::End, true) => (false, true),
    };

    let above = if exclude_lo { lo < v } else { lo <= v };
    let below = if exclude_hi { v < hi } else { v <= hi };
    above && below
}
