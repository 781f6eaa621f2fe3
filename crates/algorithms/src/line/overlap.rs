//! Shared stretches of two lines

use geo::{Coord, Geometry, Line, LineString, MultiLineString};
use spatialkit_core::{meta, Result, Units};

use crate::boolean::boolean_point_on_line;
use crate::index::{line_bbox, BoxIndex};
use crate::measurement::nearest_point_on_line;

/// Segments of `b` that overlap segments of `a`, merged into runs.
///
/// With `tolerance > 0` (kilometers), segments whose endpoints lie within
/// `tolerance` of each other count as overlapping.
pub fn line_overlap(a: &Geometry<f64>, b: &Geometry<f64>, tolerance: f64) -> Result<MultiLineString<f64>> {
    let segments_a = meta::segments(a);
    let index = BoxIndex::from_lines(&segments_a);

    let mut runs: Vec<LineString<f64>> = Vec::new();
    let mut current: Option<LineString<f64>> = None;
    let mut additional: Vec<LineString<f64>> = Vec::new();

    for segment in meta::segments(b) {
        let mut overlaps = false;

        for j in index.search(&line_bbox(&segment)) {
            if overlaps {
                break;
            }
            let candidate = segments_a[j];

            if same_segment(segment, candidate) || covers(candidate, segment, tolerance)? {
                overlaps = true;
                extend_run(&mut current, segment);
            } else if covers(segment, candidate, tolerance)? {
                match current.as_mut() {
                    Some(run) => {
                        if !concat_segment(run, candidate) {
                            additional.push(as_line_string(candidate));
                        }
                    }
                    None => current = Some(as_line_string(candidate)),
                }
            }
        }

        if !overlaps {
            if let Some(run) = current.take() {
                runs.push(run);
                runs.append(&mut additional);
            }
        }
    }
    runs.extend(current);

    Ok(MultiLineString::new(runs))
}

fn as_line_string(segment: Line<f64>) -> LineString<f64> {
    LineString::new(vec![segment.start, segment.end])
}

fn extend_run(current: &mut Option<LineString<f64>>, segment: Line<f64>) {
    match current.as_mut() {
        Some(run) => {
            concat_segment(run, segment);
        }
        None => *current = Some(as_line_string(segment)),
    }
}

fn same_segment(a: Line<f64>, b: Line<f64>) -> bool {
    (a.start == b.start && a.end == b.end) || (a.start == b.end && a.end == b.start)
}

/// Whether both endpoints of `inner` lie on `outer`
fn covers(outer: Line<f64>, inner: Line<f64>, tolerance: f64) -> Result<bool> {
    let ends = [inner.start, inner.end];
    if tolerance == 0.0 {
        let outer = as_line_string(outer);
        return Ok(ends.iter().all(|c| boolean_point_on_line((*c).into(), &outer, false)));
    }

    let outer = Geometry::LineString(as_line_string(outer));
    for c in ends {
        let nearest = nearest_point_on_line(&outer, c.into(), Units::Kilometers)?;
        if nearest.property_f64("dist").map_or(true, |d| d > tolerance) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Attach a segment sharing an endpoint with either end of the run
fn concat_segment(run: &mut LineString<f64>, segment: Line<f64>) -> bool {
    let Some((&start, &end)) = run.0.first().zip(run.0.last()) else {
        return false;
    };
    let prepend = |run: &mut LineString<f64>, c: Coord<f64>| run.0.insert(0, c);

    if segment.start == start {
        prepend(run, segment.end);
    } else if segment.start == end {
        run.0.push(segment.end);
    } else if segment.end == start {
        prepend(run, segment.start);
    } else if segment.end == end {
        run.0.push(segment.start);
    } else {
        return false;
    }
    true
}
