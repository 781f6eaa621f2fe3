use geo::{Coord, LineString, MultiLineString};
use spatialkit_core::{Algorithm, Error, Feature, FeatureCollection, Result};
use std::collections::HashMap;
use tracing::debug;

use super::field::{cell_corners, cell_edges, EdgeId, Field};
use super::{band_properties, ContourParams};
use crate::maybe_rayon::*;

/// Contour lines from a point grid
pub struct Isolines;

impl Algorithm for Isolines {
    type Input = (FeatureCollection, Vec<f64>);
    type Output = FeatureCollection;
    type Params = ContourParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Isolines"
    }

    fn description(&self) -> &'static str {
        "Contour lines at each break value using marching squares"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        isolines(&input.0, &input.1, &params)
    }
}

/// Contour lines of a rectangular point grid, one multi-line per break.
///
/// Each feature carries the common properties, the matching entry of
/// `breaks_properties` and the break value under `z_property`.
pub fn isolines(points: &FeatureCollection, breaks: &[f64], params: &ContourParams) -> Result<FeatureCollection> {
    let field = Field::from_points(points, &params.z_property)?;

    let lines: Vec<MultiLineString<f64>> = breaks
        .to_vec()
        .into_par_iter()
        .map(|level| trace_level(&field, level))
        .collect();

    Ok(lines
        .into_iter()
        .zip(breaks)
        .enumerate()
        .map(|(i, (lines, &level))| {
            if lines.0.is_empty() {
                debug!("isolines: no contour at {}", level);
            }
            Feature::with_properties(lines, band_properties(params, i, level.into()))
        })
        .collect())
}

/// Marching-squares segments at `level`, joined into lines
fn trace_level(field: &Field, level: f64) -> MultiLineString<f64> {
    let mut segments: Vec<(EdgeId, EdgeId)> = Vec::new();

    for i in 0..field.rows().saturating_sub(1) {
        for j in 0..field.cols().saturating_sub(1) {
            let above = cell_corners(i, j).map(|(r, c)| field.value(r, c) >= level);
            let edges = cell_edges(i, j);
            // edge k joins corner k and corner k + 1
            let crossed: Vec<usize> = (0..4).filter(|&k| above[k] != above[(k + 1) % 4]).collect();

            match crossed.len() {
                2 => segments.push((edges[crossed[0]], edges[crossed[1]])),
                4 => {
                    // saddle: cut off the corners on the other side from the center
                    let center_above = field.cell_center_value(i, j) >= level;
                    for k in 0..4 {
                        if above[k] != center_above {
                            segments.push((edges[(k + 3) % 4], edges[k]));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    let points: HashMap<EdgeId, Coord<f64>> = segments
        .iter()
        .flat_map(|&(a, b)| [a, b])
        .map(|e| (e, field.edge_point(e, level)))
        .collect();

    MultiLineString::new(
        join_segments(&segments)
            .into_iter()
            .map(|chain| LineString::new(chain.iter().map(|e| points[e]).collect()))
            .collect(),
    )
}

/// Chain segments sharing an edge into polylines; closed loops repeat
/// their first edge at the end
fn join_segments(segments: &[(EdgeId, EdgeId)]) -> Vec<Vec<EdgeId>> {
    let mut touching: HashMap<EdgeId, Vec<usize>> = HashMap::new();
    for (s, &(a, b)) in segments.iter().enumerate() {
        touching.entry(a).or_default().push(s);
        touching.entry(b).or_default().push(s);
    }

    let mut used = vec![false; segments.len()];
    let mut chains = Vec::new();

    // open lines start at an edge touched once, loops anywhere
    let open_starts = segments
        .iter()
        .enumerate()
        .flat_map(|(s, &(a, b))| [(s, a), (s, b)])
        .filter(|(_, e)| touching[e].len() == 1);
    let loop_starts = segments.iter().enumerate().map(|(s, &(a, _))| (s, a));

    for (start, from) in open_starts.chain(loop_starts).collect::<Vec<_>>() {
        if used[start] {
            continue;
        }
        let mut chain = vec![from];
        let mut current = start;
        let mut at = from;
        loop {
            used[current] = true;
            let (a, b) = segments[current];
            let next_edge = if a == at { b } else { a };
            chain.push(next_edge);
            at = next_edge;

            match touching[&at].iter().find(|&&s| !used[s]) {
                Some(&s) => current = s,
                None => break,
            }
        }
        chains.push(chain);
    }
    chains
}
