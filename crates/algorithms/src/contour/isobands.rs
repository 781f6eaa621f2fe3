use geo::{Area, BooleanOps, Coord, LineString, MultiPolygon, Polygon};
use spatialkit_core::{Algorithm, Error, Feature, FeatureCollection, Result};
use std::mem;
use tracing::debug;

use super::field::{cell_corners, cell_edges, Field};
use super::{band_properties, ContourParams};
use crate::maybe_rayon::*;

/// Filled contour bands from a point grid
pub struct Isobands;

impl Algorithm for Isobands {
    type Input = (FeatureCollection, Vec<f64>);
    type Output = FeatureCollection;
    type Params = ContourParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Isobands"
    }

    fn description(&self) -> &'static str {
        "Filled regions between consecutive break values"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        isobands(&input.0, &input.1, &params)
    }
}

/// Filled bands between consecutive breaks of a rectangular point grid.
///
/// Band `i` covers values in `[breaks[i], breaks[i + 1]]` and is named
/// `"lower-upper"` under `z_property`. Polygons are ordered largest first;
/// `breaks_properties[i]` applies to band `i`.
pub fn isobands(points: &FeatureCollection, breaks: &[f64], params: &ContourParams) -> Result<FeatureCollection> {
    if breaks.len() < 2 {
        return Err(Error::invalid_parameter(
            "breaks",
            format!("{:?}", breaks),
            "isobands need at least two break values",
        ));
    }
    let field = Field::from_points(points, &params.z_property)?;

    let bands: Vec<(f64, f64)> = breaks.windows(2).map(|w| (w[0], w[1])).collect();
    let filled: Vec<MultiPolygon<f64>> = bands
        .clone()
        .into_par_iter()
        .map(|(lower, upper)| fill_band(&field, lower, upper))
        .collect();

    Ok(filled
        .into_iter()
        .zip(bands)
        .enumerate()
        .map(|(i, (polygons, (lower, upper)))| {
            if polygons.0.is_empty() {
                debug!("isobands: band {}-{} is empty", lower, upper);
            }
            let name = format!("{}-{}", lower, upper);
            Feature::with_properties(polygons, band_properties(params, i, name.into()))
        })
        .collect())
}

fn fill_band(field: &Field, lower: f64, upper: f64) -> MultiPolygon<f64> {
    let mut pieces = Vec::new();
    for i in 0..field.rows().saturating_sub(1) {
        for j in 0..field.cols().saturating_sub(1) {
            pieces.extend(cell_pieces(field, i, j, lower, upper));
        }
    }

    let mut merged = merge(pieces);
    merged.0.sort_by(|a, b| b.unsigned_area().total_cmp(&a.unsigned_area()));
    merged
}

/// Parts of cell (i, j) whose values fall in `[lower, upper]`.
///
/// The cell boundary is walked counter-clockwise and split into arcs that
/// lie in the band. Arcs meeting in the cell interior are joined when the
/// cell's mean value is itself in the band.
fn cell_pieces(field: &Field, i: usize, j: usize, lower: f64, upper: f64) -> Vec<Polygon<f64>> {
    let in_band = |v: f64| v >= lower && v <= upper;
    let corners = cell_corners(i, j);
    let edges = cell_edges(i, j);
    let values = corners.map(|(r, c)| field.value(r, c));

    let mut arcs: Vec<Vec<Coord<f64>>> = Vec::new();
    let mut current = Vec::new();
    let mut inside = in_band(values[0]);
    let started_inside = inside;

    for k in 0..4 {
        if in_band(values[k]) {
            current.push(field.position(corners[k].0, corners[k].1));
        }

        let (va, vb) = (values[k], values[(k + 1) % 4]);
        let below_lower = (va < lower) != (vb < lower);
        let above_upper = (va > upper) != (vb > upper);
        let mut crossings: Vec<(f64, Coord<f64>)> = [(lower, below_lower), (upper, above_upper)]
            .into_iter()
            .filter_map(|(level, crossed)| crossed.then_some(level))
            .map(|level| ((level - va) / (vb - va), field.edge_point(edges[k], level)))
            .collect();
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, point) in crossings {
            current.push(point);
            if inside {
                arcs.push(mem::take(&mut current));
            }
            inside = !inside;
        }
    }
    if !current.is_empty() {
        if started_inside && !arcs.is_empty() {
            current.append(&mut arcs[0]);
            arcs[0] = current;
        } else {
            arcs.push(current);
        }
    }

    let rings = if arcs.len() > 1 && !in_band(field.cell_center_value(i, j)) {
        arcs
    } else {
        vec![arcs.concat()]
    };

    rings
        .into_iter()
        .filter_map(|mut ring| {
            ring.dedup();
            if ring.len() > 1 && ring.first() == ring.last() {
                ring.pop();
            }
            if ring.len() < 3 {
                return None;
            }
            let polygon = Polygon::new(LineString::new(ring), vec![]);
            (polygon.unsigned_area() > 0.0).then_some(polygon)
        })
        .collect()
}

/// Union of many small polygons, merged pairwise
fn merge(pieces: Vec<Polygon<f64>>) -> MultiPolygon<f64> {
    let mut layer: Vec<MultiPolygon<f64>> = pieces.into_iter().map(|p| MultiPolygon::new(vec![p])).collect();
    while layer.len() > 1 {
        layer = layer
            .chunks(2)
            .map(|pair| match pair {
                [a, b] => a.union(b),
                [a] => a.clone(),
                _ => MultiPolygon::new(vec![]),
            })
            .collect();
    }
    layer.pop().unwrap_or_else(|| MultiPolygon::new(vec![]))
}
