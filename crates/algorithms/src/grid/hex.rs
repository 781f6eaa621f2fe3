use geo::{Coord, LineString, Point, Polygon};
use spatialkit_core::{BBox, Feature, FeatureCollection, Result};
use std::f64::consts::PI;

use super::{check_cell_side, GridParams, Mask};
use crate::measurement::distance;

/// Parameters for [`hex_grid`]
#[derive(Debug, Clone, Default)]
pub struct HexGridParams {
    pub grid: GridParams,
    /// Emit six triangles per hexagon instead of the hexagon itself
    pub triangles: bool,
}

/// Flat-topped hexagon corners, counter-clockwise from east
fn corners() -> [(f64, f64); 6] {
    let mut out = [(0.0, 0.0); 6];
    for (i, corner) in out.iter_mut().enumerate() {
        let angle = 2.0 * PI / 6.0 * i as f64;
        *corner = (angle.cos(), angle.sin());
    }
    out
}

fn vertex(center: Coord<f64>, rx: f64, ry: f64, corner: (f64, f64)) -> Coord<f64> {
    Coord {
        x: center.x + rx * corner.0,
        y: center.y + ry * corner.1,
    }
}

fn hexagon(center: Coord<f64>, rx: f64, ry: f64, corners: &[(f64, f64); 6]) -> Polygon<f64> {
    let mut ring: Vec<Coord<f64>> = corners.iter().map(|&c| vertex(center, rx, ry, c)).collect();
    ring.push(ring[0]);
    Polygon::new(LineString::new(ring), vec![])
}

fn hex_triangles(center: Coord<f64>, rx: f64, ry: f64, corners: &[(f64, f64); 6]) -> Vec<Polygon<f64>> {
    (0..6)
        .map(|i| {
            let a = vertex(center, rx, ry, corners[i]);
            let b = vertex(center, rx, ry, corners[(i + 1) % 6]);
            Polygon::new(LineString::new(vec![center, a, b, center]), vec![])
        })
        .collect()
}

/// Grid of flat-topped hexagons fitted inside the box.
///
/// `cell_side` is the hexagon radius. Odd columns are shifted down by half
/// a cell. With a mask, only cells intersecting it are kept.
pub fn hex_grid(bbox: &BBox, cell_side: f64, params: &HexGridParams) -> Result<FeatureCollection> {
    check_cell_side(cell_side)?;
    let grid = &params.grid;
    let mask = Mask::from_params(grid.mask.as_ref())?;

    let (west, south, east, north) = (bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y);
    let (center_x, center_y) = bbox.center();

    let x_fraction = cell_side * 2.0 / distance(Point::new(west, center_y), Point::new(east, center_y), grid.units);
    let cell_width = x_fraction * (east - west);
    let y_fraction = cell_side * 2.0 / distance(Point::new(center_x, south), Point::new(center_x, north), grid.units);
    let cell_height = y_fraction * (north - south);

    let radius = cell_width / 2.0;
    let hex_width = radius * 2.0;
    let hex_height = 3f64.sqrt() / 2.0 * cell_height;
    let box_width = east - west;
    let box_height = north - south;
    let x_interval = 3.0 / 4.0 * hex_width;
    let y_interval = hex_height;

    let x_span = (box_width - hex_width) / (hex_width - radius / 2.0);
    let x_count = x_span.floor();
    let x_adjust = ((x_count * x_interval - radius / 2.0) - box_width) / 2.0 - radius / 2.0 + x_interval / 2.0;

    let y_count = ((box_height - hex_height) / hex_height).floor();
    let mut y_adjust = (box_height - y_count * hex_height) / 2.0;
    let has_offset_y = y_count * hex_height - box_height > hex_height / 2.0;
    if has_offset_y {
        y_adjust -= hex_height / 4.0;
    }

    let mut out = FeatureCollection::new();
    if x_count.is_nan() || y_count.is_nan() || x_count < 0.0 || y_count < 0.0 {
        return Ok(out);
    }

    let corners = corners();
    let (rx, ry) = (cell_width / 2.0, cell_height / 2.0);
    for x in 0..=x_count as usize {
        for y in 0..=y_count as usize {
            let is_odd = x % 2 == 1;
            if y == 0 && (is_odd || has_offset_y) {
                continue;
            }

            let mut center = Coord {
                x: x as f64 * x_interval + west - x_adjust,
                y: y as f64 * y_interval + south + y_adjust,
            };
            if is_odd {
                center.y -= hex_height / 2.0;
            }

            let cells = if params.triangles {
                hex_triangles(center, rx, ry, &corners)
            } else {
                vec![hexagon(center, rx, ry, &corners)]
            };
            for cell in cells {
                if mask.as_ref().map_or(true, |m| m.touches(&cell)) {
                    out.push(Feature::with_properties(cell, grid.properties.clone()));
                }
            }
        }
    }
    Ok(out)
}
