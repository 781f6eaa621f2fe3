use geo::{Coord, LineString, Polygon};
use spatialkit_core::{BBox, Feature, FeatureCollection, Result};

use super::point::steps;
use super::{cell_size, check_cell_side, GridParams, Mask};

fn triangle(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> Polygon<f64> {
    Polygon::new(LineString::new(vec![a, b, c, a]), vec![])
}

/// Grid of right triangles, two per square cell, with the diagonal
/// alternating between neighbouring cells.
///
/// Cells start at the south-west corner and continue while their origin is
/// inside the box, so the last row and column may extend past it.
pub fn triangle_grid(bbox: &BBox, cell_side: f64, params: &GridParams) -> Result<FeatureCollection> {
    check_cell_side(cell_side)?;
    let mask = Mask::from_params(params.mask.as_ref())?;
    let (w, h) = cell_size(bbox, cell_side, params.units);

    let mut out = FeatureCollection::new();
    for (xi, x) in steps(bbox.min_x, w, bbox.max_x).into_iter().enumerate() {
        for (yi, y) in steps(bbox.min_y, h, bbox.max_y).into_iter().enumerate() {
            let sw = Coord { x, y };
            let nw = Coord { x, y: y + h };
            let ne = Coord { x: x + w, y: y + h };
            let se = Coord { x: x + w, y };

            let pair = match (xi % 2, yi % 2) {
                (0, 0) | (1, 1) => [triangle(sw, nw, se), triangle(nw, ne, se)],
                (0, _) => [triangle(sw, ne, se), triangle(sw, nw, ne)],
                _ => [triangle(sw, nw, ne), triangle(sw, ne, se)],
            };
            for cell in pair {
                if mask.as_ref().map_or(true, |m| m.touches(&cell)) {
                    out.push(Feature::with_properties(cell, params.properties.clone()));
                }
            }
        }
    }
    Ok(out)
}
