use geo::{LineString, Polygon};
use spatialkit_core::{BBox, Feature, FeatureCollection, Result};

use super::{cell_size, check_cell_side, GridParams, Mask};
use crate::maybe_rayon::*;

/// Grid of square cells that fit whole inside the box, centered in it.
///
/// With a mask, only cells intersecting it are kept.
pub fn square_grid(bbox: &BBox, cell_side: f64, params: &GridParams) -> Result<FeatureCollection> {
    check_cell_side(cell_side)?;
    let mask = Mask::from_params(params.mask.as_ref())?;

    let (cell_width, cell_height) = cell_size(bbox, cell_side, params.units);
    let columns = (bbox.width() / cell_width).floor();
    let rows = (bbox.height() / cell_height).floor();
    if columns.is_nan() || rows.is_nan() || columns < 1.0 || rows < 1.0 {
        return Ok(FeatureCollection::new());
    }
    let delta_x = (bbox.width() - columns * cell_width) / 2.0;
    let delta_y = (bbox.height() - rows * cell_height) / 2.0;
    let (columns, rows) = (columns as usize, rows as usize);

    let features: Vec<Vec<Feature>> = (0..columns)
        .into_par_iter()
        .map(|column| {
            let x = bbox.min_x + delta_x + column as f64 * cell_width;
            (0..rows)
                .map(|row| {
                    let y = bbox.min_y + delta_y + row as f64 * cell_height;
                    Polygon::new(
                        LineString::from(vec![
                            (x, y),
                            (x, y + cell_height),
                            (x + cell_width, y + cell_height),
                            (x + cell_width, y),
                            (x, y),
                        ]),
                        vec![],
                    )
                })
                .filter(|cell| mask.as_ref().map_or(true, |m| m.touches(cell)))
                .map(|cell| Feature::with_properties(cell, params.properties.clone()))
                .collect()
        })
        .collect();

    Ok(features.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::test_support::{unit_box, KM_PER_DEGREE};
    use approx::assert_relative_eq;
    use geo::{Area, Geometry};

    #[test]
    fn test_square_grid() {
        let grid = square_grid(&unit_box(), KM_PER_DEGREE * 0.3, &GridParams::default()).unwrap();
        assert_eq!(grid.len(), 9);
        for g in grid.geometries() {
            assert_relative_eq!(g.unsigned_area(), 0.09, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_square_grid_mask() {
        let params = GridParams {
            mask: Some(Geometry::Polygon(BBox::new(0.0, 0.0, 0.5, 0.5).to_polygon())),
            ..Default::default()
        };
        let grid = square_grid(&unit_box(), KM_PER_DEGREE * 0.3, &params).unwrap();
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn test_cell_larger_than_box() {
        let grid = square_grid(&unit_box(), KM_PER_DEGREE * 2.0, &GridParams::default()).unwrap();
        assert!(grid.is_empty());
    }
}
