use geo::Point;
use spatialkit_core::{BBox, Feature, FeatureCollection, Result};

use super::{cell_size, check_cell_side, GridParams, Mask};
use crate::maybe_rayon::*;

/// Grid of points `cell_side` apart, centered in the box.
///
/// With a mask, only points strictly inside it are kept.
pub fn point_grid(bbox: &BBox, cell_side: f64, params: &GridParams) -> Result<FeatureCollection> {
    check_cell_side(cell_side)?;
    let mask = Mask::from_params(params.mask.as_ref())?;

    let (cell_width, cell_height) = cell_size(bbox, cell_side, params.units);
    let columns = (bbox.width() / cell_width).floor();
    let rows = (bbox.height() / cell_height).floor();
    let delta_x = (bbox.width() - columns * cell_width) / 2.0;
    let delta_y = (bbox.height() - rows * cell_height) / 2.0;

    let xs = steps(bbox.min_x + delta_x, cell_width, bbox.max_x);
    let ys = steps(bbox.min_y + delta_y, cell_height, bbox.max_y);

    let features: Vec<Vec<Feature>> = xs
        .into_par_iter()
        .map(|x| {
            ys.iter()
                .map(|&y| Point::new(x, y))
                .filter(|pt| mask.as_ref().map_or(true, |m| m.contains(*pt)))
                .map(|pt| Feature::with_properties(pt, params.properties.clone()))
                .collect()
        })
        .collect();

    Ok(features.into_iter().flatten().collect())
}

/// `start`, `start + step`, ... up to and including `end`
pub(crate) fn steps(start: f64, step: f64, end: f64) -> Vec<f64> {
    let mut values = Vec::new();
    if step.is_nan() || step <= 0.0 {
        return values;
    }
    let mut current = start;
    while current <= end {
        values.push(current);
        current += step;
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::test_support::{unit_box, KM_PER_DEGREE};
    use approx::assert_relative_eq;
    use geo::{Geometry, LineString};
    use spatialkit_core::Units;

    #[test]
    fn test_point_grid_centered() {
        let grid = point_grid(&unit_box(), KM_PER_DEGREE * 0.3, &GridParams::default()).unwrap();
        assert_eq!(grid.len(), 16);

        let first = grid.features[0].as_point().unwrap();
        assert_relative_eq!(first.x(), 0.05, epsilon = 1e-9);
        assert_relative_eq!(first.y(), 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_point_grid_mask_and_properties() {
        let mut params = GridParams {
            units: Units::Kilometers,
            mask: Some(Geometry::Polygon(BBox::new(0.0, 0.0, 0.5, 0.5).to_polygon())),
            ..Default::default()
        };
        params.properties.insert("kind".into(), "sample".into());

        let grid = point_grid(&unit_box(), KM_PER_DEGREE * 0.3, &params).unwrap();
        assert_eq!(grid.len(), 4);
        assert!(grid.iter().all(|f| f.get_property("kind").is_some()));
    }

    #[test]
    fn test_point_grid_validation() {
        assert!(point_grid(&unit_box(), 0.0, &GridParams::default()).is_err());

        let params = GridParams {
            mask: Some(Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]))),
            ..Default::default()
        };
        assert!(point_grid(&unit_box(), 10.0, &params).is_err());
    }
}
