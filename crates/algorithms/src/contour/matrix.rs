use ndarray::Array2;
use spatialkit_core::{Error, FeatureCollection, Result};

use crate::interpolation::SamplePoint;

/// Parameters for [`grid_to_matrix`]
#[derive(Debug, Clone)]
pub struct GridToMatrixParams {
    /// Property holding each point's value (default: "elevation")
    pub z_property: String,
    /// Order rows south to north instead of north to south
    pub flip: bool,
}

impl Default for GridToMatrixParams {
    fn default() -> Self {
        Self {
            z_property: "elevation".to_string(),
            flip: false,
        }
    }
}

/// Points of a regular grid grouped into rows of equal latitude
pub(crate) fn grid_rows(points: &FeatureCollection, z_property: &str, flip: bool) -> Result<Vec<Vec<SamplePoint>>> {
    let samples = SamplePoint::from_features(points, z_property)?;
    if samples.is_empty() {
        return Err(Error::EmptyInput("grid requires at least one point"));
    }

    let mut rows: Vec<Vec<SamplePoint>> = Vec::new();
    for s in samples {
        match rows.iter_mut().find(|row| row[0].y == s.y) {
            Some(row) => row.push(s),
            None => rows.push(vec![s]),
        }
    }

    for row in &mut rows {
        row.sort_by(|a, b| a.x.total_cmp(&b.x));
    }
    rows.sort_by(|a, b| if flip { a[0].y.total_cmp(&b[0].y) } else { b[0].y.total_cmp(&a[0].y) });

    let width = rows[0].len();
    if let Some(row) = rows.iter().find(|row| row.len() != width) {
        return Err(Error::InvalidGeometry(format!(
            "points do not form a rectangular grid: row at y = {} has {} points, expected {}",
            row[0].y,
            row.len(),
            width
        )));
    }
    Ok(rows)
}

/// Values of a rectangular point grid as a matrix.
///
/// Rows hold points of equal latitude ordered by longitude; the first row
/// is the northernmost unless `flip` is set.
pub fn grid_to_matrix(points: &FeatureCollection, params: &GridToMatrixParams) -> Result<Array2<f64>> {
    let rows = grid_rows(points, &params.z_property, params.flip)?;
    let (height, width) = (rows.len(), rows[0].len());
    let values: Vec<f64> = rows.into_iter().flatten().map(|s| s.value).collect();
    Array2::from_shape_vec((height, width), values).map_err(|e| Error::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;
    use spatialkit_core::Feature;

    fn grid(width: usize, height: usize) -> FeatureCollection {
        let mut fc = FeatureCollection::new();
        for j in 0..height {
            for i in 0..width {
                let mut f = Feature::new(Point::new(i as f64, j as f64));
                f.set_property("elevation", (j * 10 + i) as f64);
                fc.push(f);
            }
        }
        fc
    }

    #[test]
    fn test_grid_to_matrix() {
        let m = grid_to_matrix(&grid(3, 2), &GridToMatrixParams::default()).unwrap();
        assert_eq!(m.dim(), (2, 3));
        assert_eq!(m[[0, 0]], 10.0);
        assert_eq!(m[[1, 2]], 2.0);

        let flipped = grid_to_matrix(&grid(3, 2), &GridToMatrixParams { flip: true, ..Default::default() }).unwrap();
        assert_eq!(flipped[[0, 0]], 0.0);
        assert_eq!(flipped[[1, 2]], 12.0);
    }

    #[test]
    fn test_ragged_grid() {
        let mut fc = grid(3, 2);
        fc.features.pop();
        assert!(grid_to_matrix(&fc, &GridToMatrixParams::default()).is_err());
    }

    #[test]
    fn test_missing_value() {
        let mut fc = grid(2, 2);
        fc.features[1].properties.clear();
        assert!(matches!(
            grid_to_matrix(&fc, &GridToMatrixParams::default()),
            Err(Error::MissingProperty(_))
        ));
    }
}
