//! Gridded scalar field shared by the marching-squares routines

use geo::Coord;
use ndarray::Array2;
use spatialkit_core::{FeatureCollection, Result};

use super::matrix::grid_rows;

/// Cell edge, named by its lower-left grid node.
///
/// `H(i, j)` joins nodes (i, j) and (i, j + 1); `V(i, j)` joins (i, j)
/// and (i + 1, j). Rows run south to north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum EdgeId {
    H(usize, usize),
    V(usize, usize),
}

/// Values on a regular grid, row 0 at the southern edge
pub(crate) struct Field {
    pub values: Array2<f64>,
    origin: Coord<f64>,
    step: Coord<f64>,
}

impl Field {
    pub fn from_points(points: &FeatureCollection, z_property: &str) -> Result<Self> {
        let rows = grid_rows(points, z_property, true)?;
        let (height, width) = (rows.len(), rows[0].len());

        let origin = Coord { x: rows[0][0].x, y: rows[0][0].y };
        let far = rows[height - 1][width - 1];
        let step = Coord {
            x: if width > 1 { (far.x - origin.x) / (width - 1) as f64 } else { 0.0 },
            y: if height > 1 { (far.y - origin.y) / (height - 1) as f64 } else { 0.0 },
        };

        let values = Array2::from_shape_fn((height, width), |(i, j)| rows[i][j].value);
        Ok(Self { values, origin, step })
    }

    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn cols(&self) -> usize {
        self.values.ncols()
    }

    /// Map position of grid node (i, j)
    pub fn position(&self, i: usize, j: usize) -> Coord<f64> {
        Coord {
            x: self.origin.x + j as f64 * self.step.x,
            y: self.origin.y + i as f64 * self.step.y,
        }
    }

    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[[i, j]]
    }

    /// End nodes of an edge in canonical order
    pub fn edge_nodes(&self, edge: EdgeId) -> ((usize, usize), (usize, usize)) {
        match edge {
            EdgeId::H(i, j) => ((i, j), (i, j + 1)),
            EdgeId::V(i, j) => ((i, j), (i + 1, j)),
        }
    }

    /// Point along an edge where the field reaches `level`
    pub fn edge_point(&self, edge: EdgeId, level: f64) -> Coord<f64> {
        let (a, b) = self.edge_nodes(edge);
        let (va, vb) = (self.value(a.0, a.1), self.value(b.0, b.1));
        let (pa, pb) = (self.position(a.0, a.1), self.position(b.0, b.1));
        let t = if vb == va { 0.5 } else { (level - va) / (vb - va) };
        pa + (pb - pa) * t
    }

    /// Mean of the four corners of cell (i, j)
    pub fn cell_center_value(&self, i: usize, j: usize) -> f64 {
        (self.value(i, j) + self.value(i, j + 1) + self.value(i + 1, j + 1) + self.value(i + 1, j)) / 4.0
    }
}

/// Edges of cell (i, j) walking counter-clockwise from the bottom
pub(crate) fn cell_edges(i: usize, j: usize) -> [EdgeId; 4] {
    [EdgeId::H(i, j), EdgeId::V(i, j + 1), EdgeId::H(i + 1, j), EdgeId::V(i, j)]
}

/// Corners of cell (i, j) counter-clockwise from the bottom left
pub(crate) fn cell_corners(i: usize, j: usize) -> [(usize, usize); 4] {
    [(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)]
}
