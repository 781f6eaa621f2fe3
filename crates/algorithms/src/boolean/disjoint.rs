use geo::{Geometry, Intersects};

/// Whether two geometries share no point, boundaries included
pub fn boolean_disjoint(a: &Geometry<f64>, b: &Geometry<f64>) -> bool {
    !a.intersects(b)
}
