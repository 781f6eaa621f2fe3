use geo::{ConcaveHull, ConvexHull, Geometry, MultiPoint, Point, Polygon};
use spatialkit_core::meta;

/// Parameters for [`convex`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvexParams {
    /// Concave hull concavity; `None` gives the convex hull. Lower values
    /// follow the points more tightly.
    pub concavity: Option<f64>,
}

/// Hull around every coordinate of a geometry.
///
/// Returns `None` when the coordinates do not span an area.
pub fn convex(geom: &Geometry<f64>, params: ConvexParams) -> Option<Polygon<f64>> {
    let points = MultiPoint::new(meta::coords(geom, true).into_iter().map(Point::from).collect());
    if points.0.is_empty() {
        return None;
    }

    let hull = match params.concavity {
        Some(concavity) if concavity.is_finite() => points.concave_hull(concavity),
        _ => points.convex_hull(),
    };
    (hull.exterior().0.len() > 3).then_some(hull)
}
