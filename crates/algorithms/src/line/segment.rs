use geo::{Geometry, LineString};
use spatialkit_core::meta;

/// Every 2-vertex segment of a geometry's lines and rings
pub fn line_segment(geom: &Geometry<f64>) -> Vec<LineString<f64>> {
    meta::segments(geom)
        .into_iter()
        .map(|seg| LineString::new(vec![seg.start, seg.end]))
        .collect()
}
