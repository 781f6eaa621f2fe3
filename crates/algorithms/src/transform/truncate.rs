use geo::{Coord, Geometry};
use spatialkit_core::meta;
use spatialkit_core::units::round;

/// Parameters for [`truncate`]
#[derive(Debug, Clone, Copy)]
pub struct TruncateParams {
    /// Decimal places kept on each coordinate (default: 6)
    pub precision: u32,
}

impl Default for TruncateParams {
    fn default() -> Self {
        Self { precision: 6 }
    }
}

/// Round every coordinate to a fixed number of decimals
pub fn truncate(geom: &Geometry<f64>, params: TruncateParams) -> Geometry<f64> {
    let precision = params.precision;
    meta::map_coords(geom, move |c| Coord {
        x: round(c.x, precision),
        y: round(c.y, precision),
    })
}
