use geo::{Geometry, Point};
use spatialkit_core::{Error, Feature, Result};

/// Value at `pt` on the plane through a triangle's three vertices.
///
/// The triangle's vertex values are read from its `a`, `b` and `c`
/// properties. The point does not have to lie inside the triangle.
pub fn planepoint(pt: Point<f64>, triangle: &Feature) -> Result<f64> {
    let ring = match &triangle.geometry {
        Some(Geometry::Polygon(p)) => p.exterior(),
        Some(other) => return Err(Error::unsupported("planepoint", spatialkit_core::meta::geometry_type(other))),
        None => return Err(Error::unsupported("planepoint", "None")),
    };
    if ring.0.len() < 3 {
        return Err(Error::InvalidGeometry("triangle needs three vertices".into()));
    }

    let vertex_value = |key: &str| {
        triangle
            .property_f64(key)
            .ok_or_else(|| Error::MissingProperty(format!("triangle has no numeric '{}'", key)))
    };
    let (z1, z2, z3) = (vertex_value("a")?, vertex_value("b")?, vertex_value("c")?);

    let (x, y) = (pt.x(), pt.y());
    let (x1, y1) = (ring.0[0].x, ring.0[0].y);
    let (x2, y2) = (ring.0[1].x, ring.0[1].y);
    let (x3, y3) = (ring.0[2].x, ring.0[2].y);

    let numerator = z3 * (x - x1) * (y - y2) + z1 * (x - x2) * (y - y3) + z2 * (x - x3) * (y - y1)
        - z2 * (x - x1) * (y - y3)
        - z3 * (x - x2) * (y - y1)
        - z1 * (x - x3) * (y - y2);
    let denominator = (x - x1) * (y - y2) + (x - x2) * (y - y3) + (x - x3) * (y - y1)
        - (x - x1) * (y - y3)
        - (x - x2) * (y - y1)
        - (x - x3) * (y - y2);

    Ok(numerator / denominator)
}
