//! Tangent vertices from a point to a polygon

use geo::{Coord, Geometry, Point};
use spatialkit_core::{meta, Error, Result};

/// Positive when `p` lies left of the directed line `a → b`
fn is_left(a: Coord<f64>, b: Coord<f64>, p: Coord<f64>) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}

/// The right and left tangent vertices of a (multi)polygon as seen from `pt`.
///
/// Only exterior rings are considered. Returns `(right, left)`.
pub fn polygon_tangents(pt: Point<f64>, polygon: &Geometry<f64>) -> Result<(Point<f64>, Point<f64>)> {
    let shells: Vec<&[Coord<f64>]> = match polygon {
        Geometry::Polygon(p) => vec![&p.exterior().0],
        Geometry::MultiPolygon(mp) => mp.0.iter().map(|p| p.exterior().0.as_slice()).collect(),
        other => return Err(Error::unsupported("polygon_tangents", meta::geometry_type(other))),
    };

    let first = shells
        .first()
        .filter(|ring| !ring.is_empty())
        .ok_or(Error::EmptyInput("polygon has no exterior ring"))?;
    let p = pt.0;
    let mut rtan = first[0];
    let mut ltan = first[0];
    let mut eprev = is_left(first[0], first[first.len() - 1], p);

    for ring in shells {
        for (i, &current) in ring.iter().enumerate() {
            let next = ring[(i + 1) % ring.len()];
            let enext = is_left(current, next, p);
            if eprev <= 0.0 && enext > 0.0 {
                if is_left(p, current, rtan) >= 0.0 {
                    rtan = current;
                }
            } else if eprev > 0.0 && enext <= 0.0 && is_left(p, current, ltan) <= 0.0 {
                ltan = current;
            }
            eprev = enext;
        }
    }

    Ok((rtan.into(), ltan.into()))
}
