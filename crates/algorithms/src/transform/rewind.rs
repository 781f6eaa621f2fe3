use geo::{Geometry, LineString, MultiPolygon, Polygon};
use spatialkit_core::{meta, Error, Result};

use crate::boolean::boolean_clockwise;

/// Enforce RFC 7946 winding.
///
/// Polygon shells become counter-clockwise and holes clockwise; with
/// `reverse` the opposite. LineStrings become clockwise (counter-clockwise
/// with `reverse`).
pub fn rewind(geom: &Geometry<f64>, reverse: bool) -> Result<Geometry<f64>> {
    Ok(match geom {
        Geometry::LineString(ls) => Geometry::LineString(rewind_line(ls, reverse)),
        Geometry::Polygon(p) => Geometry::Polygon(rewind_polygon(p, reverse)),
        Geometry::MultiLineString(mls) => Geometry::MultiLineString(
            mls.0.iter().map(|ls| rewind_line(ls, reverse)).collect(),
        ),
        Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(MultiPolygon::new(
            mp.0.iter().map(|p| rewind_polygon(p, reverse)).collect(),
        )),
        Geometry::Point(_) | Geometry::MultiPoint(_) => geom.clone(),
        Geometry::GeometryCollection(gc) => Geometry::GeometryCollection(
            gc.0.iter().map(|g| rewind(g, reverse)).collect::<Result<_>>()?,
        ),
        other => return Err(Error::unsupported("rewind", meta::geometry_type(other))),
    })
}

fn rewind_line(line: &LineString<f64>, reverse: bool) -> LineString<f64> {
    let mut out = line.clone();
    if boolean_clockwise(line) == reverse {
        out.0.reverse();
    }
    out
}

fn rewind_polygon(poly: &Polygon<f64>, reverse: bool) -> Polygon<f64> {
    let mut exterior = poly.exterior().clone();
    if boolean_clockwise(&exterior) != reverse {
        exterior.0.reverse();
    }
    let interiors = poly
        .interiors()
        .iter()
        .map(|ring| {
            let mut ring = ring.clone();
            if boolean_clockwise(&ring) == reverse {
                ring.0.reverse();
            }
            ring
        })
        .collect();
    Polygon::new(exterior, interiors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn test_rewind_polygon_to_ccw() {
        let cw = Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 1.0),
            (x: 1.0, y: 1.0),
            (x: 1.0, y: 0.0),
            (x: 0.0, y: 0.0),
        ]);
        let Geometry::Polygon(p) = rewind(&cw, false).unwrap() else {
            panic!("expected polygon");
        };
        assert!(!boolean_clockwise(p.exterior()));

        let Geometry::Polygon(p) = rewind(&cw, true).unwrap() else {
            panic!("expected polygon");
        };
        assert!(boolean_clockwise(p.exterior()));
    }

    #[test]
    fn test_rewind_line() {
        let ccw = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let Geometry::LineString(ls) = rewind(&Geometry::LineString(ccw), false).unwrap() else {
            panic!("expected line");
        };
        assert!(boolean_clockwise(&ls));
    }
}
