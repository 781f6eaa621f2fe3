use geo::{Coord, Geometry, LineString, Polygon};
use spatialkit_core::meta;
use spatialkit_core::units::round;

const PRECISION: u32 = 6;

/// Whether two geometries have the same type and the same coordinates
/// at 6 decimal places.
///
/// Lines may run in either direction; rings may start at any vertex and
/// wind either way; parts of multi-geometries may come in any order.
pub fn boolean_equal(a: &Geometry<f64>, b: &Geometry<f64>) -> bool {
    let snap = |g: &Geometry<f64>| {
        meta::map_coords(g, |c| Coord { x: round(c.x, PRECISION), y: round(c.y, PRECISION) })
    };
    geometries_equal(&snap(a), &snap(b))
}

fn geometries_equal(a: &Geometry<f64>, b: &Geometry<f64>) -> bool {
    match (a, b) {
        (Geometry::Point(pa), Geometry::Point(pb)) => pa == pb,
        (Geometry::LineString(la), Geometry::LineString(lb)) => lines_equal(la, lb),
        (Geometry::Polygon(pa), Geometry::Polygon(pb)) => polygons_equal(pa, pb),
        (Geometry::MultiPoint(ma), Geometry::MultiPoint(mb)) => same_parts(&ma.0, &mb.0, |x, y| x == y),
        (Geometry::MultiLineString(ma), Geometry::MultiLineString(mb)) => same_parts(&ma.0, &mb.0, lines_equal),
        (Geometry::MultiPolygon(ma), Geometry::MultiPolygon(mb)) => same_parts(&ma.0, &mb.0, polygons_equal),
        (Geometry::GeometryCollection(ga), Geometry::GeometryCollection(gb)) => {
            ga.0.len() == gb.0.len() && ga.0.iter().zip(&gb.0).all(|(x, y)| geometries_equal(x, y))
        }
        _ => false,
    }
}

fn same_parts<T>(a: &[T], b: &[T], eq: impl Fn(&T, &T) -> bool) -> bool {
    a.len() == b.len() && a.iter().all(|x| b.iter().any(|y| eq(x, y))) && b.iter().all(|y| a.iter().any(|x| eq(x, y)))
}

fn lines_equal(a: &LineString<f64>, b: &LineString<f64>) -> bool {
    a.0.len() == b.0.len() && (a.0 == b.0 || a.0.iter().eq(b.0.iter().rev()))
}

fn polygons_equal(a: &Polygon<f64>, b: &Polygon<f64>) -> bool {
    rings_equal(a.exterior(), b.exterior()) && same_parts(a.interiors(), b.interiors(), rings_equal)
}

/// Closed rings equal up to starting vertex and direction
fn rings_equal(a: &LineString<f64>, b: &LineString<f64>) -> bool {
    if a.0.len() != b.0.len() {
        return false;
    }
    let open = |ring: &LineString<f64>| -> Vec<Coord<f64>> {
        let n = ring.0.len();
        if n > 1 && ring.is_closed() {
            ring.0[..n - 1].to_vec()
        } else {
            ring.0.clone()
        }
    };
    let ra = open(a);
    let rb = open(b);
    let n = ra.len();
    if n == 0 {
        return rb.is_empty();
    }

    (0..n).filter(|&s| rb[s] == ra[0]).any(|s| {
        let forward = (0..n).all(|i| ra[i] == rb[(s + i) % n]);
        let backward = (0..n).all(|i| ra[i] == rb[(s + n - i) % n]);
        forward || backward
    })
}
