//! TIN (Triangulated Irregular Network)
//!
//! Constructs a Delaunay triangulation from point features using a simple
//! incremental Bowyer-Watson algorithm.

use geo::{Coord, LineString, Polygon};
use spatialkit_core::{Error, Feature, FeatureCollection, Result};

use super::{check_points, SamplePoint};

/// A triangle defined by three vertex indices
#[derive(Debug, Clone, Copy)]
struct Triangle {
    v0: usize,
    v1: usize,
    v2: usize,
}

/// Circumcircle of a triangle
#[derive(Debug, Clone, Copy)]
struct Circumcircle {
    cx: f64,
    cy: f64,
    radius_sq: f64,
}

/// Compute the circumcircle of three points
fn circumcircle(p0: Coord<f64>, p1: Coord<f64>, p2: Coord<f64>) -> Option<Circumcircle> {
    let (ax, ay) = (p0.x, p0.y);
    let (bx, by) = (p1.x, p1.y);
    let (cx, cy) = (p2.x, p2.y);

    let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
    if d == 0.0 {
        return None; // Degenerate triangle
    }

    let ux = ((ax * ax + ay * ay) * (by - cy) + (bx * bx + by * by) * (cy - ay) + (cx * cx + cy * cy) * (ay - by)) / d;
    let uy = ((ax * ax + ay * ay) * (cx - bx) + (bx * bx + by * by) * (ax - cx) + (cx * cx + cy * cy) * (bx - ax)) / d;

    let dx = ax - ux;
    let dy = ay - uy;
    Some(Circumcircle {
        cx: ux,
        cy: uy,
        radius_sq: dx * dx + dy * dy,
    })
}

/// Build Delaunay triangulation using Bowyer-Watson algorithm.
///
/// Returned indices refer to `points`.
fn delaunay(points: &[Coord<f64>]) -> Vec<Triangle> {
    if points.len() < 3 {
        return Vec::new();
    }

    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let dx = max_x - min_x;
    let dy = max_y - min_y;
    let delta = dx.max(dy).max(f64::EPSILON);

    // Super-triangle vertices (indices 0, 1, 2)
    let mut vertices: Vec<Coord<f64>> = vec![
        Coord { x: min_x - 20.0 * delta, y: min_y - delta },
        Coord { x: min_x + 0.5 * dx, y: max_y + 20.0 * delta },
        Coord { x: max_x + 20.0 * delta, y: min_y - delta },
    ];
    let mut triangles: Vec<Triangle> = vec![Triangle { v0: 0, v1: 1, v2: 2 }];

    for point in points {
        let vi = vertices.len();
        vertices.push(*point);

        // Triangles whose circumcircle contains the new point
        let bad_triangles: Vec<usize> = triangles
            .iter()
            .enumerate()
            .filter(|(_, tri)| {
                circumcircle(vertices[tri.v0], vertices[tri.v1], vertices[tri.v2]).is_some_and(|cc| {
                    let dx = point.x - cc.cx;
                    let dy = point.y - cc.cy;
                    dx * dx + dy * dy <= cc.radius_sq
                })
            })
            .map(|(ti, _)| ti)
            .collect();

        // Boundary of the hole: edges not shared by two bad triangles
        let edges_of = |t: &Triangle| [(t.v0, t.v1), (t.v1, t.v2), (t.v2, t.v0)];
        let mut boundary: Vec<(usize, usize)> = Vec::new();
        for &bi in &bad_triangles {
            for (ea, eb) in edges_of(&triangles[bi]) {
                let shared = bad_triangles.iter().any(|&oi| {
                    oi != bi
                        && edges_of(&triangles[oi])
                            .iter()
                            .any(|&(oa, ob)| (oa == ea && ob == eb) || (oa == eb && ob == ea))
                });
                if !shared {
                    boundary.push((ea, eb));
                }
            }
        }

        // Remove bad triangles (in reverse order to preserve indices)
        let mut bad_triangles = bad_triangles;
        bad_triangles.sort_unstable_by(|a, b| b.cmp(a));
        for bi in bad_triangles {
            triangles.swap_remove(bi);
        }

        for (ea, eb) in boundary {
            triangles.push(Triangle { v0: ea, v1: eb, v2: vi });
        }
    }

    // Drop triangles touching the super-triangle and shift indices back
    triangles
        .into_iter()
        .filter(|t| t.v0 >= 3 && t.v1 >= 3 && t.v2 >= 3)
        .map(|t| Triangle { v0: t.v0 - 3, v1: t.v1 - 3, v2: t.v2 - 3 })
        .collect()
}

/// Delaunay triangles over a set of points.
///
/// With `z_property`, each triangle carries the values of its three
/// vertices as properties `a`, `b` and `c`, in ring order. Repeated
/// positions are triangulated once.
pub fn tin(points: &FeatureCollection, z_property: Option<&str>) -> Result<FeatureCollection> {
    check_points(points, "tin")?;

    let samples: Vec<SamplePoint> = match z_property {
        Some(z) => SamplePoint::from_features(points, z)?,
        None => points
            .iter()
            .filter_map(Feature::as_point)
            .map(|p| SamplePoint::new(p.x(), p.y(), f64::NAN))
            .collect(),
    };

    let mut unique: Vec<SamplePoint> = Vec::with_capacity(samples.len());
    for s in samples {
        if !unique.iter().any(|u| u.x == s.x && u.y == s.y) {
            unique.push(s);
        }
    }
    if unique.len() < 3 {
        return Err(Error::Algorithm("TIN requires at least 3 distinct points".into()));
    }

    let coords: Vec<Coord<f64>> = unique.iter().map(|s| Coord { x: s.x, y: s.y }).collect();
    let triangles = delaunay(&coords);

    Ok(triangles
        .iter()
        .map(|t| {
            let ring = LineString::new(vec![coords[t.v0], coords[t.v1], coords[t.v2], coords[t.v0]]);
            let mut feature = Feature::new(Polygon::new(ring, vec![]));
            if z_property.is_some() {
                feature.set_property("a", unique[t.v0].value);
                feature.set_property("b", unique[t.v1].value);
                feature.set_property("c", unique[t.v2].value);
            }
            feature
        })
        .collect())
}
