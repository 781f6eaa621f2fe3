use geo::{Coord, LineString, Polygon};
use spatialkit_core::{BBox, Feature, FeatureCollection, Result};

use super::check_points;
use crate::maybe_rayon::*;

/// Keep the part of a convex ring closer to `site` than to `other`
/// (one Sutherland-Hodgman pass against their perpendicular bisector)
fn clip_to_bisector(vertices: &[Coord<f64>], site: Coord<f64>, other: Coord<f64>) -> Vec<Coord<f64>> {
    let mid = Coord { x: (site.x + other.x) / 2.0, y: (site.y + other.y) / 2.0 };
    let dir = other - site;
    let side = |p: Coord<f64>| (p.x - mid.x) * dir.x + (p.y - mid.y) * dir.y;

    let mut output = Vec::with_capacity(vertices.len() + 1);
    let Some(&last) = vertices.last() else {
        return output;
    };

    let mut prev = last;
    let mut prev_side = side(prev);
    for &current in vertices {
        let current_side = side(current);
        if (current_side <= 0.0) != (prev_side <= 0.0) {
            let t = prev_side / (prev_side - current_side);
            output.push(prev + (current - prev) * t);
        }
        if current_side <= 0.0 {
            output.push(current);
        }
        prev = current;
        prev_side = current_side;
    }
    output
}

/// Voronoi cell of every point, clipped to `bbox`.
///
/// Cells come back in input order and carry the point's properties.
/// Points sharing a position get identical cells.
pub fn voronoi(points: &FeatureCollection, bbox: &BBox) -> Result<FeatureCollection> {
    check_points(points, "voronoi")?;
    let sites: Vec<Coord<f64>> = points.iter().filter_map(|f| f.as_point()).map(|p| p.0).collect();

    let mut frame = bbox.to_polygon().exterior().0.clone();
    frame.pop();

    let cells: Vec<Feature> = (0..sites.len())
        .into_par_iter()
        .map(|i| {
            let site = sites[i];
            let mut ring = frame.clone();
            for &other in &sites {
                if other == site {
                    continue;
                }
                ring = clip_to_bisector(&ring, site, other);
                if ring.is_empty() {
                    break;
                }
            }
            if let Some(&first) = ring.first() {
                ring.push(first);
            }
            Feature::with_properties(Polygon::new(LineString::new(ring), vec![]), points.features[i].properties.clone())
        })
        .collect();

    Ok(cells.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{Area, Geometry, Point};

    fn sites(coords: &[(f64, f64)]) -> FeatureCollection {
        coords.iter().map(|&(x, y)| Feature::new(Point::new(x, y))).collect()
    }

    #[test]
    fn test_two_sites_split_box() {
        let cells = voronoi(&sites(&[(1.0, 5.0), (3.0, 5.0)]), &BBox::new(0.0, 0.0, 4.0, 10.0)).unwrap();
        assert_eq!(cells.len(), 2);
        for g in cells.geometries() {
            assert_relative_eq!(g.unsigned_area(), 20.0, epsilon = 1e-9);
        }
        let Some(Geometry::Polygon(left)) = &cells.features[0].geometry else {
            panic!("expected polygon");
        };
        assert!(left.exterior().0.iter().all(|c| c.x <= 2.0));
    }

    #[test]
    fn test_cells_tile_box() {
        let fc = sites(&[(1.0, 1.0), (3.0, 1.5), (2.0, 3.0), (0.5, 3.5), (3.5, 3.8)]);
        let bbox = BBox::new(0.0, 0.0, 4.0, 4.0);
        let cells = voronoi(&fc, &bbox).unwrap();
        let total: f64 = cells.geometries().map(|g| g.unsigned_area()).sum();
        assert_relative_eq!(total, 16.0, epsilon = 1e-9);

        for (cell, site) in cells.iter().zip(fc.iter()) {
            let Some(Geometry::Polygon(p)) = &cell.geometry else { panic!("expected polygon") };
            let pt = site.as_point().unwrap();
            assert!(crate::boolean::point_in_polygon(pt.0, p, true));
        }
    }

    #[test]
    fn test_rejects_non_points() {
        let fc: FeatureCollection = vec![Feature::new(BBox::new(0.0, 0.0, 1.0, 1.0).to_polygon())].into();
        assert!(voronoi(&fc, &BBox::new(0.0, 0.0, 1.0, 1.0)).is_err());
    }
}
