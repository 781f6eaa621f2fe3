use geo::{Geometry, TriangulateEarcut};
use spatialkit_core::{meta, Error, Feature, FeatureCollection, Result};

/// Split a polygon or multipolygon into triangles by ear clipping
pub fn tesselate(geom: &Geometry<f64>) -> Result<FeatureCollection> {
    let polygons = match geom {
        Geometry::Polygon(p) => vec![p.clone()],
        Geometry::MultiPolygon(mp) => mp.0.clone(),
        other => return Err(Error::unsupported("tesselate", meta::geometry_type(other))),
    };

    Ok(polygons
        .iter()
        .flat_map(|p| p.earcut_triangles())
        .map(|t| Feature::new(t.to_polygon()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{polygon, Area, LineString, Polygon};

    #[test]
    fn test_tesselate_square() {
        let square = Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ]);
        let triangles = tesselate(&square).unwrap();
        assert_eq!(triangles.len(), 2);
        let total: f64 = triangles.geometries().map(|g| g.unsigned_area()).sum();
        assert_relative_eq!(total, 1.0);
        for g in triangles.geometries() {
            let Geometry::Polygon(p) = g else { panic!("expected polygon") };
            assert_eq!(p.exterior().0.len(), 4);
        }
    }

    #[test]
    fn test_tesselate_with_hole() {
        let poly = Geometry::Polygon(Polygon::new(
            LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]),
            vec![LineString::from(vec![(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0), (1.0, 1.0)])],
        ));
        let triangles = tesselate(&poly).unwrap();
        let total: f64 = triangles.geometries().map(|g| g.unsigned_area()).sum();
        assert_relative_eq!(total, 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tesselate_rejects_points() {
        assert!(tesselate(&Geometry::Point((0.0, 0.0).into())).is_err());
    }
}
