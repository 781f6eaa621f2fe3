use geo::{Geometry, LineString, Polygon};
use spatialkit_core::{meta, Error, Feature, FeatureCollection, Result};

use super::graph::{node_segments, signed_area, PlanarGraph};
use crate::boolean::in_ring;
use crate::line::kinks;

/// Split self-intersecting polygons into simple polygons.
///
/// Every output polygon keeps the properties of the feature it came from.
/// Polygons without self-intersections pass through unchanged.
pub fn unkink_polygon(fc: &FeatureCollection) -> Result<FeatureCollection> {
    let mut out = FeatureCollection::new();

    for feature in &fc.features {
        let Some(geom) = feature.geometry.as_ref() else {
            continue;
        };
        let polygons = match geom {
            Geometry::Polygon(p) => vec![p.clone()],
            Geometry::MultiPolygon(mp) => mp.0.clone(),
            other => return Err(Error::unsupported("unkink_polygon", meta::geometry_type(other))),
        };

        for polygon in polygons {
            for simple in simple_polygons(&polygon) {
                out.push(Feature::with_properties(simple, feature.properties.clone()));
            }
        }
    }
    Ok(out)
}

fn simple_polygons(polygon: &Polygon<f64>) -> Vec<Polygon<f64>> {
    let exterior = polygon.exterior();
    if kinks(&Geometry::Polygon(Polygon::new(exterior.clone(), vec![]))).0.is_empty() {
        return vec![polygon.clone()];
    }

    let segments: Vec<_> = exterior.lines().collect();
    let mut graph = PlanarGraph::from_segments(node_segments(&segments));
    graph.delete_dangles();

    let faces: Vec<LineString<f64>> =
        graph.rings().into_iter().filter(|ring| signed_area(ring) > 0.0).collect();

    let mut holes: Vec<Vec<LineString<f64>>> = vec![Vec::new(); faces.len()];
    for hole in polygon.interiors() {
        let Some(&first) = hole.0.first() else {
            continue;
        };
        if let Some(i) = faces.iter().position(|face| in_ring(first, face, false)) {
            holes[i].push(hole.clone());
        }
    }

    faces.into_iter().zip(holes).map(|(face, holes)| Polygon::new(face, holes)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{polygon, Area};

    #[test]
    fn test_bowtie() {
        let mut bowtie = Feature::new(polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 2.0, y: 0.0),
            (x: 0.0, y: 2.0),
            (x: 0.0, y: 0.0),
        ]);
        bowtie.set_property("name", "bowtie");

        let out = unkink_polygon(&vec![bowtie].into()).unwrap();
        assert_eq!(out.len(), 2);
        for f in out.iter() {
            assert_relative_eq!(f.geometry.as_ref().unwrap().unsigned_area(), 1.0);
            assert_eq!(f.get_property("name").and_then(|v| v.as_str()), Some("bowtie"));
        }
    }

    #[test]
    fn test_simple_polygon_unchanged() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ];
        let out = unkink_polygon(&vec![Feature::new(square.clone())].into()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.features[0].geometry, Some(Geometry::Polygon(square)));
    }

    #[test]
    fn test_rejects_lines() {
        let fc: FeatureCollection = vec![Feature::new(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]))].into();
        assert!(unkink_polygon(&fc).is_err());
    }
}
