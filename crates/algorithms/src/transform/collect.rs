use geo::Geometry;
use spatialkit_core::{bbox, AttributeValue, FeatureCollection};

use crate::boolean::boolean_point_in_polygon;
use crate::index::BoxIndex;

/// Gather a property of the points inside each polygon.
///
/// Every polygon feature is returned with `out_property` holding the
/// `in_property` values of the points it contains. Points lacking the
/// property are skipped. Non-polygonal features are passed through.
pub fn collect(
    polygons: &FeatureCollection,
    points: &FeatureCollection,
    in_property: &str,
    out_property: &str,
) -> FeatureCollection {
    let located: Vec<_> = points.iter().filter_map(|f| f.as_point().map(|p| (p, f))).collect();
    let index = BoxIndex::from_coords(&located.iter().map(|(p, _)| p.0).collect::<Vec<_>>());

    polygons
        .iter()
        .map(|feature| {
            let mut out = feature.clone();
            let Some(geom @ (Geometry::Polygon(_) | Geometry::MultiPolygon(_))) = &feature.geometry else {
                return out;
            };
            let Some(extent) = bbox(geom) else { return out };

            let values: Vec<AttributeValue> = index
                .search(&extent)
                .into_iter()
                .filter_map(|i| {
                    let (p, f) = located[i];
                    let inside = boolean_point_in_polygon(p, geom, false).unwrap_or(false);
                    inside.then(|| f.get_property(in_property).cloned()).flatten()
                })
                .collect();
            out.set_property(out_property, AttributeValue::Array(values));
            out
        })
        .collect()
}
