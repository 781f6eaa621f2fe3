use geo::{BooleanOps, Geometry, MultiPolygon};
use spatialkit_core::{AttributeValue, Feature, FeatureCollection, Result};
use tracing::debug;

use super::boolean_ops::to_multi_polygon;

/// Merge touching or overlapping polygons.
///
/// With `property_name`, only polygons sharing the same value of that
/// property are merged, and every output polygon carries the value.
/// Features without the property form their own group. Each disjoint part
/// of a merged group is returned as a separate polygon.
pub fn dissolve(fc: &FeatureCollection, property_name: Option<&str>) -> Result<FeatureCollection> {
    let mut groups: Vec<(Option<AttributeValue>, MultiPolygon<f64>)> = Vec::new();

    for feature in &fc.features {
        let Some(geom) = feature.geometry.as_ref() else {
            continue;
        };
        let mp = to_multi_polygon(geom, "dissolve")?;
        let key = property_name.and_then(|name| feature.get_property(name).cloned());

        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, merged)) => *merged = merged.union(&mp),
            None => groups.push((key, mp)),
        }
    }
    debug!("dissolve: {} features in {} groups", fc.len(), groups.len());

    let mut out = FeatureCollection::new();
    for (key, merged) in groups {
        for polygon in merged.0 {
            let mut feature = Feature::new(Geometry::Polygon(polygon));
            if let (Some(name), Some(value)) = (property_name, key.as_ref()) {
                feature.set_property(name, value.clone());
            }
            out.push(feature);
        }
    }
    Ok(out)
}
