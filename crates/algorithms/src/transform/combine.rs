//! Explode features into vertices, or combine them into multi-part features

use geo::{Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use spatialkit_core::{meta, AttributeValue, Feature, FeatureCollection};

/// One point feature per coordinate, carrying the source feature's properties.
///
/// Polygon rings include their closing coordinate.
pub fn explode(fc: &FeatureCollection) -> FeatureCollection {
    fc.iter()
        .filter_map(|f| f.geometry.as_ref().map(|g| (f, g)))
        .flat_map(|(f, g)| {
            meta::coords(g, false)
                .into_iter()
                .map(move |c| Feature::with_properties(Point::from(c), f.properties.clone()))
        })
        .collect()
}

/// Combine features into at most one MultiPoint, MultiLineString and MultiPolygon.
///
/// Each output feature lists the properties of its members, in order, under
/// `collectedProperties`. Output is ordered MultiLineString, MultiPoint,
/// MultiPolygon; empty groups are skipped.
pub fn combine(fc: &FeatureCollection) -> FeatureCollection {
    let mut points: Vec<Point<f64>> = Vec::new();
    let mut lines: Vec<LineString<f64>> = Vec::new();
    let mut polygons: Vec<Polygon<f64>> = Vec::new();
    let mut point_props = Vec::new();
    let mut line_props = Vec::new();
    let mut polygon_props = Vec::new();

    for feature in fc {
        let Some(geom) = &feature.geometry else { continue };
        let props = AttributeValue::Object(feature.properties.clone());
        match geom {
            Geometry::Point(p) => {
                points.push(*p);
                point_props.push(props);
            }
            Geometry::MultiPoint(mp) => {
                points.extend(mp.0.iter().copied());
                point_props.push(props);
            }
            Geometry::LineString(ls) => {
                lines.push(ls.clone());
                line_props.push(props);
            }
            Geometry::MultiLineString(mls) => {
                lines.extend(mls.0.iter().cloned());
                line_props.push(props);
            }
            Geometry::Polygon(p) => {
                polygons.push(p.clone());
                polygon_props.push(props);
            }
            Geometry::MultiPolygon(mp) => {
                polygons.extend(mp.0.iter().cloned());
                polygon_props.push(props);
            }
            _ => {}
        }
    }

    let mut out = FeatureCollection::new();
    let mut emit = |geometry: Geometry<f64>, props: Vec<AttributeValue>| {
        let mut f = Feature::new(geometry);
        f.set_property("collectedProperties", AttributeValue::Array(props));
        out.push(f);
    };
    if !lines.is_empty() {
        emit(MultiLineString::new(lines).into(), line_props);
    }
    if !points.is_empty() {
        emit(MultiPoint::new(points).into(), point_props);
    }
    if !polygons.is_empty() {
        emit(MultiPolygon::new(polygons).into(), polygon_props);
    }
    out
}
