//! Bounding-box center, vertex centroid, weighted mean center and center of mass

use geo::{Centroid, ConvexHull, Geometry, MultiPoint, Point};
use spatialkit_core::{bbox_of, meta, BBox, Error, Feature, FeatureCollection, Result};

/// Center of a bounding box
pub fn center_of_bbox(bb: &BBox) -> Point<f64> {
    let (x, y) = bb.center();
    Point::new(x, y)
}

/// Center of the bounding box of every feature
pub fn center(fc: &FeatureCollection) -> Result<Point<f64>> {
    bbox_of(fc)
        .map(|bb| center_of_bbox(&bb))
        .ok_or(Error::EmptyInput("center requires at least one coordinate"))
}

/// Mean of all vertices, ignoring the closing vertex of polygon rings.
///
/// Returns `None` for empty geometries.
pub fn centroid(geom: &Geometry<f64>) -> Option<Point<f64>> {
    let coords = meta::coords(geom, true);
    if coords.is_empty() {
        return None;
    }
    let n = coords.len() as f64;
    let (sx, sy) = coords.iter().fold((0.0, 0.0), |(sx, sy), c| (sx + c.x, sy + c.y));
    Some(Point::new(sx / n, sy / n))
}

/// Numeric weight of a feature; absent or null weights count as 1
pub(crate) fn feature_weight(feature: &Feature, index: usize, weight: Option<&str>) -> Result<f64> {
    let Some(key) = weight else { return Ok(1.0) };
    match feature.get_property(key) {
        None => Ok(1.0),
        Some(v) if v.is_null() => Ok(1.0),
        Some(v) => v.as_f64().ok_or_else(|| {
            Error::invalid_parameter(
                "weight",
                format!("{:?}", v),
                format!("weight value must be a number for feature index {}", index),
            )
        }),
    }
}

/// Weighted mean of every vertex of every feature.
///
/// `weight` names a numeric property; features with a non-positive
/// weight are left out.
pub fn center_mean(fc: &FeatureCollection, weight: Option<&str>) -> Result<Point<f64>> {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_w = 0.0;

    for (i, feature) in fc.iter().enumerate() {
        let Some(geom) = &feature.geometry else { continue };
        let w = feature_weight(feature, i, weight)?;
        if w <= 0.0 {
            continue;
        }
        for c in meta::coords(geom, false) {
            sum_x += c.x * w;
            sum_y += c.y * w;
            sum_w += w;
        }
    }

    if sum_w == 0.0 {
        return Err(Error::EmptyInput("center_mean requires at least one weighted coordinate"));
    }
    Ok(Point::new(sum_x / sum_w, sum_y / sum_w))
}

/// Area-weighted centroid.
///
/// Polygons use their area centroid. Other geometries use the area
/// centroid of their convex hull, falling back to the vertex centroid
/// when the hull has no area.
pub fn center_of_mass(geom: &Geometry<f64>) -> Option<Point<f64>> {
    match geom {
        Geometry::Point(p) => Some(*p),
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => {
            geom.centroid().or_else(|| centroid(geom))
        }
        _ => {
            let hull = MultiPoint::from(meta::coords(geom, false)).convex_hull();
            if hull.exterior().0.len() >= 4 {
                hull.centroid().or_else(|| centroid(geom))
            } else {
                centroid(geom)
            }
        }
    }
}
