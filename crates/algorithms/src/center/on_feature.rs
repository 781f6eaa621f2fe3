use geo::{Geometry, Point};
use spatialkit_core::{meta, Error, FeatureCollection, Result, Units};

use super::center::center;
use crate::boolean::{boolean_point_in_polygon, boolean_point_on_line};
use crate::measurement::distance;

/// A point guaranteed to lie on one of the features.
///
/// The bounding-box center is returned when it already touches a feature,
/// otherwise the vertex closest to it.
pub fn point_on_feature(fc: &FeatureCollection) -> Result<Point<f64>> {
    let cent = center(fc)?;

    if fc.geometries().any(|g| touches(cent, g)) {
        return Ok(cent);
    }

    meta::collection_coords(fc, false)
        .into_iter()
        .map(Point::from)
        .min_by(|a, b| {
            distance(cent, *a, Units::Kilometers).total_cmp(&distance(cent, *b, Units::Kilometers))
        })
        .ok_or(Error::EmptyInput("point_on_feature requires at least one coordinate"))
}

fn touches(pt: Point<f64>, geom: &Geometry<f64>) -> bool {
    match geom {
        Geometry::Point(p) => *p == pt,
        Geometry::MultiPoint(mp) => mp.0.contains(&pt),
        Geometry::LineString(ls) => boolean_point_on_line(pt, ls, false),
        Geometry::MultiLineString(mls) => mls.0.iter().any(|ls| boolean_point_on_line(pt, ls, false)),
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => {
            boolean_point_in_polygon(pt, geom, false).unwrap_or(false)
        }
        Geometry::GeometryCollection(gc) => gc.0.iter().any(|g| touches(pt, g)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, LineString};
    use spatialkit_core::Feature;

    #[test]
    fn test_center_inside_polygon() {
        let fc: FeatureCollection =
            vec![Feature::new(polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 4.0), (x: 0.0, y: 0.0)])]
                .into();
        assert_eq!(point_on_feature(&fc).unwrap(), Point::new(2.0, 2.0));
    }

    #[test]
    fn test_falls_back_to_nearest_vertex() {
        // bbox center (3, 3) is not on the hook
        let fc: FeatureCollection =
            vec![Feature::new(LineString::from(vec![(0.0, 0.0), (6.0, 0.0), (6.0, 6.0), (5.0, 6.0)]))].into();
        assert_eq!(point_on_feature(&fc).unwrap(), Point::new(5.0, 6.0));
        assert!(point_on_feature(&FeatureCollection::new()).is_err());
    }
}
