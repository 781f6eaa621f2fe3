//! Polygon intersection, union and difference
//!
//! The areal work is done by `geo`'s `BooleanOps`; this module handles the
//! degenerate cases around it: slivers, touching borders and empty results.

use geo::{Area, BooleanOps, Geometry, GeometryCollection, MultiPoint, MultiPolygon, Point};
use spatialkit_core::{meta, Algorithm, Error, Feature, FeatureCollection, Result};
use tracing::debug;

use crate::boolean::boolean_point_on_line;
use crate::line::{line_overlap, segment_crossings};
use crate::transform::{clean_coords, truncate, TruncateParams};

/// Polygon intersection
pub struct Intersect;

impl Algorithm for Intersect {
    type Input = (Geometry<f64>, Geometry<f64>);
    type Output = Option<Geometry<f64>>;
    type Params = ();
    type Error = Error;

    fn name(&self) -> &'static str {
        "Intersect"
    }

    fn description(&self) -> &'static str {
        "Area shared by two polygons, falling back to shared borders or points"
    }

    fn execute(&self, input: Self::Input, _params: Self::Params) -> Result<Self::Output> {
        intersect(&input.0, &input.1)
    }
}

/// Polygon union
pub struct Union;

impl Algorithm for Union {
    type Input = FeatureCollection;
    type Output = Feature;
    type Params = ();
    type Error = Error;

    fn name(&self) -> &'static str {
        "Union"
    }

    fn description(&self) -> &'static str {
        "Merge polygons into a single polygon or multipolygon"
    }

    fn execute(&self, input: Self::Input, _params: Self::Params) -> Result<Self::Output> {
        union(&input)
    }
}

/// Polygon difference
pub struct Difference;

impl Algorithm for Difference {
    type Input = (Geometry<f64>, Geometry<f64>);
    type Output = Option<Geometry<f64>>;
    type Params = ();
    type Error = Error;

    fn name(&self) -> &'static str {
        "Difference"
    }

    fn description(&self) -> &'static str {
        "Area of the first polygon not covered by the second"
    }

    fn execute(&self, input: Self::Input, _params: Self::Params) -> Result<Self::Output> {
        difference(&input.0, &input.1)
    }
}

/// Polygonal parts of a geometry as a multipolygon
pub(crate) fn to_multi_polygon(geom: &Geometry<f64>, operation: &'static str) -> Result<MultiPolygon<f64>> {
    match geom {
        Geometry::Polygon(p) => Ok(MultiPolygon::new(vec![p.clone()])),
        Geometry::MultiPolygon(mp) => Ok(mp.clone()),
        Geometry::Rect(r) => Ok(MultiPolygon::new(vec![r.to_polygon()])),
        Geometry::Triangle(t) => Ok(MultiPolygon::new(vec![t.to_polygon()])),
        other => Err(Error::unsupported(operation, meta::geometry_type(other))),
    }
}

/// Polygon when there is a single part, multipolygon otherwise
pub(crate) fn from_multi_polygon(mut mp: MultiPolygon<f64>) -> Geometry<f64> {
    if mp.0.len() == 1 {
        Geometry::Polygon(mp.0.remove(0))
    } else {
        Geometry::MultiPolygon(mp)
    }
}

/// Drop zero-area parts left over from touching inputs
fn areal_parts(mp: MultiPolygon<f64>) -> MultiPolygon<f64> {
    MultiPolygon::new(mp.0.into_iter().filter(|p| p.unsigned_area() > 0.0).collect())
}

/// Whether a polygon collapses once rounded to four decimals
fn is_sliver(geom: &Geometry<f64>) -> bool {
    match clean_coords(&truncate(geom, TruncateParams { precision: 4 })) {
        Ok(cleaned) => meta::flatten(&cleaned).iter().any(|part| match part {
            Geometry::Polygon(p) => p.exterior().0.len() < 4,
            _ => false,
        }),
        Err(_) => true,
    }
}

/// Intersection of two polygons.
///
/// Returns the shared area when there is one. Polygons that only touch give
/// the shared border as a (multi)line and the isolated touching points as a
/// (multi)point, wrapped in a geometry collection when there are both.
/// Returns `None` when the inputs do not meet or either polygon is a
/// sliver at four decimals.
pub fn intersect(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<Option<Geometry<f64>>> {
    let mp_a = to_multi_polygon(a, "intersect")?;
    let mp_b = to_multi_polygon(b, "intersect")?;

    if is_sliver(a) || is_sliver(b) {
        debug!("intersect: input polygon too narrow, skipping");
        return Ok(None);
    }

    let six = TruncateParams::default();
    let mp_a = to_multi_polygon(&truncate(&Geometry::MultiPolygon(mp_a), six), "intersect")?;
    let mp_b = to_multi_polygon(&truncate(&Geometry::MultiPolygon(mp_b), six), "intersect")?;

    let shared = areal_parts(mp_a.intersection(&mp_b));
    if !shared.0.is_empty() {
        return Ok(Some(from_multi_polygon(shared)));
    }

    let boundary_a = Geometry::MultiPolygon(mp_a);
    let boundary_b = Geometry::MultiPolygon(mp_b);

    let mut border = line_overlap(&boundary_a, &boundary_b, 0.0)?;
    let mut points: Vec<Point<f64>> = segment_crossings(&meta::segments(&boundary_a), &meta::segments(&boundary_b))
        .into_iter()
        .map(Point::from)
        .filter(|p| !border.0.iter().any(|line| boolean_point_on_line(*p, line, false)))
        .collect();

    let lines = match border.0.len() {
        0 => None,
        1 => Some(Geometry::LineString(border.0.remove(0))),
        _ => Some(Geometry::MultiLineString(border)),
    };
    let corners = match points.len() {
        0 => None,
        1 => Some(Geometry::Point(points.remove(0))),
        _ => Some(Geometry::MultiPoint(MultiPoint::new(points))),
    };

    Ok(match (lines, corners) {
        (Some(lines), Some(corners)) => Some(Geometry::GeometryCollection(GeometryCollection(vec![
            lines, corners,
        ]))),
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => {
            debug!("intersect: polygons do not meet");
            None
        }
    })
}

/// Union of every polygon in a collection.
///
/// The result is a polygon when the inputs form one contiguous area and a
/// multipolygon otherwise. It carries the first feature's properties.
pub fn union(polygons: &FeatureCollection) -> Result<Feature> {
    let first = polygons.features.first().ok_or(Error::EmptyInput("union"))?;

    let mut merged = MultiPolygon::<f64>::new(vec![]);
    for geom in polygons.geometries() {
        let mp = to_multi_polygon(geom, "union")?;
        merged = if merged.0.is_empty() { mp } else { merged.union(&mp) };
    }

    Ok(Feature::with_properties(from_multi_polygon(merged), first.properties.clone()))
}

/// Part of `a` not covered by `b`, or `None` when nothing remains
pub fn difference(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<Option<Geometry<f64>>> {
    let mp_a = to_multi_polygon(a, "difference")?;
    let mp_b = to_multi_polygon(b, "difference")?;

    let remaining = areal_parts(mp_a.difference(&mp_b));
    if remaining.0.is_empty() {
        debug!("difference: first polygon fully covered");
        return Ok(None);
    }
    Ok(Some(from_multi_polygon(remaining)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{polygon, LineString};

    fn square(x: f64, y: f64, size: f64) -> Geometry<f64> {
        Geometry::Polygon(polygon![
            (x: x, y: y),
            (x: x + size, y: y),
            (x: x + size, y: y + size),
            (x: x, y: y + size),
            (x: x, y: y),
        ])
    }

    #[test]
    fn test_intersect_overlapping() {
        let result = intersect(&square(0.0, 0.0, 2.0), &square(1.0, 1.0, 2.0)).unwrap().unwrap();
        match result {
            Geometry::Polygon(p) => assert_relative_eq!(p.unsigned_area(), 1.0, epsilon = 1e-9),
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_intersect_shared_border() {
        let result = intersect(&square(0.0, 0.0, 1.0), &square(1.0, 0.0, 1.0)).unwrap().unwrap();
        match result {
            Geometry::LineString(ls) => {
                assert_eq!(ls.0.len(), 2);
                assert!(ls.0.iter().all(|c| c.x == 1.0));
            }
            other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn test_intersect_border_and_corner() {
        let touching = Geometry::MultiPolygon(MultiPolygon::new(vec![
            polygon![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 1.0), (x: 1.0, y: 1.0), (x: 1.0, y: 0.0)],
            polygon![(x: -1.0, y: 1.0), (x: 0.0, y: 1.0), (x: 0.0, y: 2.0), (x: -1.0, y: 2.0), (x: -1.0, y: 1.0)],
        ]));
        let result = intersect(&square(0.0, 0.0, 1.0), &touching).unwrap().unwrap();

        let Geometry::GeometryCollection(parts) = result else {
            panic!("expected a collection, got {:?}", result);
        };
        assert_eq!(parts.0.len(), 2);
        match &parts.0[0] {
            Geometry::LineString(ls) => assert!(ls.0.iter().all(|c| c.x == 1.0)),
            other => panic!("expected line, got {:?}", other),
        }
        assert_eq!(parts.0[1], Geometry::Point(Point::new(0.0, 1.0)));
    }

    #[test]
    fn test_intersect_shared_corner() {
        let result = intersect(&square(0.0, 0.0, 1.0), &square(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(result, Some(Geometry::Point(Point::new(1.0, 1.0))));
    }

    #[test]
    fn test_intersect_disjoint_and_sliver() {
        assert_eq!(intersect(&square(0.0, 0.0, 1.0), &square(5.0, 5.0, 1.0)).unwrap(), None);

        let sliver = Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 0.00001),
            (x: 0.0, y: 0.00001),
            (x: 0.0, y: 0.0),
        ]);
        assert_eq!(intersect(&sliver, &square(0.0, 0.0, 1.0)).unwrap(), None);
    }

    #[test]
    fn test_intersect_rejects_lines() {
        let line = Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]));
        assert!(intersect(&line, &square(0.0, 0.0, 1.0)).is_err());
    }

    #[test]
    fn test_union() {
        let mut first = Feature::new(square(0.0, 0.0, 2.0));
        first.set_property("name", "first");
        let fc: FeatureCollection = vec![first, Feature::new(square(1.0, 1.0, 2.0))].into();

        let merged = union(&fc).unwrap();
        assert_eq!(merged.get_property("name").and_then(|v| v.as_str()), Some("first"));
        match merged.geometry {
            Some(Geometry::Polygon(p)) => assert_relative_eq!(p.unsigned_area(), 7.0, epsilon = 1e-9),
            other => panic!("expected polygon, got {:?}", other),
        }

        let apart: FeatureCollection =
            vec![Feature::new(square(0.0, 0.0, 1.0)), Feature::new(square(5.0, 5.0, 1.0))].into();
        assert_eq!(union(&apart).unwrap().geometry_type(), "MultiPolygon");
        assert!(union(&FeatureCollection::new()).is_err());
    }

    #[test]
    fn test_difference() {
        let result = difference(&square(0.0, 0.0, 2.0), &square(1.0, 0.0, 2.0)).unwrap().unwrap();
        assert_relative_eq!(result.unsigned_area(), 2.0, epsilon = 1e-9);
        assert_eq!(difference(&square(1.0, 1.0, 1.0), &square(0.0, 0.0, 4.0)).unwrap(), None);
    }

    #[test]
    fn test_algorithm_interface() {
        let out = Intersect.execute_default((square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0))).unwrap();
        assert!(out.is_some());
        assert_eq!(Intersect.name(), "Intersect");
    }
}
