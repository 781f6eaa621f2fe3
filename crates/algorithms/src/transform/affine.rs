//! Rotation, scaling and translation along rhumb lines

use geo::{Coord, Geometry, Point};
use spatialkit_core::{bbox, meta, Error, Result, Units};
use std::str::FromStr;

use crate::center::{center_of_bbox, centroid};
use crate::measurement::{rhumb_bearing, rhumb_destination, rhumb_distance};

/// Rotate every coordinate by `angle` degrees (clockwise) around `pivot`.
///
/// The pivot defaults to the geometry's centroid.
pub fn transform_rotate(geom: &Geometry<f64>, angle: f64, pivot: Option<Point<f64>>) -> Result<Geometry<f64>> {
    if !angle.is_finite() {
        return Err(Error::invalid_parameter("angle", angle, "angle must be a finite number"));
    }
    if angle == 0.0 {
        return Ok(geom.clone());
    }
    let pivot = match pivot {
        Some(p) => p,
        None => centroid(geom).ok_or(Error::EmptyInput("cannot rotate an empty geometry"))?,
    };

    Ok(meta::map_coords(geom, move |c| {
        let p = Point::from(c);
        let bearing = rhumb_bearing(pivot, p, false) + angle;
        let dist = rhumb_distance(pivot, p, Units::Kilometers);
        rhumb_destination(pivot, dist, bearing, Units::Kilometers).0
    }))
}

/// Fixed point of a scaling
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScaleOrigin {
    SouthWest,
    SouthEast,
    NorthWest,
    NorthEast,
    /// Center of the bounding box
    Center,
    /// Mean of the vertices
    #[default]
    Centroid,
    Point(Point<f64>),
}

impl FromStr for ScaleOrigin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sw" | "southwest" | "westsouth" | "bottomleft" => Ok(ScaleOrigin::SouthWest),
            "se" | "southeast" | "eastsouth" | "bottomright" => Ok(ScaleOrigin::SouthEast),
            "nw" | "northwest" | "westnorth" | "topleft" => Ok(ScaleOrigin::NorthWest),
            "ne" | "northeast" | "eastnorth" | "topright" => Ok(ScaleOrigin::NorthEast),
            "center" => Ok(ScaleOrigin::Center),
            "centroid" => Ok(ScaleOrigin::Centroid),
            _ => Err(Error::invalid_parameter("origin", s, "invalid origin")),
        }
    }
}

impl ScaleOrigin {
    fn resolve(self, geom: &Geometry<f64>) -> Option<Point<f64>> {
        if let ScaleOrigin::Point(p) = self {
            return Some(p);
        }
        if self == ScaleOrigin::Centroid {
            return centroid(geom);
        }
        let bb = bbox(geom)?;
        Some(match self {
            ScaleOrigin::SouthWest => Point::new(bb.min_x, bb.min_y),
            ScaleOrigin::SouthEast => Point::new(bb.max_x, bb.min_y),
            ScaleOrigin::NorthWest => Point::new(bb.min_x, bb.max_y),
            ScaleOrigin::NorthEast => Point::new(bb.max_x, bb.max_y),
            _ => center_of_bbox(&bb),
        })
    }
}

/// Scale distances from `origin` by `factor`.
///
/// Points are returned unchanged. A zero factor is rejected.
pub fn transform_scale(geom: &Geometry<f64>, factor: f64, origin: ScaleOrigin) -> Result<Geometry<f64>> {
    if factor == 0.0 || !factor.is_finite() {
        return Err(Error::invalid_parameter("factor", factor, "invalid factor"));
    }
    if factor == 1.0 || matches!(geom, Geometry::Point(_)) {
        return Ok(geom.clone());
    }
    let origin = origin
        .resolve(geom)
        .ok_or(Error::EmptyInput("cannot scale an empty geometry"))?;

    Ok(meta::map_coords(geom, move |c| {
        let p = Point::from(c);
        let dist = rhumb_distance(origin, p, Units::Kilometers) * factor;
        let bearing = rhumb_bearing(origin, p, false);
        rhumb_destination(origin, dist, bearing, Units::Kilometers).0
    }))
}

/// Move every coordinate `distance` along a rhumb line at `direction` degrees.
///
/// Negative distances move in the opposite direction.
pub fn transform_translate(geom: &Geometry<f64>, distance: f64, direction: f64, units: Units) -> Result<Geometry<f64>> {
    if !distance.is_finite() {
        return Err(Error::invalid_parameter("distance", distance, "distance must be a finite number"));
    }
    if !direction.is_finite() {
        return Err(Error::invalid_parameter("direction", direction, "direction must be a finite number"));
    }
    if distance == 0.0 {
        return Ok(geom.clone());
    }
    let (distance, direction) = if distance < 0.0 { (-distance, direction + 180.0) } else { (distance, direction) };

    Ok(meta::map_coords(geom, move |c: Coord<f64>| {
        rhumb_destination(c.into(), distance, direction, units).0
    }))
}
