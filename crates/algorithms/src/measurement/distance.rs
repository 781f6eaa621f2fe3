//! Great-circle distance, bearing and destination on a spherical earth
//!
//! Haversine formulation over [`EARTH_RADIUS`](spatialkit_core::EARTH_RADIUS).
//! All angles are in decimal degrees, all inputs are `(lon, lat)` points.

use geo::Point;
use spatialkit_core::units::{
    degrees_to_radians, length_to_radians, radians_to_degrees, radians_to_length,
};
use spatialkit_core::Units;

/// Great-circle distance between two points.
///
/// ```text
/// a = sin²(Δφ/2) + cos φ1 · cos φ2 · sin²(Δλ/2)
/// d = 2 · atan2(√a, √(1−a))
/// ```
pub fn distance(from: Point<f64>, to: Point<f64>, units: Units) -> f64 {
    let d_lat = degrees_to_radians(to.y() - from.y());
    let d_lon = degrees_to_radians(to.x() - from.x());
    let lat1 = degrees_to_radians(from.y());
    let lat2 = degrees_to_radians(to.y());

    let a = (d_lat / 2.0).sin().powi(2)
        + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();

    radians_to_length(2.0 * a.sqrt().atan2((1.0 - a).sqrt()), units)
}

/// Initial great-circle bearing from `start` to `end` in -180..180.
///
/// With `final_bearing`, returns the bearing on arrival at `end`
/// in 0..360 instead.
pub fn bearing(start: Point<f64>, end: Point<f64>, final_bearing: bool) -> f64 {
    if final_bearing {
        return (bearing(end, start, false) + 180.0) % 360.0;
    }

    let lon1 = degrees_to_radians(start.x());
    let lon2 = degrees_to_radians(end.x());
    let lat1 = degrees_to_radians(start.y());
    let lat2 = degrees_to_radians(end.y());

    let a = (lon2 - lon1).sin() * lat2.cos();
    let b = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * (lon2 - lon1).cos();

    radians_to_degrees(a.atan2(b))
}

/// Point reached by travelling `distance` from `origin` along `bearing`
pub fn destination(origin: Point<f64>, distance: f64, bearing: f64, units: Units) -> Point<f64> {
    let lon1 = degrees_to_radians(origin.x());
    let lat1 = degrees_to_radians(origin.y());
    let bearing_rad = degrees_to_radians(bearing);
    let radians = length_to_radians(distance, units);

    let lat2 = (lat1.sin() * radians.cos() + lat1.cos() * radians.sin() * bearing_rad.cos()).asin();
    let lon2 = lon1
        + (bearing_rad.sin() * radians.sin() * lat1.cos())
            .atan2(radians.cos() - lat1.sin() * lat2.sin());

    Point::new(radians_to_degrees(lon2), radians_to_degrees(lat2))
}

/// Geodesic midpoint between two points
pub fn midpoint(a: Point<f64>, b: Point<f64>) -> Point<f64> {
    let dist = distance(a, b, Units::Kilometers);
    let heading = bearing(a, b, false);
    destination(a, dist / 2.0, heading, Units::Kilometers)
}
