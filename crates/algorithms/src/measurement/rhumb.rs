//! Rhumb line (loxodrome) measurements
//!
//! A rhumb line crosses every meridian at the same angle. Distances are
//! measured on the Mercator-stretched latitude `ψ = ln(tan(π/4 + φ/2))`.

use geo::Point;
use spatialkit_core::units::{convert_length, degrees_to_radians, radians_to_degrees};
use spatialkit_core::{Units, EARTH_RADIUS};
use std::f64::consts::PI;

/// Below this stretched-latitude difference the course is treated as east-west
const PSI_EPSILON: f64 = 10e-12;

/// Longitude shift that keeps `lon` within 180° of `reference`
fn antimeridian_shift(reference: f64, lon: f64) -> f64 {
    if lon - reference > 180.0 {
        -360.0
    } else if reference - lon > 180.0 {
        360.0
    } else {
        0.0
    }
}

fn stretched_latitude_delta(phi1: f64, phi2: f64) -> f64 {
    ((phi2 / 2.0 + PI / 4.0).tan() / (phi1 / 2.0 + PI / 4.0).tan()).ln()
}

/// Rhumb distance between two points
pub fn rhumb_distance(from: Point<f64>, to: Point<f64>, units: Units) -> f64 {
    let dest_x = to.x() + antimeridian_shift(from.x(), to.x());

    let phi1 = from.y() * PI / 180.0;
    let phi2 = to.y() * PI / 180.0;
    let d_phi = phi2 - phi1;
    let mut d_lambda = (dest_x - from.x()).abs() * PI / 180.0;
    if d_lambda > PI {
        d_lambda -= 2.0 * PI;
    }

    let d_psi = stretched_latitude_delta(phi1, phi2);
    let q = if d_psi.abs() > PSI_EPSILON { d_phi / d_psi } else { phi1.cos() };
    let delta = (d_phi * d_phi + q * q * d_lambda * d_lambda).sqrt();

    convert_length(delta * EARTH_RADIUS, Units::Meters, units)
}

fn rhumb_azimuth(from: Point<f64>, to: Point<f64>) -> f64 {
    let phi1 = degrees_to_radians(from.y());
    let phi2 = degrees_to_radians(to.y());
    let mut d_lambda = degrees_to_radians(to.x() - from.x());
    if d_lambda > PI {
        d_lambda -= 2.0 * PI;
    }
    if d_lambda < -PI {
        d_lambda += 2.0 * PI;
    }

    let d_psi = stretched_latitude_delta(phi1, phi2);
    let theta = d_lambda.atan2(d_psi);

    (radians_to_degrees(theta) + 360.0) % 360.0
}

/// Constant bearing from `start` to `end` in -180..180.
///
/// With `final_bearing`, returns the reverse course (from `end` back to `start`).
pub fn rhumb_bearing(start: Point<f64>, end: Point<f64>, final_bearing: bool) -> f64 {
    let bear360 = if final_bearing {
        rhumb_azimuth(end, start)
    } else {
        rhumb_azimuth(start, end)
    };

    if bear360 > 180.0 {
        -(360.0 - bear360)
    } else {
        bear360
    }
}

/// Point reached by travelling `distance` from `origin` on a constant `bearing`.
///
/// Negative distances travel backwards. Crossing the antimeridian yields
/// longitudes beyond ±180 so the result stays continuous with `origin`.
pub fn rhumb_destination(origin: Point<f64>, distance: f64, bearing: f64, units: Units) -> Point<f64> {
    let meters = convert_length(distance.abs(), units, Units::Meters);
    let meters = if distance < 0.0 { -meters } else { meters };

    let delta = meters / EARTH_RADIUS;
    let lambda1 = origin.x() * PI / 180.0;
    let phi1 = degrees_to_radians(origin.y());
    let theta = degrees_to_radians(bearing);

    let d_phi = delta * theta.cos();
    let mut phi2 = phi1 + d_phi;
    // past a pole
    if phi2.abs() > PI / 2.0 {
        phi2 = if phi2 > 0.0 { PI - phi2 } else { -PI - phi2 };
    }

    let d_psi = stretched_latitude_delta(phi1, phi2);
    let q = if d_psi.abs() > PSI_EPSILON { d_phi / d_psi } else { phi1.cos() };
    let d_lambda = delta * theta.sin() / q;
    let lambda2 = lambda1 + d_lambda;

    let x = ((lambda2 * 180.0 / PI + 540.0) % 360.0) - 180.0;
    let y = phi2 * 180.0 / PI;

    Point::new(x + antimeridian_shift(origin.x(), x), y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rhumb_distance() {
        let a = Point::new(-75.343, 39.984);
        let b = Point::new(-75.534, 39.123);

        assert_relative_eq!(rhumb_distance(a, b, Units::Kilometers), 97.12923942772164, epsilon = 1e-8);
        assert_relative_eq!(rhumb_distance(a, b, Units::Miles), 60.35331130430886, epsilon = 1e-8);
    }

    #[test]
    fn test_rhumb_distance_across_antimeridian() {
        let a = Point::new(179.5, 0.0);
        let b = Point::new(-179.5, 0.0);
        assert_relative_eq!(rhumb_distance(a, b, Units::Kilometers), 111.1950802335329, epsilon = 1e-8);
    }

    #[test]
    fn test_rhumb_bearing() {
        let start = Point::new(-75.0, 45.0);
        let end = Point::new(20.0, 60.0);

        assert_relative_eq!(rhumb_bearing(start, end, false), 75.28061364784332, epsilon = 1e-9);
        assert_relative_eq!(rhumb_bearing(start, end, true), -104.71938635215668, epsilon = 1e-9);
    }

    #[test]
    fn test_rhumb_destination() {
        let origin = Point::new(-75.343, 39.984);
        let dest = rhumb_destination(origin, 50.0, 90.0, Units::Kilometers);

        assert_relative_eq!(dest.x(), -74.75614780967783, epsilon = 1e-9);
        assert_relative_eq!(dest.y(), 39.984, epsilon = 1e-9);
    }

    #[test]
    fn test_rhumb_destination_crosses_antimeridian() {
        let dest = rhumb_destination(Point::new(179.5, 0.0), 200.0, 90.0, Units::Kilometers);
        assert_relative_eq!(dest.x(), 181.29864072744908, epsilon = 1e-8);
        assert_relative_eq!(dest.y(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rhumb_destination_negative_distance() {
        let origin = Point::new(10.0, 10.0);
        let forward = rhumb_destination(origin, -25.0, 45.0, Units::Kilometers);
        let backward = rhumb_destination(origin, 25.0, 225.0, Units::Kilometers);
        assert_relative_eq!(forward.x(), backward.x(), epsilon = 1e-9);
        assert_relative_eq!(forward.y(), backward.y(), epsilon = 1e-9);
    }
}
