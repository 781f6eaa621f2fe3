//! Spherical Mercator (EPSG:3857) <-> WGS84 (EPSG:4326)

use geo::{Coord, Geometry};
use spatialkit_core::meta;
use std::f64::consts::PI;

/// WGS84 semi-major axis in meters
const A: f64 = 6_378_137.0;
/// Half the width of the Mercator plane in meters
const MAX_EXTENT: f64 = 20_037_508.342_789_244;
/// Latitudes are clamped short of the poles, where y diverges
const MAX_LATITUDE: f64 = 89.999_99;

/// Project a longitude/latitude coordinate to Web Mercator meters
pub fn to_mercator_coord(c: Coord<f64>) -> Coord<f64> {
    let d2r = PI / 180.0;
    // longitudes beyond ±180 wrap once
    let lon = if c.x.abs() <= 180.0 { c.x } else { c.x - c.x.signum() * 360.0 };
    let lat = c.y.clamp(-MAX_LATITUDE, MAX_LATITUDE);

    let x = A * lon * d2r;
    let y = A * (PI * 0.25 + 0.5 * lat * d2r).tan().ln();

    Coord {
        x: x.clamp(-MAX_EXTENT, MAX_EXTENT),
        y: y.clamp(-MAX_EXTENT, MAX_EXTENT),
    }
}

/// Unproject Web Mercator meters to longitude/latitude
pub fn to_wgs84_coord(c: Coord<f64>) -> Coord<f64> {
    let r2d = 180.0 / PI;
    Coord {
        x: c.x * r2d / A,
        y: (PI * 0.5 - 2.0 * (-c.y / A).exp().atan()) * r2d,
    }
}

/// Project every coordinate of a geometry to Web Mercator
pub fn to_mercator(geom: &Geometry<f64>) -> Geometry<f64> {
    meta::map_coords(geom, to_mercator_coord)
}

/// Unproject every coordinate of a Web Mercator geometry
pub fn to_wgs84(geom: &Geometry<f64>) -> Geometry<f64> {
    meta::map_coords(geom, to_wgs84_coord)
}
