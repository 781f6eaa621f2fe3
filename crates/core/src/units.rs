//! Units of measurement and spherical-earth conversions.
//!
//! Lengths are converted through radians of arc on a sphere of radius
//! [`EARTH_RADIUS`]. Areas are converted through square meters.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Mean earth radius in meters (IUGG)
pub const EARTH_RADIUS: f64 = 6_371_008.8;

/// Length units accepted by distance-based operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Centimeters,
    Degrees,
    Feet,
    Inches,
    #[default]
    Kilometers,
    Meters,
    Miles,
    Millimeters,
    NauticalMiles,
    Radians,
    Yards,
}

impl Units {
    /// How many of this unit make up one radian of arc on the earth's surface
    pub fn factor(self) -> f64 {
        match self {
            Units::Centimeters => EARTH_RADIUS * 100.0,
            Units::Degrees => EARTH_RADIUS / 111_325.0,
            Units::Feet => EARTH_RADIUS * 3.28084,
            Units::Inches => EARTH_RADIUS * 39.370,
            Units::Kilometers => EARTH_RADIUS / 1000.0,
            Units::Meters => EARTH_RADIUS,
            Units::Miles => EARTH_RADIUS / 1609.344,
            Units::Millimeters => EARTH_RADIUS * 1000.0,
            Units::NauticalMiles => EARTH_RADIUS / 1852.0,
            Units::Radians => 1.0,
            Units::Yards => EARTH_RADIUS * 1.0936,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Units::Centimeters => "centimeters",
            Units::Degrees => "degrees",
            Units::Feet => "feet",
            Units::Inches => "inches",
            Units::Kilometers => "kilometers",
            Units::Meters => "meters",
            Units::Miles => "miles",
            Units::Millimeters => "millimeters",
            Units::NauticalMiles => "nauticalmiles",
            Units::Radians => "radians",
            Units::Yards => "yards",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "centimeters" | "centimetres" => Ok(Units::Centimeters),
            "degrees" => Ok(Units::Degrees),
            "feet" => Ok(Units::Feet),
            "inches" => Ok(Units::Inches),
            "kilometers" | "kilometres" => Ok(Units::Kilometers),
            "meters" | "metres" => Ok(Units::Meters),
            "miles" => Ok(Units::Miles),
            "millimeters" | "millimetres" => Ok(Units::Millimeters),
            "nauticalmiles" => Ok(Units::NauticalMiles),
            "radians" => Ok(Units::Radians),
            "yards" => Ok(Units::Yards),
            _ => Err(Error::invalid_parameter("units", s, "unknown length unit")),
        }
    }
}

/// Area units accepted by [`convert_area`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnits {
    Acres,
    Centimeters,
    Feet,
    Hectares,
    Inches,
    Kilometers,
    #[default]
    Meters,
    Miles,
    Millimeters,
    Yards,
}

impl AreaUnits {
    /// How many square units make up one square meter
    pub fn factor(self) -> f64 {
        match self {
            AreaUnits::Acres => 0.000_247_105,
            AreaUnits::Centimeters => 10_000.0,
            AreaUnits::Feet => 10.763_910_417,
            AreaUnits::Hectares => 0.0001,
            AreaUnits::Inches => 1550.003_100_006,
            AreaUnits::Kilometers => 0.000_001,
            AreaUnits::Meters => 1.0,
            AreaUnits::Miles => 3.86e-7,
            AreaUnits::Millimeters => 1_000_000.0,
            AreaUnits::Yards => 1.195_990_046,
        }
    }
}

impl FromStr for AreaUnits {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "acres" => Ok(AreaUnits::Acres),
            "centimeters" | "centimetres" => Ok(AreaUnits::Centimeters),
            "feet" => Ok(AreaUnits::Feet),
            "hectares" => Ok(AreaUnits::Hectares),
            "inches" => Ok(AreaUnits::Inches),
            "kilometers" | "kilometres" => Ok(AreaUnits::Kilometers),
            "meters" | "metres" => Ok(AreaUnits::Meters),
            "miles" => Ok(AreaUnits::Miles),
            "millimeters" | "millimetres" => Ok(AreaUnits::Millimeters),
            "yards" => Ok(AreaUnits::Yards),
            _ => Err(Error::invalid_parameter("units", s, "unknown area unit")),
        }
    }
}

/// Convert an arc in radians to a length in `units`
#[inline]
pub fn radians_to_length(radians: f64, units: Units) -> f64 {
    radians * units.factor()
}

/// Convert a length in `units` to an arc in radians
#[inline]
pub fn length_to_radians(distance: f64, units: Units) -> f64 {
    distance / units.factor()
}

/// Convert a length in `units` to degrees of arc
#[inline]
pub fn length_to_degrees(distance: f64, units: Units) -> f64 {
    radians_to_degrees(length_to_radians(distance, units))
}

/// Convert a length between two units
pub fn convert_length(length: f64, from: Units, to: Units) -> f64 {
    radians_to_length(length_to_radians(length, from), to)
}

/// Convert an area between two units
pub fn convert_area(area: f64, from: AreaUnits, to: AreaUnits) -> f64 {
    (area / from.factor()) * to.factor()
}

/// Convert any bearing (-180..180 or beyond) to an azimuth in 0..360
pub fn bearing_to_azimuth(bearing: f64) -> f64 {
    let angle = bearing % 360.0;
    if angle < 0.0 {
        angle + 360.0
    } else {
        angle
    }
}

#[inline]
pub fn radians_to_degrees(radians: f64) -> f64 {
    (radians % (2.0 * PI)) * 180.0 / PI
}

#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    (degrees % 360.0) * PI / 180.0
}

/// Round `value` to `precision` decimal places
pub fn round(value: f64, precision: u32) -> f64 {
    let multiplier = 10f64.powi(precision as i32);
    (value * multiplier).round() / multiplier
}
