use geo::LineString;
use spatialkit_core::units::bearing_to_azimuth;
use spatialkit_core::Result;

use crate::measurement::rhumb_bearing;
use crate::transform::clean_line;

/// Whether each segment of `a` runs at the same rhumb azimuth as the
/// matching segment of `b`.
///
/// Redundant vertices are removed first; extra segments of the longer
/// line are not compared.
pub fn boolean_parallel(a: &LineString<f64>, b: &LineString<f64>) -> Result<bool> {
    let a = clean_line(a)?;
    let b = clean_line(b)?;

    let parallel = a.lines().zip(b.lines()).all(|(s1, s2)| {
        let slope1 = bearing_to_azimuth(rhumb_bearing(s1.start.into(), s1.end.into(), false));
        let slope2 = bearing_to_azimuth(rhumb_bearing(s2.start.into(), s2.end.into(), false));
        slope1 == slope2
    });
    Ok(parallel)
}
