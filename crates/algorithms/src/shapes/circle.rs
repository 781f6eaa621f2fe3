//! Circles, ellipses, sectors and arcs around a center point

use geo::{Coord, Geometry, LineString, Point, Polygon};
use spatialkit_core::units::{bearing_to_azimuth, degrees_to_radians};
use spatialkit_core::{Error, Result, Units};

use crate::measurement::{destination, rhumb_destination};
use crate::transform::transform_rotate;

/// Parameters for [`circle`], [`sector`] and [`line_arc`]
#[derive(Debug, Clone, Copy)]
pub struct CircleParams {
    /// Vertices per full turn (default: 64)
    pub steps: usize,
    /// Units of the radius (default: kilometers)
    pub units: Units,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self { steps: 64, units: Units::Kilometers }
    }
}

/// Parameters for [`ellipse`]
#[derive(Debug, Clone, Copy)]
pub struct EllipseParams {
    /// Rotation in degrees, clockwise positive (default: 0)
    pub angle: f64,
    /// Vertices on the ring (default: 64)
    pub steps: usize,
    /// Units of both semi-axes (default: kilometers)
    pub units: Units,
    /// Rotation pivot; the center when `None`
    pub pivot: Option<Point<f64>>,
}

impl Default for EllipseParams {
    fn default() -> Self {
        Self {
            angle: 0.0,
            steps: 64,
            units: Units::Kilometers,
            pivot: None,
        }
    }
}

fn check_steps(steps: usize) -> Result<()> {
    if steps == 0 {
        return Err(Error::invalid_parameter("steps", steps, "steps must be at least 1"));
    }
    Ok(())
}

/// Geodesic circle polygon; vertices run counter-clockwise from due north
pub fn circle(center: Point<f64>, radius: f64, params: CircleParams) -> Result<Polygon<f64>> {
    check_steps(params.steps)?;
    let steps = params.steps as f64;
    let mut ring: Vec<Coord<f64>> = (0..params.steps)
        .map(|i| destination(center, radius, i as f64 * -360.0 / steps, params.units).0)
        .collect();
    ring.push(ring[0]);
    Ok(Polygon::new(LineString::new(ring), vec![]))
}

/// Ellipse polygon with semi-axes along x and y before rotation.
///
/// In [`Units::Degrees`] the axes are planar and rotation happens in the
/// plane; otherwise the axes are measured along rhumb lines and the ring is
/// rotated with [`transform_rotate`].
pub fn ellipse(center: Point<f64>, x_semi_axis: f64, y_semi_axis: f64, params: EllipseParams) -> Result<Polygon<f64>> {
    check_steps(params.steps)?;
    let degrees = params.units == Units::Degrees;

    let (a, b) = if degrees {
        (x_semi_axis, y_semi_axis)
    } else {
        let east = rhumb_destination(center, x_semi_axis, 90.0, params.units);
        let north = rhumb_destination(center, y_semi_axis, 0.0, params.units);
        (east.x() - center.x(), north.y() - center.y())
    };
    let angle_rad = degrees_to_radians(params.angle);

    let mut ring: Vec<Coord<f64>> = Vec::with_capacity(params.steps + 1);
    for i in 0..params.steps {
        let step_angle = i as f64 * -360.0 / params.steps as f64;
        let tan = degrees_to_radians(step_angle).tan();
        let mut x = a * b / (b.powi(2) + a.powi(2) * tan.powi(2)).sqrt();
        let mut y = a * b / (a.powi(2) + b.powi(2) / tan.powi(2)).sqrt();
        if (-270.0..-90.0).contains(&step_angle) {
            x = -x;
        }
        if (-360.0..-180.0).contains(&step_angle) {
            y = -y;
        }
        if degrees {
            let nx = x * angle_rad.cos() + y * angle_rad.sin();
            let ny = y * angle_rad.cos() - x * angle_rad.sin();
            x = nx;
            y = ny;
        }
        ring.push(Coord { x: x + center.x(), y: y + center.y() });
    }
    ring.push(ring[0]);
    let polygon = Polygon::new(LineString::new(ring), vec![]);

    if degrees {
        return Ok(polygon);
    }
    let pivot = params.pivot.unwrap_or(center);
    match transform_rotate(&Geometry::Polygon(polygon), params.angle, Some(pivot))? {
        Geometry::Polygon(p) => Ok(p),
        _ => Err(Error::Algorithm("rotation changed the geometry type".into())),
    }
}

/// Arc of a circle between two bearings, clockwise from `bearing1`.
///
/// Equal bearings give the full circle ring.
pub fn line_arc(
    center: Point<f64>,
    radius: f64,
    bearing1: f64,
    bearing2: f64,
    params: CircleParams,
) -> Result<LineString<f64>> {
    check_steps(params.steps)?;
    let angle1 = bearing_to_azimuth(bearing1);
    let angle2 = bearing_to_azimuth(bearing2);

    if angle1 == angle2 {
        return Ok(circle(center, radius, params)?.exterior().clone());
    }
    let start = angle1;
    let end = if angle1 < angle2 { angle2 } else { angle2 + 360.0 };

    let mut coords = Vec::new();
    let mut alpha = start;
    let mut i = 0;
    while alpha < end {
        coords.push(destination(center, radius, alpha, params.units).0);
        i += 1;
        alpha = start + i as f64 * 360.0 / params.steps as f64;
    }
    if alpha >= end {
        coords.push(destination(center, radius, end, params.units).0);
    }
    Ok(LineString::new(coords))
}

/// Circle sector between two bearings, closed through the center
pub fn sector(
    center: Point<f64>,
    radius: f64,
    bearing1: f64,
    bearing2: f64,
    params: CircleParams,
) -> Result<Polygon<f64>> {
    if bearing_to_azimuth(bearing1) == bearing_to_azimuth(bearing2) {
        return circle(center, radius, params);
    }
    let arc = line_arc(center, radius, bearing1, bearing2, params)?;

    let mut ring = Vec::with_capacity(arc.0.len() + 2);
    ring.push(center.0);
    ring.extend(arc.0);
    ring.push(center.0);
    Ok(Polygon::new(LineString::new(ring), vec![]))
}
