//! Great-circle arcs with antimeridian splitting

use geo::{Coord, Geometry, LineString, MultiLineString, Point};
use spatialkit_core::{Error, Result};
use std::f64::consts::PI;

/// Parameters for [`great_circle`]
#[derive(Debug, Clone, Copy)]
pub struct GreatCircleParams {
    /// Vertices on the arc (default: 100)
    pub npoints: usize,
    /// Distance in degrees from the antimeridian within which a jump
    /// splits the arc (default: 10)
    pub offset: f64,
}

impl Default for GreatCircleParams {
    fn default() -> Self {
        Self { npoints: 100, offset: 10.0 }
    }
}

/// Great-circle path between two points.
///
/// Paths crossing the antimeridian come back as a MultiLineString split at
/// ±180°; others as a LineString. Antipodal endpoints are an error.
pub fn great_circle(start: Point<f64>, end: Point<f64>, params: GreatCircleParams) -> Result<Geometry<f64>> {
    let arc = GreatArc::new(start, end)?;

    let first_pass: Vec<Coord<f64>> = if params.npoints <= 2 {
        vec![start.0, end.0]
    } else {
        let delta = 1.0 / (params.npoints - 1) as f64;
        (0..params.npoints).map(|i| arc.interpolate(delta * i as f64)).collect()
    };

    let mut parts = split_at_antimeridian(&first_pass, params.offset);
    if parts.len() == 1 {
        return Ok(Geometry::LineString(LineString::new(parts.remove(0))));
    }
    Ok(Geometry::MultiLineString(MultiLineString::new(
        parts.into_iter().map(LineString::new).collect(),
    )))
}

struct GreatArc {
    lon1: f64,
    lat1: f64,
    lon2: f64,
    lat2: f64,
    g: f64,
}

impl GreatArc {
    fn new(start: Point<f64>, end: Point<f64>) -> Result<Self> {
        let (lon1, lat1) = (start.x().to_radians(), start.y().to_radians());
        let (lon2, lat2) = (end.x().to_radians(), end.y().to_radians());

        let w = lon1 - lon2;
        let h = lat1 - lat2;
        let z = (h / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (w / 2.0).sin().powi(2);
        let g = 2.0 * z.sqrt().asin();

        if g == PI {
            return Err(Error::invalid_parameter(
                "end",
                format!("{:?}", end),
                "start and end are antipodal",
            ));
        }
        if g.is_nan() {
            return Err(Error::Algorithm("could not compute great circle distance".into()));
        }
        Ok(Self { lon1, lat1, lon2, lat2, g })
    }

    fn interpolate(&self, f: f64) -> Coord<f64> {
        if self.g == 0.0 {
            return Coord { x: self.lon1.to_degrees(), y: self.lat1.to_degrees() };
        }
        let a = ((1.0 - f) * self.g).sin() / self.g.sin();
        let b = (f * self.g).sin() / self.g.sin();

        let x = a * self.lat1.cos() * self.lon1.cos() + b * self.lat2.cos() * self.lon2.cos();
        let y = a * self.lat1.cos() * self.lon1.sin() + b * self.lat2.cos() * self.lon2.sin();
        let z = a * self.lat1.sin() + b * self.lat2.sin();

        Coord {
            x: y.atan2(x).to_degrees(),
            y: z.atan2((x * x + y * y).sqrt()).to_degrees(),
        }
    }
}

fn split_at_antimeridian(points: &[Coord<f64>], offset: f64) -> Vec<Vec<Coord<f64>>> {
    let left_border = 180.0 - offset;
    let right_border = -180.0 + offset;
    let diff_space = 360.0 - offset;

    let mut has_big_diff = false;
    let mut max_small_diff: f64 = 0.0;
    for w in points.windows(2) {
        let (prev, x) = (w[0].x, w[1].x);
        let diff = (x - prev).abs();
        if diff > diff_space
            && ((x > left_border && prev < right_border) || (prev > left_border && x < right_border))
        {
            has_big_diff = true;
        } else if diff > max_small_diff {
            max_small_diff = diff;
        }
    }

    if !(has_big_diff && max_small_diff < offset) {
        return vec![points.to_vec()];
    }

    let mut parts: Vec<Vec<Coord<f64>>> = vec![Vec::new()];
    for (k, &p) in points.iter().enumerate() {
        let current = parts.len() - 1;
        if k == 0 || (p.x - points[k - 1].x).abs() <= diff_space {
            parts[current].push(p);
            continue;
        }

        let prev = points[k - 1];
        let (mut x1, mut y1, mut x2, mut y2) = (prev.x, prev.y, p.x, p.y);
        if x1 < right_border && x2 > left_border {
            std::mem::swap(&mut x1, &mut x2);
            std::mem::swap(&mut y1, &mut y2);
        }
        if x1 > left_border && x2 < right_border {
            x2 += 360.0;
        }

        if x1 <= 180.0 && x2 >= 180.0 && x1 < x2 {
            let ratio = (180.0 - x1) / (x2 - x1);
            let y = ratio * y2 + (1.0 - ratio) * y1;
            let (closing, opening) = if prev.x > left_border { (180.0, -180.0) } else { (-180.0, 180.0) };
            parts[current].push(Coord { x: closing, y });
            parts.push(vec![Coord { x: opening, y }]);
        } else {
            parts.push(Vec::new());
        }
        let last = parts.len() - 1;
        parts[last].push(p);
    }
    parts
}
