use geo::{Coord, LineString};
use spatialkit_core::{Error, Result};

/// Parameters for [`bezier_spline`]
#[derive(Debug, Clone, Copy)]
pub struct BezierParams {
    /// Time steps across the whole curve (default: 10000)
    pub resolution: usize,
    /// How tightly the curve follows the vertices, 0..1 (default: 0.85)
    pub sharpness: f64,
}

impl Default for BezierParams {
    fn default() -> Self {
        Self { resolution: 10_000, sharpness: 0.85 }
    }
}

/// Smooth curve through every vertex of a line using cubic Bézier pieces
pub fn bezier_spline(line: &LineString<f64>, params: BezierParams) -> Result<LineString<f64>> {
    if line.0.len() < 2 {
        return Err(Error::InvalidGeometry("line must contain at least 2 positions".into()));
    }
    let spline = Spline::new(&line.0, params);
    let duration = params.resolution;

    // every other block of 100 time units; the end time itself is not sampled
    let coords = (0..duration)
        .step_by(10)
        .filter(|time| (time / 100) % 2 == 0)
        .map(|time| spline.pos(time))
        .collect();

    Ok(LineString::new(coords))
}

struct Spline<'a> {
    points: &'a [Coord<f64>],
    /// Incoming and outgoing control point of each vertex
    controls: Vec<(Coord<f64>, Coord<f64>)>,
    duration: usize,
}

impl<'a> Spline<'a> {
    fn new(points: &'a [Coord<f64>], params: BezierParams) -> Self {
        let sharpness = params.sharpness;
        let centers: Vec<Coord<f64>> = points.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect();

        let mut controls = Vec::with_capacity(points.len());
        controls.push((points[0], points[0]));
        for i in 0..centers.len().saturating_sub(1) {
            let p = points[i + 1];
            let d = p - (centers[i] + centers[i + 1]) / 2.0;
            controls.push((
                p * (1.0 - sharpness) + (centers[i] + d) * sharpness,
                p * (1.0 - sharpness) + (centers[i + 1] + d) * sharpness,
            ));
        }
        let last = points[points.len() - 1];
        controls.push((last, last));

        Self { points, controls, duration: params.resolution }
    }

    fn pos(&self, time: usize) -> Coord<f64> {
        let duration = self.duration.max(1);
        let t = time.min(duration) as f64 / duration as f64;
        let n_points = self.points.len();
        if t >= 1.0 {
            return self.points[n_points - 1];
        }
        let scaled = (n_points - 1) as f64 * t;
        let n = scaled.floor() as usize;
        let t1 = scaled - n as f64;
        bezier(t1, self.points[n], self.controls[n].1, self.controls[n + 1].0, self.points[n + 1])
    }
}

fn bezier(t: f64, p1: Coord<f64>, c1: Coord<f64>, c2: Coord<f64>, p2: Coord<f64>) -> Coord<f64> {
    let u = 1.0 - t;
    let b = [t * t * t, 3.0 * t * t * u, 3.0 * t * u * u, u * u * u];
    p2 * b[0] + c2 * b[1] + c1 * b[2] + p1 * b[3]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_passes_through_vertices() {
        let line = LineString::from(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let curve = bezier_spline(&line, BezierParams::default()).unwrap();

        assert_eq!(curve.0.len(), 500);
        assert_eq!(curve.0[0], Coord { x: 0.0, y: 0.0 });
        assert_relative_eq!(curve.0[250].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(curve.0[250].y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_stops_short_of_end_time() {
        let line = LineString::from(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let curve = bezier_spline(&line, BezierParams { resolution: 1000, ..Default::default() }).unwrap();

        // times 0..90, 200..290, .., 800..890
        assert_eq!(curve.0.len(), 50);
        let last = curve.0[49];
        assert!(last.x > 1.5 && last.x < 2.0);
        assert_ne!(last, Coord { x: 2.0, y: 0.0 });
    }

    #[test]
    fn test_rejects_single_vertex() {
        let line = LineString::from(vec![(0.0, 0.0)]);
        assert!(bezier_spline(&line, BezierParams::default()).is_err());
    }
}
