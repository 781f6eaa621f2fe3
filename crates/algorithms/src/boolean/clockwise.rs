use geo::LineString;

/// Whether a ring winds clockwise (shoelace sum over `(x2 − x1)(y2 + y1)`)
pub fn boolean_clockwise(ring: &LineString<f64>) -> bool {
    let sum: f64 = ring
        .0
        .windows(2)
        .map(|w| (w[1].x - w[0].x) * (w[1].y + w[0].y))
        .sum();
    sum > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clockwise() {
        let cw = LineString::from(vec![(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        let ccw = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert!(boolean_clockwise(&cw));
        assert!(!boolean_clockwise(&ccw));
    }
}
