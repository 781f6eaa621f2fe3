use geo::{Coord, Geometry};
use spatialkit_core::meta;

/// Swap x and y of every coordinate (`[lat, lon]` <-> `[lon, lat]`)
pub fn flip(geom: &Geometry<f64>) -> Geometry<f64> {
    meta::map_coords(geom, |c| Coord { x: c.y, y: c.x })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Point};

    #[test]
    fn test_flip() {
        let g = Geometry::Point(Point::new(20.566, 43.5));
        assert_eq!(flip(&g), Geometry::Point(Point::new(43.5, 20.566)));

        let line = Geometry::LineString(LineString::from(vec![(1.0, 2.0), (3.0, 4.0)]));
        assert_eq!(flip(&flip(&line)), line);
    }
}
