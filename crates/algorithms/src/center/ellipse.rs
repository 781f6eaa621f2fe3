//! Standard deviational ellipse
//!
//! Summarises the dispersion and orientation of a point set.
//!
//! Reference:
//! Yuill, R. S. (1971). The standard deviational ellipse; an updated tool
//! for spatial description. Geografiska Annaler B 53(1).

use geo::Geometry;
use spatialkit_core::{AttributeValue, Error, Feature, FeatureCollection, Properties, Result, Units};

use super::center::center_mean;
use crate::boolean::boolean_point_in_polygon;
use crate::shapes::{ellipse, EllipseParams};

/// Parameters for [`standard_deviational_ellipse`]
#[derive(Debug, Clone)]
pub struct DeviationalEllipseParams {
    /// Numeric property weighting each point (missing or zero counts as 1)
    pub weight: Option<String>,
    /// Vertices on the ellipse ring (default: 64)
    pub steps: usize,
    /// Extra properties copied onto the ellipse
    pub properties: Properties,
}

impl Default for DeviationalEllipseParams {
    fn default() -> Self {
        Self {
            weight: None,
            steps: 64,
            properties: Properties::new(),
        }
    }
}

/// Standard deviational ellipse of a set of points.
///
/// The returned polygon feature holds the summary statistics under the
/// `standardDeviationalEllipse` property: `meanCenterCoordinates`,
/// `semiMajorAxis`, `semiMinorAxis`, `numberOfFeatures`, `angle` and
/// `percentageWithinEllipse`.
pub fn standard_deviational_ellipse(points: &FeatureCollection, params: DeviationalEllipseParams) -> Result<Feature> {
    let weight_of = |f: &Feature| -> f64 {
        params
            .weight
            .as_deref()
            .and_then(|key| f.property_f64(key))
            .filter(|w| *w != 0.0)
            .unwrap_or(1.0)
    };

    let located: Vec<_> = points.iter().filter_map(|f| f.as_point().map(|p| (p, weight_of(f)))).collect();
    if located.is_empty() {
        return Err(Error::EmptyInput("standard_deviational_ellipse requires points"));
    }
    let number_of_features = located.len();
    let mean = center_mean(points, params.weight.as_deref())?;

    let (mut xx, mut yy, mut xy) = (0.0, 0.0, 0.0);
    for (p, w) in &located {
        let dx = p.x() - mean.x();
        let dy = p.y() - mean.y();
        xx += dx * dx * w;
        yy += dy * dy * w;
        xy += dx * dy * w;
    }

    let big_a = xx - yy;
    let big_b = (big_a * big_a + 4.0 * xy * xy).sqrt();
    let big_c = 2.0 * xy;
    let theta = ((big_a + big_b) / big_c).atan();
    let theta_deg = theta.to_degrees();

    let (mut sigma_x_sum, mut sigma_y_sum, mut weight_sum) = (0.0, 0.0, 0.0);
    for (p, w) in &located {
        let dx = p.x() - mean.x();
        let dy = p.y() - mean.y();
        sigma_x_sum += (dx * theta.cos() - dy * theta.sin()).powi(2) * w;
        sigma_y_sum += (dx * theta.sin() + dy * theta.cos()).powi(2) * w;
        weight_sum += w;
    }
    let sigma_x = (2.0 * sigma_x_sum / weight_sum).sqrt();
    let sigma_y = (2.0 * sigma_y_sum / weight_sum).sqrt();

    let ring = ellipse(
        mean,
        sigma_x,
        sigma_y,
        EllipseParams {
            angle: theta_deg,
            steps: params.steps,
            units: Units::Degrees,
            pivot: None,
        },
    )?;
    let shape = Geometry::Polygon(ring);
    let within = located
        .iter()
        .filter(|(p, _)| boolean_point_in_polygon(*p, &shape, false).unwrap_or(false))
        .count();

    let mut stats = Properties::new();
    stats.insert("meanCenterCoordinates".into(), [mean.x(), mean.y()].into());
    stats.insert("semiMajorAxis".into(), sigma_x.into());
    stats.insert("semiMinorAxis".into(), sigma_y.into());
    stats.insert("numberOfFeatures".into(), number_of_features.into());
    stats.insert("angle".into(), theta_deg.into());
    stats.insert(
        "percentageWithinEllipse".into(),
        (100.0 * within as f64 / number_of_features as f64).into(),
    );

    let mut feature = Feature::with_properties(shape, params.properties);
    feature.set_property("standardDeviationalEllipse", AttributeValue::Object(stats));
    Ok(feature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::Point;

    fn sample_points() -> FeatureCollection {
        [
            (0.0, 0.0),
            (2.0, 1.0),
            (4.0, 2.5),
            (6.0, 2.9),
            (8.0, 4.2),
            (1.0, 1.5),
            (5.0, 1.5),
            (3.0, 2.2),
            (7.0, 3.1),
            (2.5, 0.2),
        ]
        .into_iter()
        .map(|(x, y)| Feature::new(Point::new(x, y)))
        .collect()
    }

    fn stat(f: &Feature, key: &str) -> f64 {
        match f.get_property("standardDeviationalEllipse") {
            Some(AttributeValue::Object(map)) => map.get(key).and_then(AttributeValue::as_f64).unwrap(),
            other => panic!("missing stats: {:?}", other),
        }
    }

    #[test]
    fn test_deviational_ellipse_statistics() {
        let e = standard_deviational_ellipse(&sample_points(), DeviationalEllipseParams::default()).unwrap();

        assert_relative_eq!(stat(&e, "angle"), 65.14119600564013, epsilon = 1e-9);
        assert_relative_eq!(stat(&e, "semiMajorAxis"), 0.7970982471687537, epsilon = 1e-9);
        assert_relative_eq!(stat(&e, "semiMinorAxis"), 3.864121424639824, epsilon = 1e-9);
        assert_relative_eq!(stat(&e, "numberOfFeatures"), 10.0);
        assert_relative_eq!(stat(&e, "percentageWithinEllipse"), 50.0);
    }

    #[test]
    fn test_deviational_ellipse_ring() {
        let e = standard_deviational_ellipse(&sample_points(), DeviationalEllipseParams::default()).unwrap();
        let Some(Geometry::Polygon(p)) = &e.geometry else {
            panic!("expected polygon");
        };
        assert_eq!(p.exterior().0.len(), 65);
        assert_relative_eq!(p.exterior().0[0].x, 4.185086978537071, epsilon = 1e-9);
        assert_relative_eq!(p.exterior().0[0].y, 1.1867556896494822, epsilon = 1e-9);
    }

    #[test]
    fn test_requires_points() {
        assert!(standard_deviational_ellipse(&FeatureCollection::new(), Default::default()).is_err());
    }
}
