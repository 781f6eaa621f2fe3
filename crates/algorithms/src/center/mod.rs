//! Central tendency of features: centers, centroids, medians and dispersion ellipses

mod center;
mod ellipse;
mod median;
mod on_feature;

pub use center::{center, center_mean, center_of_bbox, center_of_mass, centroid};
pub use ellipse::{standard_deviational_ellipse, DeviationalEllipseParams};
pub use median::{center_median, CenterMedianParams};
pub use on_feature::point_on_feature;
