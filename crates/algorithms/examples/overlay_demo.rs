//! Overlay demo: two overlapping service areas
//!
//! Builds two 50 km circles, then prints their intersection, union and
//! difference areas, clips the union to a window and contours a synthetic
//! distance surface. Pass `--verbose` for debug logging.
//!
//! Run:
//!   cargo run -p spatialkit-algorithms --example overlay_demo -- --verbose

use geo::{Geometry, Point};
use spatialkit_algorithms::contour::{isobands, ContourParams};
use spatialkit_algorithms::grid::{point_grid, GridParams};
use spatialkit_algorithms::measurement::{area, distance};
use spatialkit_algorithms::overlay::{bbox_clip, difference, intersect, union};
use spatialkit_algorithms::shapes::{circle, CircleParams};
use spatialkit_core::{BBox, Feature, FeatureCollection, Result, Units};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn km2(geom: Option<&Geometry<f64>>) -> f64 {
    geom.map(area).unwrap_or(0.0) / 1e6
}

fn main() -> Result<()> {
    setup_logging(std::env::args().any(|a| a == "--verbose"));

    let west = Point::new(-70.70, -33.45);
    let east = Point::new(-70.20, -33.45);
    let a = Geometry::Polygon(circle(west, 50.0, CircleParams::default())?);
    let b = Geometry::Polygon(circle(east, 50.0, CircleParams::default())?);
    info!("centers are {:.1} km apart", distance(west, east, Units::Kilometers));

    // --- 1. Boolean overlay ---
    let shared = intersect(&a, &b)?;
    let merged = union(&FeatureCollection::from(vec![Feature::new(a.clone()), Feature::new(b.clone())]))?;
    let only_west = difference(&a, &b)?;
    info!("intersection: {:.0} km2", km2(shared.as_ref()));
    info!("union:        {:.0} km2", km2(merged.geometry.as_ref()));
    info!("difference:   {:.0} km2", km2(only_west.as_ref()));

    // --- 2. Clip to a window ---
    let window = BBox::new(-70.6, -33.8, -70.3, -33.1);
    if let Some(geom) = &merged.geometry {
        let clipped = bbox_clip(geom, &window)?;
        info!("clipped to window: {:.0} km2", km2(Some(&clipped)));
    }

    // --- 3. Contour the distance to the western center ---
    let extent = BBox::new(-71.2, -33.9, -69.7, -33.0);
    let grid: FeatureCollection = point_grid(&extent, 5.0, &GridParams::default())?
        .into_iter()
        .map(|mut f| {
            if let Some(p) = f.as_point() {
                f.set_property("elevation", distance(west, p, Units::Kilometers));
            }
            f
        })
        .collect();
    let bands = isobands(&grid, &[0.0, 25.0, 50.0, 100.0, 200.0], &ContourParams::default())?;
    for band in &bands {
        let name = band.get_property("elevation").and_then(|v| v.as_str()).unwrap_or("?");
        info!("band {:>8} km: {:.0} km2", name, km2(band.geometry.as_ref()));
    }

    Ok(())
}
