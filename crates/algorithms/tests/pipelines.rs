//! End-to-end tests chaining grids, interpolation, contouring, clustering
//! and overlay the way callers combine them.

use approx::assert_relative_eq;
use geo::{Area, Geometry, Point};
use spatialkit_algorithms::boolean::boolean_point_in_polygon;
use spatialkit_algorithms::clustering::{cluster_each, clusters_dbscan, get_cluster, DbscanParams};
use spatialkit_algorithms::contour::{grid_to_matrix, isobands, isolines, ContourParams, GridToMatrixParams};
use spatialkit_algorithms::grid::{point_grid, square_grid, GridParams};
use spatialkit_algorithms::interpolation::{planepoint, tin};
use spatialkit_algorithms::overlay::{bbox_clip, intersect, union};
use spatialkit_algorithms::shapes::{circle, CircleParams};
use spatialkit_core::{bbox, bbox_of, AttributeValue, BBox, Feature, FeatureCollection, Properties};

/// Point grid over a 2x2 degree box with `elevation = x + y`
fn sloped_grid() -> FeatureCollection {
    let grid = point_grid(&BBox::new(0.0, 0.0, 2.0, 2.0), 25.0, &GridParams::default()).unwrap();
    grid.into_iter()
        .map(|mut f| {
            let p = f.as_point().unwrap();
            f.set_property("elevation", p.x() + p.y());
            f
        })
        .collect()
}

fn polygon_area(feature: &Feature) -> f64 {
    feature.geometry.as_ref().map(|g| g.unsigned_area()).unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Contouring
// ---------------------------------------------------------------------------

#[test]
fn isobands_partition_the_grid() {
    let grid = sloped_grid();
    let extent = bbox_of(&grid).unwrap();

    let bands = isobands(&grid, &[0.0, 1.05, 2.05, 3.05, 5.0], &ContourParams::default()).unwrap();
    assert_eq!(bands.len(), 4);

    let total: f64 = bands.iter().map(polygon_area).sum();
    assert_relative_eq!(total, extent.area(), epsilon = 1e-6);

    let names: Vec<&str> = bands
        .iter()
        .filter_map(|f| f.get_property("elevation").and_then(AttributeValue::as_str))
        .collect();
    assert_eq!(names, vec!["0-1.05", "1.05-2.05", "2.05-3.05", "3.05-5"]);
}

#[test]
fn isolines_follow_the_slope() {
    let grid = sloped_grid();
    let lines = isolines(&grid, &[2.05], &ContourParams::default()).unwrap();

    match &lines.features[0].geometry {
        Some(Geometry::MultiLineString(mls)) => {
            assert_eq!(mls.0.len(), 1);
            for c in &mls.0[0].0 {
                assert_relative_eq!(c.x + c.y, 2.05, epsilon = 1e-9);
            }
        }
        other => panic!("expected multilinestring, got {:?}", other),
    }
}

#[test]
fn matrix_matches_grid_shape() {
    let grid = sloped_grid();
    let matrix = grid_to_matrix(&grid, &GridToMatrixParams::default()).unwrap();
    let (rows, cols) = matrix.dim();
    assert_eq!(rows * cols, grid.len());

    // north-west corner first, values increasing eastwards
    assert!(matrix[[0, 1]] > matrix[[0, 0]]);
    assert!(matrix[[rows - 1, 0]] < matrix[[0, 0]]);
}

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

#[test]
fn tin_reproduces_a_plane() {
    let sites = [(0.0, 0.0), (4.1, 0.2), (0.3, 3.9), (4.2, 4.4), (1.0, 2.0), (3.0, 1.0), (2.0, 3.0)];
    let points: FeatureCollection = sites
        .iter()
        .map(|&(x, y)| {
            let mut f = Feature::new(Point::new(x, y));
            f.set_property("z", 2.0 * x + 3.0 * y + 1.0);
            f
        })
        .collect();

    let triangles = tin(&points, Some("z")).unwrap();
    let query = Point::new(2.2, 1.7);
    let containing = triangles
        .iter()
        .find(|t| {
            polygon_area(t) > 0.0
                && t.geometry
                    .as_ref()
                    .map(|g| boolean_point_in_polygon(query, g, false).unwrap())
                    .unwrap_or(false)
        })
        .expect("query point lies inside the triangulation");

    assert_relative_eq!(planepoint(query, containing).unwrap(), 10.5, epsilon = 1e-9);
}

// ---------------------------------------------------------------------------
// Clustering
// ---------------------------------------------------------------------------

#[test]
fn dbscan_clusters_can_be_filtered() {
    let mut points = FeatureCollection::new();
    for (cx, cy) in [(0.0, 0.0), (10.0, 10.0)] {
        for (dx, dy) in [(0.0, 0.0), (0.01, 0.0), (0.0, 0.01), (0.01, 0.01)] {
            points.push(Feature::new(Point::new(cx + dx, cy + dy)));
        }
    }
    points.push(Feature::new(Point::new(5.0, 5.0)));

    let clustered = clusters_dbscan(&points, 2.0, &DbscanParams::default()).unwrap();

    let mut sizes = Vec::new();
    cluster_each(&clustered, "cluster", |members, _, _| sizes.push(members.len()));
    assert_eq!(sizes, vec![4, 4]);

    let noise = Properties::from([("dbscan".to_string(), AttributeValue::from("noise"))]);
    let outliers = get_cluster(&clustered, noise);
    assert_eq!(outliers.len(), 1);
    assert_eq!(outliers.features[0].as_point(), Some(Point::new(5.0, 5.0)));
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

#[test]
fn union_and_intersection_areas_agree() {
    let a = Geometry::Polygon(circle(Point::new(0.0, 0.0), 50.0, CircleParams::default()).unwrap());
    let b = Geometry::Polygon(circle(Point::new(0.5, 0.0), 50.0, CircleParams::default()).unwrap());

    let overlap = intersect(&a, &b).unwrap().expect("circles overlap");
    let merged = union(&FeatureCollection::from(vec![Feature::new(a.clone()), Feature::new(b.clone())])).unwrap();

    assert_relative_eq!(
        polygon_area(&merged),
        a.unsigned_area() + b.unsigned_area() - overlap.unsigned_area(),
        max_relative = 1e-4
    );
}

#[test]
fn square_grid_tiles_without_gaps() {
    let cells = square_grid(&BBox::new(0.0, 0.0, 1.0, 1.0), 20.0, &GridParams::default()).unwrap();
    assert_eq!(cells.len(), 25);

    let covered = bbox_of(&cells).unwrap();
    let cell_area: f64 = cells.iter().map(polygon_area).sum();
    assert_relative_eq!(cell_area, covered.area(), epsilon = 1e-9);
}

#[test]
fn clipped_circle_stays_in_box() {
    let disc = circle(Point::new(0.0, 0.0), 100.0, CircleParams::default()).unwrap();
    let window = BBox::new(0.0, 0.0, 5.0, 5.0);

    let clipped = bbox_clip(&Geometry::Polygon(disc.clone()), &window).unwrap();
    let bounds = bbox(&clipped).unwrap();
    assert!(window.contains(&bounds));

    let quarter = clipped.unsigned_area();
    assert_relative_eq!(quarter * 4.0, disc.unsigned_area(), max_relative = 0.05);
}
