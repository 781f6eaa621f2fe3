//! Shortest path around polygon obstacles
//!
//! The area around start, end and obstacles is sampled as a regular point
//! grid. Grid points inside an obstacle are walls; the rest are joined to
//! their eight neighbours and searched with A*.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::f64::consts::SQRT_2;

use geo::{Coord, Geometry, LineString, Point, Polygon};
use spatialkit_core::{bbox, bbox_of, Algorithm, BBox, Error, Feature, FeatureCollection, Result, Units};
use tracing::{debug, warn};

use crate::boolean::point_in_polygon;
use crate::maybe_rayon::*;
use crate::measurement::distance;
use crate::overlay::to_multi_polygon;
use crate::transform::{clean_line, transform_scale, ScaleOrigin};

/// Parameters for [`shortest_path`]
#[derive(Debug, Clone, Default)]
pub struct ShortestPathParams {
    /// Polygons the path must go around
    pub obstacles: FeatureCollection,
    /// Spacing of the search grid in `units` (default: a hundredth of the
    /// search area's width)
    pub resolution: Option<f64>,
    /// Units of `resolution` (default: kilometers)
    pub units: Units,
}

/// Obstacle-avoiding shortest path
pub struct ShortestPath;

impl Algorithm for ShortestPath {
    type Input = (Point<f64>, Point<f64>);
    type Output = Feature;
    type Params = ShortestPathParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "ShortestPath"
    }

    fn description(&self) -> &'static str {
        "Shortest path between two points avoiding polygon obstacles"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        shortest_path(input.0, input.1, &params)
    }
}

/// Search state in the priority queue (min-heap on `score`)
#[derive(Debug, Clone, PartialEq)]
struct State {
    score: f64,
    node: usize,
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other.score.total_cmp(&self.score)
    }
}

/// 8-connected neighbour offsets with their step costs
const NEIGHBORS: [(isize, isize, f64); 8] = [
    (-1, -1, SQRT_2),
    (-1, 0, 1.0),
    (-1, 1, SQRT_2),
    (0, -1, 1.0),
    (0, 1, 1.0),
    (1, -1, SQRT_2),
    (1, 0, 1.0),
    (1, 1, SQRT_2),
];

/// Walkable grid between the search area's corners, row 0 at the north
struct SearchGrid {
    positions: Vec<Coord<f64>>,
    walkable: Vec<bool>,
    cols: usize,
}

impl SearchGrid {
    fn new(area: &BBox, resolution: f64, units: Units, obstacles: &[Polygon<f64>]) -> Self {
        let sw = Point::new(area.min_x, area.min_y);
        let cell_width = resolution / distance(sw, Point::new(area.max_x, area.min_y), units) * area.width();
        let cell_height = resolution / distance(sw, Point::new(area.min_x, area.max_y), units) * area.height();

        let columns = (area.width() / cell_width).floor();
        let rows = (area.height() / cell_height).floor();
        let delta_x = (area.width() - columns * cell_width) / 2.0;
        let delta_y = (area.height() - rows * cell_height) / 2.0;
        let (cols, rows) = (columns as usize + 1, rows as usize + 1);

        let positions: Vec<Coord<f64>> = (0..rows * cols)
            .map(|i| Coord {
                x: area.min_x + delta_x + (i % cols) as f64 * cell_width,
                y: area.max_y - delta_y - (i / cols) as f64 * cell_height,
            })
            .collect();
        let walkable = positions
            .clone()
            .into_par_iter()
            .map(|c| !obstacles.iter().any(|poly| point_in_polygon(c, poly, false)))
            .collect();

        Self { positions, walkable, cols }
    }

    /// Walkable grid point closest to `target`
    fn closest_walkable(&self, target: Point<f64>) -> Option<usize> {
        (0..self.positions.len())
            .filter(|&i| self.walkable[i])
            .map(|i| (i, distance(Point::from(self.positions[i]), target, Units::Kilometers)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    fn rows(&self) -> usize {
        self.positions.len() / self.cols
    }

    /// Octile distance between two grid nodes
    fn heuristic(&self, a: usize, b: usize) -> f64 {
        let dr = (a / self.cols).abs_diff(b / self.cols) as f64;
        let dc = (a % self.cols).abs_diff(b % self.cols) as f64;
        dr + dc + (SQRT_2 - 2.0) * dr.min(dc)
    }

    /// Nodes from `from` (excluded) to `to` (included), or `None` when
    /// `to` cannot be reached
    fn astar(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        let n = self.positions.len();
        let mut cost = vec![f64::INFINITY; n];
        let mut parent = vec![usize::MAX; n];
        let mut closed = vec![false; n];
        let mut heap = BinaryHeap::new();

        cost[from] = 0.0;
        heap.push(State { score: self.heuristic(from, to), node: from });

        while let Some(State { node, .. }) = heap.pop() {
            if node == to {
                let mut path = vec![to];
                let mut at = to;
                while parent[at] != from {
                    at = parent[at];
                    path.push(at);
                }
                path.reverse();
                return Some(path);
            }
            if closed[node] {
                continue;
            }
            closed[node] = true;

            let (row, col) = (node / self.cols, node % self.cols);
            for &(dr, dc, step) in &NEIGHBORS {
                let nr = row as isize + dr;
                let nc = col as isize + dc;
                if nr < 0 || nc < 0 || nr as usize >= self.rows() || nc as usize >= self.cols {
                    continue;
                }
                let next = nr as usize * self.cols + nc as usize;
                if !self.walkable[next] || closed[next] {
                    continue;
                }

                let tentative = cost[node] + step;
                if tentative < cost[next] {
                    cost[next] = tentative;
                    parent[next] = node;
                    heap.push(State { score: tentative + self.heuristic(next, to), node: next });
                }
            }
        }
        None
    }
}

/// Shortest path from `start` to `end` that goes around `obstacles`.
///
/// Without obstacles the result is the straight segment between the two
/// points. Otherwise the search area is the bounding box of all inputs
/// scaled by 1.15; `start` and `end` are joined to their nearest walkable
/// grid points. Fails when no walkable route connects them.
pub fn shortest_path(start: Point<f64>, end: Point<f64>, params: &ShortestPathParams) -> Result<Feature> {
    if let Some(resolution) = params.resolution {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(Error::invalid_parameter("resolution", resolution, "must be a positive number"));
        }
    }

    let obstacles: Vec<Polygon<f64>> = params
        .obstacles
        .geometries()
        .map(|g| to_multi_polygon(g, "shortest_path"))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flat_map(|mp| mp.0)
        .collect();
    if obstacles.is_empty() || start == end {
        return Ok(Feature::new(LineString::from(vec![start, end])));
    }

    let area = search_area(&params.obstacles, start, end)?;
    let resolution = match params.resolution {
        Some(r) => r,
        None => distance(Point::new(area.min_x, area.min_y), Point::new(area.max_x, area.min_y), params.units) / 100.0,
    };

    let grid = SearchGrid::new(&area, resolution, params.units, &obstacles);
    debug!("shortest_path: {}x{} search grid", grid.rows(), grid.cols);

    let no_room = || Error::Algorithm("no walkable grid point outside the obstacles".into());
    let from = grid.closest_walkable(start).ok_or_else(no_room)?;
    let to = grid.closest_walkable(end).ok_or_else(no_room)?;

    let nodes = if from == to {
        Vec::new()
    } else {
        grid.astar(from, to).ok_or_else(|| {
            warn!("shortest_path: no route between grid nodes {} and {}", from, to);
            Error::Algorithm("no path between start and end avoiding the obstacles".into())
        })?
    };

    let mut path = vec![start.0];
    path.extend(nodes.into_iter().map(|i| grid.positions[i]));
    path.push(end.0);
    Ok(Feature::new(clean_line(&LineString::new(path))?))
}

/// Bounding box of obstacles and endpoints, grown by 15% around its center
fn search_area(obstacles: &FeatureCollection, start: Point<f64>, end: Point<f64>) -> Result<BBox> {
    let mut area = bbox_of(obstacles).ok_or(Error::EmptyInput("shortest_path obstacles"))?;
    area.expand_to_include(start.0);
    area.expand_to_include(end.0);

    let grown = transform_scale(&Geometry::Polygon(area.to_polygon()), 1.15, ScaleOrigin::Centroid)?;
    bbox(&grown).ok_or(Error::EmptyInput("shortest_path search area"))
}
