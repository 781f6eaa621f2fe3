//! Planar graph over noded line work, used to extract polygon faces.
//!
//! Edges are stored once; half-edge `2e` runs from `edges[e].0` to
//! `edges[e].1` and `2e + 1` runs back. Faces are traced with the face on
//! the left of each half-edge, so bounded faces come out counter-clockwise
//! and the outer boundary of each connected component clockwise.

use geo::{Coord, Line, LineString};
use std::collections::HashMap;

use crate::index::{line_bbox, BoxIndex};
use crate::line::segment_intersection;

fn node_key(c: Coord<f64>) -> (u64, u64) {
    // fold -0.0 into 0.0
    ((c.x + 0.0).to_bits(), (c.y + 0.0).to_bits())
}

#[derive(Debug, Default)]
pub(crate) struct PlanarGraph {
    nodes: Vec<Coord<f64>>,
    lookup: HashMap<(u64, u64), usize>,
    edges: Vec<(usize, usize)>,
    removed: Vec<bool>,
}

impl PlanarGraph {
    /// Graph whose edges are the segments of the given lines.
    ///
    /// Zero-length and repeated segments are skipped.
    pub fn from_segments(segments: impl IntoIterator<Item = Line<f64>>) -> Self {
        let mut graph = Self::default();
        let mut seen: HashMap<(usize, usize), ()> = HashMap::new();
        for seg in segments {
            let a = graph.node(seg.start);
            let b = graph.node(seg.end);
            if a == b {
                continue;
            }
            let key = (a.min(b), a.max(b));
            if seen.insert(key, ()).is_none() {
                graph.edges.push((a, b));
                graph.removed.push(false);
            }
        }
        graph
    }

    fn node(&mut self, c: Coord<f64>) -> usize {
        let next = self.nodes.len();
        let idx = *self.lookup.entry(node_key(c)).or_insert(next);
        if idx == next {
            self.nodes.push(c);
        }
        idx
    }

    pub fn edge_count(&self) -> usize {
        self.removed.iter().filter(|r| !**r).count()
    }

    fn degrees(&self) -> Vec<usize> {
        let mut degree = vec![0; self.nodes.len()];
        for (e, &(a, b)) in self.edges.iter().enumerate() {
            if !self.removed[e] {
                degree[a] += 1;
                degree[b] += 1;
            }
        }
        degree
    }

    /// Repeatedly remove edges ending at a node of degree one
    pub fn delete_dangles(&mut self) -> usize {
        let mut deleted = 0;
        loop {
            let degree = self.degrees();
            let mut changed = false;
            for e in 0..self.edges.len() {
                let (a, b) = self.edges[e];
                if !self.removed[e] && (degree[a] == 1 || degree[b] == 1) {
                    self.removed[e] = true;
                    deleted += 1;
                    changed = true;
                }
            }
            if !changed {
                return deleted;
            }
        }
    }

    /// Remove edges with the same face on both sides
    pub fn delete_cut_edges(&mut self) -> usize {
        let mut deleted = 0;
        loop {
            let (_, face_of) = self.trace_faces();
            let mut changed = false;
            for e in 0..self.edges.len() {
                if !self.removed[e] && face_of[2 * e] == face_of[2 * e + 1] {
                    self.removed[e] = true;
                    deleted += 1;
                    changed = true;
                }
            }
            if !changed {
                return deleted;
            }
            self.delete_dangles();
        }
    }

    /// Closed rings around every face of the graph
    pub fn rings(&self) -> Vec<LineString<f64>> {
        let (faces, _) = self.trace_faces();
        faces
            .into_iter()
            .map(|half_edges| {
                let mut coords: Vec<Coord<f64>> =
                    half_edges.iter().map(|&h| self.nodes[self.origin(h)]).collect();
                if let Some(&first) = coords.first() {
                    coords.push(first);
                }
                LineString::new(coords)
            })
            .collect()
    }

    fn origin(&self, h: usize) -> usize {
        let (a, b) = self.edges[h / 2];
        if h % 2 == 0 {
            a
        } else {
            b
        }
    }

    fn dest(&self, h: usize) -> usize {
        self.origin(h ^ 1)
    }

    /// Outgoing half-edges of every node, sorted counter-clockwise by angle
    fn star(&self) -> Vec<Vec<usize>> {
        let mut star: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        for e in 0..self.edges.len() {
            if !self.removed[e] {
                star[self.origin(2 * e)].push(2 * e);
                star[self.origin(2 * e + 1)].push(2 * e + 1);
            }
        }
        for (node, out) in star.iter_mut().enumerate() {
            let from = self.nodes[node];
            out.sort_by(|&h1, &h2| {
                let angle = |h: usize| {
                    let to = self.nodes[self.dest(h)];
                    (to.y - from.y).atan2(to.x - from.x)
                };
                angle(h1).total_cmp(&angle(h2))
            });
        }
        star
    }

    /// Face cycles as half-edge lists, plus the face index of every half-edge
    fn trace_faces(&self) -> (Vec<Vec<usize>>, Vec<usize>) {
        let star = self.star();
        let position: HashMap<usize, usize> = star
            .iter()
            .flat_map(|out| out.iter().enumerate().map(|(i, &h)| (h, i)))
            .collect();

        let mut face_of = vec![usize::MAX; self.edges.len() * 2];
        let mut faces = Vec::new();

        for start in 0..self.edges.len() * 2 {
            if self.removed[start / 2] || face_of[start] != usize::MAX {
                continue;
            }
            let face = faces.len();
            let mut cycle = Vec::new();
            let mut h = start;
            while face_of[h] == usize::MAX {
                face_of[h] = face;
                cycle.push(h);

                // next edge: clockwise neighbour of the twin around the destination
                let out = &star[self.dest(h)];
                let twin_pos = position[&(h ^ 1)];
                h = out[(twin_pos + out.len() - 1) % out.len()];
            }
            faces.push(cycle);
        }
        (faces, face_of)
    }
}

/// Split segments at every point where they cross another segment
pub(crate) fn node_segments(segments: &[Line<f64>]) -> Vec<Line<f64>> {
    let index = BoxIndex::from_lines(segments);
    let mut noded = Vec::with_capacity(segments.len());

    for (i, seg) in segments.iter().enumerate() {
        let mut cuts: Vec<Coord<f64>> = index
            .search(&line_bbox(seg))
            .into_iter()
            .filter(|&j| j != i)
            .filter_map(|j| segment_intersection(*seg, segments[j]))
            .filter(|c| *c != seg.start && *c != seg.end)
            .collect();

        let delta = seg.delta();
        let along = |c: &Coord<f64>| (c.x - seg.start.x) * delta.x + (c.y - seg.start.y) * delta.y;
        cuts.sort_by(|a, b| along(a).total_cmp(&along(b)));
        cuts.dedup();

        let mut from = seg.start;
        for c in cuts {
            noded.push(Line::new(from, c));
            from = c;
        }
        noded.push(Line::new(from, seg.end));
    }
    noded
}

/// Signed shoelace area; positive for counter-clockwise rings
pub(crate) fn signed_area(ring: &LineString<f64>) -> f64 {
    ring.0
        .windows(2)
        .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
        .sum::<f64>()
        / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_segments() -> Vec<Line<f64>> {
        LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)])
            .lines()
            .collect()
    }

    #[test]
    fn test_square_faces() {
        let graph = PlanarGraph::from_segments(square_segments());
        let rings = graph.rings();
        assert_eq!(rings.len(), 2);
        let mut areas: Vec<f64> = rings.iter().map(signed_area).collect();
        areas.sort_by(f64::total_cmp);
        assert_eq!(areas, vec![-1.0, 1.0]);
    }

    #[test]
    fn test_dangles_and_cut_edges() {
        let mut segments = square_segments();
        // dangle off the square
        segments.push(Line::new((1.0, 1.0), (2.0, 2.0)));
        // bridge to a second square
        segments.push(Line::new((1.0, 0.0), (3.0, 0.0)));
        segments.extend(
            LineString::from(vec![(3.0, 0.0), (4.0, 0.0), (4.0, 1.0), (3.0, 1.0), (3.0, 0.0)]).lines(),
        );

        let mut graph = PlanarGraph::from_segments(segments);
        assert_eq!(graph.delete_dangles(), 1);
        assert_eq!(graph.delete_cut_edges(), 1);
        assert_eq!(graph.edge_count(), 8);
        let bounded = graph.rings().iter().filter(|r| signed_area(r) > 0.0).count();
        assert_eq!(bounded, 2);
    }

    #[test]
    fn test_node_segments() {
        let segments = vec![Line::new((0.0, 0.0), (2.0, 2.0)), Line::new((0.0, 2.0), (2.0, 0.0))];
        let noded = node_segments(&segments);
        assert_eq!(noded.len(), 4);
        assert_eq!(noded[0], Line::new((0.0, 0.0), (1.0, 1.0)));
    }
}
