use geo::{Geometry, Line, LineString, Polygon};
use spatialkit_core::{bbox, meta, BBox, Error, Feature, FeatureCollection, Result};
use tracing::debug;

use super::graph::{signed_area, PlanarGraph};
use crate::boolean::in_ring;

/// Polygons formed by a noded network of lines.
///
/// Lines must only meet at their endpoints. Dangling lines and cut edges
/// are discarded; rings nested inside a polygon become its holes.
pub fn polygonize(lines: &FeatureCollection) -> Result<FeatureCollection> {
    let mut segments: Vec<Line<f64>> = Vec::new();
    for geom in lines.geometries() {
        match geom {
            Geometry::LineString(_) | Geometry::MultiLineString(_) | Geometry::Line(_) => {
                segments.extend(meta::segments(geom));
            }
            other => return Err(Error::unsupported("polygonize", meta::geometry_type(other))),
        }
    }

    let mut graph = PlanarGraph::from_segments(segments);
    let dangles = graph.delete_dangles();
    let cut_edges = graph.delete_cut_edges();
    debug!("polygonize: removed {} dangles and {} cut edges", dangles, cut_edges);

    let (shells, holes): (Vec<LineString<f64>>, Vec<LineString<f64>>) =
        graph.rings().into_iter().partition(|ring| signed_area(ring) > 0.0);

    Ok(assemble(shells, holes).into_iter().map(Feature::new).collect())
}

/// Attach every hole to the smallest shell enclosing it
pub(crate) fn assemble(shells: Vec<LineString<f64>>, holes: Vec<LineString<f64>>) -> Vec<Polygon<f64>> {
    let shell_boxes: Vec<Option<BBox>> = shells.iter().map(ring_bbox).collect();
    let shell_areas: Vec<f64> = shells.iter().map(|s| signed_area(s).abs()).collect();
    let mut interiors: Vec<Vec<LineString<f64>>> = vec![Vec::new(); shells.len()];

    for hole in holes {
        let Some(hole_box) = ring_bbox(&hole) else {
            continue;
        };

        let owner = (0..shells.len())
            .filter(|&i| match shell_boxes[i] {
                Some(b) => b != hole_box && b.contains(&hole_box),
                None => false,
            })
            .filter(|&i| encloses(&shells[i], &hole))
            .min_by(|&i, &j| shell_areas[i].total_cmp(&shell_areas[j]));

        if let Some(i) = owner {
            interiors[i].push(hole);
        }
    }

    shells
        .into_iter()
        .zip(interiors)
        .map(|(shell, holes)| Polygon::new(shell, holes))
        .collect()
}

fn ring_bbox(ring: &LineString<f64>) -> Option<BBox> {
    bbox(&Geometry::LineString(ring.clone()))
}

/// Whether the first hole vertex off the shell boundary lies inside the shell
fn encloses(shell: &LineString<f64>, hole: &LineString<f64>) -> bool {
    hole.0
        .iter()
        .find(|c| in_ring(**c, shell, true) == in_ring(**c, shell, false))
        .map(|c| in_ring(*c, shell, true))
        .unwrap_or(false)
}
