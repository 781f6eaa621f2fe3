//! R-tree over bounding boxes of features, segments or points

use geo::{Coord, Line};
use rstar::{RTree, RTreeObject, AABB};
use spatialkit_core::BBox;

/// Bounding box tagged with the index of the item it bounds
#[derive(Debug, Clone)]
pub(crate) struct IndexedBox {
    pub idx: usize,
    pub bbox: BBox,
}

impl RTreeObject for IndexedBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        envelope(&self.bbox)
    }
}

fn envelope(bbox: &BBox) -> AABB<[f64; 2]> {
    AABB::from_corners([bbox.min_x, bbox.min_y], [bbox.max_x, bbox.max_y])
}

/// Box around a segment
pub(crate) fn line_bbox(line: &Line<f64>) -> BBox {
    let mut bb = BBox::from_coord(line.start);
    bb.expand_to_include(line.end);
    bb
}

/// Spatial index over a list of boxes, addressed by position
pub(crate) struct BoxIndex {
    tree: RTree<IndexedBox>,
}

impl BoxIndex {
    pub fn new(boxes: impl IntoIterator<Item = BBox>) -> Self {
        let items = boxes
            .into_iter()
            .enumerate()
            .map(|(idx, bbox)| IndexedBox { idx, bbox })
            .collect();
        Self { tree: RTree::bulk_load(items) }
    }

    /// Index every segment of a slice
    pub fn from_lines(lines: &[Line<f64>]) -> Self {
        Self::new(lines.iter().map(line_bbox))
    }

    /// Index every coordinate of a slice
    pub fn from_coords(coords: &[Coord<f64>]) -> Self {
        Self::new(coords.iter().map(|c| BBox::from_coord(*c)))
    }

    /// Positions of all boxes intersecting `bbox`, in ascending order
    pub fn search(&self, bbox: &BBox) -> Vec<usize> {
        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope(bbox))
            .map(|item| item.idx)
            .collect();
        hits.sort_unstable();
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_boxes() {
        let index = BoxIndex::new(vec![
            BBox::new(0.0, 0.0, 1.0, 1.0),
            BBox::new(5.0, 5.0, 6.0, 6.0),
            BBox::new(0.5, 0.5, 2.0, 2.0),
        ]);
        assert_eq!(index.search(&BBox::new(0.9, 0.9, 1.1, 1.1)), vec![0, 2]);
        assert!(index.search(&BBox::new(10.0, 10.0, 11.0, 11.0)).is_empty());
    }

    #[test]
    fn test_search_touching_segment() {
        let lines = [Line::new((0.0, 0.0), (1.0, 0.0)), Line::new((1.0, 0.0), (1.0, 1.0))];
        let index = BoxIndex::from_lines(&lines);
        assert_eq!(index.search(&BBox::from_coord(Coord { x: 1.0, y: 0.0 })), vec![0, 1]);
    }
}
