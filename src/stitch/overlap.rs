//! Overlap detection against existing board items
//!
//! Uses an R-tree over the obstacle snapshot for candidate filtering, then a
//! precise per-kind test: box intersection for pads and vias, centerline
//! distance for tracks, filled-area hit test for zones.

use rstar::RTree;

use super::distance::point_segment_distance;
use super::types::ViaCandidate;
use crate::board::{envelope_of, BoardItem, Coord, ObstacleEntry};

/// Immutable obstacle snapshot collected once per run
#[derive(Clone)]
pub struct ObstacleSet {
    tree: RTree<ObstacleEntry>,
}

impl std::fmt::Debug for ObstacleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObstacleSet")
            .field("len", &self.tree.size())
            .finish()
    }
}

impl ObstacleSet {
    pub fn new(items: Vec<BoardItem>) -> Self {
        let entries: Vec<ObstacleEntry> = items.into_iter().map(ObstacleEntry::new).collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn empty() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// True if `via` (already inflated by the caller) hits any obstacle
    pub fn overlaps(&self, via: &ViaCandidate, clearance: Coord) -> bool {
        let search_bounds = envelope_of(&via.bbox());
        self.tree
            .locate_in_envelope_intersecting(&search_bounds)
            .any(|entry| item_overlaps(&entry.item, via, clearance))
    }
}

/// Linear scan over `items`, same decision as [`ObstacleSet::overlaps`]
pub fn overlaps(via: &ViaCandidate, items: &[BoardItem], clearance: Coord) -> bool {
    items.iter().any(|item| item_overlaps(item, via, clearance))
}

/// Precise test of one obstacle against one candidate
pub fn item_overlaps(item: &BoardItem, via: &ViaCandidate, clearance: Coord) -> bool {
    match item {
        BoardItem::Pad(pad) => pad.bbox.intersects(&via.bbox()),
        BoardItem::Via(other) => other.bbox().intersects(&via.bbox()),
        BoardItem::Track(track) => {
            if !track.bbox().intersects(&via.bbox()) {
                return false;
            }
            let (dist, _) = point_segment_distance(via.position, track.start, track.end);
            dist <= clearance as f64 + track.width as f64 / 2.0 + via.radius()
        }
        BoardItem::Zone(zone) => zone.hit_test_filled_area(&via.layer, via.position),
    }
}
