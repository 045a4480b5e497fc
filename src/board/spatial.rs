//! Spatial indexing types for obstacle lookup
//!
//! Wraps board items in R-tree entries keyed by their bounding boxes so a
//! candidate via only meets the items its own box can touch.

use rstar::{RTreeObject, AABB};

use super::types::{BBox, BoardItem, Coord};

/// Convert a board box into an R-tree envelope
pub fn envelope_of(bbox: &BBox) -> AABB<[Coord; 2]> {
    AABB::from_corners([bbox.min_x, bbox.min_y], [bbox.max_x, bbox.max_y])
}

/// Board item wrapper for R-tree spatial indexing
#[derive(Clone, Debug)]
pub struct ObstacleEntry {
    pub item: BoardItem,
    pub envelope: AABB<[Coord; 2]>,
}

impl ObstacleEntry {
    pub fn new(item: BoardItem) -> Self {
        let envelope = envelope_of(&item.bbox());
        Self { item, envelope }
    }
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[Coord; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}
