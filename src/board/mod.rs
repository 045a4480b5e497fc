//! Board module for via stitching
//!
//! Geometric primitives, board items and the board snapshot document the
//! stitching engine reads from and commits to.
//!
//! # Submodules
//! - `types` - Points, boxes, polygons, outline edges and board items
//! - `spatial` - R-tree entries for obstacle lookup
//! - `document` - The board snapshot with selection, collection and commit

mod types;
mod spatial;
mod document;

pub use types::{
    Coord,
    ItemId,
    Point,
    BBox,
    Polygon,
    FilledArea,
    OutlineEdge,
    LayerInfo,
    Net,
    ViaDimensions,
    Pad,
    BoardVia,
    Track,
    Zone,
    Footprint,
    BoardItem,
    FillRegion,
    COPPER_LAYER_KINDS,
    is_copper_layer,
};

pub use spatial::{
    ObstacleEntry,
    envelope_of,
};

pub use document::Board;
