//! Via stitching for printed circuit boards
//!
//! Places a regular, optionally jittered grid of vias inside a copper fill
//! area while keeping clear of pads, tracks, other vias, foreign zones, the
//! area outline and the board edge. Previously placed vias can be removed
//! again, either by their placement group or by matching size, drill and net.
//!
//! - `board` - Board snapshot model and commit steps
//! - `stitch` - Fill and clear engine
//! - `settings` - Persisted defaults and user units
//! - `server` - JSON-RPC bridge used by the `stitch_server` binary

pub mod board;
pub mod server;
pub mod settings;
pub mod stitch;

pub use board::{Board, BoardVia, FillRegion, Point};
pub use stitch::{
    clear_vias, fill_area, ClearMode, ClearResult, ConfigError, FillInput, FillParams,
    GroupRegistry, ObstacleSet, PlacementResult, STITCH_GROUP_NAME,
};
