//! Via stitching engine
//!
//! Decides where stitching vias may go inside one fill region and which
//! previously placed vias a clear run removes. Works on a read-only board
//! snapshot and returns decisions; committing them is the caller's job.
//!
//! # Submodules
//! - `types` - Candidates, run parameters and results
//! - `error` - Configuration errors with reason codes
//! - `distance` - Point-to-segment distance
//! - `clearance` - Region outline and board edge clearance
//! - `overlap` - Overlap against pads, vias, tracks and zones
//! - `jitter` - Seeded grid perturbation
//! - `fill` - Grid sweep and per-point evaluation
//! - `clear` - Removal selection (tagged or matching)
//! - `group` - Placement group registry

mod types;
mod error;
mod distance;
mod clearance;
mod overlap;
mod jitter;
mod fill;
mod clear;
mod group;

pub use types::{
    ViaCandidate, FillParams, ZoneNetPolicy, PlacementStats, PlacementResult,
    ClearMode, ClearResult, STITCH_GROUP_NAME, MAX_LENGTH,
};
pub use error::ConfigError;
pub use distance::point_segment_distance;
pub use clearance::is_clear;
pub use overlap::{ObstacleSet, overlaps, item_overlaps};
pub use jitter::{Jitter, SeededJitter, NoJitter, jitter_offset};
pub use fill::{FillInput, Verdict, fill_area, grid_points, evaluate_point};
pub use clear::clear_vias;
pub use group::{GroupRegistry, PlacementGroup};
