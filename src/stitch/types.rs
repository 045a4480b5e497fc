//! Stitching data types
//!
//! Candidate vias, run parameters and run results.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::board::{BBox, Coord, ItemId, Point};

/// Name of the group that tags every via placed by a fill run
pub const STITCH_GROUP_NAME: &str = "VIA_STITCHING_GROUP";

/// Largest pitch, via size or clearance a run accepts (about 1.1 km)
pub const MAX_LENGTH: Coord = 1 << 40;

/// A via under evaluation, or accepted for commit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViaCandidate {
    pub position: Point,
    pub width: Coord,
    pub drill: Coord,
    pub net_code: i32,
    pub net: String,
    pub layer: String,
}

impl ViaCandidate {
    pub fn radius(&self) -> f64 {
        self.width as f64 / 2.0
    }

    pub fn bbox(&self) -> BBox {
        BBox::around(self.position, self.width / 2)
    }

    /// Copy grown by `clearance` all around (both diameters grow by 2x)
    pub fn inflated(&self, clearance: Coord) -> Self {
        let grow = clearance.saturating_mul(2);
        Self {
            width: self.width.saturating_add(grow),
            drill: self.drill.saturating_add(grow),
            ..self.clone()
        }
    }
}

/// How zones on the target net are treated during obstacle collection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneNetPolicy {
    /// Zones on the target net are not obstacles
    #[default]
    IgnoreSameNet,
    /// Every zone other than the fill region is an obstacle
    Obstruct,
}

/// Resolved parameters of a fill run, all in board units
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FillParams {
    pub step_x: Coord,
    pub step_y: Coord,
    pub via_size: Coord,
    pub drill_size: Coord,
    pub clearance: Coord,
    pub randomize: bool,
    pub net_code: i32,
    pub net: String,
    #[serde(default)]
    pub zone_policy: ZoneNetPolicy,
}

impl FillParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |len: Coord| len > 0 && len <= MAX_LENGTH;
        if !in_range(self.step_x) || !in_range(self.step_y) {
            return Err(ConfigError::InvalidPitch {
                step_x: self.step_x,
                step_y: self.step_y,
            });
        }
        if !in_range(self.via_size) || self.drill_size <= 0 || self.drill_size > self.via_size {
            return Err(ConfigError::InvalidViaSize {
                size: self.via_size,
                drill: self.drill_size,
            });
        }
        if self.clearance < 0 {
            return Err(ConfigError::NegativeClearance(self.clearance));
        }
        if self.clearance > MAX_LENGTH {
            return Err(ConfigError::ClearanceTooLarge(self.clearance));
        }
        Ok(())
    }

    /// Nominal-size candidate at `position` on `layer`
    pub fn candidate(&self, position: Point, layer: &str) -> ViaCandidate {
        ViaCandidate {
            position,
            width: self.via_size,
            drill: self.drill_size,
            net_code: self.net_code,
            net: self.net.clone(),
            layer: layer.to_string(),
        }
    }
}

/// Aggregate rejection counters of a fill run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PlacementStats {
    pub evaluated: usize,
    pub outside: usize,
    pub overlapping: usize,
    pub too_close: usize,
}

/// Accepted vias in sweep order
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlacementResult {
    pub vias: Vec<ViaCandidate>,
    pub stats: PlacementStats,
}

impl PlacementResult {
    pub fn count(&self) -> usize {
        self.vias.len()
    }

    pub fn positions(&self) -> Vec<Point> {
        self.vias.iter().map(|v| v.position).collect()
    }
}

/// Which vias a clear run removes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ClearMode {
    /// Every via in the stitching group
    Tagged,
    /// Vias with exactly these values lying inside the region's fill
    Matching {
        via_size: Coord,
        drill_size: Coord,
        net: String,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClearResult {
    pub removed: Vec<ItemId>,
}

impl ClearResult {
    pub fn count(&self) -> usize {
        self.removed.len()
    }
}
