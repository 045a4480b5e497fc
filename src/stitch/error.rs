//! Configuration errors detected before a fill or clear run

use thiserror::Error;

use crate::board::Coord;

/// Reasons a run is refused before any candidate is evaluated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no area selected")]
    NoAreaSelected,

    #[error("area '{zone}' is on non-copper layer '{layer}'")]
    NotOnCopperLayer { zone: String, layer: String },

    #[error("area '{zone}' does not allow copper pour")]
    CopperPourNotAllowed { zone: String },

    #[error("area '{zone}' outline has {corners} corners, need at least 3")]
    DegenerateOutline { zone: String, corners: usize },

    #[error("board defines no via size/drill")]
    MissingViaDimensions,

    #[error("grid pitch must be positive, got ({step_x}, {step_y})")]
    InvalidPitch { step_x: Coord, step_y: Coord },

    #[error("invalid via size {size} with drill {drill}")]
    InvalidViaSize { size: Coord, drill: Coord },

    #[error("clearance must not be negative, got {0}")]
    NegativeClearance(Coord),

    #[error("clearance {0} exceeds the largest supported length")]
    ClearanceTooLarge(Coord),

    #[error("unknown net '{0}'")]
    UnknownNet(String),
}

impl ConfigError {
    /// Stable reason code reported to callers
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::NoAreaSelected => "no_area_selected",
            ConfigError::NotOnCopperLayer { .. } => "not_on_copper_layer",
            ConfigError::CopperPourNotAllowed { .. } => "copper_pour_not_allowed",
            ConfigError::DegenerateOutline { .. } => "degenerate_outline",
            ConfigError::MissingViaDimensions => "missing_via_dimensions",
            ConfigError::InvalidPitch { .. } => "invalid_pitch",
            ConfigError::InvalidViaSize { .. } => "invalid_via_size",
            ConfigError::NegativeClearance(_) => "negative_clearance",
            ConfigError::ClearanceTooLarge(_) => "clearance_too_large",
            ConfigError::UnknownNet(_) => "unknown_net",
        }
    }
}
