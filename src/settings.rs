//! Persisted stitching defaults and user units
//!
//! The dialog values (pitch, clearance, randomize) survive between sessions
//! in a small JSON file, stored in the user's units. They are converted to
//! board units before they reach the engine.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::board::Coord;

/// Default settings file name
pub const DEFAULT_SETTINGS_FILE: &str = "defaults.json";

/// Board units per millimetre
pub const UNITS_PER_MM: f64 = 1_000_000.0;

/// Board units per mil (thousandth of an inch)
pub const UNITS_PER_MIL: f64 = 25_400.0;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-facing length unit. Parsed leniently ("mm", "mil", ...), written
/// as its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Units {
    #[default]
    Millimetres,
    Mils,
}

impl Units {
    fn scale(&self) -> f64 {
        match self {
            Units::Millimetres => UNITS_PER_MM,
            Units::Mils => UNITS_PER_MIL,
        }
    }

    /// User value to board units, rounded to the nearest unit
    pub fn to_board(&self, value: f64) -> Coord {
        (value * self.scale()).round() as Coord
    }

    pub fn from_board(&self, value: Coord) -> f64 {
        value as f64 / self.scale()
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::Millimetres => write!(f, "mm"),
            Units::Mils => write!(f, "mils"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mm" | "millimetres" | "millimeters" => Ok(Units::Millimetres),
            "mil" | "mils" => Ok(Units::Mils),
            _ => Err(format!("Unknown units: {}", s)),
        }
    }
}

impl TryFrom<String> for Units {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Lengths may be stored as numbers or as the text of a number
fn number_or_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Length {
        Number(f64),
        Text(String),
    }

    match Length::deserialize(deserializer)? {
        Length::Number(value) => Ok(value),
        Length::Text(text) => text.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("expected a number, got '{}'", text))
        }),
    }
}

/// Dialog defaults as persisted between sessions, in user units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchSettings {
    #[serde(rename = "HSpacing", deserialize_with = "number_or_text")]
    pub h_spacing: f64,
    #[serde(rename = "VSpacing", deserialize_with = "number_or_text")]
    pub v_spacing: f64,
    #[serde(rename = "Clearance", deserialize_with = "number_or_text")]
    pub clearance: f64,
    #[serde(rename = "Randomize")]
    pub randomize: bool,
}

impl Default for StitchSettings {
    fn default() -> Self {
        Self {
            h_spacing: 3.0,
            v_spacing: 3.0,
            clearance: 0.0,
            randomize: false,
        }
    }
}

impl StitchSettings {
    /// Read settings from `path`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "[Settings] Using defaults, could not read '{}': {}",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn try_load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
