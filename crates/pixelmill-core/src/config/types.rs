//! Sub-configuration structs with engine defaults.

use serde::{Deserialize, Serialize};

use crate::spec::FilterPreset;

/// Color wash curves for the named filter presets.
///
/// Each curve can be overridden independently; unset presets keep the
/// built-in palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetsConfig {
    pub oceanic: PresetCurve,
    pub islands: PresetCurve,
    pub marine: PresetCurve,
}

impl Default for PresetsConfig {
    fn default() -> Self {
        Self {
            oceanic: PresetCurve::new([0, 89, 173], 0.2),
            islands: PresetCurve::new([0, 24, 95], 0.2),
            marine: PresetCurve::new([0, 14, 119], 0.2),
        }
    }
}

impl PresetsConfig {
    /// Look up the curve for a preset. `Unspecified` has no curve.
    pub fn curve(&self, preset: FilterPreset) -> Option<PresetCurve> {
        match preset {
            FilterPreset::Unspecified => None,
            FilterPreset::Oceanic => Some(self.oceanic),
            FilterPreset::Islands => Some(self.islands),
            FilterPreset::Marine => Some(self.marine),
        }
    }
}

/// A single color wash: blend `strength` of `tint` into every pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetCurve {
    /// RGB tint color
    pub tint: [u8; 3],

    /// Blend weight in [0, 1]; 0 leaves the image unchanged
    pub strength: f32,
}

impl PresetCurve {
    pub fn new(tint: [u8; 3], strength: f32) -> Self {
        Self { tint, strength }
    }
}

impl Default for PresetCurve {
    fn default() -> Self {
        Self {
            tint: [0, 0, 0],
            strength: 0.0,
        }
    }
}

/// Watermark asset settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    /// Path to an image file used as the watermark (supports ~ expansion).
    /// When unset, the built-in badge is used.
    pub source: Option<String>,
}

/// Resource limits to protect against runaway inputs and transform targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum input file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height) for inputs and resize targets
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 32768,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
