// config.rs

use bevy::prelude::Resource;
use serde::Deserialize;
use std::fmt;

const CONFIG_JSON: &str = include_str!("../assets/pixel_field.json");

/// Where per-cell delays are measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealOrigin {
    /// Bottom-center of the container (wave rises upward)
    #[default]
    Bottom,
    /// Top-center of the container (wave falls downward)
    Top,
}

fn default_opacity() -> f32 {
    0.15
}

fn default_speed() -> f32 {
    1.0
}

fn default_gap() -> u32 {
    6
}

fn default_palette_size() -> usize {
    5
}

fn default_max_ticker() -> i32 {
    360
}

fn default_frame_interval_ms() -> f64 {
    1000.0 / 60.0
}

fn default_z_index() -> i32 {
    -1
}

/// Tunables for the pixel field
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
pub struct PixelFieldConfig {
    /// Alpha applied to the rendered field as a whole
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Scales flicker rate and growth; divides the radial delays
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Grid spacing in pixels
    #[serde(default = "default_gap")]
    pub gap: u32,
    #[serde(default = "default_palette_size")]
    pub palette_size: usize,
    /// Ticker bound at which the field starts contracting
    #[serde(default = "default_max_ticker")]
    pub max_ticker: i32,
    /// Minimum time between two drawn frames
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: f64,
    #[serde(default)]
    pub origin: RevealOrigin,
    /// UI layering of the field node
    #[serde(default = "default_z_index")]
    pub z_index: i32,
    /// Fixed RNG seed for reproducible grids
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PixelFieldConfig {
    fn default() -> Self {
        Self {
            opacity: default_opacity(),
            speed: default_speed(),
            gap: default_gap(),
            palette_size: default_palette_size(),
            max_ticker: default_max_ticker(),
            frame_interval_ms: default_frame_interval_ms(),
            origin: RevealOrigin::default(),
            z_index: default_z_index(),
            seed: None,
        }
    }
}

/// Error types for config loading
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    InvalidOpacity(f32),
    InvalidSpeed(f32),
    InvalidGap(u32),
    InvalidPaletteSize(usize),
    InvalidMaxTicker(i32),
    InvalidFrameInterval(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Failed to parse pixel field config: {}", msg),
            ConfigError::InvalidOpacity(v) => {
                write!(f, "Opacity {} is outside 0.0..=1.0", v)
            }
            ConfigError::InvalidSpeed(v) => write!(f, "Speed {} must be positive", v),
            ConfigError::InvalidGap(v) => write!(f, "Gap {} must be at least 1 pixel", v),
            ConfigError::InvalidPaletteSize(v) => {
                write!(f, "Palette size {} must be at least 1", v)
            }
            ConfigError::InvalidMaxTicker(v) => write!(f, "Max ticker {} must be at least 1", v),
            ConfigError::InvalidFrameInterval(v) => {
                write!(f, "Frame interval {}ms must be a non-negative number", v)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl PixelFieldConfig {
    /// Load the config bundled with the binary
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_json(CONFIG_JSON)
    }

    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PixelFieldConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::InvalidOpacity(self.opacity));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        if self.gap == 0 {
            return Err(ConfigError::InvalidGap(self.gap));
        }
        if self.palette_size == 0 {
            return Err(ConfigError::InvalidPaletteSize(self.palette_size));
        }
        if self.max_ticker < 1 {
            return Err(ConfigError::InvalidMaxTicker(self.max_ticker));
        }
        if !(self.frame_interval_ms.is_finite() && self.frame_interval_ms >= 0.0) {
            return Err(ConfigError::InvalidFrameInterval(self.frame_interval_ms));
        }
        Ok(())
    }
}
