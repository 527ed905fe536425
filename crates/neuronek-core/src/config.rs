//! Render configuration.
//!
//! Every tunable the renderer uses lives here and is passed into each
//! [`render`](crate::render()) call. Config files are JSON; missing fields
//! take their defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Longest accepted lookback window (100 years).
pub const MAX_WINDOW: Duration = Duration::from_secs(100 * 365 * 24 * 3600);

/// Decay model constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayParams {
    /// Amount that maps to full intensity (1.0) at administration time.
    pub reference_dose: f64,
    /// Normalized contributions at or below this are dropped, and curves
    /// at or below it are not drawn.
    pub noise_floor: f64,
}

impl Default for DecayParams {
    fn default() -> Self {
        Self {
            reference_dose: 200.0,
            noise_floor: 0.01,
        }
    }
}

/// Columns and rows reserved around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gutters {
    /// Columns left of the data; the rightmost of them holds the vertical axis.
    pub left: usize,
    /// Columns right of the data.
    pub right: usize,
    /// Rows below the data; the topmost of them holds the horizontal axis.
    pub bottom: usize,
}

impl Default for Gutters {
    fn default() -> Self {
        Self {
            left: 1,
            right: 1,
            bottom: 1,
        }
    }
}

/// Glyph set for every canvas layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    pub gridline: char,
    pub axis_vertical: char,
    pub axis_horizontal: char,
    pub axis_corner: char,
    pub point: char,
    pub stroke: char,
    pub legend_marker: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            gridline: '·',
            axis_vertical: '│',
            axis_horizontal: '─',
            axis_corner: '└',
            point: '●',
            stroke: '│',
            legend_marker: '●',
        }
    }
}

/// How elapsed time is printed in the recent-doses strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElapsedFormat {
    /// `now`, `12m`, `3h`, `2d`: a single truncated unit.
    #[default]
    Coarse,
    /// `30s`, `12m`, `2h 30m`, `1d 1h`: up to two units.
    Composite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Lookback window shown across the data columns.
    #[serde(rename = "window_hours", with = "hours")]
    pub window: Duration,
    pub gutters: Gutters,
    /// Gridline every this many rows, starting at the top row.
    pub gridline_interval: usize,
    /// Smallest canvas that is rasterized; smaller ones get a placeholder.
    pub min_width: usize,
    pub min_height: usize,
    pub decay: DecayParams,
    pub glyphs: Glyphs,
    /// Number of entries in the recent-doses strip.
    pub recent_limit: usize,
    pub dose_unit: String,
    pub elapsed_format: ElapsedFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(24 * 3600),
            gutters: Gutters::default(),
            gridline_interval: 5,
            min_width: 12,
            min_height: 6,
            decay: DecayParams::default(),
            glyphs: Glyphs::default(),
            recent_limit: 3,
            dose_unit: "mg".to_string(),
            elapsed_format: ElapsedFormat::Coarse,
        }
    }
}

impl RenderConfig {
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Load from a JSON file and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.is_zero() {
            return Err(ConfigError::Invalid("window must be > 0"));
        }
        if self.window > MAX_WINDOW {
            return Err(ConfigError::Invalid("window must be at most 100 years"));
        }
        if !self.decay.reference_dose.is_finite() || self.decay.reference_dose <= 0.0 {
            return Err(ConfigError::Invalid("reference_dose must be > 0"));
        }
        if !(0.0..1.0).contains(&self.decay.noise_floor) {
            return Err(ConfigError::Invalid("noise_floor must be in [0, 1)"));
        }
        if self.gutters.left == 0 || self.gutters.bottom == 0 {
            return Err(ConfigError::Invalid(
                "left and bottom gutters must be >= 1 to hold the axes",
            ));
        }
        if self.gridline_interval == 0 {
            return Err(ConfigError::Invalid("gridline_interval must be > 0"));
        }
        Ok(())
    }
}

/// `Duration` as fractional hours.
mod hours {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64() / 3600.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let hours = f64::deserialize(d)?;
        Duration::try_from_secs_f64(hours * 3600.0)
            .map_err(|_| D::Error::custom("window_hours must be a non-negative number"))
    }
}
