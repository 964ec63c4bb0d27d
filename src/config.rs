//! Chart configuration.
//!
//! Every constant the layout depends on lives here. Defaults reproduce the
//! reference chart (1200×900 canvas, BTC in the middle); a TOML file can
//! override any subset of fields.

use crate::error::{LayoutError, LayoutResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;

/// Chart configuration loaded from TOML (all fields optional)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Canvas width in pixels
    pub width: f64,

    /// Canvas height in pixels
    pub height: f64,

    /// Smallest bubble radius (overall score 0)
    pub min_bubble: f64,

    /// Largest bubble radius (overall score 1)
    pub max_bubble: f64,

    /// Code font size range
    pub min_font: f64,
    pub max_font: f64,

    /// Angular gap (radians) kept free of sectors for the year legend
    pub year_clearance: f64,

    /// Code of the record pinned to the canvas center
    pub centered_code: String,

    /// Bubbles smaller than this only show their code
    pub legibility_radius: f64,

    /// Lower bound of the fixed cap/vol score domain; smaller raw scores collapse to 0
    pub score_floor: f64,

    /// Base of the logarithmic score scales
    pub log_base: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: 1200.0,
            height: 900.0,
            min_bubble: 15.0,
            max_bubble: 50.0,
            min_font: 10.0,
            max_font: 20.0,
            year_clearance: PI / 16.0,
            centered_code: "BTC".to_string(),
            legibility_radius: 18.0,
            score_floor: 0.01,
            log_base: 1.1,
        }
    }
}

impl ChartConfig {
    /// Load configuration from a TOML file and validate it
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to load config file {:?}", path))?;
        Ok(config)
    }

    /// Parse configuration from TOML text and validate it
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: ChartConfig = toml::from_str(contents).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot produce a chart
    pub fn validate(&self) -> LayoutResult<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(LayoutError::InvalidConfig(
                "canvas width and height must be positive".to_string(),
            ));
        }
        if !(self.min_bubble > 0.0 && self.min_bubble <= self.max_bubble) {
            return Err(LayoutError::InvalidConfig(
                "bubble radius range must satisfy 0 < min_bubble <= max_bubble".to_string(),
            ));
        }
        if !(self.min_font > 0.0 && self.min_font <= self.max_font) {
            return Err(LayoutError::InvalidConfig(
                "font range must satisfy 0 < min_font <= max_font".to_string(),
            ));
        }
        if !(self.year_clearance > 0.0 && self.year_clearance < 2.0 * PI) {
            return Err(LayoutError::InvalidConfig(
                "year_clearance must lie strictly between 0 and 2π".to_string(),
            ));
        }
        if !(self.score_floor > 0.0 && self.score_floor < 1.0) {
            return Err(LayoutError::InvalidConfig(
                "score_floor must lie strictly between 0 and 1".to_string(),
            ));
        }
        if !(self.log_base > 0.0) || self.log_base == 1.0 {
            return Err(LayoutError::InvalidConfig(
                "log_base must be positive and not 1".to_string(),
            ));
        }
        if self.centered_code.trim().is_empty() {
            return Err(LayoutError::InvalidConfig(
                "centered_code must not be empty".to_string(),
            ));
        }
        if self.max_ring() < self.min_ring() {
            return Err(LayoutError::InvalidConfig(format!(
                "canvas too small: outer ring {} is inside inner ring {}",
                self.max_ring(),
                self.min_ring()
            )));
        }
        Ok(())
    }

    pub fn mid_x(&self) -> f64 {
        self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.height / 2.0
    }

    /// Radius of the earliest year ring
    pub fn min_ring(&self) -> f64 {
        self.max_bubble * 2.0
    }

    /// Radius of the latest year ring
    pub fn max_ring(&self) -> f64 {
        self.width.min(self.height) / 2.0 - self.max_bubble
    }

    /// First sector starts half a clearance past angle 0
    pub fn rotation_offset(&self) -> f64 {
        self.year_clearance / 2.0
    }

    /// Total angle available to category sectors
    pub fn sector_sweep(&self) -> f64 {
        2.0 * PI - self.year_clearance
    }

    /// Outer radius of the category background wedges
    pub fn sector_radius(&self) -> f64 {
        self.max_ring() + 2.0 * self.max_bubble
    }
}
