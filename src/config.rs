// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! All tunables live in one serde-backed structure with sensible defaults.
//! An optional YAML file in the working directory overrides them; a missing
//! file is not an error.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Policy for math problems whose result would be negative.
///
/// The digit classifier only knows 0-9, so negative expected answers can
/// never be matched. `Reject` resamples until the result is a non-negative
/// digit; `Allow` keeps the legacy behavior of bounding the result from
/// above only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeAnswers {
    Reject,
    Allow,
}

/// Drawing canvas and rasterization parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas width in logical units (and raster pixels).
    pub width: u32,
    /// Canvas height in logical units (and raster pixels).
    pub height: u32,
    /// Stroke width used when rasterizing a submission.
    pub stroke_width: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            stroke_width: 12.0,
        }
    }
}

/// Classifier model locations and input contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Side length of the square single-channel classifier input.
    pub input_size: u32,
    /// Path to the digit template model (JSON).
    pub digit_model: PathBuf,
    /// Path to the shape template model (JSON).
    pub shape_model: PathBuf,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            input_size: 28,
            digit_model: PathBuf::from("assets/digit_model.json"),
            shape_model: PathBuf::from("assets/shape_model.json"),
        }
    }
}

/// Round pacing and scoring parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// How long feedback stays on screen before the next round starts.
    pub feedback_delay_ms: u64,
    /// Points awarded for a correct answer.
    pub points_per_correct: u32,
    /// Whether math problems may have negative answers.
    pub negative_answers: NegativeAnswers,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            feedback_delay_ms: 2000,
            points_per_correct: 10,
            negative_answers: NegativeAnswers::Reject,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas: CanvasConfig,
    pub classifier: ClassifierConfig,
    pub game: GameConfig,
}

impl AppConfig {
    /// Read configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&yaml)?;
        Ok(config)
    }

    /// Read configuration from `path`, falling back to defaults when the
    /// file is absent. A present-but-invalid file is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
