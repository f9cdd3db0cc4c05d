// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The submission pipeline: rasterize, normalize, classify.
//!
//! Runs once per submission on a worker thread. Every stage recomputes from
//! scratch; nothing is cached across rounds.

use crate::classify::{Classifier, ClassifyError, Prediction};
use crate::config::CanvasConfig;
use crate::models::stroke::Stroke;
use crate::raster::{normalize, render, RasterError};
use thiserror::Error;

/// A failure in any stage of the submission pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

/// Run the full capture-to-verdict image chain over a finished drawing.
pub fn run(
    strokes: &[Stroke],
    canvas: &CanvasConfig,
    input_size: u32,
    classifier: &dyn Classifier,
) -> Result<Prediction, PipelineError> {
    let raster = render::rasterize(strokes, canvas)?;
    let normalized = normalize::normalize(&raster, input_size)?;
    let prediction = classifier.predict(&normalized)?;
    log::info!(
        "Classified drawing as '{}' (confidence {:?})",
        prediction.label,
        prediction.confidence
    );
    Ok(prediction)
}
