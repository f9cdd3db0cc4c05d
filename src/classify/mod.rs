// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Classifier adapter.
//!
//! The pipeline talks to classifiers through the [`Classifier`] trait only;
//! the concrete backends live in [`template`]. Implementations must be
//! `Send + Sync` because inference runs on a worker thread.

pub mod template;

pub use template::{ClassTemplate, DigitClassifier, ShapeClassifier, TemplateModel};

use image::GrayImage;
use thiserror::Error;

/// A classification outcome: the winning label and optional confidence.
///
/// Owned by the submission that produced it; never cached across rounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: Option<f32>,
}

/// Failure inside a classifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The backing model could not be read, parsed, or validated.
    #[error("classifier model unavailable: {0}")]
    ModelUnavailable(String),
    /// The model is loaded but could not produce a prediction.
    #[error("prediction failed: {0}")]
    Inference(String),
}

/// Capability interface over the classifier variants.
pub trait Classifier: Send + Sync {
    /// Classify one normalized single-channel image.
    fn predict(&self, image: &GrayImage) -> Result<Prediction, ClassifyError>;
}
