// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Raster pipeline: stroke rendering and classifier-input normalization.

pub mod normalize;
pub mod render;

use thiserror::Error;

/// Failure while rendering or resampling a drawing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("canvas has zero area ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },
    #[error("pixel buffer conversion failed")]
    Buffer,
}
