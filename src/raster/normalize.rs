// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Classifier-input normalization.
//!
//! Downsamples the full-resolution raster to the classifier's fixed square
//! input. Uses filtered resampling; nearest-neighbor would alias a 12px
//! stroke on a 300px canvas into nothing at 28x28.

use crate::raster::RasterError;
use image::imageops::{self, FilterType};
use image::GrayImage;

/// Resample `image` to `input_size` x `input_size`, preserving the 0-255
/// intensity range.
pub fn normalize(image: &GrayImage, input_size: u32) -> Result<GrayImage, RasterError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(RasterError::ZeroArea {
            width: image.width(),
            height: image.height(),
        });
    }
    if input_size == 0 {
        return Err(RasterError::ZeroArea {
            width: input_size,
            height: input_size,
        });
    }
    Ok(imageops::resize(image, input_size, input_size, FilterType::Triangle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use crate::models::stroke::{Point, StrokeRecorder};
    use crate::raster::render::rasterize;

    #[test]
    fn test_output_dimensions() {
        let image = GrayImage::from_pixel(300, 300, image::Luma([255]));
        let normalized = normalize(&image, 28).unwrap();
        assert_eq!(normalized.dimensions(), (28, 28));
    }

    #[test]
    fn test_stroke_survives_downsampling() {
        let canvas = CanvasConfig::default();
        let mut recorder = StrokeRecorder::new();
        recorder.begin();
        recorder.extend(Point::new(50.0, 150.0));
        recorder.extend(Point::new(250.0, 150.0));
        recorder.end();

        let raster = rasterize(recorder.strokes(), &canvas).unwrap();
        let normalized = normalize(&raster, 28).unwrap();

        let darkest = normalized.pixels().map(|p| p.0[0]).min().unwrap();
        assert!(darkest < 128, "stroke aliased away: darkest = {}", darkest);
    }

    #[test]
    fn test_intensity_range_preserved() {
        let image = GrayImage::from_pixel(300, 300, image::Luma([255]));
        let normalized = normalize(&image, 28).unwrap();
        assert!(normalized.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_zero_area_source_fails() {
        let image = GrayImage::new(0, 300);
        assert!(matches!(
            normalize(&image, 28),
            Err(RasterError::ZeroArea { .. })
        ));
    }

    #[test]
    fn test_zero_target_fails() {
        let image = GrayImage::from_pixel(10, 10, image::Luma([255]));
        assert!(matches!(
            normalize(&image, 0),
            Err(RasterError::ZeroArea { .. })
        ));
    }
}
