// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Stroke rasterization.
//!
//! Renders a finished drawing onto a white canvas as black ink: each stroke
//! becomes a round-capped polyline of the configured width. A single-point
//! stroke is drawn as a dot so that a deliberate tap still leaves ink.

use crate::config::CanvasConfig;
use crate::models::stroke::Stroke as PenStroke;
use crate::raster::RasterError;
use image::{DynamicImage, GrayImage, RgbaImage};
use tiny_skia::{Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Render strokes onto a fresh canvas and return it as a grayscale image.
pub fn rasterize(strokes: &[PenStroke], canvas: &CanvasConfig) -> Result<GrayImage, RasterError> {
    let mut pixmap = Pixmap::new(canvas.width, canvas.height).ok_or(RasterError::ZeroArea {
        width: canvas.width,
        height: canvas.height,
    })?;
    pixmap.fill(Color::WHITE);

    let mut paint = Paint::default();
    paint.set_color(Color::BLACK);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: canvas.stroke_width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };

    for pen_stroke in strokes {
        let points = pen_stroke.points();
        match points {
            [] => {}
            [only] => {
                // Dot for a tap
                if let Some(path) =
                    PathBuilder::from_circle(only.x, only.y, canvas.stroke_width / 2.0)
                {
                    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
                }
            }
            [first, rest @ ..] => {
                let mut pb = PathBuilder::new();
                pb.move_to(first.x, first.y);
                for point in rest {
                    pb.line_to(point.x, point.y);
                }
                if let Some(path) = pb.finish() {
                    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                }
            }
        }
    }

    to_gray(pixmap)
}

/// Collapse the premultiplied RGBA pixmap into a single luma channel.
fn to_gray(pixmap: Pixmap) -> Result<GrayImage, RasterError> {
    let width = pixmap.width();
    let height = pixmap.height();
    let rgba = RgbaImage::from_raw(width, height, pixmap.take()).ok_or(RasterError::Buffer)?;
    Ok(DynamicImage::ImageRgba8(rgba).into_luma8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stroke::{Point, StrokeRecorder};

    fn stroke_of(points: &[(f32, f32)]) -> Vec<PenStroke> {
        let mut recorder = StrokeRecorder::new();
        recorder.begin();
        for &(x, y) in points {
            recorder.extend(Point::new(x, y));
        }
        recorder.end();
        recorder.snapshot()
    }

    #[test]
    fn test_empty_drawing_is_all_background() {
        let canvas = CanvasConfig::default();
        let image = rasterize(&[], &canvas).unwrap();

        assert_eq!(image.dimensions(), (300, 300));
        assert!(image.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_segment_darkens_pixels_along_it() {
        let canvas = CanvasConfig::default();
        let strokes = stroke_of(&[(50.0, 150.0), (250.0, 150.0)]);
        let image = rasterize(&strokes, &canvas).unwrap();

        // On the segment: ink. Far away: background.
        assert!(image.get_pixel(150, 150).0[0] < 50);
        assert!(image.get_pixel(60, 150).0[0] < 50);
        assert_eq!(image.get_pixel(5, 5).0[0], 255);
        assert_eq!(image.get_pixel(150, 20).0[0], 255);
    }

    #[test]
    fn test_single_point_stroke_leaves_a_dot() {
        let canvas = CanvasConfig::default();
        let strokes = stroke_of(&[(150.0, 150.0)]);
        let image = rasterize(&strokes, &canvas).unwrap();

        assert!(image.get_pixel(150, 150).0[0] < 50);
        // The dot is local: radius is half the stroke width
        assert_eq!(image.get_pixel(150, 170).0[0], 255);
    }

    #[test]
    fn test_strokes_drawn_in_sequence() {
        let canvas = CanvasConfig::default();
        let mut strokes = stroke_of(&[(50.0, 50.0), (250.0, 50.0)]);
        strokes.extend(stroke_of(&[(50.0, 250.0), (250.0, 250.0)]));
        let image = rasterize(&strokes, &canvas).unwrap();

        assert!(image.get_pixel(150, 50).0[0] < 50);
        assert!(image.get_pixel(150, 250).0[0] < 50);
    }

    #[test]
    fn test_zero_area_canvas_fails() {
        let canvas = CanvasConfig {
            width: 0,
            height: 300,
            stroke_width: 12.0,
        };
        let err = rasterize(&[], &canvas).unwrap_err();
        assert_eq!(
            err,
            RasterError::ZeroArea {
                width: 0,
                height: 300
            }
        );
    }
}
