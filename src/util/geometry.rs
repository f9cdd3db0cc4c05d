// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides coordinate transformations between the on-screen
//! canvas widget rectangle and canvas space (the coordinate system strokes
//! are recorded and rasterized in).

use crate::models::stroke::Point;

/// Convert a screen position inside `rect` to canvas coordinates, clamped
/// to the canvas bounds.
pub fn screen_to_canvas(pos: egui::Pos2, rect: egui::Rect, width: u32, height: u32) -> Point {
    let rel_x = ((pos.x - rect.min.x) / rect.width()).clamp(0.0, 1.0);
    let rel_y = ((pos.y - rect.min.y) / rect.height()).clamp(0.0, 1.0);
    Point::new(rel_x * width as f32, rel_y * height as f32)
}

/// Convert a canvas-space point to a screen position inside `rect`.
pub fn canvas_to_screen(point: Point, rect: egui::Rect, width: u32, height: u32) -> egui::Pos2 {
    egui::pos2(
        rect.min.x + point.x / width as f32 * rect.width(),
        rect.min.y + point.y / height as f32 * rect.height(),
    )
}
