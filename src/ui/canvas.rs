// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas widget.
//!
//! Shows the current drawing and turns pointer drags into stroke events.
//! The widget reports what happened through [`CanvasAction`]; the app owns
//! the stroke recorder and applies the events.

use crate::config::CanvasConfig;
use crate::models::stroke::{Point, Stroke, StrokeRecorder};
use crate::util::geometry;

/// Display stroke width; rasterization uses its own.
const ECHO_STROKE_WIDTH: f32 = 3.0;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// Pointer went down: open a stroke at this point.
    Begin(Point),
    /// Pointer dragged: extend the active stroke.
    Extend(Point),
    /// Pointer released: finalize the active stroke.
    End,
}

/// Display the drawing canvas and handle pointer interactions.
pub fn show(
    ui: &mut egui::Ui,
    recorder: &StrokeRecorder,
    canvas: &CanvasConfig,
    input_enabled: bool,
) -> CanvasAction {
    let mut action = CanvasAction::None;

    // Fit the canvas into the available width, preserving its aspect ratio
    let aspect = canvas.height as f32 / canvas.width as f32;
    let side = ui.available_width().min(360.0);
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(side, side * aspect),
        if input_enabled {
            egui::Sense::drag()
        } else {
            egui::Sense::hover()
        },
    );

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, egui::Color32::WHITE);
    painter.rect_stroke(rect, 4.0, egui::Stroke::new(2.0, egui::Color32::GRAY));

    if input_enabled {
        if let Some(pos) = response.interact_pointer_pos() {
            let point = geometry::screen_to_canvas(pos, rect, canvas.width, canvas.height);
            if response.drag_started() {
                action = CanvasAction::Begin(point);
            } else if response.dragged() {
                action = CanvasAction::Extend(point);
            }
        }
        if response.drag_stopped() {
            action = CanvasAction::End;
        }
    }

    // Echo finalized strokes and the stroke being drawn
    for stroke in recorder.strokes() {
        draw_stroke(&painter, stroke, rect, canvas);
    }
    if let Some(active) = recorder.active() {
        draw_stroke(&painter, active, rect, canvas);
    }

    action
}

/// Draw one stroke as connected line segments (or a dot for a tap).
fn draw_stroke(painter: &egui::Painter, stroke: &Stroke, rect: egui::Rect, canvas: &CanvasConfig) {
    let screen_points: Vec<egui::Pos2> = stroke
        .points()
        .iter()
        .map(|p| geometry::canvas_to_screen(*p, rect, canvas.width, canvas.height))
        .collect();

    match screen_points.as_slice() {
        [] => {}
        [only] => {
            painter.circle_filled(*only, ECHO_STROKE_WIDTH / 2.0, egui::Color32::BLACK);
        }
        points => {
            for pair in points.windows(2) {
                painter.line_segment(
                    [pair[0], pair[1]],
                    egui::Stroke::new(ECHO_STROKE_WIDTH, egui::Color32::BLACK),
                );
            }
        }
    }
}
