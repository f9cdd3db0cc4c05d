// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Stroke data structures and the stroke recorder.
//!
//! A drawing is an ordered sequence of strokes; a stroke is an ordered
//! sequence of points in canvas space. Strokes are append-only while being
//! drawn and immutable once finalized.

/// A 2D point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A single continuous pen stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Accumulates pointer-drag events into finalized strokes.
///
/// `begin` opens a stroke, `extend` appends to it, `end` finalizes it.
/// Finalized strokes are never mutated; an `end` on an empty stroke drops it.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    strokes: Vec<Stroke>,
    active: Option<Stroke>,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new stroke. An already-open stroke is finalized first so a
    /// lost pointer-up event cannot merge two gestures.
    pub fn begin(&mut self) {
        if self.active.is_some() {
            self.end();
        }
        self.active = Some(Stroke::new());
    }

    /// Append a point to the active stroke. No-op when none is open.
    pub fn extend(&mut self, point: Point) {
        if let Some(ref mut stroke) = self.active {
            stroke.points.push(point);
        }
    }

    /// Finalize the active stroke, keeping it only if it has any points.
    pub fn end(&mut self) {
        if let Some(stroke) = self.active.take() {
            if !stroke.is_empty() {
                self.strokes.push(stroke);
            }
        }
    }

    /// Discard all strokes, finalized and active.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.active = None;
    }

    /// Finalized strokes, in drawing order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// The stroke currently being drawn, if any.
    pub fn active(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    /// Snapshot the finalized strokes for submission.
    pub fn snapshot(&self) -> Vec<Stroke> {
        self.strokes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_extend_end() {
        let mut recorder = StrokeRecorder::new();
        recorder.begin();
        recorder.extend(Point::new(1.0, 2.0));
        recorder.extend(Point::new(3.0, 4.0));
        recorder.end();

        assert_eq!(recorder.strokes().len(), 1);
        assert_eq!(recorder.strokes()[0].points().len(), 2);
        assert!(recorder.active().is_none());
    }

    #[test]
    fn test_extend_without_begin_is_noop() {
        let mut recorder = StrokeRecorder::new();
        recorder.extend(Point::new(1.0, 1.0));
        recorder.end();

        assert!(recorder.strokes().is_empty());
        assert!(recorder.active().is_none());
    }

    #[test]
    fn test_empty_stroke_dropped_on_end() {
        let mut recorder = StrokeRecorder::new();
        recorder.begin();
        recorder.end();

        assert!(recorder.strokes().is_empty());
    }

    #[test]
    fn test_begin_while_open_finalizes_previous() {
        let mut recorder = StrokeRecorder::new();
        recorder.begin();
        recorder.extend(Point::new(0.0, 0.0));
        recorder.begin();
        recorder.extend(Point::new(5.0, 5.0));
        recorder.end();

        assert_eq!(recorder.strokes().len(), 2);
    }

    #[test]
    fn test_clear_discards_everything() {
        let mut recorder = StrokeRecorder::new();
        recorder.begin();
        recorder.extend(Point::new(0.0, 0.0));
        recorder.end();
        recorder.begin();
        recorder.extend(Point::new(1.0, 1.0));

        recorder.clear();
        assert!(recorder.strokes().is_empty());
        assert!(recorder.active().is_none());
    }
}
