// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! SketchQuiz - a draw-and-learn quiz game.
//!
//! The user draws on a canvas in response to a prompt (a shape name, or an
//! arithmetic problem whose answer is a single digit); the drawing is
//! rasterized, downsampled and handed to a sketch classifier, and the
//! predicted label is graded against the expected answer.

mod app;
mod classify;
mod config;
mod game;
mod models;
mod raster;
mod ui;
mod util;

use anyhow::Result;
use app::SketchQuizApp;
use config::AppConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Load configuration (falls back to defaults when no file is present)
    let config = AppConfig::load_or_default(std::path::Path::new("sketchquiz.yaml"));

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 640.0])
            .with_min_inner_size([420.0, 560.0])
            .with_title("SketchQuiz - Draw and Learn"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "SketchQuiz",
        options,
        Box::new(move |_cc| Ok(Box::new(SketchQuizApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
