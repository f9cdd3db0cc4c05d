// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait: the start screen, the game screen, and the wiring
//! between the UI widgets, the stroke recorder and the round controller.
//! Classification runs on a background thread and reports back over a
//! channel so the interactive loop never blocks on a model.

use crate::classify::{Classifier, DigitClassifier, Prediction, ShapeClassifier, TemplateModel};
use crate::config::AppConfig;
use crate::game::controller::{Phase, RoundController, SubmissionTicket};
use crate::game::pipeline::{self, PipelineError};
use crate::models::session::GameMode;
use crate::models::stroke::StrokeRecorder;
use crate::ui::{canvas, hud};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of a background classification run.
type EvalOutcome = (SubmissionTicket, Result<Prediction, PipelineError>);

/// Main application state.
pub struct SketchQuizApp {
    config: AppConfig,

    /// The round state machine; sole owner of the game session.
    controller: RoundController,

    /// Strokes of the drawing in progress.
    recorder: StrokeRecorder,

    /// Classifier per mode, shared with worker threads.
    digit_classifier: Arc<DigitClassifier>,
    shape_classifier: Arc<ShapeClassifier>,

    /// Receiver for the in-flight submission, if any.
    evaluation: Option<Receiver<EvalOutcome>>,
}

impl SketchQuizApp {
    /// Create a new SketchQuiz application instance.
    pub fn new(config: AppConfig) -> Self {
        let digit_classifier = Arc::new(DigitClassifier::new(config.classifier.digit_model.clone()));
        let shape_classifier = Arc::new(ShapeClassifier::new(config.classifier.shape_model.clone()));
        Self {
            controller: RoundController::new(config.game.clone()),
            recorder: StrokeRecorder::new(),
            digit_classifier,
            shape_classifier,
            evaluation: None,
            config,
        }
    }

    /// Kick off a background evaluation of the current drawing.
    fn spawn_submission(&mut self) {
        let Some(ticket) = self.controller.begin_submission() else {
            return;
        };

        let strokes = self.recorder.snapshot();
        let canvas = self.config.canvas.clone();
        let input_size = self.config.classifier.input_size;
        let classifier: Arc<dyn Classifier> = match self.controller.mode() {
            GameMode::Math => self.digit_classifier.clone(),
            GameMode::Drawing => self.shape_classifier.clone(),
        };

        let (sender, receiver) = channel();
        self.evaluation = Some(receiver);

        // Rasterization and inference run off the interactive path
        std::thread::spawn(move || {
            let result = pipeline::run(&strokes, &canvas, input_size, classifier.as_ref());
            let _ = sender.send((ticket, result));
        });
    }

    /// Show the mode-selection start screen.
    fn show_start_screen(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading(
                egui::RichText::new("SketchQuiz")
                    .size(40.0)
                    .color(egui::Color32::from_rgb(70, 130, 220)),
            );
            ui.label(egui::RichText::new("Draw and Learn!").size(18.0).weak());
            ui.add_space(40.0);

            let drawing = egui::Button::new(
                egui::RichText::new("✏ Drawing Mode\nDraw objects and let the app guess").size(16.0),
            )
            .min_size(egui::vec2(280.0, 56.0));
            if ui.add(drawing).clicked() {
                self.start_game(GameMode::Drawing);
            }

            ui.add_space(12.0);

            let math = egui::Button::new(
                egui::RichText::new("🔢 Math Mode\nSolve problems by drawing digits").size(16.0),
            )
            .min_size(egui::vec2(280.0, 56.0));
            if ui.add(math).clicked() {
                self.start_game(GameMode::Math);
            }
        });
    }

    fn start_game(&mut self, mode: GameMode) {
        self.recorder.clear();
        self.evaluation = None;
        self.controller.start_game(mode);
    }

    /// Show the game screen: header, canvas, controls.
    fn show_game_screen(&mut self, ui: &mut egui::Ui) {
        hud::show_header(ui, &self.controller.session().round);
        ui.add_space(8.0);

        let input_enabled = self.controller.phase() == Phase::RoundActive;

        let canvas_action = ui
            .vertical_centered(|ui| canvas::show(ui, &self.recorder, &self.config.canvas, input_enabled))
            .inner;

        match canvas_action {
            canvas::CanvasAction::Begin(point) => {
                self.recorder.begin();
                self.recorder.extend(point);
            }
            canvas::CanvasAction::Extend(point) => {
                self.recorder.extend(point);
            }
            canvas::CanvasAction::End => {
                self.recorder.end();
            }
            canvas::CanvasAction::None => {}
        }

        ui.add_space(8.0);
        let evaluating = self.controller.phase() == Phase::Evaluating;
        let hud_action = ui
            .vertical_centered(|ui| hud::show_controls(ui, input_enabled, evaluating))
            .inner;

        match hud_action {
            hud::HudAction::Clear => {
                self.recorder.clear();
                log::info!("Canvas cleared");
            }
            hud::HudAction::Submit => {
                self.spawn_submission();
            }
            hud::HudAction::EndGame => {
                self.controller.end_game();
                self.recorder.clear();
                self.evaluation = None;
            }
            hud::HudAction::None => {}
        }
    }
}

impl eframe::App for SketchQuizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for a completed background evaluation
        if let Some(ref receiver) = self.evaluation {
            if let Ok((ticket, result)) = receiver.try_recv() {
                self.evaluation = None;
                self.controller
                    .resolve_submission(ticket, result, Instant::now());
            }
        }

        // Pump the feedback timer; a fresh round starts with a clean canvas
        if self.controller.tick(Instant::now()) {
            self.recorder.clear();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Load Digit Model...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Template models", &["json"])
                            .pick_file()
                        {
                            // Validate eagerly; keep the old model on failure
                            match TemplateModel::load(&path).and_then(DigitClassifier::from_model)
                            {
                                Ok(classifier) => {
                                    log::info!("Loaded digit model from {}", path.display());
                                    self.digit_classifier = Arc::new(classifier);
                                }
                                Err(e) => log::error!("Failed to load digit model: {}", e),
                            }
                        }
                        ui.close_menu();
                    }
                    if ui.button("Load Shape Model...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Template models", &["json"])
                            .pick_file()
                        {
                            match TemplateModel::load(&path).and_then(ShapeClassifier::from_model)
                            {
                                Ok(classifier) => {
                                    log::info!("Loaded shape model from {}", path.display());
                                    self.shape_classifier = Arc::new(classifier);
                                }
                                Err(e) => log::error!("Failed to load shape model: {}", e),
                            }
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Main panel: start screen or game screen
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.controller.session().active {
                self.show_game_screen(ui);
            } else {
                self.show_start_screen(ui);
            }
        });

        // Keep the loop alive while waiting on the worker or the feedback
        // timer
        match self.controller.phase() {
            Phase::Evaluating | Phase::FeedbackShown => {
                ctx.request_repaint_after(Duration::from_millis(100));
            }
            _ => {}
        }
    }
}
