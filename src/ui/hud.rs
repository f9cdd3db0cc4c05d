// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! In-game heads-up display.
//!
//! Score, prompt and feedback above the canvas, and the Clear / Submit /
//! End Game controls below it.

use crate::models::session::{GameMode, RoundState};

/// Result of HUD interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudAction {
    None,
    Submit,
    Clear,
    EndGame,
}

/// Display the round header: score, prompt, feedback.
pub fn show_header(ui: &mut egui::Ui, round: &RoundState) {
    ui.vertical_centered(|ui| {
        ui.heading(format!("Current Score: {}", round.score));

        let instruction = match round.mode {
            GameMode::Drawing => format!("Draw: {}", round.prompt),
            GameMode::Math => format!("Solve by drawing the answer: {}", round.prompt),
        };
        ui.label(egui::RichText::new(instruction).size(18.0));

        if round.feedback_visible {
            ui.label(
                egui::RichText::new(&round.feedback)
                    .size(16.0)
                    .color(egui::Color32::from_rgb(160, 80, 200)),
            );
        } else {
            // Keep the layout stable while feedback is hidden
            ui.label("");
        }
    });
}

/// Display the control row. `can_submit` is false while a submission is in
/// flight or feedback is showing.
pub fn show_controls(ui: &mut egui::Ui, can_submit: bool, evaluating: bool) -> HudAction {
    let mut action = HudAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui
            .add_enabled(can_submit, egui::Button::new("Clear"))
            .clicked()
        {
            action = HudAction::Clear;
        }

        if ui
            .add_enabled(can_submit, egui::Button::new("Submit"))
            .clicked()
        {
            action = HudAction::Submit;
        }

        if evaluating {
            ui.spinner();
            ui.label(egui::RichText::new("Thinking...").italics().weak());
        }
    });

    ui.add_space(8.0);
    if ui.button("End Game").clicked() {
        action = HudAction::EndGame;
    }

    action
}
