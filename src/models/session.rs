// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Game session state.
//!
//! One `GameSession` exists per running app. It owns the observable round
//! state (prompt, score, feedback) that the presentation layer reads; all
//! mutation goes through the round controller.

/// Which quiz variant is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Draw the named shape.
    Drawing,
    /// Draw the digit answering an arithmetic problem.
    Math,
}

/// Observable state of the current round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub mode: GameMode,
    /// The instruction shown to the player.
    pub prompt: String,
    /// The graded answer, cached per round. Recomputable from `prompt`.
    pub expected_answer: String,
    pub score: u32,
    pub feedback: String,
    pub feedback_visible: bool,
}

impl RoundState {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            prompt: String::new(),
            expected_answer: String::new(),
            score: 0,
            feedback: String::new(),
            feedback_visible: false,
        }
    }
}

/// A game session: inactive on the start screen, active once a mode is chosen.
///
/// Invariant: no pipeline operation runs while `active` is false.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub active: bool,
    pub round: RoundState,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            active: false,
            round: RoundState::new(GameMode::Drawing),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
