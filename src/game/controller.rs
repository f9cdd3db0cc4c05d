// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Round lifecycle state machine.
//!
//! The controller owns the game session and is the only mutator of it.
//! Phases: `Idle -> RoundActive -> Evaluating -> FeedbackShown -> RoundActive
//! | Idle`. Submissions are ticketed with a generation counter; results from
//! a superseded round (stale ticket) or a superseded feedback deadline are
//! dropped instead of corrupting the newer round.

use crate::classify::Prediction;
use crate::config::GameConfig;
use crate::game::oracle;
use crate::game::pipeline::PipelineError;
use crate::models::session::{GameMode, GameSession, RoundState};
use std::time::{Duration, Instant};

/// Lifecycle phase of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No session; start screen.
    Idle,
    /// Prompt shown, canvas open for input.
    RoundActive,
    /// A submission is in flight; input disabled.
    Evaluating,
    /// Verdict on screen, waiting out the feedback delay.
    FeedbackShown,
}

/// Handle tying an in-flight submission to the round that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    generation: u64,
}

/// Orchestrates prompt generation, submission grading, scoring, and the
/// timed transition to the next round.
pub struct RoundController {
    session: GameSession,
    phase: Phase,
    /// Bumped whenever the round context changes; stale work is ignored.
    generation: u64,
    /// Deadline for the FeedbackShown -> RoundActive auto-advance.
    advance_at: Option<Instant>,
    config: GameConfig,
}

impl RoundController {
    pub fn new(config: GameConfig) -> Self {
        Self {
            session: GameSession::new(),
            phase: Phase::Idle,
            generation: 0,
            advance_at: None,
            config,
        }
    }

    /// The observable session state for the presentation layer.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.session.round.mode
    }

    /// Start a fresh session in the given mode: score resets, first prompt
    /// generated. Supersedes any in-flight submission or pending advance.
    pub fn start_game(&mut self, mode: GameMode) {
        self.generation += 1;
        self.advance_at = None;
        self.session.active = true;
        self.session.round = RoundState::new(mode);
        self.next_prompt();
        self.phase = Phase::RoundActive;
        log::info!("Started new game in {:?} mode", mode);
    }

    /// End the session from any state.
    pub fn end_game(&mut self) {
        self.generation += 1;
        self.advance_at = None;
        self.session.active = false;
        self.session.round.feedback_visible = false;
        self.phase = Phase::Idle;
        log::info!(
            "Ended game with final score {}",
            self.session.round.score
        );
    }

    /// Accept a submission if one can start now. Returns `None` while a
    /// submission is already in flight, feedback is showing, or no session
    /// is active - rapid re-submission can never double-score.
    pub fn begin_submission(&mut self) -> Option<SubmissionTicket> {
        if !self.session.active || self.phase != Phase::RoundActive {
            log::info!("Rejected submission in phase {:?}", self.phase);
            return None;
        }
        self.phase = Phase::Evaluating;
        Some(SubmissionTicket {
            generation: self.generation,
        })
    }

    /// Grade a finished pipeline run. Stale tickets and out-of-phase calls
    /// are ignored. Pipeline failures become error feedback with the score
    /// untouched.
    pub fn resolve_submission(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<Prediction, PipelineError>,
        now: Instant,
    ) {
        if self.phase != Phase::Evaluating || ticket.generation != self.generation {
            log::info!("Dropping stale submission result");
            return;
        }

        let round = &mut self.session.round;
        match outcome {
            Ok(prediction) => {
                if is_correct(round.mode, &round.expected_answer, &prediction.label) {
                    round.score += self.config.points_per_correct;
                    round.feedback = match round.mode {
                        GameMode::Math => "✅ Correct!".to_string(),
                        GameMode::Drawing => {
                            format!("🎉 Great drawing of a {}!", round.expected_answer)
                        }
                    };
                    log::info!("Correct answer, score now {}", round.score);
                } else {
                    round.feedback = match round.mode {
                        GameMode::Math => {
                            format!("❌ Try again. Answer: {}", round.expected_answer)
                        }
                        GameMode::Drawing => {
                            format!(
                                "Hmm... I saw a {}. Try again!",
                                prediction.label.to_lowercase()
                            )
                        }
                    };
                    log::info!(
                        "Incorrect answer: predicted '{}', expected '{}'",
                        prediction.label,
                        round.expected_answer
                    );
                }
            }
            Err(e) => {
                log::error!("Submission pipeline failed: {}", e);
                round.feedback = format!("Prediction error: {}", e);
            }
        }

        round.feedback_visible = true;
        self.phase = Phase::FeedbackShown;
        self.advance_at = Some(now + Duration::from_millis(self.config.feedback_delay_ms));
    }

    /// Advance to the next round once the feedback deadline has passed.
    /// Returns true when a new round started, so the owner can clear the
    /// canvas.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.phase != Phase::FeedbackShown {
            return false;
        }
        match self.advance_at {
            Some(deadline) if now >= deadline => {
                self.next_prompt();
                self.phase = Phase::RoundActive;
                self.advance_at = None;
                true
            }
            _ => false,
        }
    }

    fn next_prompt(&mut self) {
        let round = &mut self.session.round;
        let mut rng = rand::rng();
        round.prompt = oracle::generate_prompt(round.mode, &mut rng, self.config.negative_answers);
        round.expected_answer = oracle::expected_answer(round.mode, &round.prompt);
        round.feedback_visible = false;
        log::info!("New prompt: {}", round.prompt);
    }

    /// Pin the round to a known prompt (deterministic tests only).
    #[cfg(test)]
    pub(crate) fn force_prompt(&mut self, prompt: &str) {
        let round = &mut self.session.round;
        round.prompt = prompt.to_string();
        round.expected_answer = oracle::expected_answer(round.mode, prompt);
    }
}

/// Compare predicted and expected labels under the mode's rules: integer
/// equality for math, case-insensitive string equality for drawing.
fn is_correct(mode: GameMode, expected: &str, predicted: &str) -> bool {
    match mode {
        GameMode::Math => match (expected.parse::<i64>(), predicted.parse::<i64>()) {
            (Ok(e), Ok(p)) => e == p,
            _ => false,
        },
        GameMode::Drawing => expected.eq_ignore_ascii_case(predicted),
    }
}
