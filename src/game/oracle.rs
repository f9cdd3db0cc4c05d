// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The answer oracle and prompt generators.
//!
//! The expected answer for a round is a pure function of its prompt: math
//! prompts are parsed and evaluated with integer arithmetic, drawing prompts
//! are their own answer. Malformed math prompts degrade to the `"?"`
//! sentinel instead of propagating.

use crate::config::NegativeAnswers;
use crate::models::session::GameMode;
use rand::Rng;
use thiserror::Error;

/// The shape vocabulary for drawing mode.
pub const DRAWING_PROMPTS: [&str; 6] = ["circle", "square", "triangle", "star", "heart", "arrow"];

const OPERATORS: [&str; 3] = ["+", "-", "×"];

/// Sentinel expected answer for prompts the oracle cannot evaluate.
pub const UNKNOWN_ANSWER: &str = "?";

/// A math prompt that does not match `"<int> <op> <int> = ?"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptParseError {
    #[error("expected at least 3 tokens, found {0}")]
    TooFewTokens(usize),
    #[error("operand '{0}' is not an integer")]
    BadOperand(String),
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
}

/// Evaluate a math prompt of the form `"<int> <op> <int> = ?"`.
pub fn evaluate_math(prompt: &str) -> Result<i64, PromptParseError> {
    let parts: Vec<&str> = prompt.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(PromptParseError::TooFewTokens(parts.len()));
    }

    let lhs: i64 = parts[0]
        .parse()
        .map_err(|_| PromptParseError::BadOperand(parts[0].to_string()))?;
    let rhs: i64 = parts[2]
        .parse()
        .map_err(|_| PromptParseError::BadOperand(parts[2].to_string()))?;

    match parts[1] {
        "+" => Ok(lhs + rhs),
        "-" => Ok(lhs - rhs),
        "×" => Ok(lhs * rhs),
        op => Err(PromptParseError::UnknownOperator(op.to_string())),
    }
}

/// The single correct answer for a prompt in the given mode.
///
/// Math prompts that fail to parse are recovered locally into
/// [`UNKNOWN_ANSWER`]; the round plays out as a guaranteed miss rather than
/// crashing the session.
pub fn expected_answer(mode: GameMode, prompt: &str) -> String {
    match mode {
        GameMode::Drawing => prompt.to_string(),
        GameMode::Math => match evaluate_math(prompt) {
            Ok(result) => result.to_string(),
            Err(e) => {
                log::warn!("Unparseable math prompt '{}': {}", prompt, e);
                UNKNOWN_ANSWER.to_string()
            }
        },
    }
}

/// Generate a fresh prompt for the given mode.
pub fn generate_prompt(mode: GameMode, rng: &mut impl Rng, policy: NegativeAnswers) -> String {
    match mode {
        GameMode::Drawing => generate_drawing_prompt(rng),
        GameMode::Math => generate_math_prompt(rng, policy),
    }
}

/// Pick a shape from the drawing vocabulary.
pub fn generate_drawing_prompt(rng: &mut impl Rng) -> String {
    DRAWING_PROMPTS[rng.random_range(0..DRAWING_PROMPTS.len())].to_string()
}

/// Sample math problems over operands in [1, 9] until the result is a
/// single digit the classifier can represent.
///
/// Under [`NegativeAnswers::Allow`] only the upper bound is enforced, so
/// subtraction may produce a negative expected answer; `Reject` also
/// resamples those.
pub fn generate_math_prompt(rng: &mut impl Rng, policy: NegativeAnswers) -> String {
    loop {
        let lhs: i64 = rng.random_range(1..=9);
        let rhs: i64 = rng.random_range(1..=9);
        let op = OPERATORS[rng.random_range(0..OPERATORS.len())];
        let result = match op {
            "+" => lhs + rhs,
            "-" => lhs - rhs,
            _ => lhs * rhs,
        };

        let accepted = match policy {
            NegativeAnswers::Reject => (0..=9).contains(&result),
            NegativeAnswers::Allow => result <= 9,
        };
        if accepted {
            return format!("{} {} {} = ?", lhs, op, rhs);
        }
    }
}
