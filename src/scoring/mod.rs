//! Guess feedback and scoring.
//!
//! A player submits four whole-number percentages per attempt. Each one is
//! compared with the stored answer for its position:
//!
//! | Guess vs answer | Feedback |
//! |---|---|
//! | equal | `exact` |
//! | above | `high` |
//! | below | `low` |
//!
//! Scores reward solving early and quickly: a base of
//! `(max_attempts - attempt + 1) * 100` plus a time bonus that decays from 100
//! to 0 over five minutes.

pub mod share;
pub mod submission;
pub mod validation;

pub use share::{format_share_text, DEFAULT_APP_URL};
pub use submission::{grade_submission, GradedAttempt, GuessAttempt, GuessHistory, ScoredGuess};
pub use validation::{parse_guesses, validate_attempt, validate_guesses, Guess, GuessError};

use crate::equity::NUM_HANDS;
use serde::{Deserialize, Serialize};

/// Points awarded per unused attempt (counting the winning one).
pub const POINTS_PER_ATTEMPT: u32 = 100;

/// Largest possible time bonus.
pub const MAX_TIME_BONUS: u32 = 100;

/// Direction hint for one guessed percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    /// Guess matches the answer.
    Exact,
    /// Guess is above the answer.
    High,
    /// Guess is below the answer.
    Low,
}

impl Feedback {
    /// Compare a guess with the answer.
    pub fn compare(guessed: i32, actual: i32) -> Self {
        use std::cmp::Ordering::*;
        match guessed.cmp(&actual) {
            Equal => Feedback::Exact,
            Greater => Feedback::High,
            Less => Feedback::Low,
        }
    }

    /// Square used in share text.
    pub fn emoji(self) -> &'static str {
        match self {
            Feedback::Exact => "🟩",
            Feedback::High => "🟦",
            Feedback::Low => "🟧",
        }
    }
}

/// Whether every position is exact.
pub fn is_solved(feedback: &[Feedback]) -> bool {
    !feedback.is_empty() && feedback.iter().all(|&f| f == Feedback::Exact)
}

/// Points for solving on `attempt`; zero outside `1..=max_attempts`.
pub fn base_score(attempt: u8, max_attempts: u8) -> u32 {
    if attempt < 1 || attempt > max_attempts {
        return 0;
    }
    (max_attempts - attempt + 1) as u32 * POINTS_PER_ATTEMPT
}

/// `max(0, floor(100 - seconds / 3))`. Negative times count as zero.
pub fn time_bonus(elapsed_seconds: f64) -> u32 {
    let elapsed = elapsed_seconds.max(0.0);
    let bonus = (MAX_TIME_BONUS as f64 - elapsed / 3.0).floor();
    if bonus > 0.0 {
        bonus as u32
    } else {
        0
    }
}

/// Base score plus time bonus.
pub fn calculate_score(attempt: u8, max_attempts: u8, elapsed_seconds: f64) -> u32 {
    base_score(attempt, max_attempts) + time_bonus(elapsed_seconds)
}

/// Sum of absolute differences between guesses and answers.
pub fn percent_diff(guessed: &[i32; NUM_HANDS], actual: &[i32; NUM_HANDS]) -> u32 {
    guessed
        .iter()
        .zip(actual)
        .map(|(g, a)| g.abs_diff(*a))
        .sum()
}
