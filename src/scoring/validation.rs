//! Checking a submitted guess set before it is graded.
//!
//! Checks run in a fixed order and the first failure is reported: entry
//! count, total, then each value's range. Rejected submissions never consume
//! an attempt.

use crate::equity::NUM_HANDS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One guessed percentage for one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    /// Seat, 1 through 4.
    pub position: u8,
    /// Guessed win percentage.
    pub percent: i32,
}

impl Guess {
    /// Shorthand constructor.
    pub fn new(position: u8, percent: i32) -> Self {
        Self { position, percent }
    }
}

/// Why a submission was rejected. The messages are shown to players.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GuessError {
    /// Not exactly four entries.
    #[error("Must have exactly 4 guesses")]
    Count,
    /// Percentages do not total 100.
    #[error("Percentages must sum to 100% (got {0}%)")]
    Sum(f64),
    /// A value is fractional or outside 0-100.
    #[error("Each percentage must be an integer between 0 and 100")]
    Range,
    /// A position is outside 1-4.
    #[error("Position must be between 1 and 4 (got {0})")]
    Position(i64),
    /// A position is guessed twice.
    #[error("Position {0} is guessed more than once")]
    DuplicatePosition(u8),
    /// Attempt number outside the allowed range.
    #[error("Attempt must be 1 to {max}")]
    Attempt {
        /// Attempts allowed per puzzle.
        max: u8,
    },
    /// The puzzle was already solved.
    #[error("Puzzle already solved")]
    AlreadySolved,
    /// Every attempt has been used.
    #[error("No guesses remaining")]
    NoGuessesRemaining,
    /// The submission is not a list of `{position, percent}` objects.
    #[error("Invalid request body")]
    Malformed,
}

/// Validate a typed guess set.
pub fn validate_guesses(guesses: &[Guess]) -> Result<(), GuessError> {
    check_values(guesses.iter().map(|g| g.percent as f64))?;
    check_positions(guesses.iter().map(|g| g.position as i64))
}

/// Reject attempt numbers outside `1..=max_attempts`.
pub fn validate_attempt(attempt: u8, max_attempts: u8) -> Result<(), GuessError> {
    if attempt < 1 || attempt > max_attempts {
        return Err(GuessError::Attempt { max: max_attempts });
    }
    Ok(())
}

#[derive(Deserialize)]
struct RawGuess {
    position: f64,
    percent: f64,
}

/// Parse and validate a JSON array like `[{"position":1,"percent":30}, ...]`.
///
/// Fractional percentages are accepted by the parser and then rejected with
/// the range message.
pub fn parse_guesses(json: &str) -> Result<Vec<Guess>, GuessError> {
    let raw: Vec<RawGuess> = serde_json::from_str(json).map_err(|e| {
        log::debug!("unparseable guess submission: {}", e);
        GuessError::Malformed
    })?;

    check_values(raw.iter().map(|g| g.percent))?;
    for g in &raw {
        if g.position.fract() != 0.0 {
            return Err(GuessError::Position(g.position.trunc() as i64));
        }
    }
    check_positions(raw.iter().map(|g| g.position as i64))?;

    // Both fields are now known to be small whole numbers.
    Ok(raw
        .iter()
        .map(|g| Guess::new(g.position as u8, g.percent as i32))
        .collect())
}

fn check_values<I>(percents: I) -> Result<(), GuessError>
where
    I: Iterator<Item = f64> + Clone,
{
    if percents.clone().count() != NUM_HANDS {
        return Err(GuessError::Count);
    }

    let total: f64 = percents.clone().sum();
    if total != 100.0 {
        return Err(GuessError::Sum(total));
    }

    for p in percents {
        if !(0.0..=100.0).contains(&p) || p.fract() != 0.0 {
            return Err(GuessError::Range);
        }
    }
    Ok(())
}

fn check_positions<I: Iterator<Item = i64>>(positions: I) -> Result<(), GuessError> {
    let mut seen = [false; NUM_HANDS];
    for position in positions {
        if !(1..=NUM_HANDS as i64).contains(&position) {
            return Err(GuessError::Position(position));
        }
        let slot = &mut seen[position as usize - 1];
        if *slot {
            return Err(GuessError::DuplicatePosition(position as u8));
        }
        *slot = true;
    }
    Ok(())
}
