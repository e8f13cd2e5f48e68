//! Grading a guess set against a stored puzzle.

use super::validation::{validate_attempt, validate_guesses, Guess, GuessError};
use super::{calculate_score, is_solved, percent_diff, Feedback};
use crate::config::GameRules;
use crate::equity::NUM_HANDS;
use crate::puzzle::Puzzle;
use serde::{Deserialize, Serialize};

/// A guess with its feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredGuess {
    /// Seat, 1 through 4.
    pub position: u8,
    /// Guessed percentage.
    pub percent: i32,
    /// How it compares with the answer.
    pub feedback: Feedback,
}

/// Result of grading one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedAttempt {
    /// Attempt number this grades.
    pub attempt: u8,
    /// Per-position feedback, in submission order.
    pub feedback: Vec<ScoredGuess>,
    /// All four positions exact.
    pub is_solved: bool,
    /// Attempts left after this one.
    pub guesses_remaining: u8,
    /// Final score, once the game is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<u32>,
    /// Sum of absolute errors for this attempt.
    pub percent_diff: u32,
    /// Answers in position order, once the game is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_percentages: Option<[u8; NUM_HANDS]>,
}

impl GradedAttempt {
    /// Solved or out of attempts.
    pub fn is_game_over(&self) -> bool {
        self.is_solved || self.guesses_remaining == 0
    }
}

/// Validate and grade attempt number `attempt`.
///
/// A solve scores for the attempt it happened on. An unsolved final attempt
/// scores as if solved on the last attempt, so finishing still earns the
/// minimum base plus time bonus. Before the game is over neither the score
/// nor the answers are reported.
pub fn grade_submission(
    puzzle: &Puzzle,
    guesses: &[Guess],
    attempt: u8,
    elapsed_seconds: f64,
    rules: &GameRules,
) -> Result<GradedAttempt, GuessError> {
    validate_guesses(guesses)?;
    validate_attempt(attempt, rules.max_attempts)?;

    let actual = puzzle.percentages().map(i32::from);
    let mut guessed = [0i32; NUM_HANDS];
    let feedback: Vec<ScoredGuess> = guesses
        .iter()
        .map(|g| {
            let slot = g.position as usize - 1;
            guessed[slot] = g.percent;
            ScoredGuess {
                position: g.position,
                percent: g.percent,
                feedback: Feedback::compare(g.percent, actual[slot]),
            }
        })
        .collect();

    let solved = is_solved(&feedback.iter().map(|g| g.feedback).collect::<Vec<_>>());
    let out_of_attempts = attempt >= rules.max_attempts;
    let game_over = solved || out_of_attempts;

    let total_score = if solved {
        Some(calculate_score(attempt, rules.max_attempts, elapsed_seconds))
    } else if out_of_attempts {
        Some(calculate_score(rules.max_attempts, rules.max_attempts, elapsed_seconds))
    } else {
        None
    };

    Ok(GradedAttempt {
        attempt,
        feedback,
        is_solved: solved,
        guesses_remaining: rules.max_attempts.saturating_sub(attempt),
        total_score,
        percent_diff: percent_diff(&guessed, &actual),
        actual_percentages: game_over.then(|| puzzle.percentages()),
    })
}

/// One recorded attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessAttempt {
    /// Attempt number, starting at 1.
    pub attempt: u8,
    /// The graded guesses.
    pub guesses: Vec<ScoredGuess>,
}

/// A player's attempts on one puzzle, in order. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessHistory {
    rules: GameRules,
    attempts: Vec<GuessAttempt>,
    solved: bool,
}

impl GuessHistory {
    /// Empty history under `rules`.
    pub fn new(rules: GameRules) -> Self {
        Self {
            rules,
            attempts: Vec::new(),
            solved: false,
        }
    }

    /// Grade the next attempt and record it.
    ///
    /// Invalid guess sets are rejected without using up an attempt.
    pub fn submit(&mut self, puzzle: &Puzzle, guesses: &[Guess], elapsed_seconds: f64) -> Result<GradedAttempt, GuessError> {
        if self.solved {
            return Err(GuessError::AlreadySolved);
        }
        if self.guesses_used() >= self.rules.max_attempts {
            return Err(GuessError::NoGuessesRemaining);
        }

        let attempt = self.guesses_used() + 1;
        let graded = grade_submission(puzzle, guesses, attempt, elapsed_seconds, &self.rules)?;

        self.solved = graded.is_solved;
        self.attempts.push(GuessAttempt {
            attempt,
            guesses: graded.feedback.clone(),
        });
        Ok(graded)
    }

    /// Recorded attempts, oldest first.
    pub fn attempts(&self) -> &[GuessAttempt] {
        &self.attempts
    }

    /// Attempts used so far.
    pub fn guesses_used(&self) -> u8 {
        self.attempts.len() as u8
    }

    /// Whether an attempt solved the puzzle.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Solved or out of attempts.
    pub fn is_over(&self) -> bool {
        self.solved || self.guesses_used() >= self.rules.max_attempts
    }

    /// Rules this history is played under.
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }
}
