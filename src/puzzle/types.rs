//! Persisted puzzle records.

use crate::cards::Hand;
use crate::equity::NUM_HANDS;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Minimum percentage spread for an easy puzzle.
pub const EASY_SPREAD: u8 = 15;
/// Minimum percentage spread for a medium puzzle.
pub const MEDIUM_SPREAD: u8 = 8;

/// How hard the hands are to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Spread of at least 15 points.
    Easy,
    /// Spread of at least 8 points.
    Medium,
    /// Anything tighter.
    Hard,
}

impl Difficulty {
    /// Classify by `max - min` of the rounded percentages.
    pub fn from_spread(spread: u8) -> Self {
        if spread >= EASY_SPREAD {
            Difficulty::Easy
        } else if spread >= MEDIUM_SPREAD {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }

    /// Classify a set of rounded percentages.
    pub fn from_percentages(percents: &[u8; NUM_HANDS]) -> Self {
        let max = percents.iter().copied().max().unwrap_or(0);
        let min = percents.iter().copied().min().unwrap_or(0);
        Self::from_spread(max - min)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

/// One hand of a puzzle with its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleHand {
    /// Seat, 1 through 4.
    pub position: u8,
    /// Hole cards.
    pub cards: Hand,
    /// Rounded win percentage.
    pub actual_percent: u8,
}

/// A generated daily puzzle. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Calendar date the puzzle is for.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The four hands in position order.
    pub hands: [PuzzleHand; NUM_HANDS],
    /// Difficulty tag from the percentage spread.
    pub difficulty: Difficulty,
}

impl Puzzle {
    /// Build a puzzle, numbering positions 1-4 and tagging difficulty.
    pub fn new(date: Date, hands: [Hand; NUM_HANDS], percents: [u8; NUM_HANDS]) -> Self {
        let mut position = 0;
        let hands = hands.map(|cards| {
            position += 1;
            PuzzleHand { position, cards, actual_percent: percents[position as usize - 1] }
        });
        Self { date, hands, difficulty: Difficulty::from_percentages(&percents) }
    }

    /// Answers in position order.
    pub fn percentages(&self) -> [u8; NUM_HANDS] {
        self.hands.map(|h| h.actual_percent)
    }

    /// Hole cards in position order.
    pub fn cards(&self) -> [Hand; NUM_HANDS] {
        self.hands.map(|h| h.cards)
    }

    /// The puzzle as served to a player who is still guessing.
    pub fn public_view(&self) -> PublicPuzzle {
        PublicPuzzle {
            date: self.date,
            hands: self.hands.map(|h| PublicHand { position: h.position, cards: h.cards }),
            difficulty: self.difficulty,
        }
    }
}

/// A hand without its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHand {
    /// Seat, 1 through 4.
    pub position: u8,
    /// Hole cards.
    pub cards: Hand,
}

/// Answer-free view of a [`Puzzle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPuzzle {
    /// Calendar date.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Hands in position order.
    pub hands: [PublicHand; NUM_HANDS],
    /// Difficulty tag.
    pub difficulty: Difficulty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn sample() -> Puzzle {
        let hands = ["AsKh", "QdQc", "JhJs", "9c9d"].map(|h| h.parse().unwrap());
        Puzzle::new(date!(2025 - 01 - 15), hands, [30, 38, 17, 15])
    }

    #[test]
    fn test_difficulty_boundaries() {
        assert_eq!(Difficulty::from_spread(20), Difficulty::Easy);
        assert_eq!(Difficulty::from_spread(15), Difficulty::Easy);
        assert_eq!(Difficulty::from_spread(14), Difficulty::Medium);
        assert_eq!(Difficulty::from_spread(10), Difficulty::Medium);
        assert_eq!(Difficulty::from_spread(8), Difficulty::Medium);
        assert_eq!(Difficulty::from_spread(7), Difficulty::Hard);
        assert_eq!(Difficulty::from_spread(5), Difficulty::Hard);
        assert_eq!(Difficulty::from_percentages(&[25, 25, 25, 25]), Difficulty::Hard);
        assert_eq!(Difficulty::from_percentages(&[20, 30, 25, 25]), Difficulty::Medium);
    }

    #[test]
    fn test_new_numbers_positions() {
        let puzzle = sample();
        let positions: Vec<u8> = puzzle.hands.iter().map(|h| h.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4]);
        assert_eq!(puzzle.percentages(), [30, 38, 17, 15]);
        // Spread 38 - 15 = 23.
        assert_eq!(puzzle.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["date"], "2025-01-15");
        assert_eq!(json["difficulty"], "easy");
        assert_eq!(json["hands"][1]["position"], 2);
        assert_eq!(json["hands"][1]["cards"], serde_json::json!(["Qd", "Qc"]));
        assert_eq!(json["hands"][1]["actualPercent"], 38);

        let back: Puzzle = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_public_view_hides_answers() {
        let public = sample().public_view();
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("actualPercent"));
        assert!(json.contains("\"As\""));
        assert_eq!(public.hands[3].position, 4);
    }
}
