//! Poker hand evaluation.
//!
//! Ranks 5-7 card holdings directly from rank counts and per-suit rank masks,
//! without enumerating 5-card subsets. With at most seven cards a flush can
//! never coexist with quads or a full house, so the flush check runs first.

use super::card::{Card, Hand, RANK_5};
use std::cmp::Ordering;

/// Hand rank categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    /// No pair.
    HighCard = 0,
    /// One pair.
    OnePair = 1,
    /// Two pair.
    TwoPair = 2,
    /// Trips.
    ThreeOfAKind = 3,
    /// Five consecutive ranks.
    Straight = 4,
    /// Five cards of one suit.
    Flush = 5,
    /// Trips plus a pair.
    FullHouse = 6,
    /// Quads.
    FourOfAKind = 7,
    /// Straight in one suit.
    StraightFlush = 8,
}

impl HandCategory {
    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

/// A hand rank that can be compared.
/// Higher values are better hands.
/// Format: category (4 bits) | kicker1 (4 bits) | kicker2 (4 bits) | ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandRank(u32);

impl HandRank {
    /// Create a new hand rank.
    fn new(category: HandCategory, kickers: &[u8]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, &k) in kickers.iter().take(5).enumerate() {
            value |= (k as u32) << (16 - i * 4);
        }
        Self(value)
    }

    /// Get the raw rank value for comparison.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Get the hand category.
    pub fn category(&self) -> HandCategory {
        match self.0 >> 20 {
            0 => HandCategory::HighCard,
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            _ => HandCategory::StraightFlush,
        }
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// Hand evaluator for poker hands.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandEvaluator;

impl HandEvaluator {
    /// Create a new hand evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a 5-card hand.
    pub fn evaluate_5(&self, cards: &[Card; 5]) -> HandRank {
        self.evaluate_cards(cards)
    }

    /// Evaluate a 7-card hand (best 5-card combination).
    pub fn evaluate_7(&self, cards: &[Card; 7]) -> HandRank {
        self.evaluate_cards(cards)
    }

    /// Evaluate hole cards against a complete board.
    #[inline]
    pub fn evaluate(&self, hand: &Hand, board: &[Card; 5]) -> HandRank {
        let [c1, c2] = hand.cards();
        self.evaluate_7(&[c1, c2, board[0], board[1], board[2], board[3], board[4]])
    }

    /// Compare two hands on a complete board.
    pub fn compare(&self, hand1: &Hand, hand2: &Hand, board: &[Card; 5]) -> Ordering {
        self.evaluate(hand1, board).cmp(&self.evaluate(hand2, board))
    }

    /// Best rank among 5 to 7 cards.
    pub fn evaluate_cards(&self, cards: &[Card]) -> HandRank {
        debug_assert!((5..=7).contains(&cards.len()), "need 5-7 cards, got {}", cards.len());

        let mut rank_counts = [0u8; 13];
        let mut suit_masks = [0u16; 4];
        let mut rank_bits = 0u16;

        for card in cards {
            rank_counts[card.rank() as usize] += 1;
            suit_masks[card.suit() as usize] |= 1 << card.rank();
            rank_bits |= 1 << card.rank();
        }

        if let Some(&flush) = suit_masks.iter().find(|m| m.count_ones() >= 5) {
            if let Some(high) = find_straight(flush) {
                return HandRank::new(HandCategory::StraightFlush, &[high]);
            }
            return HandRank::new(HandCategory::Flush, &top_ranks::<5>(flush));
        }

        // Ranks grouped by multiplicity, highest first.
        let mut quads = None;
        let mut trips = [0u8; 2];
        let mut num_trips = 0;
        let mut pairs = [0u8; 3];
        let mut num_pairs = 0;
        for rank in (0..13u8).rev() {
            match rank_counts[rank as usize] {
                4 => quads = Some(rank),
                3 if num_trips < 2 => {
                    trips[num_trips] = rank;
                    num_trips += 1;
                }
                2 if num_pairs < 3 => {
                    pairs[num_pairs] = rank;
                    num_pairs += 1;
                }
                _ => {}
            }
        }

        if let Some(quad) = quads {
            let kicker = top_ranks::<1>(rank_bits & !(1 << quad))[0];
            return HandRank::new(HandCategory::FourOfAKind, &[quad, kicker]);
        }

        if num_trips > 0 && (num_pairs > 0 || num_trips > 1) {
            let second = if num_trips > 1 { trips[1] } else { 0 };
            let pair = if num_pairs > 0 { pairs[0].max(second) } else { second };
            return HandRank::new(HandCategory::FullHouse, &[trips[0], pair]);
        }

        if let Some(high) = find_straight(rank_bits) {
            return HandRank::new(HandCategory::Straight, &[high]);
        }

        if num_trips > 0 {
            let [k1, k2] = top_ranks::<2>(rank_bits & !(1 << trips[0]));
            return HandRank::new(HandCategory::ThreeOfAKind, &[trips[0], k1, k2]);
        }

        if num_pairs >= 2 {
            let kicker = top_ranks::<1>(rank_bits & !(1 << pairs[0]) & !(1 << pairs[1]))[0];
            return HandRank::new(HandCategory::TwoPair, &[pairs[0], pairs[1], kicker]);
        }

        if num_pairs == 1 {
            let [k1, k2, k3] = top_ranks::<3>(rank_bits & !(1 << pairs[0]));
            return HandRank::new(HandCategory::OnePair, &[pairs[0], k1, k2, k3]);
        }

        HandRank::new(HandCategory::HighCard, &top_ranks::<5>(rank_bits))
    }
}

/// Highest `N` ranks present in a rank mask, descending. Missing slots stay 0.
#[inline]
fn top_ranks<const N: usize>(mask: u16) -> [u8; N] {
    let mut out = [0u8; N];
    let mut filled = 0;
    let mut rank = 13u8;
    while filled < N && rank > 0 {
        rank -= 1;
        if mask & (1 << rank) != 0 {
            out[filled] = rank;
            filled += 1;
        }
    }
    out
}

/// Find the highest straight in a rank bitmask.
/// Returns the rank of the straight's top card, or None if no straight.
#[inline]
fn find_straight(rank_bits: u16) -> Option<u8> {
    for high in (4..13u8).rev() {
        let mask = 0b11111u16 << (high - 4);
        if rank_bits & mask == mask {
            return Some(high);
        }
    }
    // Wheel: A-2-3-4-5 plays as a five-high straight.
    const WHEEL: u16 = 0b1_0000_0000_1111;
    if rank_bits & WHEEL == WHEEL {
        Some(RANK_5)
    } else {
        None
    }
}
