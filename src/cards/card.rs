//! Card representation for the puzzle engine.
//!
//! This module provides the fundamental card types used throughout the crate:
//! - `Card`: A single playing card with rank and suit
//! - `Hand`: A player's two hole cards in canonical order
//! - `CardSet`: A 52-bit set of cards for fast exclusion checks
//! - `Deck`: A deck of 52 cards with dead-card removal, shuffling and dealing

use rand::seq::SliceRandom;
use rand::Rng;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rank of a card (0-12: 2-A).
pub const RANK_2: u8 = 0;
/// Rank index of a three.
pub const RANK_3: u8 = 1;
/// Rank index of a four.
pub const RANK_4: u8 = 2;
/// Rank index of a five.
pub const RANK_5: u8 = 3;
/// Rank index of a six.
pub const RANK_6: u8 = 4;
/// Rank index of a seven.
pub const RANK_7: u8 = 5;
/// Rank index of an eight.
pub const RANK_8: u8 = 6;
/// Rank index of a nine.
pub const RANK_9: u8 = 7;
/// Rank index of a ten.
pub const RANK_T: u8 = 8;
/// Rank index of a jack.
pub const RANK_J: u8 = 9;
/// Rank index of a queen.
pub const RANK_Q: u8 = 10;
/// Rank index of a king.
pub const RANK_K: u8 = 11;
/// Rank index of an ace.
pub const RANK_A: u8 = 12;

/// Suit of a card (0-3). Higher suit ids win canonical ordering ties,
/// giving the tiebreak order spades, hearts, diamonds, clubs.
pub const SUIT_CLUBS: u8 = 0;
/// Suit index of diamonds.
pub const SUIT_DIAMONDS: u8 = 1;
/// Suit index of hearts.
pub const SUIT_HEARTS: u8 = 2;
/// Suit index of spades.
pub const SUIT_SPADES: u8 = 3;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Rank characters for display.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters for display.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// Errors produced while parsing card and hand codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
    /// Input was not a two-character card code.
    #[error("card code must be two characters, got {0:?}")]
    Length(String),
    /// Unknown rank character.
    #[error("invalid rank character {0:?}")]
    Rank(char),
    /// Unknown suit character.
    #[error("invalid suit character {0:?}")]
    Suit(char),
    /// Both cards of a hand are the same card.
    #[error("hand repeats card {0}")]
    DuplicateCard(Card),
    /// Input was not a four-character hand code.
    #[error("hand code must be four characters, got {0:?}")]
    HandLength(String),
}

/// A single playing card.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    /// Card index 0-51: rank * 4 + suit
    id: u8,
}

impl Card {
    /// Create a new card from rank (0-12) and suit (0-3).
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < 13, "rank must be 0-12");
        debug_assert!(suit < 4, "suit must be 0-3");
        Self { id: rank * 4 + suit }
    }

    /// Create a card from its ID (0-51).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < 52, "card id must be 0-51");
        Self { id }
    }

    /// Get the card's ID (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Get the card's rank (0-12: 2-A).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id / 4
    }

    /// Get the card's suit (0-3).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.id % 4
    }

    /// Single-bit mask of this card.
    #[inline]
    pub fn mask(&self) -> u64 {
        1u64 << self.id
    }

    /// Get rank character for display.
    pub fn rank_char(&self) -> char {
        RANK_CHARS[self.rank() as usize]
    }

    /// Get suit character for display.
    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }

    /// All 52 cards in id order.
    pub fn all() -> impl Iterator<Item = Card> {
        (0..DECK_SIZE as u8).map(Card::from_id)
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Parse a card from a code like "As", "Kh", "2c".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != 2 {
            return Err(CardParseError::Length(s.to_string()));
        }

        let rank = RANK_CHARS
            .iter()
            .position(|&c| c == chars[0].to_ascii_uppercase())
            .ok_or(CardParseError::Rank(chars[0]))?;
        let suit = SUIT_CHARS
            .iter()
            .position(|&c| c == chars[1].to_ascii_lowercase())
            .ok_or(CardParseError::Suit(chars[1]))?;

        Ok(Self::new(rank as u8, suit as u8))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(de::Error::custom)
    }
}

/// A player's two hole cards.
///
/// The pair is stored canonically: higher rank first, and for equal ranks the
/// suit that sorts first in spades, hearts, diamonds, clubs order. A hand and
/// its reverse therefore compare and hash equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hand {
    high: Card,
    low: Card,
}

impl Hand {
    /// Create a hand from two distinct cards, in either order.
    pub fn new(card1: Card, card2: Card) -> Self {
        debug_assert!(card1 != card2, "hand cards must be distinct");
        if card1.id() > card2.id() {
            Self { high: card1, low: card2 }
        } else {
            Self { high: card2, low: card1 }
        }
    }

    /// Create a hand, rejecting a repeated card.
    pub fn try_new(card1: Card, card2: Card) -> Result<Self, CardParseError> {
        if card1 == card2 {
            return Err(CardParseError::DuplicateCard(card1));
        }
        Ok(Self::new(card1, card2))
    }

    /// The canonically-first card.
    #[inline]
    pub fn high(&self) -> Card {
        self.high
    }

    /// The canonically-second card.
    #[inline]
    pub fn low(&self) -> Card {
        self.low
    }

    /// Get both cards as an array.
    #[inline]
    pub fn cards(&self) -> [Card; 2] {
        [self.high, self.low]
    }

    /// Check if hole cards are suited.
    pub fn is_suited(&self) -> bool {
        self.high.suit() == self.low.suit()
    }

    /// Check if hole cards are a pair.
    pub fn is_pair(&self) -> bool {
        self.high.rank() == self.low.rank()
    }

    /// Absolute rank distance between the two cards.
    pub fn rank_gap(&self) -> u8 {
        self.high.rank() - self.low.rank()
    }

    /// Check if either card has the given rank.
    pub fn has_rank(&self, rank: u8) -> bool {
        self.high.rank() == rank || self.low.rank() == rank
    }

    /// Rank of the card that is not `rank`, if exactly one card has `rank`.
    pub fn other_rank(&self, rank: u8) -> Option<u8> {
        match (self.high.rank() == rank, self.low.rank() == rank) {
            (true, false) => Some(self.low.rank()),
            (false, true) => Some(self.high.rank()),
            _ => None,
        }
    }

    /// Check if a card conflicts with these hole cards.
    pub fn contains(&self, card: Card) -> bool {
        self.high == card || self.low == card
    }

    /// Two-bit mask of the hand's cards.
    #[inline]
    pub fn mask(&self) -> u64 {
        self.high.mask() | self.low.mask()
    }

    /// Every one of the C(52,2) = 1326 distinct hands.
    pub fn all() -> impl Iterator<Item = Hand> {
        (1..DECK_SIZE as u8).flat_map(|hi| (0..hi).map(move |lo| Hand::new(Card::from_id(hi), Card::from_id(lo))))
    }
}

impl FromStr for Hand {
    type Err = CardParseError;

    /// Parse hole cards from a code like "AhKs" or "Ah Ks".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.chars().count() != 4 || !compact.is_ascii() {
            return Err(CardParseError::HandLength(s.to_string()));
        }
        let c1: Card = compact[0..2].parse()?;
        let c2: Card = compact[2..4].parse()?;
        Self::try_new(c1, c2)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Serialized as a two-element array of card codes, e.g. `["As", "Kh"]`.
impl Serialize for Hand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cards().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Hand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [c1, c2] = <[Card; 2]>::deserialize(deserializer)?;
        Hand::try_new(c1, c2).map_err(de::Error::custom)
    }
}

/// A set of cards backed by a 52-bit mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CardSet(u64);

impl CardSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build a set from cards.
    pub fn from_cards<I: IntoIterator<Item = Card>>(cards: I) -> Self {
        let mut set = Self::empty();
        for card in cards {
            set.insert(card);
        }
        set
    }

    /// Build a set from the cards of several hands.
    pub fn from_hands<'a, I: IntoIterator<Item = &'a Hand>>(hands: I) -> Self {
        Self(hands.into_iter().fold(0, |acc, h| acc | h.mask()))
    }

    /// Add a card. Returns false if it was already present.
    pub fn insert(&mut self, card: Card) -> bool {
        let fresh = self.0 & card.mask() == 0;
        self.0 |= card.mask();
        fresh
    }

    /// Add both cards of a hand.
    pub fn insert_hand(&mut self, hand: &Hand) {
        self.0 |= hand.mask();
    }

    /// Check membership.
    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.0 & card.mask() != 0
    }

    /// Check whether any card of the hand is in the set.
    #[inline]
    pub fn blocks(&self, hand: &Hand) -> bool {
        self.0 & hand.mask() != 0
    }

    /// Number of cards in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Remove every card.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Iterate cards in id order.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        Card::all().filter(move |c| self.contains(*c))
    }
}

impl fmt::Debug for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// The full deck in id order, minus the excluded cards.
pub fn deck_without(excluded: CardSet) -> Vec<Card> {
    Card::all().filter(|c| !excluded.contains(*c)).collect()
}

/// Uniformly permute a card sequence in place (Fisher–Yates).
pub fn shuffle_cards<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    cards.shuffle(rng);
}

/// A deck of 52 playing cards.
#[derive(Clone)]
pub struct Deck {
    /// All 52 cards in current order.
    cards: [Card; DECK_SIZE],
    /// Index of next card to deal.
    index: usize,
    /// Number of usable cards in the deck (52 minus dead cards).
    size: usize,
}

impl Deck {
    /// Create a new deck in standard order.
    pub fn new() -> Self {
        Self::without(CardSet::empty())
    }

    /// Create a deck with specific cards removed.
    pub fn without(dead: CardSet) -> Self {
        let mut cards = [Card::from_id(0); DECK_SIZE];
        let mut size = 0;
        for card in Card::all().filter(|c| !dead.contains(*c)) {
            cards[size] = card;
            size += 1;
        }
        Self { cards, index: 0, size }
    }

    /// Shuffle the remaining cards in the deck.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        shuffle_cards(&mut self.cards[self.index..self.size], rng);
    }

    /// Deal the next card from the deck.
    pub fn deal(&mut self) -> Option<Card> {
        if self.index >= self.size {
            return None;
        }
        let card = self.cards[self.index];
        self.index += 1;
        Some(card)
    }

    /// Deal exactly `N` cards, or `None` if the deck runs short.
    pub fn deal_array<const N: usize>(&mut self) -> Option<[Card; N]> {
        if self.remaining() < N {
            return None;
        }
        let mut out = [Card::from_id(0); N];
        for slot in out.iter_mut() {
            *slot = self.cards[self.index];
            self.index += 1;
        }
        Some(out)
    }

    /// Get the number of remaining cards.
    pub fn remaining(&self) -> usize {
        self.size - self.index
    }

    /// Put every dealt card back, keeping the current order.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Get remaining cards as a slice.
    pub fn remaining_cards(&self) -> &[Card] {
        &self.cards[self.index..self.size]
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.remaining())
    }
}
