//! Cards, hands and hand evaluation.
//!
//! ## Modules
//!
//! - `card`: Card, hand, card set and deck representations
//! - `hand_eval`: Best-of-seven Texas Hold'em hand ranking

pub mod card;
pub mod hand_eval;

pub use card::{deck_without, shuffle_cards, Card, CardParseError, CardSet, Deck, Hand};
pub use hand_eval::{HandCategory, HandEvaluator, HandRank};
