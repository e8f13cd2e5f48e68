//! Hand families used to bias puzzle variety.
//!
//! Every one of the 1326 starting hands belongs to exactly one family. The
//! partition is built by claiming hands in priority order: each hand goes to
//! the first family whose rule admits it, and `Random` admits everything left.
//!
//! Rules, in priority order:
//!
//! | Family | Admits |
//! |---|---|
//! | `all_ax` | an ace with any non-ace |
//! | `k4s_k6o` | a king with a 4+ suited or 6+ offsuit kicker |
//! | `q6s_q8o` | a queen with a 6+ suited or 8+ offsuit kicker |
//! | `j8s_j10o` | a jack with an 8+ suited or ten+ offsuit kicker |
//! | `connectors` | adjacent ranks, any suits (no ace-deuce wrap) |
//! | `suited_one_gappers` | same suit, ranks exactly two apart |
//! | `pocket_pairs` | two cards of one rank |
//! | `random` | everything else |

use crate::cards::{CardSet, Hand};
use crate::cards::card::{RANK_4, RANK_6, RANK_8, RANK_A, RANK_J, RANK_K, RANK_Q, RANK_T};
use crate::error::ConfigError;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of hand families.
pub const NUM_FAMILIES: usize = 8;

/// A named category of starting hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandFamily {
    /// Any ace with a non-ace.
    AllAx,
    /// K4s+ and K6o+.
    K4sK6o,
    /// Q6s+ and Q8o+.
    Q6sQ8o,
    /// J8s+ and JTo+.
    J8sJ10o,
    /// Adjacent ranks.
    Connectors,
    /// Suited, ranks two apart.
    SuitedOneGappers,
    /// Pairs.
    PocketPairs,
    /// Catch-all.
    Random,
}

impl HandFamily {
    /// All families in priority (and sampling) order.
    pub const ALL: [HandFamily; NUM_FAMILIES] = [
        HandFamily::AllAx,
        HandFamily::K4sK6o,
        HandFamily::Q6sQ8o,
        HandFamily::J8sJ10o,
        HandFamily::Connectors,
        HandFamily::SuitedOneGappers,
        HandFamily::PocketPairs,
        HandFamily::Random,
    ];

    /// Position in [`HandFamily::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Configuration key, e.g. `"pocket_pairs"`.
    pub fn name(self) -> &'static str {
        match self {
            HandFamily::AllAx => "all_ax",
            HandFamily::K4sK6o => "k4s_k6o",
            HandFamily::Q6sQ8o => "q6s_q8o",
            HandFamily::J8sJ10o => "j8s_j10o",
            HandFamily::Connectors => "connectors",
            HandFamily::SuitedOneGappers => "suited_one_gappers",
            HandFamily::PocketPairs => "pocket_pairs",
            HandFamily::Random => "random",
        }
    }

    /// Whether this family's own rule admits the hand, ignoring priority.
    pub fn admits(self, hand: &Hand) -> bool {
        match self {
            HandFamily::AllAx => hand.other_rank(RANK_A).is_some(),
            HandFamily::K4sK6o => broadway_kicker(hand, RANK_K, RANK_4, RANK_6),
            HandFamily::Q6sQ8o => broadway_kicker(hand, RANK_Q, RANK_6, RANK_8),
            HandFamily::J8sJ10o => broadway_kicker(hand, RANK_J, RANK_8, RANK_T),
            HandFamily::Connectors => hand.rank_gap() == 1,
            HandFamily::SuitedOneGappers => hand.is_suited() && hand.rank_gap() == 2,
            HandFamily::PocketPairs => hand.is_pair(),
            HandFamily::Random => true,
        }
    }
}

/// `top` paired with a different rank at least `suited_min` (suited) or `offsuit_min` (offsuit).
fn broadway_kicker(hand: &Hand, top: u8, suited_min: u8, offsuit_min: u8) -> bool {
    match hand.other_rank(top) {
        Some(kicker) if hand.is_suited() => kicker >= suited_min,
        Some(kicker) => kicker >= offsuit_min,
        None => false,
    }
}

impl fmt::Display for HandFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HandFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandFamily::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| format!("unknown hand family {:?}", s))
    }
}

/// Relative sampling weight per family.
///
/// Serialized as a `{family: weight}` map. Deserializing merges over the
/// defaults: missing families keep their default and unknown keys are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FamilyWeights([f64; NUM_FAMILIES]);

impl Default for FamilyWeights {
    fn default() -> Self {
        Self([15.0, 12.0, 12.0, 10.0, 15.0, 12.0, 18.0, 6.0])
    }
}

impl FamilyWeights {
    /// Weight of one family.
    #[inline]
    pub fn get(&self, family: HandFamily) -> f64 {
        self.0[family.index()]
    }

    /// Set one family's weight.
    pub fn set(&mut self, family: HandFamily, weight: f64) {
        self.0[family.index()] = weight;
    }

    /// Builder method: set one family's weight.
    pub fn with(mut self, family: HandFamily, weight: f64) -> Self {
        self.set(family, weight);
        self
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// `(family, weight)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (HandFamily, f64)> + '_ {
        HandFamily::ALL.iter().map(move |&f| (f, self.get(f)))
    }

    /// Apply overrides by family name. Unknown names are logged and skipped.
    pub fn merge<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        for (name, weight) in overrides {
            match name.parse::<HandFamily>() {
                Ok(family) => self.set(family, weight),
                Err(_) => log::warn!("ignoring weight for unknown hand family {:?}", name),
            }
        }
        self
    }

    /// Merge a JSON object such as `{"pocket_pairs":20,"connectors":15}`.
    pub fn merge_json(self, json: &str) -> Result<Self, serde_json::Error> {
        let overrides: FxHashMap<String, f64> = serde_json::from_str(json)?;
        Ok(self.merge(overrides.iter().map(|(k, &v)| (k.as_str(), v))))
    }

    /// Check that weights are usable for sampling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (family, weight) in self.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight { family: family.name(), weight });
            }
        }
        if self.total() <= 0.0 {
            return Err(ConfigError::ZeroWeights);
        }
        Ok(())
    }
}

impl Serialize for FamilyWeights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(NUM_FAMILIES))?;
        for (family, weight) in self.iter() {
            map.serialize_entry(family.name(), &weight)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FamilyWeights {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let overrides = FxHashMap::<String, f64>::deserialize(deserializer)?;
        Ok(FamilyWeights::default().merge(overrides.iter().map(|(k, &v)| (k.as_str(), v))))
    }
}

/// Draw a family by cumulative weight.
///
/// Draws `r` uniformly from `[0, total)` and walks the families in enumeration
/// order subtracting each weight; the first family where the remainder drops
/// to zero or below wins. Zero-weight families are never chosen.
pub fn sample_family<R: Rng + ?Sized>(weights: &FamilyWeights, rng: &mut R) -> HandFamily {
    let total = weights.total();
    let mut fallback = HandFamily::Random;
    if total <= 0.0 {
        return fallback;
    }
    let mut remainder = rng.gen::<f64>() * total;
    for (family, weight) in weights.iter() {
        if weight <= 0.0 {
            continue;
        }
        fallback = family;
        remainder -= weight;
        if remainder <= 0.0 {
            return family;
        }
    }
    // Float round-off can leave a sliver; give it to the last weighted family.
    fallback
}

/// The hand-to-family partition, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct FamilyTable {
    family_of: FxHashMap<Hand, HandFamily>,
    members: [Vec<Hand>; NUM_FAMILIES],
}

static TABLE: Lazy<FamilyTable> = Lazy::new(FamilyTable::build);

impl FamilyTable {
    /// The process-wide table.
    pub fn global() -> &'static FamilyTable {
        &TABLE
    }

    /// Classify all 1326 hands by first-match priority.
    pub fn build() -> Self {
        let mut family_of = FxHashMap::default();
        let mut members: [Vec<Hand>; NUM_FAMILIES] = Default::default();

        for hand in Hand::all() {
            let family = HandFamily::ALL
                .iter()
                .copied()
                .find(|f| f.admits(&hand))
                .unwrap_or(HandFamily::Random);
            family_of.insert(hand, family);
            members[family.index()].push(hand);
        }

        Self { family_of, members }
    }

    /// Family of a hand. Total over all hands.
    pub fn family_of(&self, hand: &Hand) -> HandFamily {
        self.family_of.get(hand).copied().unwrap_or(HandFamily::Random)
    }

    /// Every hand in the family.
    pub fn members(&self, family: HandFamily) -> &[Hand] {
        &self.members[family.index()]
    }

    /// Hands in the family with neither card in `excluded`.
    pub fn candidates(&self, family: HandFamily, excluded: CardSet) -> Vec<Hand> {
        self.members(family)
            .iter()
            .copied()
            .filter(|h| !excluded.blocks(h))
            .collect()
    }

    /// Uniformly pick an eligible hand; `None` when the family is used up.
    pub fn pick_hand<R: Rng + ?Sized>(&self, family: HandFamily, excluded: CardSet, rng: &mut R) -> Option<Hand> {
        self.candidates(family, excluded).choose(rng).copied()
    }
}
