//! Currency-gated character draws.
//!
//! # Responsibility
//! - Validate the rate table against the character catalog.
//! - Resolve one pull into a character and a new/duplicate outcome.
//!
//! # Invariants
//! - A failed pull never changes state.
//! - Every successful pull costs `PULL_COST`; duplicates refund
//!   `DUPLICATE_BONUS`.
//! - A newly obtained character becomes main when none is set.

use crate::model::character::{Character, Rarity, RarityRate, CHARACTER_CATALOG, RARITY_RATES};
use crate::model::state::AppState;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Currency spent per pull.
pub const PULL_COST: u64 = 100;
/// Currency refunded when a pull lands on an owned character.
pub const DUPLICATE_BONUS: u64 = 20;

/// Rate table and catalog mismatch detected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GachaConfigError {
    EmptyRateTable,
    ZeroTotalWeight,
    MissingRarity(Rarity),
}

impl Display for GachaConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRateTable => write!(f, "rarity rate table is empty"),
            Self::ZeroTotalWeight => write!(f, "rarity rate table has zero total weight"),
            Self::MissingRarity(rarity) => {
                write!(f, "rarity {rarity} has a positive rate but no catalog characters")
            }
        }
    }
}

impl Error for GachaConfigError {}

/// Pull rejected before any state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullError {
    InsufficientCurrency { currency: u64, cost: u64 },
    EmptyRarityPool(Rarity),
}

impl Display for PullError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientCurrency { .. } => {
                write!(f, "Not enough Gems. Complete more tasks!")
            }
            Self::EmptyRarityPool(_) => write!(f, "No characters found for that rarity."),
        }
    }
}

impl Error for PullError {}

/// Whether the drawn character was new to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    New,
    Duplicate,
}

/// Character drawn by one pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullResult {
    pub character: Character,
    pub outcome: PullOutcome,
}

impl PullResult {
    pub fn is_duplicate(&self) -> bool {
        self.outcome == PullOutcome::Duplicate
    }

    pub fn message(&self) -> String {
        match self.outcome {
            PullOutcome::New => format!("New character: {}!", self.character.name),
            PullOutcome::Duplicate => {
                format!("Duplicate! You received {DUPLICATE_BONUS} bonus Gems.")
            }
        }
    }
}

/// Draw machine over a validated catalog and rate table.
#[derive(Debug, Clone)]
pub struct Gacha {
    catalog: Vec<Character>,
    rates: Vec<RarityRate>,
    total_weight: u32,
}

impl Gacha {
    /// Builds a draw machine after checking that every reachable rarity has
    /// at least one character.
    ///
    /// # Errors
    /// - `EmptyRateTable` / `ZeroTotalWeight` for unusable tables.
    /// - `MissingRarity` when a positively weighted rarity has no characters.
    pub fn new(
        catalog: Vec<Character>,
        rates: Vec<RarityRate>,
    ) -> Result<Self, GachaConfigError> {
        if rates.is_empty() {
            return Err(GachaConfigError::EmptyRateTable);
        }
        let total_weight = rates
            .iter()
            .fold(0u32, |total, rate| total.saturating_add(rate.weight));
        if total_weight == 0 {
            return Err(GachaConfigError::ZeroTotalWeight);
        }
        for rate in rates.iter().filter(|rate| rate.weight > 0) {
            if !catalog.iter().any(|character| character.rarity == rate.rarity) {
                return Err(GachaConfigError::MissingRarity(rate.rarity));
            }
        }

        Ok(Self {
            catalog,
            rates,
            total_weight,
        })
    }

    /// Built-in catalog and 5/10/25/60 rate table.
    pub fn standard() -> Result<Self, GachaConfigError> {
        Self::new(CHARACTER_CATALOG.to_vec(), RARITY_RATES.to_vec())
    }

    pub fn catalog(&self) -> &[Character] {
        &self.catalog
    }

    pub fn rates(&self) -> &[RarityRate] {
        &self.rates
    }

    /// Spends `PULL_COST` on one draw and applies the outcome to `state`.
    ///
    /// # Errors
    /// - `InsufficientCurrency` when the player cannot pay.
    /// - `EmptyRarityPool` when the rolled rarity has no characters; the
    ///   cost is not charged.
    pub fn pull<R: Rng + ?Sized>(
        &self,
        state: &mut AppState,
        rng: &mut R,
    ) -> Result<PullResult, PullError> {
        if !state.player.can_afford(PULL_COST) {
            return Err(PullError::InsufficientCurrency {
                currency: state.player.currency,
                cost: PULL_COST,
            });
        }

        let roll = rng.gen_range(0.0..f64::from(self.total_weight));
        let rarity = resolve_rarity(&self.rates, roll);
        let character = self
            .pick_character(rarity, rng)
            .ok_or(PullError::EmptyRarityPool(rarity))?;

        state.player.currency -= PULL_COST;
        let outcome = if state.owns(character.id) {
            state.player.currency = state.player.currency.saturating_add(DUPLICATE_BONUS);
            PullOutcome::Duplicate
        } else {
            state.owned_characters.push(character.id.to_string());
            if state.main_character_id.is_none() {
                state.main_character_id = Some(character.id.to_string());
            }
            PullOutcome::New
        };

        Ok(PullResult { character, outcome })
    }

    fn pick_character<R: Rng + ?Sized>(&self, rarity: Rarity, rng: &mut R) -> Option<Character> {
        let candidates: Vec<&Character> = self
            .catalog
            .iter()
            .filter(|character| character.rarity == rarity)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..candidates.len());
        Some(*candidates[index])
    }
}

/// Maps a roll in `[0, total_weight)` to a rarity.
///
/// Scans `rates` in order with a running sum and picks the first entry whose
/// cumulative weight is `>= roll`, so an exact boundary goes to the earlier
/// entry. Zero-weight entries are never picked. Rolls past the total fall
/// back to the last weighted entry.
pub fn resolve_rarity(rates: &[RarityRate], roll: f64) -> Rarity {
    let mut cumulative = 0.0;
    for rate in rates.iter().filter(|rate| rate.weight > 0) {
        cumulative += f64::from(rate.weight);
        if roll <= cumulative {
            return rate.rarity;
        }
    }
    rates
        .iter()
        .rev()
        .find(|rate| rate.weight > 0)
        .map_or(Rarity::Common, |rate| rate.rarity)
}
