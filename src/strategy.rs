//! Decision providers.
//!
//! The engine queries a [`Strategy`] at fixed decision points and never
//! looks past the trait: bet sizing, hit/stand, split, double-down, and
//! insurance all come from here. Providers are synchronous pure functions
//! of the visible game state. Every returned amount is validated by the
//! engine; out-of-range values abort the run as configuration errors.

use std::collections::VecDeque;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::hand::Hand;
use crate::player::Player;

/// A hit-or-stand decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Take another card.
    Hit,
    /// Keep the current hand.
    Stand,
}

/// The decision points the round engine delegates.
pub trait Strategy {
    /// Bet for the coming round, required in `min..=max`.
    fn bet_amount(&mut self, player: &Player, min: f64, max: f64) -> f64;

    /// Hit or stand on the given hand.
    fn hit_or_stand(&mut self, player: &Player, hand: &Hand) -> Move;

    /// Whether to split the given pair.
    fn split_pair(&mut self, player: &Player, hand: &Hand) -> bool;

    /// Whether to double down on the given hand.
    fn double_down(&mut self, player: &Player, hand: &Hand) -> bool;

    /// Whether to take insurance against a house ace.
    fn take_insurance(&mut self, player: &Player) -> bool;

    /// Insurance stake, required in `0.0..=max`.
    fn insurance_amount(&mut self, player: &Player, max: f64) -> f64;
}

/// Coin-flip decisions and uniform bet sizing, rounded to half units.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: ChaCha8Rng,
}

impl RandomStrategy {
    /// Creates a random strategy with its own seeded RNG.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn half_units(&mut self, min: f64, max: f64) -> f64 {
        let raw = self.rng.random_range(min..=max);
        ((raw * 2.0).round() / 2.0).clamp(min, max)
    }
}

impl Strategy for RandomStrategy {
    fn bet_amount(&mut self, _player: &Player, min: f64, max: f64) -> f64 {
        self.half_units(min, max)
    }

    fn hit_or_stand(&mut self, _player: &Player, _hand: &Hand) -> Move {
        if self.rng.random_bool(0.5) {
            Move::Hit
        } else {
            Move::Stand
        }
    }

    fn split_pair(&mut self, _player: &Player, _hand: &Hand) -> bool {
        self.rng.random_bool(0.5)
    }

    fn double_down(&mut self, _player: &Player, _hand: &Hand) -> bool {
        self.rng.random_bool(0.5)
    }

    fn take_insurance(&mut self, _player: &Player) -> bool {
        self.rng.random_bool(0.5)
    }

    fn insurance_amount(&mut self, _player: &Player, max: f64) -> f64 {
        self.half_units(0.0, max)
    }
}

/// Predetermined decisions, consumed front to back.
///
/// Each decision point has its own queue. An exhausted queue falls back to
/// the most conservative answer: the minimum bet, `Stand`, and declining
/// every offer.
#[derive(Debug, Default)]
pub struct ScriptedStrategy {
    bets: VecDeque<f64>,
    moves: VecDeque<Move>,
    splits: VecDeque<bool>,
    doubles: VecDeque<bool>,
    insurances: VecDeque<bool>,
    insurance_amounts: VecDeque<f64>,
}

impl ScriptedStrategy {
    /// Creates an empty script (minimum bets, stand on everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues bet amounts.
    #[must_use]
    pub fn with_bets(mut self, bets: impl IntoIterator<Item = f64>) -> Self {
        self.bets.extend(bets);
        self
    }

    /// Queues hit/stand decisions.
    #[must_use]
    pub fn with_moves(mut self, moves: impl IntoIterator<Item = Move>) -> Self {
        self.moves.extend(moves);
        self
    }

    /// Queues split decisions.
    #[must_use]
    pub fn with_splits(mut self, splits: impl IntoIterator<Item = bool>) -> Self {
        self.splits.extend(splits);
        self
    }

    /// Queues double-down decisions.
    #[must_use]
    pub fn with_doubles(mut self, doubles: impl IntoIterator<Item = bool>) -> Self {
        self.doubles.extend(doubles);
        self
    }

    /// Queues insurance decisions.
    #[must_use]
    pub fn with_insurances(mut self, insurances: impl IntoIterator<Item = bool>) -> Self {
        self.insurances.extend(insurances);
        self
    }

    /// Queues insurance stakes.
    #[must_use]
    pub fn with_insurance_amounts(mut self, amounts: impl IntoIterator<Item = f64>) -> Self {
        self.insurance_amounts.extend(amounts);
        self
    }
}

impl Strategy for ScriptedStrategy {
    fn bet_amount(&mut self, _player: &Player, min: f64, _max: f64) -> f64 {
        self.bets.pop_front().unwrap_or(min)
    }

    fn hit_or_stand(&mut self, _player: &Player, _hand: &Hand) -> Move {
        self.moves.pop_front().unwrap_or(Move::Stand)
    }

    fn split_pair(&mut self, _player: &Player, _hand: &Hand) -> bool {
        self.splits.pop_front().unwrap_or(false)
    }

    fn double_down(&mut self, _player: &Player, _hand: &Hand) -> bool {
        self.doubles.pop_front().unwrap_or(false)
    }

    fn take_insurance(&mut self, _player: &Player) -> bool {
        self.insurances.pop_front().unwrap_or(false)
    }

    fn insurance_amount(&mut self, _player: &Player, _max: f64) -> f64 {
        self.insurance_amounts.pop_front().unwrap_or(0.0)
    }
}
