//! Game configuration options.

use core::ops::{Range, RangeInclusive};

/// Configuration for a simulation run.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use pontoon::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(8)
///     .with_players(6)
///     .with_starting_stash(500.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameOptions {
    /// Number of decks per shoe.
    pub decks: u8,
    /// Number of seated players at the start of the run.
    pub players: usize,
    /// Starting stash per player.
    pub starting_stash: f64,
    /// Minimum bet. Players whose stash drops below this are excluded.
    pub min_bet: f64,
    /// Maximum bet.
    pub max_bet: f64,
    /// Range the cut card offset (cards from the bottom) is drawn from.
    pub cut_card_offsets: Range<usize>,
    /// Initial hand totals eligible for a double-down offer.
    pub double_down_totals: RangeInclusive<u8>,
    /// The house draws while below this total.
    pub house_stand_threshold: u8,
    /// Bonus ratio for a natural: the payout is `bet * (1 + bonus)`.
    pub natural_bonus: f64,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 6,
            players: 4,
            starting_stash: 1000.0,
            min_bet: 2.0,
            max_bet: 500.0,
            cut_card_offsets: 60..76,
            double_down_totals: 9..=11,
            house_stand_threshold: 17,
            natural_bonus: 1.5,
        }
    }
}

impl GameOptions {
    /// Sets the number of decks per shoe.
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the number of seated players.
    #[must_use]
    pub const fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    /// Sets the starting stash per player.
    #[must_use]
    pub const fn with_starting_stash(mut self, stash: f64) -> Self {
        self.starting_stash = stash;
        self
    }

    /// Sets the minimum bet.
    #[must_use]
    pub const fn with_min_bet(mut self, min_bet: f64) -> Self {
        self.min_bet = min_bet;
        self
    }

    /// Sets the maximum bet.
    #[must_use]
    pub const fn with_max_bet(mut self, max_bet: f64) -> Self {
        self.max_bet = max_bet;
        self
    }

    /// Sets the range the cut card offset is drawn from.
    #[must_use]
    pub fn with_cut_card_offsets(mut self, offsets: Range<usize>) -> Self {
        self.cut_card_offsets = offsets;
        self
    }

    /// Sets the hand totals eligible for a double-down offer.
    #[must_use]
    pub fn with_double_down_totals(mut self, totals: RangeInclusive<u8>) -> Self {
        self.double_down_totals = totals;
        self
    }

    /// Sets the total the house stands at.
    #[must_use]
    pub const fn with_house_stand_threshold(mut self, threshold: u8) -> Self {
        self.house_stand_threshold = threshold;
        self
    }

    /// Sets the natural bonus ratio.
    #[must_use]
    pub const fn with_natural_bonus(mut self, bonus: f64) -> Self {
        self.natural_bonus = bonus;
        self
    }
}
