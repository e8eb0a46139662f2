//! Error taxonomy.
//!
//! Everything here is fatal: operations are deterministic and in-memory,
//! so there is no retry or partial-failure model. A
//! [`ConfigurationError`] means the run was set up wrong (bad options or a
//! misbehaving decision provider); an [`InvariantViolation`] means the
//! engine itself broke a rule and should never occur in correct operation.

use thiserror::Error;

/// Fatal setup errors: bad options or out-of-range decision provider
/// values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// The shoe was asked to deal with zero cards remaining.
    #[error("cannot deal from an empty shoe")]
    EmptyShoe,
    /// Cut card offset outside `1..len`.
    #[error("cut card offset {offset} is invalid for a shoe of {len} cards")]
    CutOffsetOutOfRange {
        /// The rejected offset from the bottom.
        offset: usize,
        /// Shoe size at the time of insertion.
        len: usize,
    },
    /// A bet decision outside the allowed range.
    #[error("bet {amount} for {player} is outside {min}..={max}")]
    BetOutOfRange {
        /// Player the provider was deciding for.
        player: String,
        /// The rejected amount.
        amount: f64,
        /// Minimum allowed bet.
        min: f64,
        /// Maximum allowed bet for this player.
        max: f64,
    },
    /// An insurance stake decision outside the allowed range.
    #[error("insurance stake {amount} for {player} is outside 0..={max}")]
    InsuranceOutOfRange {
        /// Player the provider was deciding for.
        player: String,
        /// The rejected stake.
        amount: f64,
        /// Maximum allowed stake for this player.
        max: f64,
    },
    /// A game was configured with an empty roster.
    #[error("a game needs at least one player")]
    NoPlayers,
    /// A starting stash that cannot cover the minimum bet.
    #[error("starting stash {stash} cannot cover the minimum bet {min_bet}")]
    StashBelowMinimum {
        /// The configured starting stash.
        stash: f64,
        /// The configured minimum bet.
        min_bet: f64,
    },
}

/// Fatal logic bugs. Correct operation never produces these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    /// A debit would have taken a stash negative.
    #[error("debit of {amount} would overdraw the stash of {player}")]
    NegativeStash {
        /// Player whose stash was charged.
        player: String,
        /// The offending debit amount.
        amount: f64,
    },
    /// A hand reached the end of a round still in `Playing` status.
    #[error("hand {hand_index} of {player} is still playing after payout")]
    UnsettledHand {
        /// Player owning the hand.
        player: String,
        /// Index of the hand within the player's hands.
        hand_index: usize,
    },
}

/// Umbrella error for a full round or session run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// See [`ConfigurationError`].
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// See [`InvariantViolation`].
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}
