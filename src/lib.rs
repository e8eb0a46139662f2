//! A multi-player blackjack round simulation engine.
//!
//! The crate provides a [`Game`] round engine that drives the full round
//! flow, including betting, dealing, naturals and insurance, player turns,
//! the house turn, and payout, against pluggable [`Strategy`] decision
//! providers, emitting structured [`GameEvent`] telemetry along the way.
//!
//! # Example
//!
//! ```
//! use pontoon::{Game, GameOptions, NullSink, RandomStrategy};
//!
//! let options = GameOptions::default();
//! let strategy = Box::new(RandomStrategy::new(7));
//! let mut game = Game::new(options, strategy, Box::new(NullSink), 42).unwrap();
//!
//! let result = game.play_round().unwrap();
//! assert!(!result.players.is_empty());
//! ```

pub mod card;
pub mod error;
pub mod event;
pub mod game;
pub mod hand;
pub mod options;
pub mod player;
pub mod result;
pub mod shoe;
pub mod strategy;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use error::{ConfigurationError, GameError, InvariantViolation};
pub use event::{EventSink, GameEvent, LogSink, MemorySink, NullSink};
pub use game::Game;
pub use hand::{Hand, HandStatus};
pub use options::GameOptions;
pub use player::Player;
pub use result::{HandResult, PlayerRoundResult, RoundEnding, RoundResult};
pub use shoe::Shoe;
pub use strategy::{Move, RandomStrategy, ScriptedStrategy, Strategy};
