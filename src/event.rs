//! Game event records and sinks.
//!
//! The engine narrates each round as a stream of structured [`GameEvent`]
//! records. How they are persisted or formatted is the sink's business;
//! the engine only calls [`EventSink::record`].

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::card::{Rank, Suit};
use crate::hand::HandStatus;
use crate::result::RoundEnding;

/// A discrete game event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// A fresh shoe was filled, shuffled, cut, and seated with a cut card.
    ShoeRefreshed {
        /// Decks in the new shoe.
        decks: u8,
        /// Real cards in the new shoe.
        cards: usize,
    },
    /// A player's bet was charged and recorded.
    BetPlaced {
        /// Betting player.
        player: String,
        /// Bet amount.
        amount: f64,
    },
    /// A player's insurance stake was charged and recorded.
    InsurancePlaced {
        /// Insured player.
        player: String,
        /// Insurance stake.
        stake: f64,
    },
    /// An insurance side bet paid out against a house natural.
    InsurancePaid {
        /// Insured player.
        player: String,
        /// Amount credited (twice the stake).
        payout: f64,
    },
    /// A card left the shoe.
    CardDealt {
        /// Who received the card (a player name or `house`).
        recipient: String,
        /// Rank of the dealt card.
        rank: Rank,
        /// Suit of the dealt card.
        suit: Suit,
        /// Whether the card was dealt face up.
        face_up: bool,
    },
    /// The house turned its hole card face up.
    HandRevealed {
        /// Whose hand was revealed.
        recipient: String,
        /// Total after the reveal.
        total: u8,
    },
    /// A hand busted with no downgradable ace left.
    HandBusted {
        /// Owner of the hand (a player name or `house`).
        player: String,
        /// Index of the hand within the owner's hands.
        hand_index: usize,
        /// The busted total.
        total: u8,
    },
    /// A hand was settled and any payout credited.
    HandSettled {
        /// Owner of the hand.
        player: String,
        /// Index of the hand within the owner's hands.
        hand_index: usize,
        /// Final status.
        status: HandStatus,
        /// Amount credited (stake included; 0 on a loss).
        payout: f64,
    },
    /// A player dropped below the minimum bet and left the roster.
    PlayerExcluded {
        /// Excluded player.
        player: String,
        /// Stash at exclusion time.
        stash: f64,
    },
    /// A round finished.
    RoundEnded {
        /// How the round ended.
        ending: RoundEnding,
    },
}

/// Receives the engine's event stream.
pub trait EventSink {
    /// Records one event.
    fn record(&mut self, event: GameEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: GameEvent) {}
}

/// Forwards events to the [`log`] facade.
///
/// Card-level noise goes to `debug`; round-level outcomes go to `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn record(&mut self, event: GameEvent) {
        match &event {
            GameEvent::CardDealt { .. } | GameEvent::HandRevealed { .. } => {
                log::debug!("{event:?}");
            }
            _ => log::info!("{event:?}"),
        }
    }
}

/// Buffers events in memory behind a shared handle.
///
/// Clones share one buffer, so a test can keep a handle while the engine
/// owns the sink.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Drops all recorded events.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventSink for MemorySink {
    fn record(&mut self, event: GameEvent) {
        self.events.borrow_mut().push(event);
    }
}
