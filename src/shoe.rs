//! The dealing shoe.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::ConfigurationError;

/// One slot in the shoe: a real card, or the blank cut marker.
///
/// Keeping the cut marker out of [`Card`] means a blank can never reach a
/// hand or be scored.
#[derive(Debug)]
enum ShoeEntry {
    Card(Card),
    Cut,
}

/// An ordered sequence of cards dealt from the back, with a blank cut card
/// seated near the bottom.
///
/// Drawing the cut card sets the exhaustion flag and transparently deals
/// the next real card; the shoe must then be replaced once the current
/// round finishes. Every real card dealt is permanently removed.
#[derive(Debug)]
pub struct Shoe {
    entries: Vec<ShoeEntry>,
    exhausted: bool,
}

impl Shoe {
    /// Creates a filled shoe of `decks` decks in deterministic suit/rank
    /// order, without a cut card.
    #[must_use]
    pub fn new(decks: u8) -> Self {
        let mut entries = Vec::with_capacity(decks as usize * DECK_SIZE);

        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    entries.push(ShoeEntry::Card(Card::new(suit, rank)));
                }
            }
        }

        Self {
            entries,
            exhausted: false,
        }
    }

    /// Creates a shoe holding exactly `cards`, in order. The last card is
    /// dealt first. Intended for deterministic setups.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            entries: cards.into_iter().map(ShoeEntry::Card).collect(),
            exhausted: false,
        }
    }

    /// Uniformly shuffles the shoe.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.entries.shuffle(rng);
    }

    /// Cuts the shoe: rotates the first `floor(fraction * (len - 1))`
    /// entries to the back. `fraction` is expected in `[0, 1)`.
    pub fn cut(&mut self, fraction: f64) {
        if self.entries.len() < 2 {
            return;
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for shoe sizes"
        )]
        let cut_index = (fraction.clamp(0.0, 1.0) * (self.entries.len() - 1) as f64).floor() as usize;
        self.entries.rotate_left(cut_index);
    }

    /// Inserts the blank cut card `offset_from_bottom` entries from the
    /// bottom of the shoe.
    ///
    /// # Errors
    ///
    /// Returns an error unless `1 <= offset_from_bottom < len`.
    pub fn insert_cut_card(&mut self, offset_from_bottom: usize) -> Result<(), ConfigurationError> {
        let len = self.entries.len();
        if offset_from_bottom == 0 || offset_from_bottom >= len {
            return Err(ConfigurationError::CutOffsetOutOfRange {
                offset: offset_from_bottom,
                len,
            });
        }

        self.entries.insert(len - offset_from_bottom, ShoeEntry::Cut);
        Ok(())
    }

    /// Removes and returns the last card, marking its visibility.
    ///
    /// Drawing the blank cut card sets the exhaustion flag and the next
    /// real card is dealt in its place; the blank itself is never returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptyShoe`] when no cards remain. Deck
    /// sizing keeps this out of normal play.
    pub fn deal(&mut self, face_up: bool) -> Result<Card, ConfigurationError> {
        loop {
            match self.entries.pop() {
                Some(ShoeEntry::Card(mut card)) => {
                    card.visible = face_up;
                    return Ok(card);
                }
                Some(ShoeEntry::Cut) => self.exhausted = true,
                None => return Err(ConfigurationError::EmptyShoe),
            }
        }
    }

    /// Returns whether the cut card has been drawn.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Returns the number of real cards remaining.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, ShoeEntry::Card(_)))
            .count()
    }
}
