//! Player identity and stash accounting.

use crate::error::InvariantViolation;
use crate::hand::Hand;

/// A seated player: a name, a chip stash, and the hands of the current
/// round (more than one after a split).
#[derive(Debug)]
pub struct Player {
    name: String,
    stash: f64,
    /// Hands of the current round, in play order.
    pub hands: Vec<Hand>,
}

impl Player {
    /// Creates a player with a starting stash.
    #[must_use]
    pub fn new(name: impl Into<String>, stash: f64) -> Self {
        Self {
            name: name.into(),
            stash,
            hands: Vec::new(),
        }
    }

    /// Returns the player's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current stash.
    #[must_use]
    pub const fn stash(&self) -> f64 {
        self.stash
    }

    /// Adds winnings to the stash.
    pub(crate) const fn credit(&mut self, amount: f64) {
        self.stash += amount;
    }

    /// Removes `amount` from the stash.
    ///
    /// # Errors
    ///
    /// A debit that would take the stash negative is a logic bug upstream
    /// (amounts are validated before money moves) and surfaces as
    /// [`InvariantViolation::NegativeStash`].
    pub(crate) fn debit(&mut self, amount: f64) -> Result<(), InvariantViolation> {
        if amount > self.stash {
            return Err(InvariantViolation::NegativeStash {
                player: self.name.clone(),
                amount,
            });
        }
        self.stash -= amount;
        Ok(())
    }
}
