//! Hand representation and valuation.

use serde::Serialize;

use crate::card::Card;

/// Hand status.
///
/// The round engine drives every transition; the hand itself only answers
/// valuation queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandStatus {
    /// Hand is live and still contesting the round.
    Playing,
    /// A natural 21 held by the house.
    Natural,
    /// Player natural against a non-natural house.
    NaturalWin,
    /// Player natural against a house natural.
    NaturalTie,
    /// Won the showdown comparison.
    RegularWin,
    /// Tied the showdown comparison.
    RegularTie,
    /// Busted or beaten.
    Loss,
}

/// An ordered sequence of cards backing one bet unit.
#[derive(Debug)]
pub struct Hand {
    cards: Vec<Card>,
    insured: bool,
    status: HandStatus,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            insured: false,
            status: HandStatus::Playing,
        }
    }

    /// Creates a new hand from a split, seeded with the moved card.
    #[must_use]
    pub fn from_split(card: Card) -> Self {
        Self {
            cards: vec![card],
            insured: false,
            status: HandStatus::Playing,
        }
    }

    /// Adds a card to the hand.
    pub fn push_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Sets the status.
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Returns whether the hand carries an insurance side bet.
    #[must_use]
    pub const fn is_insured(&self) -> bool {
        self.insured
    }

    /// Marks the hand as insured.
    pub const fn set_insured(&mut self, insured: bool) {
        self.insured = insured;
    }

    /// Sum of the current play values of all cards.
    #[must_use]
    pub fn total_value(&self) -> u8 {
        self.cards.iter().map(Card::play_value).sum()
    }

    /// Downgrades the first ace still valued at 11 to 1.
    ///
    /// At most one ace is switched per call; the switch is irreversible.
    /// Returns `false` when no eligible ace remains, in which case a total
    /// over 21 is a bust.
    pub fn try_downgrade_ace(&mut self) -> bool {
        for card in &mut self.cards {
            if card.is_ace() && card.play_value() == 11 {
                card.downgrade();
                return true;
            }
        }
        false
    }

    /// Returns whether the hand is soft (holds an ace still valued at 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.cards
            .iter()
            .any(|card| card.is_ace() && card.play_value() == 11)
    }

    /// Returns whether the hand is an initial two-card 21.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.total_value() == 21
    }

    /// Returns whether the two initial cards share a rank.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Removes and returns the second card (for splitting).
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            self.cards.pop()
        } else {
            None
        }
    }

    /// Turns every card in the hand face up.
    pub fn reveal_all(&mut self) {
        for card in &mut self.cards {
            card.visible = true;
        }
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}
