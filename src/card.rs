//! Card types.

use core::fmt;

use serde::Serialize;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Clubs.
    Clubs,
    /// Diamonds.
    Diamonds,
    /// Spades.
    Spades,
}

impl Suit {
    /// All four suits, in fill order.
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Clubs, Self::Diamonds, Self::Spades];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Hearts => "H",
            Self::Clubs => "C",
            Self::Diamonds => "D",
            Self::Spades => "S",
        };
        write!(f, "{repr}")
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rank {
    /// Ace (plays as 11 until downgraded to 1).
    Ace,
    /// Two.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl Rank {
    /// All thirteen ranks, in fill order.
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// The natural play value of the rank: 11 for an ace, 10 for face
    /// cards, the pip value otherwise.
    #[must_use]
    pub const fn base_value(self) -> u8 {
        match self {
            Self::Ace => 11,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten | Self::Jack | Self::Queen | Self::King => 10,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        };
        write!(f, "{repr}")
    }
}

/// A playing card.
///
/// A card is owned by exactly one container at a time (the shoe, then the
/// hand it was dealt to); dealing moves the card rather than copying it.
/// The play value is fixed at construction except for the one-shot ace
/// downgrade (11 to 1) applied during hand evaluation.
#[derive(Debug, PartialEq, Eq)]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card.
    pub rank: Rank,
    /// Whether the card is face up.
    pub visible: bool,
    /// Current play value; diverges from the rank's base value only after
    /// an ace downgrade.
    play_value: u8,
}

impl Card {
    /// Creates a new face-down card with its natural play value.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            visible: false,
            play_value: rank.base_value(),
        }
    }

    /// Returns the current play value.
    #[must_use]
    pub const fn play_value(&self) -> u8 {
        self.play_value
    }

    /// Returns whether this is an ace.
    #[must_use]
    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }

    /// Returns whether the play value has been downgraded from the rank's
    /// natural value.
    #[must_use]
    pub const fn is_downgraded(&self) -> bool {
        self.play_value != self.rank.base_value()
    }

    /// Switches an ace from 11 to 1. One-shot and irreversible.
    pub(crate) const fn downgrade(&mut self) {
        self.play_value = 1;
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
