//! Structured per-round results.

use serde::Serialize;

use crate::hand::HandStatus;

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundEnding {
    /// The house held a natural; the round ended at natural settlement.
    HouseNatural,
    /// Every player held a natural; the round ended at natural settlement.
    AllNaturals,
    /// Every hand of every player busted; the house never played.
    AllBust,
    /// The house played out its hand and the showdown compared totals.
    Showdown,
}

/// Result of a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandResult {
    /// Final status of the hand.
    pub status: HandStatus,
    /// Final total value.
    pub total: u8,
    /// Amount credited back at settlement (stake included; 0 on a loss).
    pub payout: f64,
}

/// Result for a single player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRoundResult {
    /// Player name.
    pub name: String,
    /// The bet charged per hand this round (after any double-down).
    pub bet: f64,
    /// Insurance stake, 0 if none was taken.
    pub insurance: f64,
    /// Insurance payout, 0 unless the house held a natural.
    pub insurance_payout: f64,
    /// Per-hand results (more than one after a split).
    pub hands: Vec<HandResult>,
    /// Stash after settlement.
    pub stash: f64,
}

/// Result of one full round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundResult {
    /// How the round ended.
    pub ending: RoundEnding,
    /// The house's final total.
    pub house_total: u8,
    /// The house's final status (`Natural`, `Loss`, or `Playing` when it
    /// stood).
    pub house_status: HandStatus,
    /// Per-player results in roster order.
    pub players: Vec<PlayerRoundResult>,
}
