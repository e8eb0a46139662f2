//! The round engine.
//!
//! [`Game`] owns the shoe, the roster, and the house hand, and drives one
//! full round at a time through its fixed phases: bet, deal, naturals and
//! insurance, player turns, house turn, payout, cleanup. Decisions come
//! from a [`Strategy`]; telemetry goes to an [`EventSink`]. Everything is
//! single-threaded and strictly sequential.

use std::collections::HashMap;

use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::error::{ConfigurationError, GameError, InvariantViolation};
use crate::event::{EventSink, GameEvent};
use crate::hand::{Hand, HandStatus};
use crate::options::GameOptions;
use crate::player::Player;
use crate::result::{HandResult, PlayerRoundResult, RoundEnding, RoundResult};
use crate::shoe::Shoe;
use crate::strategy::Strategy;

mod bet;
mod house;
mod naturals;
mod play;

/// Recipient name used for the house in events.
const HOUSE: &str = "house";

/// Per-round transient bookkeeping: bets and insurance stakes keyed by
/// player name. Built fresh for each round and dropped at cleanup, so it
/// is cleared by construction rather than by reset calls.
#[derive(Debug, Default)]
pub(crate) struct RoundLedger {
    bets: HashMap<String, f64>,
    insurance: HashMap<String, f64>,
}

impl RoundLedger {
    fn record_bet(&mut self, player: &str, amount: f64) {
        self.bets.insert(player.to_string(), amount);
    }

    fn double_bet(&mut self, player: &str) {
        if let Some(bet) = self.bets.get_mut(player) {
            *bet *= 2.0;
        }
    }

    fn bet(&self, player: &str) -> f64 {
        self.bets.get(player).copied().unwrap_or(0.0)
    }

    fn record_insurance(&mut self, player: &str, stake: f64) {
        self.insurance.insert(player.to_string(), stake);
    }

    fn insurance_stake(&self, player: &str) -> f64 {
        self.insurance.get(player).copied().unwrap_or(0.0)
    }
}

/// A blackjack round engine for repeated simulation rounds.
///
/// The engine holds no state across rounds except player stashes and the
/// shoe's depletion; per-round bookkeeping lives in a transient ledger.
pub struct Game {
    options: GameOptions,
    players: Vec<Player>,
    house: Hand,
    shoe: Shoe,
    rng: ChaCha8Rng,
    strategy: Box<dyn Strategy>,
    sink: Box<dyn EventSink>,
}

impl Game {
    /// Creates a game with a seeded RNG and a freshly prepared shoe.
    ///
    /// Players are seated as `player1..playerN` with the configured
    /// starting stash.
    ///
    /// # Errors
    ///
    /// Returns an error when the options seat no players, the starting
    /// stash cannot cover the minimum bet, or the cut card offset range
    /// does not fit the shoe.
    pub fn new(
        options: GameOptions,
        strategy: Box<dyn Strategy>,
        sink: Box<dyn EventSink>,
        seed: u64,
    ) -> Result<Self, GameError> {
        if options.players == 0 {
            return Err(ConfigurationError::NoPlayers.into());
        }
        if options.starting_stash < options.min_bet {
            return Err(ConfigurationError::StashBelowMinimum {
                stash: options.starting_stash,
                min_bet: options.min_bet,
            }
            .into());
        }

        let players = (1..=options.players)
            .map(|i| Player::new(format!("player{i}"), options.starting_stash))
            .collect();

        let mut game = Self {
            players,
            house: Hand::new(),
            shoe: Shoe::new(options.decks),
            rng: ChaCha8Rng::seed_from_u64(seed),
            options,
            strategy,
            sink,
        };
        game.refresh_shoe()?;

        Ok(game)
    }

    /// Replaces the shoe with a fresh one: filled, shuffled, cut by a
    /// random fraction, and seated with a cut card at a random offset from
    /// the configured range.
    ///
    /// # Errors
    ///
    /// Returns an error when the drawn cut card offset does not fit the
    /// shoe.
    pub fn refresh_shoe(&mut self) -> Result<(), GameError> {
        let mut shoe = Shoe::new(self.options.decks);
        shoe.shuffle(&mut self.rng);
        shoe.cut(self.rng.random::<f64>());
        let offset = self.rng.random_range(self.options.cut_card_offsets.clone());
        shoe.insert_cut_card(offset)?;

        debug!(
            "fresh shoe: {} cards, cut card {offset} from the bottom",
            shoe.remaining()
        );
        self.sink.record(GameEvent::ShoeRefreshed {
            decks: self.options.decks,
            cards: shoe.remaining(),
        });
        self.shoe = shoe;

        Ok(())
    }

    /// Plays one full round across all active players and the house.
    ///
    /// # Errors
    ///
    /// Propagates configuration errors (empty shoe, out-of-range decision
    /// provider values) and invariant violations; both abort the run.
    pub fn play_round(&mut self) -> Result<RoundResult, GameError> {
        if self.players.is_empty() {
            return Err(ConfigurationError::NoPlayers.into());
        }

        let mut ledger = RoundLedger::default();

        self.place_bets(&mut ledger)?;
        self.deal_initial()?;

        let house_natural = self.check_natural_house(&mut ledger)?;
        let all_natural = self.check_natural_players(house_natural);
        self.settle_naturals(&ledger, house_natural);

        let ending = if house_natural {
            RoundEnding::HouseNatural
        } else if all_natural {
            RoundEnding::AllNaturals
        } else if self.player_turns(&mut ledger)? {
            RoundEnding::AllBust
        } else {
            self.house_turn()?;
            self.settle_showdown(&ledger);
            RoundEnding::Showdown
        };

        let result = self.collect_results(&ledger, ending);
        self.cleanup()?;
        self.sink.record(GameEvent::RoundEnded { ending });

        Ok(result)
    }

    /// Plays rounds until the shoe exhausts or the roster empties.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::play_round`].
    pub fn play_shoe_session(&mut self) -> Result<Vec<RoundResult>, GameError> {
        let mut results = Vec::new();
        while !self.shoe.is_exhausted() && !self.players.is_empty() {
            results.push(self.play_round()?);
        }
        Ok(results)
    }

    /// Runs shoe sessions, refreshing the shoe between them, until every
    /// player has gone bankrupt. Returns the number of rounds played.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::play_round`] or
    /// [`Self::refresh_shoe`].
    pub fn run(&mut self) -> Result<usize, GameError> {
        let mut rounds = 0;
        while !self.players.is_empty() {
            if self.shoe.is_exhausted() {
                self.refresh_shoe()?;
            }
            rounds += self.play_shoe_session()?.len();
        }
        Ok(rounds)
    }

    /// Returns the options the game was built with.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the active roster.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the shoe.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Replaces the shoe. Intended for deterministic setups; normal play
    /// refreshes the shoe itself.
    pub fn set_shoe(&mut self, shoe: Shoe) {
        self.shoe = shoe;
    }

    /// Deals one card and records the event.
    pub(super) fn deal_card(&mut self, recipient: &str, face_up: bool) -> Result<Card, GameError> {
        let card = self.shoe.deal(face_up)?;
        self.sink.record(GameEvent::CardDealt {
            recipient: recipient.to_string(),
            rank: card.rank,
            suit: card.suit,
            face_up,
        });
        Ok(card)
    }

    /// Settlement multiplier for a final hand status.
    fn payout_multiplier(&self, status: HandStatus) -> f64 {
        match status {
            HandStatus::NaturalWin => 1.0 + self.options.natural_bonus,
            HandStatus::RegularWin => 2.0,
            HandStatus::NaturalTie | HandStatus::RegularTie => 1.0,
            HandStatus::Playing | HandStatus::Natural | HandStatus::Loss => 0.0,
        }
    }

    /// Snapshots the round into a structured result, before cleanup wipes
    /// the hands.
    fn collect_results(&self, ledger: &RoundLedger, ending: RoundEnding) -> RoundResult {
        let house_natural = self.house.status() == HandStatus::Natural;

        let players = self
            .players
            .iter()
            .map(|player| {
                let bet = ledger.bet(player.name());
                let insurance = ledger.insurance_stake(player.name());
                PlayerRoundResult {
                    name: player.name().to_string(),
                    bet,
                    insurance,
                    insurance_payout: if house_natural { insurance * 2.0 } else { 0.0 },
                    hands: player
                        .hands
                        .iter()
                        .map(|hand| HandResult {
                            status: hand.status(),
                            total: hand.total_value(),
                            payout: bet * self.payout_multiplier(hand.status()),
                        })
                        .collect(),
                    stash: player.stash(),
                }
            })
            .collect();

        RoundResult {
            ending,
            house_total: self.house.total_value(),
            house_status: self.house.status(),
            players,
        }
    }

    /// Phase 9: invariant check, bankruptcy exclusion, hand teardown.
    fn cleanup(&mut self) -> Result<(), GameError> {
        for player in &self.players {
            for (hand_index, hand) in player.hands.iter().enumerate() {
                if hand.status() == HandStatus::Playing {
                    return Err(InvariantViolation::UnsettledHand {
                        player: player.name().to_string(),
                        hand_index,
                    }
                    .into());
                }
            }
        }

        let min_bet = self.options.min_bet;
        for player in &self.players {
            if player.stash() < min_bet {
                debug!("excluding {} with stash {}", player.name(), player.stash());
                self.sink.record(GameEvent::PlayerExcluded {
                    player: player.name().to_string(),
                    stash: player.stash(),
                });
            }
        }
        self.players.retain(|player| player.stash() >= min_bet);

        for player in &mut self.players {
            player.hands.clear();
        }
        self.house = Hand::new();

        Ok(())
    }
}
