use log::debug;

use crate::error::{ConfigurationError, GameError};
use crate::event::GameEvent;
use crate::hand::Hand;

use super::{Game, HOUSE, RoundLedger};

impl Game {
    /// Phase 1: collects and charges a bet from every active player.
    pub(super) fn place_bets(&mut self, ledger: &mut RoundLedger) -> Result<(), GameError> {
        debug!("betting phase: {} players", self.players.len());

        for index in 0..self.players.len() {
            let min = self.options.min_bet;
            let max = self.options.max_bet.min(self.players[index].stash());

            let amount = self.strategy.bet_amount(&self.players[index], min, max);
            if !(min..=max).contains(&amount) {
                return Err(ConfigurationError::BetOutOfRange {
                    player: self.players[index].name().to_string(),
                    amount,
                    min,
                    max,
                }
                .into());
            }

            self.players[index].debit(amount)?;
            let name = self.players[index].name().to_string();
            ledger.record_bet(&name, amount);
            self.sink.record(GameEvent::BetPlaced {
                player: name,
                amount,
            });
        }

        Ok(())
    }

    /// Phase 2: one face-up card per player, one face-up to the house, a
    /// second face-up per player, and the house's hole card face down.
    pub(super) fn deal_initial(&mut self) -> Result<(), GameError> {
        for index in 0..self.players.len() {
            let name = self.players[index].name().to_string();
            let card = self.deal_card(&name, true)?;
            let mut hand = Hand::new();
            hand.push_card(card);
            self.players[index].hands.push(hand);
        }

        let card = self.deal_card(HOUSE, true)?;
        self.house.push_card(card);

        for index in 0..self.players.len() {
            let name = self.players[index].name().to_string();
            let card = self.deal_card(&name, true)?;
            self.players[index].hands[0].push_card(card);
        }

        let card = self.deal_card(HOUSE, false)?;
        self.house.push_card(card);

        Ok(())
    }
}
