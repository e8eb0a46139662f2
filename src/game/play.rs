use log::debug;

use crate::error::GameError;
use crate::event::GameEvent;
use crate::hand::{Hand, HandStatus};
use crate::strategy::Move;

use super::{Game, RoundLedger};

impl Game {
    /// Phase 6: player turns, one player at a time in roster order.
    ///
    /// Returns whether every hand of every player ended in a loss, in
    /// which case the house never plays.
    pub(super) fn player_turns(&mut self, ledger: &mut RoundLedger) -> Result<bool, GameError> {
        for index in 0..self.players.len() {
            self.play_player(index, ledger)?;
        }

        Ok(self.players.iter().all(|player| {
            player
                .hands
                .iter()
                .all(|hand| hand.status() == HandStatus::Loss)
        }))
    }

    /// One player's whole turn: the double-down offer, then the split
    /// offer, then regular play. A hand that doubles down is never offered
    /// a split.
    fn play_player(&mut self, index: usize, ledger: &mut RoundLedger) -> Result<(), GameError> {
        if self.players[index].hands[0].status() != HandStatus::Playing {
            // Already settled as a natural.
            return Ok(());
        }

        if self.offer_double_down(index, ledger)? {
            return Ok(());
        }

        if self.offer_split(index, ledger)? {
            return Ok(());
        }

        self.regular_play(index)
    }

    /// Offers a double-down when the initial total is eligible and the
    /// stash exceeds the bet. Returns whether it was taken; a doubled hand
    /// receives exactly one card and its turn is over.
    fn offer_double_down(
        &mut self,
        index: usize,
        ledger: &mut RoundLedger,
    ) -> Result<bool, GameError> {
        let name = self.players[index].name().to_string();
        let bet = ledger.bet(&name);
        let total = self.players[index].hands[0].total_value();

        if !self.options.double_down_totals.contains(&total)
            || self.players[index].stash() <= bet
        {
            return Ok(false);
        }

        if !self
            .strategy
            .double_down(&self.players[index], &self.players[index].hands[0])
        {
            return Ok(false);
        }

        self.players[index].debit(bet)?;
        ledger.double_bet(&name);
        debug!("{name} doubles down to {}", ledger.bet(&name));

        let card = self.deal_card(&name, true)?;
        let hand = &mut self.players[index].hands[0];
        hand.push_card(card);

        if hand.total_value() > 21 && !hand.try_downgrade_ace() {
            hand.set_status(HandStatus::Loss);
            let total = hand.total_value();
            self.sink.record(GameEvent::HandBusted {
                player: name,
                hand_index: 0,
                total,
            });
        }

        Ok(true)
    }

    /// Offers a split on a pair when the stash exceeds the bet. Returns
    /// whether the turn is over (split aces get one hit each and stop).
    ///
    /// An ace pair that stays unsplit is downgraded immediately so it
    /// enters regular play at 12 rather than standing at 22.
    fn offer_split(&mut self, index: usize, ledger: &mut RoundLedger) -> Result<bool, GameError> {
        let name = self.players[index].name().to_string();
        let bet = ledger.bet(&name);

        let hand = &self.players[index].hands[0];
        let is_pair = hand.is_pair();
        let is_ace_pair = is_pair && hand.cards()[0].is_ace();

        if !is_pair || self.players[index].stash() <= bet {
            if is_ace_pair {
                self.players[index].hands[0].try_downgrade_ace();
            }
            return Ok(false);
        }

        if !self
            .strategy
            .split_pair(&self.players[index], &self.players[index].hands[0])
        {
            if is_ace_pair {
                self.players[index].hands[0].try_downgrade_ace();
            }
            return Ok(false);
        }

        self.players[index].debit(bet)?;
        let second = self.players[index].hands[0]
            .take_split_card()
            .expect("pair was verified above");
        let mut new_hand = Hand::from_split(second);
        debug!("{name} splits a pair");

        // One card to each resulting hand.
        let card = self.deal_card(&name, true)?;
        self.players[index].hands[0].push_card(card);
        let card = self.deal_card(&name, true)?;
        new_hand.push_card(card);
        self.players[index].hands.push(new_hand);

        if is_ace_pair {
            // Split aces take exactly that one hit and stand as they lie.
            for hand_index in 0..self.players[index].hands.len() {
                let hand = &mut self.players[index].hands[hand_index];
                if hand.total_value() > 21 && !hand.try_downgrade_ace() {
                    hand.set_status(HandStatus::Loss);
                    let total = hand.total_value();
                    self.sink.record(GameEvent::HandBusted {
                        player: name.clone(),
                        hand_index,
                        total,
                    });
                }
            }
            return Ok(true);
        }

        Ok(false)
    }

    /// Regular play over every hand still live: hit until stand or bust,
    /// downgrading an ace instead of busting while one is eligible.
    fn regular_play(&mut self, index: usize) -> Result<(), GameError> {
        let name = self.players[index].name().to_string();

        for hand_index in 0..self.players[index].hands.len() {
            if self.players[index].hands[hand_index].status() != HandStatus::Playing {
                continue;
            }

            loop {
                let player = &self.players[index];
                let decision = self.strategy.hit_or_stand(player, &player.hands[hand_index]);
                if decision == Move::Stand {
                    break;
                }

                let card = self.deal_card(&name, true)?;
                let hand = &mut self.players[index].hands[hand_index];
                hand.push_card(card);

                if hand.total_value() > 21 && !hand.try_downgrade_ace() {
                    hand.set_status(HandStatus::Loss);
                    let total = hand.total_value();
                    self.sink.record(GameEvent::HandBusted {
                        player: name.clone(),
                        hand_index,
                        total,
                    });
                    break;
                }
            }
        }

        Ok(())
    }
}
