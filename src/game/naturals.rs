use log::debug;

use crate::card::Card;
use crate::error::{ConfigurationError, GameError};
use crate::event::GameEvent;
use crate::hand::HandStatus;

use super::{Game, RoundLedger};

impl Game {
    /// Phase 3: house natural check.
    ///
    /// When the up-card is an ace the insurance window runs first; with a
    /// ten-value up-card the total is checked immediately. Returns whether
    /// the house holds a natural.
    pub(super) fn check_natural_house(
        &mut self,
        ledger: &mut RoundLedger,
    ) -> Result<bool, GameError> {
        let up_value = self.house.cards().first().map_or(0, Card::play_value);

        if up_value == 11 {
            self.insurance_window(ledger)?;
        }

        if (up_value == 10 || up_value == 11) && self.house.total_value() == 21 {
            self.house.set_status(HandStatus::Natural);
            debug!("house holds a natural");
            return Ok(true);
        }

        Ok(false)
    }

    /// Offers insurance to every player while the house shows an ace.
    fn insurance_window(&mut self, ledger: &mut RoundLedger) -> Result<(), GameError> {
        for index in 0..self.players.len() {
            if !self.strategy.take_insurance(&self.players[index]) {
                continue;
            }

            let name = self.players[index].name().to_string();
            let max = (ledger.bet(&name) / 2.0).min(self.players[index].stash());

            let stake = self.strategy.insurance_amount(&self.players[index], max);
            if !(0.0..=max).contains(&stake) {
                return Err(ConfigurationError::InsuranceOutOfRange {
                    player: name,
                    amount: stake,
                    max,
                }
                .into());
            }

            self.players[index].debit(stake)?;
            ledger.record_insurance(&name, stake);
            self.players[index].hands[0].set_insured(true);
            self.sink
                .record(GameEvent::InsurancePlaced { player: name, stake });
        }

        Ok(())
    }

    /// Phase 4: player natural check. Returns whether every player holds
    /// a natural.
    pub(super) fn check_natural_players(&mut self, house_natural: bool) -> bool {
        let mut all_natural = true;

        for player in &mut self.players {
            let hand = &mut player.hands[0];
            if hand.total_value() == 21 {
                hand.set_status(if house_natural {
                    HandStatus::NaturalTie
                } else {
                    HandStatus::NaturalWin
                });
            } else {
                all_natural = false;
            }
        }

        all_natural
    }

    /// Phase 5: pays naturals and insurance.
    ///
    /// A natural win returns the bet plus the natural bonus; a natural tie
    /// refunds the bet. When the house holds a natural, insurance pays
    /// twice the stake regardless of the player's own outcome, and every
    /// hand still playing is marked lost.
    pub(super) fn settle_naturals(&mut self, ledger: &RoundLedger, house_natural: bool) {
        for index in 0..self.players.len() {
            let name = self.players[index].name().to_string();
            let bet = ledger.bet(&name);

            match self.players[index].hands[0].status() {
                HandStatus::NaturalWin => {
                    let payout = bet * (1.0 + self.options.natural_bonus);
                    self.players[index].credit(payout);
                    self.sink.record(GameEvent::HandSettled {
                        player: name.clone(),
                        hand_index: 0,
                        status: HandStatus::NaturalWin,
                        payout,
                    });
                }
                HandStatus::NaturalTie => {
                    self.players[index].credit(bet);
                    self.sink.record(GameEvent::HandSettled {
                        player: name.clone(),
                        hand_index: 0,
                        status: HandStatus::NaturalTie,
                        payout: bet,
                    });
                }
                _ => {}
            }

            if house_natural {
                let stake = ledger.insurance_stake(&name);
                if self.players[index].hands[0].is_insured() && stake > 0.0 {
                    let payout = stake * 2.0;
                    self.players[index].credit(payout);
                    self.sink.record(GameEvent::InsurancePaid {
                        player: name.clone(),
                        payout,
                    });
                }

                if self.players[index].hands[0].status() == HandStatus::Playing {
                    self.players[index].hands[0].set_status(HandStatus::Loss);
                    self.sink.record(GameEvent::HandSettled {
                        player: name,
                        hand_index: 0,
                        status: HandStatus::Loss,
                        payout: 0.0,
                    });
                }
            }
        }
    }
}
