use log::debug;

use crate::error::GameError;
use crate::event::GameEvent;
use crate::hand::HandStatus;

use super::{Game, HOUSE, RoundLedger};

impl Game {
    /// Phase 7: the house reveals its hole card and draws while below the
    /// stand threshold, downgrading an ace instead of busting while one is
    /// eligible.
    pub(super) fn house_turn(&mut self) -> Result<(), GameError> {
        self.house.reveal_all();
        let total = self.house.total_value();
        self.sink.record(GameEvent::HandRevealed {
            recipient: HOUSE.to_string(),
            total,
        });
        debug!("house reveals {total}");

        while self.house.total_value() < self.options.house_stand_threshold {
            let card = self.deal_card(HOUSE, true)?;
            self.house.push_card(card);

            if self.house.total_value() > 21 && !self.house.try_downgrade_ace() {
                self.house.set_status(HandStatus::Loss);
                let total = self.house.total_value();
                self.sink.record(GameEvent::HandBusted {
                    player: HOUSE.to_string(),
                    hand_index: 0,
                    total,
                });
                break;
            }
        }

        Ok(())
    }

    /// Phase 8: settles every hand still contesting against the house
    /// total. A busted house pays every remaining hand.
    pub(super) fn settle_showdown(&mut self, ledger: &RoundLedger) {
        let house_total = self.house.total_value();
        let house_bust = self.house.status() == HandStatus::Loss;

        for index in 0..self.players.len() {
            let name = self.players[index].name().to_string();
            let bet = ledger.bet(&name);

            for hand_index in 0..self.players[index].hands.len() {
                if self.players[index].hands[hand_index].status() != HandStatus::Playing {
                    continue;
                }

                let total = self.players[index].hands[hand_index].total_value();
                let (status, payout) = if house_bust || total > house_total {
                    (HandStatus::RegularWin, bet * 2.0)
                } else if total == house_total {
                    (HandStatus::RegularTie, bet)
                } else {
                    (HandStatus::Loss, 0.0)
                };

                self.players[index].hands[hand_index].set_status(status);
                self.players[index].credit(payout);
                self.sink.record(GameEvent::HandSettled {
                    player: name.clone(),
                    hand_index,
                    status,
                    payout,
                });
            }
        }
    }
}
