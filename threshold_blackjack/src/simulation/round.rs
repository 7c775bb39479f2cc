use crate::{
    strategy::{settle, settle_blackjack, Strategy},
    Decision, GameError, InitialSituation, Rule,
};
use threshold_blackjack_macros::allowed_phase;
use tracing::trace;

use super::{hand::BLACKJACK, house::House, player::Player, SimulatorEventHandler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    DealInitialCards,
    PlayerActing,
    DealerActing,
    Settled,
}

/// One game between a fresh house and a fresh player.
pub struct Round {
    rule: Rule,
    current_game_phase: GamePhase,
    house: House,
    player: Player,
    outcome: Option<f64>,
}

impl Round {
    pub fn new(rule: &Rule, house: House) -> Self {
        Round {
            rule: *rule,
            current_game_phase: GamePhase::DealInitialCards,
            house,
            player: Player::new(rule.bet),
            outcome: None,
        }
    }

    /// Plays the whole game and returns what the player won.
    pub fn run<T: Strategy, U: SimulatorEventHandler>(
        &mut self,
        strategy: &mut T,
        handler: &mut U,
    ) -> Result<f64, GameError> {
        let initial_situation = self.deal_initial_cards()?;
        strategy.init_with_initial_situation(&self.rule, &initial_situation);
        handler.on_deal_cards(&initial_situation);

        self.play(strategy, handler)?;
        if self.current_game_phase == GamePhase::DealerActing {
            self.dealer_plays_and_summary(handler)?;
        }

        self.outcome.ok_or(GameError::RoundNotSettled)
    }

    /// Can be called at DealInitialCards phase.
    /// Deals two cards each to the house and the player.
    #[allowed_phase(DealInitialCards)]
    pub fn deal_initial_cards(&mut self) -> Result<InitialSituation, GameError> {
        let hand_cards = self.house.deal_initial_cards()?;
        self.player.receive_initial_cards(hand_cards);
        let dealer_up_card = self.house.upcard().ok_or(GameError::DeckExhausted)?;

        self.current_game_phase = GamePhase::PlayerActing;
        Ok(InitialSituation {
            hand_cards,
            dealer_up_card,
        })
    }

    /// Can be called at PlayerActing phase.
    /// A natural or a surrender settles the game at once. Otherwise the player acts
    /// until the strategy stands, the player doubles, or the player busts, and the
    /// game moves on to the dealer.
    #[allowed_phase(PlayerActing)]
    pub fn play<T: Strategy, U: SimulatorEventHandler>(
        &mut self,
        strategy: &mut T,
        handler: &mut U,
    ) -> Result<(), GameError> {
        if self.player.get_hand().best_total() == BLACKJACK {
            let outcome = settle_blackjack(
                self.house.get_hand().best_total(),
                self.player.get_bet(),
                self.rule.payout_blackjack,
            );
            handler.on_blackjack(outcome);
            self.summary(outcome, handler);
            return Ok(());
        }

        loop {
            let decision =
                strategy.make_decision(&self.rule, self.player.get_hand(), self.house.get_hand());
            handler.on_make_decision(decision);
            match decision {
                Decision::Stand => break,
                Decision::Hit => {
                    let card = self.house.hit_player()?;
                    self.player.hit(card);
                }
                Decision::Double => {
                    let card = self.house.hit_player()?;
                    self.player.double(card);
                }
                Decision::Surrender => {
                    self.player.surrender();
                    let outcome = -self.player.get_bet();
                    self.summary(outcome, handler);
                    return Ok(());
                }
            }

            if self.player.get_hand().is_bust() {
                handler.on_player_bust();
                break;
            }
            if decision == Decision::Double {
                break;
            }
        }

        self.current_game_phase = GamePhase::DealerActing;
        Ok(())
    }

    /// Can be called at DealerActing phase.
    /// The house completes its hand, even when the player has busted, and the game
    /// is settled.
    #[allowed_phase(DealerActing)]
    pub fn dealer_plays_and_summary<U: SimulatorEventHandler>(
        &mut self,
        handler: &mut U,
    ) -> Result<f64, GameError> {
        self.house.complete_hand(self.rule.house_stands_on)?;
        let outcome = settle(
            self.player.get_hand().best_total(),
            self.house.get_hand().best_total(),
            self.player.get_bet(),
        );
        self.summary(outcome, handler);
        Ok(outcome)
    }

    pub fn get_phase(&self) -> GamePhase {
        self.current_game_phase
    }

    pub fn get_player(&self) -> &Player {
        &self.player
    }

    pub fn get_house(&self) -> &House {
        &self.house
    }

    /// Set once the game is settled.
    pub fn outcome(&self) -> Option<f64> {
        self.outcome
    }

    fn summary<U: SimulatorEventHandler>(&mut self, outcome: f64, handler: &mut U) {
        trace!(
            player = self.player.get_hand().best_total(),
            dealer = self.house.get_hand().best_total(),
            bet = self.player.get_bet(),
            outcome,
            "settled"
        );
        self.outcome = Some(outcome);
        self.current_game_phase = GamePhase::Settled;
        handler.on_summary_game(&self.player, self.house.get_hand(), outcome);
    }
}
