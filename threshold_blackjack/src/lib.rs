pub mod simulation;
pub mod strategy;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use simulation::{Card, GamePhase};
use thiserror::Error;

pub use simulation::{
    best_configuration, simulate_parallel, SimulationResult, Simulator, SimulatorEventHandler,
    Tally,
};
pub use strategy::{ThresholdConfig, ThresholdStrategy, UpcardCategory};

/// House rules shared by every game of a simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    /// How many copies of the 52-card definition make up the per-game deck.
    pub number_of_decks: u8,
    /// The dealer keeps drawing while the house's best total is below this.
    pub house_stands_on: u16,
    /// Upcards worth at least this are `Good`.
    pub good_upcard_bound: u16,
    /// Upcards worth at least this (and below `good_upcard_bound`) are `Poor`.
    pub poor_upcard_bound: u16,
    /// Unit stake placed at the start of every game.
    pub bet: f64,
    pub payout_blackjack: f64,
    pub surrender_policy: SurrenderPolicy,
}

impl Default for Rule {
    fn default() -> Self {
        Rule {
            number_of_decks: 1,
            house_stands_on: 17,
            good_upcard_bound: 7,
            poor_upcard_bound: 4,
            bet: 1.0,
            payout_blackjack: 1.5,
            surrender_policy: SurrenderPolicy::NoSurrender,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize_enum_str, Deserialize_enum_str)]
pub enum SurrenderPolicy {
    NoSurrender,
    LateSurrender,
}

/// What the player sees right after the initial deal.
#[derive(Clone, Debug)]
pub struct InitialSituation {
    pub hand_cards: (Card, Card),
    pub dealer_up_card: Card,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Decision {
    Hit,
    Stand,
    Double,
    Surrender,
}

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("cannot draw a card from an exhausted deck")]
    DeckExhausted,
    #[error("{method} is only allowed in {expected:?} phase, but the game is in {actual:?} phase")]
    WrongPhase {
        method: &'static str,
        expected: GamePhase,
        actual: GamePhase,
    },
    #[error("the game ended without a settlement")]
    RoundNotSettled,
    #[error("simulation worker {0} panicked")]
    WorkerPanicked(usize),
}
