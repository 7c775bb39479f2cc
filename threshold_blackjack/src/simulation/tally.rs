use std::fmt::Display;

use crate::Decision;

use super::{hand::Hand, player::Player, SimulatorEventHandler};

/// Counts how games ended. Tallies of separate workers can be merged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    games: u64,
    wins: u64,
    pushes: u64,
    losses: u64,
    player_blackjacks: u64,
    doubles: u64,
    surrenders: u64,
    player_busts: u64,
    winnings: f64,
}

impl Tally {
    pub fn merge(&mut self, other: &Tally) {
        self.games += other.games;
        self.wins += other.wins;
        self.pushes += other.pushes;
        self.losses += other.losses;
        self.player_blackjacks += other.player_blackjacks;
        self.doubles += other.doubles;
        self.surrenders += other.surrenders;
        self.player_busts += other.player_busts;
        self.winnings += other.winnings;
    }

    pub fn games(&self) -> u64 {
        self.games
    }

    pub fn wins(&self) -> u64 {
        self.wins
    }

    pub fn pushes(&self) -> u64 {
        self.pushes
    }

    pub fn losses(&self) -> u64 {
        self.losses
    }

    pub fn player_blackjacks(&self) -> u64 {
        self.player_blackjacks
    }

    pub fn doubles(&self) -> u64 {
        self.doubles
    }

    pub fn surrenders(&self) -> u64 {
        self.surrenders
    }

    pub fn player_busts(&self) -> u64 {
        self.player_busts
    }

    pub fn winnings(&self) -> f64 {
        self.winnings
    }
}

impl SimulatorEventHandler for Tally {
    fn on_game_begin(&mut self, _game_index: u64) {
        self.games += 1;
    }

    fn on_blackjack(&mut self, _outcome: f64) {
        self.player_blackjacks += 1;
    }

    fn on_make_decision(&mut self, decision: Decision) {
        match decision {
            Decision::Double => self.doubles += 1,
            Decision::Surrender => self.surrenders += 1,
            _ => {}
        }
    }

    fn on_player_bust(&mut self) {
        self.player_busts += 1;
    }

    fn on_summary_game(&mut self, _player: &Player, _dealer_hand: &Hand, outcome: f64) {
        self.winnings += outcome;
        if outcome > 0.0 {
            self.wins += 1;
        } else if outcome < 0.0 {
            self.losses += 1;
        } else {
            self.pushes += 1;
        }
    }
}

impl Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 60;
        const TEXT_WIDTH: usize = "number of player blackjacks".len() + 10;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;
        let rate = |count: u64| {
            if self.games == 0 {
                0.0
            } else {
                count as f64 / self.games as f64
            }
        };
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "games played", self.games)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands won", self.wins)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands pushed", self.pushes)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands lost", self.losses)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "number of player blackjacks", self.player_blackjacks
        )?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "doubles", self.doubles)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "surrenders", self.surrenders)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "player busts", self.player_busts)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}", "winnings", self.winnings)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.4}", "win percentage", rate(self.wins))?;
        write!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.4}", "loss percentage", rate(self.losses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rule, Simulator, ThresholdConfig};

    #[test]
    fn tally_agrees_with_result() {
        let config = ThresholdConfig::new("baseline", 17, 13, 12);
        let mut simulator = Simulator::new(&Rule::default(), 1);
        let mut tally = Tally::default();
        let result = simulator.simulate(&config, 1000, &mut tally).unwrap();
        assert_eq!(tally.games(), 1000);
        assert_eq!(tally.wins() + tally.pushes() + tally.losses(), 1000);
        assert!((tally.winnings() - result.total).abs() < 1e-9);
        assert!(tally.player_blackjacks() > 0);
        assert!(tally.doubles() > 0);
        assert_eq!(tally.surrenders(), 0);
    }

    #[test]
    fn merge_adds_counts() {
        let mut a = Tally::default();
        a.on_game_begin(0);
        a.on_make_decision(Decision::Double);
        let mut b = Tally::default();
        b.on_game_begin(0);
        b.on_player_bust();
        a.merge(&b);
        assert_eq!(a.games(), 2);
        assert_eq!(a.doubles(), 1);
        assert_eq!(a.player_busts(), 1);
    }
}
