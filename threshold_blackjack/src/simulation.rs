pub mod deck;
pub mod hand;
pub mod house;
pub mod player;
pub mod round;
mod tally;

use crate::{
    strategy::{ThresholdConfig, ThresholdStrategy},
    Decision, GameError, InitialSituation, Rule,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use tracing::{debug, info, trace};

use self::{deck::Deck, hand::Hand, house::House, player::Player, round::Round};
pub use round::GamePhase;
pub use tally::Tally;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum Suit {
    Spade,
    Heart,
    Club,
    Diamond,
}

/// Ranks in the order a fresh deck lists them within each suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    King,
    Queen,
    Jack,
    Ten,
    Nine,
    Eight,
    Seven,
    Six,
    Five,
    Four,
    Three,
    Two,
}

impl Rank {
    /// Every value this rank may count for. Only the ace has two.
    pub fn points(&self) -> &'static [u16] {
        match self {
            Rank::Ace => &[1, 11],
            Rank::King | Rank::Queen | Rank::Jack | Rank::Ten => &[10],
            Rank::Nine => &[9],
            Rank::Eight => &[8],
            Rank::Seven => &[7],
            Rank::Six => &[6],
            Rank::Five => &[5],
            Rank::Four => &[4],
            Rank::Three => &[3],
            Rank::Two => &[2],
        }
    }
}

/// Represents a card in the real world with a suit and a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    pub fn points(&self) -> &'static [u16] {
        self.rank.points()
    }

    /// The single value used when the card is judged on its own, an ace counting 11.
    pub fn high_value(&self) -> u16 {
        self.points().iter().copied().max().unwrap_or(0)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let suit = match self.suit {
            Suit::Spade => 'S',
            Suit::Heart => 'H',
            Suit::Club => 'C',
            Suit::Diamond => 'D',
        };
        let rank = match self.rank {
            Rank::Ace => 'A',
            Rank::King => 'K',
            Rank::Queen => 'Q',
            Rank::Jack => 'J',
            Rank::Ten => 'T',
            Rank::Nine => '9',
            Rank::Eight => '8',
            Rank::Seven => '7',
            Rank::Six => '6',
            Rank::Five => '5',
            Rank::Four => '4',
            Rank::Three => '3',
            Rank::Two => '2',
        };
        write!(f, "{}{}", suit, rank)
    }
}

/// The 52-card definition, suit by suit.
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for suit in Suit::iter() {
        for rank in Rank::iter() {
            cards.push(Card { rank, suit });
        }
    }
    cards
}

/// Hooks called while games are played. Every hook does nothing by default.
pub trait SimulatorEventHandler {
    fn on_game_begin(&mut self, _game_index: u64) {}
    fn on_deal_cards(&mut self, _initial_situation: &InitialSituation) {}
    fn on_blackjack(&mut self, _outcome: f64) {}
    fn on_make_decision(&mut self, _decision: Decision) {}
    fn on_player_bust(&mut self) {}
    fn on_summary_game(&mut self, _player: &Player, _dealer_hand: &Hand, _outcome: f64) {}
}

impl SimulatorEventHandler for () {}

/// Aggregated returns of many games played with one threshold configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationResult {
    pub name: String,
    pub total: f64,
    pub outcomes: Vec<f64>,
    pub running_total: Vec<f64>,
}

impl SimulationResult {
    pub fn from_outcomes(name: &str, outcomes: Vec<f64>) -> SimulationResult {
        let mut running_total = Vec::with_capacity(outcomes.len());
        let mut total = 0.0;
        for outcome in &outcomes {
            total += outcome;
            running_total.push(total);
        }
        SimulationResult {
            name: name.to_string(),
            total,
            outcomes,
            running_total,
        }
    }

    pub fn number_of_games(&self) -> usize {
        self.outcomes.len()
    }

    /// Average return per game. Zero when nothing was played.
    pub fn mean(&self) -> f64 {
        if self.outcomes.is_empty() {
            0.0
        } else {
            self.total / self.outcomes.len() as f64
        }
    }
}

/// Plays independent games. Every game gets a freshly shuffled deck built from the
/// same card definition; the only state carried between games is the random stream.
pub struct Simulator {
    rule: Rule,
    cards: Vec<Card>,
    rng: ChaCha8Rng,
}

impl Simulator {
    /// Creates a simulator whose deck is `rule.number_of_decks` standard decks.
    pub fn new(rule: &Rule, seed: u64) -> Self {
        Self::from_rng(rule, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_rng(rule: &Rule, rng: ChaCha8Rng) -> Self {
        let cards = Deck::new(rule.number_of_decks).into_cards();
        Self::with_cards(rule, cards, rng)
    }

    /// Creates a simulator that shuffles the given card definition for every game.
    pub fn with_cards(rule: &Rule, cards: Vec<Card>, rng: ChaCha8Rng) -> Self {
        Simulator {
            rule: *rule,
            cards,
            rng,
        }
    }

    pub fn get_rule(&self) -> &Rule {
        &self.rule
    }

    /// Plays one game with a new house and player. Returns what the player won.
    pub fn play_one_game<U: SimulatorEventHandler>(
        &mut self,
        config: &ThresholdConfig,
        handler: &mut U,
    ) -> Result<f64, GameError> {
        let house = House::new(&self.cards, &mut self.rng);
        let mut round = Round::new(&self.rule, house);
        let mut strategy = ThresholdStrategy::new(config);
        round.run(&mut strategy, handler)
    }

    /// Plays `number_of_games` games with the given thresholds.
    pub fn simulate<U: SimulatorEventHandler>(
        &mut self,
        config: &ThresholdConfig,
        number_of_games: u64,
        handler: &mut U,
    ) -> Result<SimulationResult, GameError> {
        let mut outcomes = Vec::with_capacity(number_of_games as usize);
        for game_index in 0..number_of_games {
            handler.on_game_begin(game_index);
            let outcome = self.play_one_game(config, handler)?;
            trace!(config = %config.name, game_index, outcome, "game settled");
            outcomes.push(outcome);
        }

        let result = SimulationResult::from_outcomes(&config.name, outcomes);
        info!(
            config = %config.name,
            games = number_of_games,
            total = result.total,
            mean = result.mean(),
            "simulation finished"
        );
        Ok(result)
    }

    /// Simulates every configuration in order, continuing the same random stream.
    pub fn simulate_all<U: SimulatorEventHandler>(
        &mut self,
        configs: &[ThresholdConfig],
        number_of_games: u64,
        handler: &mut U,
    ) -> Result<Vec<SimulationResult>, GameError> {
        let mut results = Vec::with_capacity(configs.len());
        for config in configs {
            results.push(self.simulate(config, number_of_games, handler)?);
        }
        Ok(results)
    }
}

/// Index of the result with the greatest total. Ties keep the first one seen.
pub fn best_configuration<'a, I>(results: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a SimulationResult>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, result) in results.into_iter().enumerate() {
        match best {
            Some((_, total)) if total >= result.total => {}
            _ => best = Some((i, result.total)),
        }
    }
    best.map(|(i, _)| i)
}

/// Splits the games across worker threads. Worker `w` plays a contiguous chunk of
/// games on its own ChaCha stream `w` of `seed`, and the outcomes are joined in
/// worker order, so the result only depends on `seed` and `number_of_threads`.
///
/// Passing 0 threads uses the available parallelism.
pub fn simulate_parallel(
    rule: &Rule,
    config: &ThresholdConfig,
    number_of_games: u64,
    number_of_threads: usize,
    seed: u64,
) -> Result<(SimulationResult, Tally), GameError> {
    let number_of_threads = {
        if number_of_threads == 0 {
            let parallelism = std::thread::available_parallelism();
            match parallelism {
                Ok(n) => n.get(),
                Err(_) => 1,
            }
        } else {
            number_of_threads
        }
    };

    let base = number_of_games / number_of_threads as u64;
    let remainder = number_of_games % number_of_threads as u64;

    let mut threads = Vec::with_capacity(number_of_threads);
    for worker in 0..number_of_threads {
        let games = base + u64::from((worker as u64) < remainder);
        let rule = *rule;
        let config = config.clone();
        let thread = std::thread::spawn(move || -> Result<(Vec<f64>, Tally), GameError> {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(worker as u64);
            let mut simulator = Simulator::from_rng(&rule, rng);
            let mut tally = Tally::default();
            let mut outcomes = Vec::with_capacity(games as usize);
            for game_index in 0..games {
                tally.on_game_begin(game_index);
                outcomes.push(simulator.play_one_game(&config, &mut tally)?);
            }
            Ok((outcomes, tally))
        });
        threads.push(thread);
    }

    let mut outcomes = Vec::with_capacity(number_of_games as usize);
    let mut tally = Tally::default();
    for (worker, thread) in threads.into_iter().enumerate() {
        let (worker_outcomes, worker_tally) = thread
            .join()
            .map_err(|_| GameError::WorkerPanicked(worker))??;
        debug!(worker, games = worker_outcomes.len(), "worker finished");
        outcomes.extend(worker_outcomes);
        tally.merge(&worker_tally);
    }

    let result = SimulationResult::from_outcomes(&config.name, outcomes);
    info!(
        config = %config.name,
        games = number_of_games,
        threads = number_of_threads,
        total = result.total,
        mean = result.mean(),
        "parallel simulation finished"
    );
    Ok((result, tally))
}
