use crate::{
    simulation::{
        hand::{Hand, BLACKJACK},
        Card,
    },
    Decision, InitialSituation, Rule, SurrenderPolicy,
};
use serde::{Deserialize, Serialize};

/// How strong the dealer looks, judged by the upcard alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpcardCategory {
    Good,
    Fair,
    Poor,
}

impl UpcardCategory {
    pub fn classify(rule: &Rule, upcard: Card) -> UpcardCategory {
        let value = upcard.high_value();
        if value >= rule.good_upcard_bound {
            UpcardCategory::Good
        } else if value >= rule.poor_upcard_bound {
            UpcardCategory::Poor
        } else {
            UpcardCategory::Fair
        }
    }
}

/// Totals at which the player stops hitting, one per upcard category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub name: String,
    pub good: u16,
    pub fair: u16,
    pub poor: u16,
}

impl ThresholdConfig {
    pub fn new(name: &str, good: u16, fair: u16, poor: u16) -> Self {
        ThresholdConfig {
            name: name.to_string(),
            good,
            fair,
            poor,
        }
    }

    pub fn threshold(&self, category: UpcardCategory) -> u16 {
        match category {
            UpcardCategory::Good => self.good,
            UpcardCategory::Fair => self.fair,
            UpcardCategory::Poor => self.poor,
        }
    }
}

pub trait Strategy {
    fn init_with_initial_situation(&mut self, rule: &Rule, initial_situation: &InitialSituation);
    fn make_decision(&mut self, rule: &Rule, current_hand: &Hand, dealer_hand: &Hand) -> Decision;
}

/// Hits until the threshold of the upcard's category is reached. Doubles on 11,
/// on 10 against a dealer total under 10, and on 9 against a dealer total under 6.
pub struct ThresholdStrategy<'a> {
    config: &'a ThresholdConfig,
    dealer_up_value: u16,
    threshold: u16,
}

impl<'a> ThresholdStrategy<'a> {
    pub fn new(config: &'a ThresholdConfig) -> Self {
        ThresholdStrategy {
            config,
            dealer_up_value: 0,
            threshold: 0,
        }
    }

    pub fn get_threshold(&self) -> u16 {
        self.threshold
    }
}

impl<'a> Strategy for ThresholdStrategy<'a> {
    fn init_with_initial_situation(&mut self, rule: &Rule, initial_situation: &InitialSituation) {
        let up = initial_situation.dealer_up_card;
        self.dealer_up_value = up.high_value();
        self.threshold = self.config.threshold(UpcardCategory::classify(rule, up));
    }

    fn make_decision(&mut self, rule: &Rule, current_hand: &Hand, dealer_hand: &Hand) -> Decision {
        let total = current_hand.best_total();
        if current_hand.is_bust() || total >= self.threshold {
            return Decision::Stand;
        }

        if rule.surrender_policy == SurrenderPolicy::LateSurrender
            && current_hand.len() == 2
            && !current_hand.is_soft()
            && should_surrender(total, self.dealer_up_value)
        {
            return Decision::Surrender;
        }

        if should_double(total, dealer_hand.best_total()) {
            Decision::Double
        } else {
            Decision::Hit
        }
    }
}

pub fn should_double(player_total: u16, dealer_total: u16) -> bool {
    match player_total {
        11 => true,
        10 => dealer_total < 10,
        9 => dealer_total < 6,
        _ => false,
    }
}

/// Hard 16 against 9, 10 or ace, and hard 15 against 10.
pub fn should_surrender(player_total: u16, dealer_up_value: u16) -> bool {
    match player_total {
        16 => dealer_up_value >= 9,
        15 => dealer_up_value == 10,
        _ => false,
    }
}

/// What a natural pays. A push when the dealer also holds 21.
pub fn settle_blackjack(dealer_total: u16, bet: f64, payout_blackjack: f64) -> f64 {
    if dealer_total == BLACKJACK {
        0.0
    } else {
        bet * payout_blackjack
    }
}

/// What the player wins once both hands are complete. The dealer wins ties and
/// two busted hands push.
pub fn settle(player_total: u16, dealer_total: u16, bet: f64) -> f64 {
    let player_bust = player_total > BLACKJACK;
    let dealer_bust = dealer_total > BLACKJACK;
    match (player_bust, dealer_bust) {
        (true, true) => 0.0,
        (true, false) => -bet,
        (false, true) => bet,
        (false, false) => {
            if player_total > dealer_total {
                bet
            } else {
                -bet
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{hand::BUST, Rank, Suit};

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for rank in ranks {
            hand.add_card(Card::new(*rank, Suit::Diamond));
        }
        hand
    }

    fn situation(player: (Rank, Rank), up: Rank) -> InitialSituation {
        InitialSituation {
            hand_cards: (
                Card::new(player.0, Suit::Club),
                Card::new(player.1, Suit::Club),
            ),
            dealer_up_card: Card::new(up, Suit::Spade),
        }
    }

    #[test]
    fn classifies_upcards() {
        let rule = Rule::default();
        let classify = |rank| UpcardCategory::classify(&rule, Card::new(rank, Suit::Heart));
        assert_eq!(classify(Rank::Ace), UpcardCategory::Good);
        assert_eq!(classify(Rank::King), UpcardCategory::Good);
        assert_eq!(classify(Rank::Seven), UpcardCategory::Good);
        assert_eq!(classify(Rank::Six), UpcardCategory::Poor);
        assert_eq!(classify(Rank::Four), UpcardCategory::Poor);
        assert_eq!(classify(Rank::Three), UpcardCategory::Fair);
        assert_eq!(classify(Rank::Two), UpcardCategory::Fair);
    }

    #[test]
    fn threshold_follows_category() {
        let config = ThresholdConfig::new("t", 17, 13, 12);
        let rule = Rule::default();
        let mut strategy = ThresholdStrategy::new(&config);
        strategy.init_with_initial_situation(&rule, &situation((Rank::Two, Rank::Three), Rank::Ace));
        assert_eq!(strategy.get_threshold(), 17);
        strategy.init_with_initial_situation(&rule, &situation((Rank::Two, Rank::Three), Rank::Five));
        assert_eq!(strategy.get_threshold(), 12);
        strategy.init_with_initial_situation(&rule, &situation((Rank::Two, Rank::Three), Rank::Two));
        assert_eq!(strategy.get_threshold(), 13);
    }

    #[test]
    fn hits_below_threshold_and_stands_at_it() {
        let config = ThresholdConfig::new("t", 17, 13, 12);
        let rule = Rule::default();
        let mut strategy = ThresholdStrategy::new(&config);
        strategy.init_with_initial_situation(&rule, &situation((Rank::Ten, Rank::Six), Rank::King));
        let dealer = hand_of(&[Rank::King, Rank::Seven]);
        assert_eq!(
            strategy.make_decision(&rule, &hand_of(&[Rank::Ten, Rank::Six]), &dealer),
            Decision::Hit
        );
        assert_eq!(
            strategy.make_decision(&rule, &hand_of(&[Rank::Ten, Rank::Seven]), &dealer),
            Decision::Stand
        );
        assert_eq!(
            strategy.make_decision(&rule, &hand_of(&[Rank::Ten, Rank::Six, Rank::King]), &dealer),
            Decision::Stand
        );
    }

    #[test]
    fn double_down_rule() {
        assert!(should_double(11, 20));
        assert!(should_double(10, 9));
        assert!(!should_double(10, 10));
        assert!(should_double(9, 5));
        assert!(!should_double(9, 6));
        assert!(!should_double(12, 4));
        assert!(!should_double(8, 4));
    }

    #[test]
    fn double_uses_dealer_hand_total() {
        let config = ThresholdConfig::new("t", 17, 13, 12);
        let rule = Rule::default();
        let mut strategy = ThresholdStrategy::new(&config);
        strategy.init_with_initial_situation(&rule, &situation((Rank::Six, Rank::Four), Rank::Four));
        let player = hand_of(&[Rank::Six, Rank::Four]);
        assert_eq!(
            strategy.make_decision(&rule, &player, &hand_of(&[Rank::Four, Rank::Five])),
            Decision::Double
        );
        assert_eq!(
            strategy.make_decision(&rule, &player, &hand_of(&[Rank::Four, Rank::Six])),
            Decision::Hit
        );
    }

    #[test]
    fn surrender_only_when_enabled() {
        let config = ThresholdConfig::new("t", 17, 13, 12);
        let player = hand_of(&[Rank::Ten, Rank::Six]);
        let dealer = hand_of(&[Rank::Ten, Rank::Seven]);

        let rule = Rule::default();
        let mut strategy = ThresholdStrategy::new(&config);
        strategy.init_with_initial_situation(&rule, &situation((Rank::Ten, Rank::Six), Rank::Ten));
        assert_eq!(strategy.make_decision(&rule, &player, &dealer), Decision::Hit);

        let rule = Rule {
            surrender_policy: SurrenderPolicy::LateSurrender,
            ..Default::default()
        };
        strategy.init_with_initial_situation(&rule, &situation((Rank::Ten, Rank::Six), Rank::Ten));
        assert_eq!(strategy.make_decision(&rule, &player, &dealer), Decision::Surrender);

        let three_cards = hand_of(&[Rank::Ten, Rank::Four, Rank::Two]);
        assert_eq!(strategy.make_decision(&rule, &three_cards, &dealer), Decision::Hit);
    }

    #[test]
    fn surrender_chart() {
        assert!(should_surrender(16, 11));
        assert!(should_surrender(16, 9));
        assert!(!should_surrender(16, 8));
        assert!(should_surrender(15, 10));
        assert!(!should_surrender(15, 11));
        assert!(!should_surrender(14, 10));
    }

    #[test]
    fn settlement_table() {
        assert_eq!(settle(BUST, BUST, 2.0), 0.0);
        assert_eq!(settle(BUST, 18, 1.0), -1.0);
        assert_eq!(settle(20, BUST, 2.0), 2.0);
        assert_eq!(settle(20, 19, 1.0), 1.0);
        assert_eq!(settle(19, 19, 1.0), -1.0);
        assert_eq!(settle(17, 20, 2.0), -2.0);
    }

    #[test]
    fn blackjack_pays_three_to_two() {
        assert_eq!(settle_blackjack(20, 1.0, 1.5), 1.5);
        assert_eq!(settle_blackjack(21, 1.0, 1.5), 0.0);
    }
}
