use super::{hand::Hand, Card};

/// The single player of a game: a hand and the money currently at stake.
#[derive(Debug, Clone)]
pub struct Player {
    hand: Hand,
    bet: f64,
    doubled: bool,
    surrendered: bool,
}

impl Player {
    pub fn new(bet: f64) -> Player {
        Player {
            hand: Hand::new(),
            bet,
            doubled: false,
            surrendered: false,
        }
    }

    pub fn receive_initial_cards(&mut self, cards: (Card, Card)) {
        self.hand.add_card(cards.0);
        self.hand.add_card(cards.1);
    }

    pub fn hit(&mut self, card: Card) {
        self.hand.add_card(card);
    }

    /// Takes exactly one card and doubles the bet. The bet is doubled only once.
    pub fn double(&mut self, card: Card) {
        self.hand.add_card(card);
        if !self.doubled {
            self.bet *= 2.0;
            self.doubled = true;
        }
    }

    /// Gives up the hand for half of the bet.
    pub fn surrender(&mut self) {
        if !self.surrendered {
            self.bet /= 2.0;
            self.surrendered = true;
        }
    }

    pub fn get_hand(&self) -> &Hand {
        &self.hand
    }

    pub fn get_bet(&self) -> f64 {
        self.bet
    }

    pub fn has_doubled(&self) -> bool {
        self.doubled
    }

    pub fn has_surrendered(&self) -> bool {
        self.surrendered
    }
}
