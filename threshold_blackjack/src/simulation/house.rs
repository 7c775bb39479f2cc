use crate::GameError;

use super::{deck::Deck, hand::Hand, Card};

use rand::Rng;

/// The dealer of a single game. Owns a private deck and the house hand.
#[derive(Debug, Clone)]
pub struct House {
    deck: Deck,
    hand: Hand,
}

impl House {
    /// Copies the card definition and shuffles it once.
    pub fn new<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> House {
        let mut deck = Deck::from_cards(cards);
        deck.shuffle(rng);
        House::with_deck(deck)
    }

    /// Uses the deck as it is, without shuffling.
    pub fn with_deck(deck: Deck) -> House {
        House {
            deck,
            hand: Hand::new(),
        }
    }

    /// Deals house, player, house, player. Keeps the two house cards and returns the
    /// two player cards.
    pub fn deal_initial_cards(&mut self) -> Result<(Card, Card), GameError> {
        let house_first_card = self.deck.pop()?;
        let player_first_card = self.deck.pop()?;
        let house_second_card = self.deck.pop()?;
        let player_second_card = self.deck.pop()?;

        self.hand.add_card(house_first_card);
        self.hand.add_card(house_second_card);

        Ok((player_first_card, player_second_card))
    }

    pub fn hit_player(&mut self) -> Result<Card, GameError> {
        self.deck.pop()
    }

    /// Draws until the house reaches `stands_on` or busts.
    pub fn complete_hand(&mut self, stands_on: u16) -> Result<(), GameError> {
        while self.hand.best_total() < stands_on {
            let card = self.deck.pop()?;
            self.hand.add_card(card);
        }
        Ok(())
    }

    /// The first card the house was dealt.
    pub fn upcard(&self) -> Option<Card> {
        self.hand.get_cards().first().copied()
    }

    pub fn get_hand(&self) -> &Hand {
        &self.hand
    }

    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }
}
