use crate::GameError;

use super::{standard_deck, Card};

use rand::seq::SliceRandom;
use rand::Rng;

/// An ordered pile of cards dealt from its back. Cards never go back in.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Creates an ordered deck made of `number_of_decks` standard decks.
    pub fn new(number_of_decks: u8) -> Deck {
        let mut cards = Vec::with_capacity(number_of_decks as usize * 52);
        for _ in 0..number_of_decks {
            cards.extend(standard_deck());
        }
        Deck { cards }
    }

    /// Copies the given cards. The last card is dealt first.
    pub fn from_cards(cards: &[Card]) -> Deck {
        Deck {
            cards: cards.to_vec(),
        }
    }

    /// Creates a deck dealing the given cards from first to last.
    pub fn from_draw_order(cards: &[Card]) -> Deck {
        let mut cards = cards.to_vec();
        cards.reverse();
        Deck { cards }
    }

    /// Uniformly permutes the cards.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deals the card at the back of the deck.
    pub fn pop(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::DeckExhausted)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}
