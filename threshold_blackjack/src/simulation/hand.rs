use super::Card;

pub const BLACKJACK: u16 = 21;
/// Reported by `best_total` when every total is over 21.
pub const BUST: u16 = BLACKJACK + 1;

/// Cards of one participant together with every total they can add up to.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    cards: Vec<Card>,
    /// Sorted ascending, no duplicates. Starts as `[0]`.
    totals: Vec<u16>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(4),
            totals: vec![0],
        }
    }

    /// Receives a card. Every existing total is combined with every value of the card.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        let points = card.points();
        let mut totals = Vec::with_capacity(self.totals.len() * points.len());
        for point in points {
            for total in &self.totals {
                totals.push(total + point);
            }
        }
        totals.sort_unstable();
        totals.dedup();
        self.totals = totals;
    }

    /// The greatest total not above 21, or `BUST`.
    pub fn best_total(&self) -> u16 {
        self.totals
            .iter()
            .rev()
            .find(|total| **total <= BLACKJACK)
            .copied()
            .unwrap_or(BUST)
    }

    pub fn is_bust(&self) -> bool {
        self.best_total() > BLACKJACK
    }

    pub fn has_total(&self, target: u16) -> bool {
        self.totals.binary_search(&target).is_ok()
    }

    /// True when the best total counts an ace as 11.
    pub fn is_soft(&self) -> bool {
        let best = self.best_total();
        best <= BLACKJACK && best >= 11 && self.has_total(best - 10)
    }

    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.best_total() == BLACKJACK
    }

    pub fn max_total(&self) -> u16 {
        self.totals.last().copied().unwrap_or(0)
    }

    pub fn get_cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get_totals(&self) -> &[u16] {
        &self.totals
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}
