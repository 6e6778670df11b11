use super::card::Card;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// a shuffled, depleting stack of cards dealt from the top
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// a fresh 52-card deck shuffled with the given seed. the same seed always
    /// yields the same shuffle, which is what gives MCCFR training its
    /// seed-stream determinism.
    pub fn new(rng: &mut SmallRng) -> Self {
        let mut cards: Vec<Card> = (0..52).map(Card::from).collect();
        cards.shuffle(rng);
        Self { cards }
    }

    /// draw the next `n` cards. panics if the deck can't supply them; a
    /// training-loop bug, not a recoverable condition.
    pub fn draw(&mut self, n: usize) -> Vec<Card> {
        assert!(self.cards.len() >= n, "deck exhausted");
        self.cards.split_off(self.cards.len() - n)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}
