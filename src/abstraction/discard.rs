use crate::cards::{Card, Evaluator, Hand};
use std::fmt::{Display, Formatter, Result};

/// evaluator category reached by keeping each of the three hole cards and tossing
/// the other two, plus which toss is best. Encodes *relative* card quality so the
/// trained strategy reflects which discard preserves the most equity.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct DiscardBucket {
    category_if_drop: [u8; 3],
    best_index: u8,
}

impl DiscardBucket {
    /// `hole` must have exactly 3 cards; `board` is whatever community cards are
    /// visible at the moment of the discard decision.
    pub fn of(hole: &[Card], board: &[Card]) -> Self {
        assert_eq!(hole.len(), 3, "discard bucket needs exactly 3 hole cards");
        let mut categories = [0u8; 3];
        for (drop_index, category) in categories.iter_mut().enumerate() {
            let kept: Vec<Card> = hole
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != drop_index)
                .map(|(_, &c)| c)
                .collect();
            let pool = Hand::from(kept).union(Hand::from(board.to_vec()));
            *category = Evaluator::from(pool).find_ranking().category();
        }
        let best_index = (0..3)
            .max_by_key(|&i| categories[i])
            .expect("three candidates") as u8;
        Self {
            category_if_drop: categories,
            best_index,
        }
    }

    pub fn best_index(&self) -> u8 {
        self.best_index
    }
}

impl Display for DiscardBucket {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "d{}{}{}_best{}",
            self.category_if_drop[0],
            self.category_if_drop[1],
            self.category_if_drop[2],
            self.best_index
        )
    }
}
