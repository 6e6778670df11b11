use super::card::Card;
use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::suit::Suit;

/// evaluates a 5-to-7 card Hand by bitwise rank-histogram and suit-mask inspection,
/// ranking categories from strongest to weakest and emitting the first that applies.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    /// the public evaluator contract (showdown, benchmarks) always passes 5..7
    /// cards; the category cascade itself degrades gracefully on fewer (straight
    /// and flush checks simply never fire), which the discard bucket relies on to
    /// rank relative hand quality before the board is complete.
    fn from(h: Hand) -> Self {
        assert!(!h.is_empty(), "evaluator requires at least one card");
        Self(h)
    }
}

impl Evaluator {
    pub fn find_ranking(&self) -> Ranking {
        None.or_else(|| self.find_straight_flush())
            .or_else(|| self.find_4_oak())
            .or_else(|| self.find_3_oak_2_oak())
            .or_else(|| self.find_flush())
            .or_else(|| self.find_straight())
            .or_else(|| self.find_3_oak())
            .or_else(|| self.find_2_oak_2_oak())
            .or_else(|| self.find_1_oak())
            .expect("at least 5 cards in hand")
    }

    pub fn find_kickers(&self, value: Ranking) -> Kickers {
        let n = value.n_kickers();
        if n == 0 {
            return Kickers::from(0u16);
        }
        let (primary, universe) = match value {
            Ranking::Flush(_) => {
                let suit = self.find_suit_of_flush().expect("flush suit exists");
                (value.mask(), self.suit_masks()[suit as usize])
            }
            _ => (value.mask(), self.rank_masks()),
        };
        let mut bits = universe & !primary;
        while (bits.count_ones() as usize) > n {
            bits &= !(1 << bits.trailing_zeros());
        }
        Kickers::from(bits)
    }

    //

    fn find_1_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(1).map(Ranking::HighCard)
    }
    fn find_3_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3).map(Ranking::ThreeOAK)
    }
    fn find_4_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(4).map(Ranking::FourOAK)
    }
    fn find_2_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2).and_then(|hi| {
            self.find_rank_of_n_oak_under(2, Some(hi))
                .map(|lo| Ranking::TwoPair(hi, lo))
                .or(Some(Ranking::OnePair(hi)))
        })
    }
    fn find_3_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3).and_then(|trips| {
            self.find_rank_of_n_oak_under(2, Some(trips))
                .map(|pair| Ranking::FullHouse(trips, pair))
        })
    }
    fn find_straight(&self) -> Option<Ranking> {
        self.find_rank_of_straight(self.rank_masks())
            .map(Ranking::Straight)
    }
    fn find_flush(&self) -> Option<Ranking> {
        self.find_suit_of_flush().map(|suit| {
            let bits = self.suit_masks()[suit as usize];
            Ranking::Flush(Rank::from(bits))
        })
    }
    fn find_straight_flush(&self) -> Option<Ranking> {
        self.find_suit_of_flush()
            .and_then(|suit| self.find_rank_of_straight_flush(suit))
            .map(Ranking::StraightFlush)
    }

    //

    fn find_rank_of_straight(&self, hand: u16) -> Option<Rank> {
        const WHEEL: u16 = 0b_1_0000_0000_1111;
        let mut bits = hand;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        if bits > 0 {
            Some(Rank::from(bits))
        } else if WHEEL == (WHEEL & hand) {
            Some(Rank::Five)
        } else {
            None
        }
    }
    fn find_rank_of_straight_flush(&self, suit: Suit) -> Option<Rank> {
        let bits = self.suit_masks()[suit as usize];
        self.find_rank_of_straight(bits)
    }
    fn find_suit_of_flush(&self) -> Option<Suit> {
        self.suit_count()
            .iter()
            .position(|&n| n >= 5)
            .map(|i| Suit::from(i as u8))
    }
    fn find_rank_of_n_oak_under(&self, oak: usize, rank: Option<Rank>) -> Option<Rank> {
        let counts = self.rank_counts();
        let ceiling = rank.map(|r| r.n() as usize).unwrap_or(13);
        (0..ceiling)
            .rev()
            .find(|&r| counts[r] as usize >= oak)
            .map(|r| Rank::from(r as u8))
    }
    fn find_rank_of_n_oak(&self, n: usize) -> Option<Rank> {
        self.find_rank_of_n_oak_under(n, None)
    }

    //

    /// how many cards of each rank are in the hand, ignoring suit
    fn rank_counts(&self) -> [u8; 13] {
        Vec::<Card>::from(self.0)
            .iter()
            .fold([0u8; 13], |mut counts, c| {
                counts[c.rank().n() as usize] += 1;
                counts
            })
    }
    /// which ranks are present in the hand, ignoring suit
    fn rank_masks(&self) -> u16 {
        Vec::<Card>::from(self.0)
            .iter()
            .map(|c| u16::from(c.rank()))
            .fold(0, |acc, r| acc | r)
    }
    /// how many cards of each suit are in the hand, ignoring rank
    fn suit_count(&self) -> [u8; 4] {
        Vec::<Card>::from(self.0)
            .iter()
            .map(|c| c.suit() as u8)
            .fold([0; 4], |mut counts, s| {
                counts[s as usize] += 1;
                counts
            })
    }
    /// which ranks are present in the hand, grouped by suit
    fn suit_masks(&self) -> [u16; 4] {
        Vec::<Card>::from(self.0)
            .iter()
            .map(|c| (c.suit() as u8, u16::from(c.rank())))
            .fold([0; 4], |mut suits, (s, r)| {
                suits[s as usize] |= r;
                suits
            })
    }
}
