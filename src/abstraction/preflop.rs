use crate::cards::{Card, Rank};
use std::fmt::{Display, Formatter, Result};

/// the three-card hole's strategic bucket, before any board is dealt.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum PreflopBucket {
    Trips(Tier),
    Pair(Tier, Tier),
    High(Tier, Suitedness),
}

/// coarse rank band, thresholds fixed at T/7/6 per the classic "broadway / middling /
/// small" heads-up split.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    High,
    Mid,
    Low,
}

impl Tier {
    fn of(rank: Rank) -> Self {
        let face = rank.n() + 2;
        if face >= 10 {
            Tier::High
        } else if (7..=9).contains(&face) {
            Tier::Mid
        } else {
            Tier::Low
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{}",
            match self {
                Tier::High => "high",
                Tier::Mid => "mid",
                Tier::Low => "low",
            }
        )
    }
}

/// how the three hole cards are suited relative to each other.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Suitedness {
    Mono,
    TwoSuit,
    Rainbow,
}

impl Suitedness {
    fn of(hole: &[Card]) -> Self {
        let mut suits: Vec<u8> = hole.iter().map(|c| c.suit() as u8).collect();
        suits.sort_unstable();
        suits.dedup();
        match suits.len() {
            1 => Suitedness::Mono,
            2 => Suitedness::TwoSuit,
            _ => Suitedness::Rainbow,
        }
    }
}

impl Display for Suitedness {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{}",
            match self {
                Suitedness::Mono => "mono",
                Suitedness::TwoSuit => "two_suit",
                Suitedness::Rainbow => "rainbow",
            }
        )
    }
}

impl PreflopBucket {
    /// classifies exactly three hole cards; panics on any other length (a
    /// programming error, not a recoverable condition).
    pub fn of(hole: &[Card]) -> Self {
        assert_eq!(hole.len(), 3, "preflop bucket needs exactly 3 hole cards");
        let mut ranks: Vec<Rank> = hole.iter().map(|c| c.rank()).collect();
        ranks.sort_unstable();

        if ranks[0] == ranks[1] && ranks[1] == ranks[2] {
            return PreflopBucket::Trips(Tier::of(ranks[2]));
        }
        if ranks[0] == ranks[1] || ranks[1] == ranks[2] {
            let (pair_rank, kicker_rank) = if ranks[0] == ranks[1] {
                (ranks[0], ranks[2])
            } else {
                (ranks[1], ranks[0])
            };
            return PreflopBucket::Pair(Tier::of(pair_rank), Tier::of(kicker_rank));
        }
        let high = *ranks.iter().max().expect("three cards");
        PreflopBucket::High(Tier::of(high), Suitedness::of(hole))
    }
}

impl Display for PreflopBucket {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PreflopBucket::Trips(tier) => write!(f, "trips_{}", tier),
            PreflopBucket::Pair(pair, kicker) => write!(f, "pair_{}_{}", pair, kicker),
            PreflopBucket::High(tier, suited) => write!(f, "high_{}_{}", tier, suited),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    #[test]
    fn trips_classified_by_rank_tier() {
        let hole = vec![
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::Ace, Suit::Heart),
            Card::new(Rank::Ace, Suit::Diamond),
        ];
        assert_eq!(PreflopBucket::of(&hole), PreflopBucket::Trips(Tier::High));
    }

    #[test]
    fn pair_with_kicker_tiers() {
        let hole = vec![
            Card::new(Rank::King, Suit::Spade),
            Card::new(Rank::King, Suit::Heart),
            Card::new(Rank::Four, Suit::Diamond),
        ];
        let bucket = PreflopBucket::of(&hole);
        assert_eq!(bucket.to_string(), "pair_high_low");
    }

    #[test]
    fn distinct_ranks_use_suitedness() {
        let mono = vec![
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::King, Suit::Spade),
            Card::new(Rank::Queen, Suit::Spade),
        ];
        let rainbow = vec![
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::King, Suit::Heart),
            Card::new(Rank::Queen, Suit::Diamond),
        ];
        assert_eq!(PreflopBucket::of(&mono).to_string(), "high_high_mono");
        assert_eq!(PreflopBucket::of(&rainbow).to_string(), "high_high_rainbow");
    }

    #[test]
    #[should_panic(expected = "3 hole cards")]
    fn wrong_length_panics() {
        let hole = vec![Card::new(Rank::Ace, Suit::Spade)];
        PreflopBucket::of(&hole);
    }
}
