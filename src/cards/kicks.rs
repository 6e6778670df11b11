use std::fmt::{Display, Formatter, Result};

/// tiebreaker rank bits not already captured by the Ranking's own rank fields.
/// higher bits == higher ranks, so comparing the raw mask as an integer already
/// gives the correct kicker ordering (derive(Ord) falls out for free).
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Kickers(u16);

impl From<u16> for Kickers {
    fn from(mask: u16) -> Self {
        Self(mask)
    }
}
impl From<Kickers> for u16 {
    fn from(k: Kickers) -> Self {
        k.0
    }
}

impl Display for Kickers {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{:013b}", self.0)
    }
}
