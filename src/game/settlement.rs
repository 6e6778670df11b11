use super::state::{GameState, Terminal};
use crate::cards::{Hand, HandScore};
use crate::{Chips, N};

/// chips each seat nets relative to what they put in this hand (zero-sum: the two
/// entries always sum to zero). Specialized to two players: side-pot bookkeeping
/// collapses to "return the uncalled excess, then split the matched pot by
/// strength".
pub fn settle(state: &GameState) -> [Chips; N] {
    match state.terminal().expect("settlement requires a terminal state") {
        Terminal::FoldBy(folder) => {
            let winner = 1 - folder;
            let mut pnl = [0; N];
            pnl[folder] = -state.spent(folder);
            pnl[winner] = state.spent(folder);
            pnl
        }
        Terminal::Showdown => showdown(state),
    }
}

fn showdown(state: &GameState) -> [Chips; N] {
    let spent = [state.spent(0), state.spent(1)];
    let matched = spent[0].min(spent[1]);
    let excess = [spent[0] - matched, spent[1] - matched];
    let main_pot = matched * 2;

    let score = |seat: usize| {
        let pool = Hand::from(state.hole(seat).to_vec()).union(Hand::from(state.board().to_vec()));
        HandScore::from(pool)
    };
    let (s0, s1) = (score(0), score(1));

    let mut reward = excess;
    match s0.cmp(&s1) {
        std::cmp::Ordering::Greater => reward[0] += main_pot,
        std::cmp::Ordering::Less => reward[1] += main_pot,
        std::cmp::Ordering::Equal => {
            reward[0] += main_pot / 2;
            reward[1] += main_pot / 2 + main_pot % 2;
        }
    }
    [reward[0] - spent[0], reward[1] - spent[1]]
}
