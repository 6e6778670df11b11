use super::action::BettingAction;
use super::settlement;
use super::state::{street_index, GameState, Terminal};
use crate::abstraction::{infoset_key, DiscardBucket, Position, PostflopBucket, PreflopBucket};
use crate::cards::{Hand, Street};
use crate::{Chips, MAX_RAISES_PER_STREET, Utility};

fn div_ceil(numerator: Chips, denominator: Chips) -> Chips {
    (numerator + denominator - 1) / denominator
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    /// utility in chips relative to the seat's own stake, zero-sum across both seats.
    pub fn utility(&self, seat: usize) -> Utility {
        settlement::settle(self)[seat] as Utility
    }

    pub fn legal_actions(&self) -> Vec<BettingAction> {
        if self.terminal.is_some() {
            return Vec::new();
        }
        if self.street == Street::Discard {
            return vec![
                BettingAction::Discard0,
                BettingAction::Discard1,
                BettingAction::Discard2,
            ];
        }

        let to_call = self.to_call();
        let stack = self.stack[self.to_act];
        let mut options = Vec::new();
        if to_call > 0 {
            options.push(BettingAction::Fold);
        }
        options.push(BettingAction::CheckCall);

        if self.raises_this_street < MAX_RAISES_PER_STREET && stack > to_call {
            let effective_pot = self.pot + to_call;
            let sized = [
                (BettingAction::Bet33, div_ceil(effective_pot, 3)),
                (BettingAction::Bet66, div_ceil(2 * effective_pot, 3)),
                (BettingAction::BetPot, effective_pot),
            ];
            for (action, raise_amount) in sized {
                if to_call + raise_amount < stack {
                    options.push(action);
                }
            }
            options.push(BettingAction::AllIn);
        }
        assert!(!options.is_empty());
        options
    }

    /// applies `action` (which must be among `legal_actions()`) and returns the
    /// resulting state.
    pub fn apply_action(&self, action: BettingAction) -> Self {
        assert!(self.legal_actions().contains(&action), "illegal action {:?}", action);
        let mut next = self.clone();
        if let Some(index) = action.discard_index() {
            next.apply_discard(index);
        } else {
            next.apply_bet(action);
        }
        next
    }

    fn apply_discard(&mut self, index: usize) {
        let seat = self.to_act;
        let card = self.hole[seat][index];
        self.discarded[seat] = Some(card);
        self.board.push(card);
        if self.discarded[self.other(seat)].is_some() {
            self.deal_next_street();
        } else {
            self.to_act = self.other(seat);
        }
    }

    fn apply_bet(&mut self, action: BettingAction) {
        let seat = self.to_act;
        let to_call = self.to_call();
        let opening = self.raises_this_street == 0;

        match action {
            BettingAction::Fold => {
                self.terminal = Some(Terminal::FoldBy(seat));
                self.push_history(action.history_token(opening));
                return;
            }
            BettingAction::CheckCall => {
                let amount = to_call.min(self.stack[seat]);
                self.commit(seat, amount);
                self.push_history(action.history_token(opening));
            }
            BettingAction::Bet33 | BettingAction::Bet66 | BettingAction::BetPot | BettingAction::AllIn => {
                let effective_pot = self.pot + to_call;
                let raise_amount = match action {
                    BettingAction::Bet33 => div_ceil(effective_pot, 3),
                    BettingAction::Bet66 => div_ceil(2 * effective_pot, 3),
                    BettingAction::BetPot => effective_pot,
                    BettingAction::AllIn => self.stack[seat] - to_call,
                    _ => unreachable!(),
                };
                let amount = (to_call + raise_amount).min(self.stack[seat]);
                self.commit(seat, amount);
                self.raises_this_street += 1;
                self.push_history(action.history_token(opening));
            }
            BettingAction::Discard0 | BettingAction::Discard1 | BettingAction::Discard2 => {
                unreachable!("discards are routed through apply_discard")
            }
        }

        self.acted_this_street[seat] = true;
        if self.round_complete() {
            self.deal_next_street();
        } else {
            self.to_act = self.other(seat);
        }
    }

    fn commit(&mut self, seat: usize, amount: Chips) {
        self.stack[seat] -= amount;
        self.pot += amount;
        self.spent[seat] += amount;
        self.stake[seat] += amount;
    }

    fn push_history(&mut self, token: char) {
        let index = street_index(self.street);
        self.history[index].push(token);
    }

    fn round_complete(&self) -> bool {
        let touched = self.acted_this_street[0] && self.acted_this_street[1];
        if !touched {
            return false;
        }
        let matched = self.stake[0] == self.stake[1];
        let someone_all_in = self.stack[0] == 0 || self.stack[1] == 0;
        matched || someone_all_in
    }

    /// begins the next street: deals community cards for Flop/Turn/River, or hands
    /// off to the no-betting Discard street, or ends the hand at Showdown.
    fn deal_next_street(&mut self) {
        let next = self.street.next();
        self.stake = [0; crate::N];
        self.raises_this_street = 0;
        self.acted_this_street = [false; crate::N];
        match next {
            Street::Flop => {
                self.board.extend(self.deck.draw(next.n_dealt()));
                self.street = next;
                self.to_act = self.other(self.button);
            }
            Street::Discard => {
                self.street = next;
                self.to_act = self.other(self.button);
            }
            Street::Turn | Street::River => {
                self.board.extend(self.deck.draw(next.n_dealt()));
                self.street = next;
                self.to_act = self.other(self.button);
            }
            Street::Showdown => {
                self.street = next;
                self.terminal = Some(Terminal::Showdown);
            }
            Street::Preflop => unreachable!("preflop is never reentered"),
        }
    }

    /// the canonical information-set key for `seat`, built only from `seat`'s own
    /// hole cards and whatever is publicly visible -- never the opponent's hole.
    pub fn infoset_key(&self, seat: usize) -> String {
        let position = Position::of(seat, self.button, self.street);
        match self.street {
            Street::Preflop => {
                let bucket = PreflopBucket::of(self.hole(seat));
                infoset_key(self.street, position, &bucket, self.history_of(Street::Preflop))
            }
            Street::Flop | Street::Turn | Street::River => {
                let pool = Hand::from(self.hole(seat).to_vec()).union(Hand::from(self.board().to_vec()));
                let bucket = PostflopBucket::of(pool, self.board());
                infoset_key(self.street, position, &bucket, self.history_of(self.street))
            }
            Street::Discard => {
                let bucket = DiscardBucket::of(self.hole(seat), self.board());
                infoset_key(self.street, position, &bucket, "")
            }
            Street::Showdown => panic!("no infoset at a terminal street"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::GameState;

    #[test]
    fn fold_terminates_immediately() {
        let state = GameState::new(1);
        let state = state.apply_action(BettingAction::Fold);
        assert!(state.is_terminal());
        assert_eq!(state.terminal(), Some(Terminal::FoldBy(0)));
    }

    #[test]
    fn checking_through_reaches_flop() {
        let state = GameState::new(1);
        let state = state.apply_action(BettingAction::CheckCall); // sb calls
        let state = state.apply_action(BettingAction::CheckCall); // bb checks
        assert_eq!(state.street(), Street::Flop);
        assert_eq!(state.board().len(), 2);
    }

    #[test]
    fn discard_sequence_reaches_turn() {
        let mut state = GameState::new(1);
        state = state.apply_action(BettingAction::CheckCall);
        state = state.apply_action(BettingAction::CheckCall);
        assert_eq!(state.street(), Street::Flop);
        state = state.apply_action(BettingAction::CheckCall);
        state = state.apply_action(BettingAction::CheckCall);
        assert_eq!(state.street(), Street::Discard);
        state = state.apply_action(BettingAction::Discard0);
        assert!(!state.is_terminal());
        assert_eq!(state.street(), Street::Discard);
        state = state.apply_action(BettingAction::Discard1);
        assert_eq!(state.street(), Street::Turn);
        assert_eq!(state.board().len(), 5); // flop(2) + 2 discards + turn(1)
    }

    #[test]
    fn full_hand_reaches_showdown() {
        let mut state = GameState::new(1);
        for _ in 0..2 {
            state = state.apply_action(BettingAction::CheckCall);
        }
        for _ in 0..2 {
            state = state.apply_action(BettingAction::CheckCall);
        }
        state = state.apply_action(BettingAction::Discard0);
        state = state.apply_action(BettingAction::Discard0);
        for _ in 0..2 {
            state = state.apply_action(BettingAction::CheckCall);
        }
        for _ in 0..2 {
            state = state.apply_action(BettingAction::CheckCall);
        }
        assert!(state.is_terminal());
        assert_eq!(state.terminal(), Some(Terminal::Showdown));
        let u0 = state.utility(0);
        let u1 = state.utility(1);
        assert!((u0 + u1).abs() < 1e-6);
    }

    #[test]
    fn infoset_key_hides_opponent_hole() {
        let state = GameState::new(5);
        let key0 = state.infoset_key(0);
        let key1 = state.infoset_key(1);
        // same street/history, but private bucket must differ for distinct hands
        assert_ne!(key0, key1);
    }

    #[test]
    fn pot_always_equals_the_sum_of_both_stakes() {
        let mut state = GameState::new(9);
        assert_eq!(state.pot(), state.spent(0) + state.spent(1));
        state = state.apply_action(BettingAction::Bet33);
        assert_eq!(state.pot(), state.spent(0) + state.spent(1));
        state = state.apply_action(BettingAction::CheckCall);
        assert_eq!(state.pot(), state.spent(0) + state.spent(1));
    }

    #[test]
    fn infoset_key_is_unchanged_by_swapping_opponent_hole_cards() {
        let base = GameState::new(5);
        let mut swapped = base.clone();
        swapped.hole[1] = vec![base.hole[0][0], base.hole[0][1], base.hole[0][2]];
        assert_eq!(base.infoset_key(0), swapped.infoset_key(0));
    }
}
