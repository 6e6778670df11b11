use crate::cards::{Card, Deck, Street};
use crate::{Chips, B_BLIND, HOLE_SIZE, N, S_BLIND, STACK};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fmt::{Display, Formatter};

/// why a GameState stopped accepting actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    FoldBy(usize),
    Showdown,
}

/// the full mutable state of a single playout; also doubles as the MCCFR node
/// representation, since `cfr` recurses directly over `GameState` values.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(super) hole: [Vec<Card>; N],
    pub(super) board: Vec<Card>,
    pub(super) deck: Deck,
    pub(super) street: Street,
    pub(super) pot: Chips,
    pub(super) stack: [Chips; N],
    pub(super) spent: [Chips; N],
    pub(super) stake: [Chips; N],
    pub(super) to_act: usize,
    pub(super) button: usize,
    pub(super) history: [String; 4],
    pub(super) discarded: [Option<Card>; N],
    pub(super) raises_this_street: usize,
    pub(super) acted_this_street: [bool; N],
    pub(super) terminal: Option<Terminal>,
}

/// index into `history` for the four betting streets; Discard has no betting round.
pub(super) fn street_index(street: Street) -> usize {
    match street {
        Street::Preflop => 0,
        Street::Flop => 1,
        Street::Turn => 2,
        Street::River => 3,
        Street::Discard | Street::Showdown => panic!("street has no betting history slot"),
    }
}

impl GameState {
    /// deals 3 cards to each player from a freshly shuffled deck seeded from `seed`,
    /// posts blinds, and leaves the small blind (seat 0, the button) to act first.
    pub fn new(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut deck = Deck::new(&mut rng);
        let hole = [deck.draw(HOLE_SIZE), deck.draw(HOLE_SIZE)];

        let mut state = Self {
            hole,
            board: Vec::new(),
            deck,
            street: Street::Preflop,
            pot: 0,
            stack: [STACK; N],
            spent: [0; N],
            stake: [0; N],
            to_act: 0,
            button: 0,
            history: Default::default(),
            discarded: [None, None],
            raises_this_street: 0,
            acted_this_street: [false; N],
            terminal: None,
        };
        state.post_blind(0, S_BLIND);
        state.post_blind(1, B_BLIND);
        state.to_act = state.button;
        state
    }

    fn post_blind(&mut self, seat: usize, amount: Chips) {
        let amount = amount.min(self.stack[seat]);
        self.stack[seat] -= amount;
        self.pot += amount;
        self.spent[seat] += amount;
        self.stake[seat] += amount;
    }

    pub fn street(&self) -> Street {
        self.street
    }
    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn to_act(&self) -> usize {
        self.to_act
    }
    pub fn button(&self) -> usize {
        self.button
    }
    pub fn stack(&self, seat: usize) -> Chips {
        self.stack[seat]
    }
    pub fn spent(&self, seat: usize) -> Chips {
        self.spent[seat]
    }
    pub fn hole(&self, seat: usize) -> &[Card] {
        &self.hole[seat]
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn discarded(&self, seat: usize) -> Option<Card> {
        self.discarded[seat]
    }
    pub fn terminal(&self) -> Option<Terminal> {
        self.terminal
    }
    pub fn history_of(&self, street: Street) -> &str {
        &self.history[street_index(street)]
    }

    pub(super) fn other(&self, seat: usize) -> usize {
        1 - seat
    }
    pub(super) fn to_call(&self) -> Chips {
        self.stake[self.other(self.to_act)] - self.stake[self.to_act]
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let board: Vec<String> = self.board.iter().map(|c| c.to_string()).collect();
        let line = format!(
            "{street:?} pot={pot} stacks=[{s0},{s1}] board=[{board}]",
            street = self.street,
            pot = self.pot,
            s0 = self.stack[0],
            s1 = self.stack[1],
            board = board.join(","),
        );
        #[cfg(feature = "native")]
        {
            use colored::Colorize;
            write!(f, "{}", line.bright_green())
        }
        #[cfg(not(feature = "native"))]
        {
            write!(f, "{}", line)
        }
    }
}
