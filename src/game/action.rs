use std::fmt::{Display, Formatter, Result};

/// the abstract 9-symbol betting alphabet. Bet sizes are resolved relative to the
/// pot at the moment the action is applied, not stored as chip amounts here.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum BettingAction {
    Fold,
    CheckCall,
    Bet33,
    Bet66,
    BetPot,
    AllIn,
    Discard0,
    Discard1,
    Discard2,
}

impl BettingAction {
    pub fn discard_index(&self) -> Option<usize> {
        match self {
            BettingAction::Discard0 => Some(0),
            BettingAction::Discard1 => Some(1),
            BettingAction::Discard2 => Some(2),
            _ => None,
        }
    }

    /// the single-character token this action contributes to the street's betting
    /// history string. Discards don't participate in a betting history.
    pub fn history_token(&self, is_opening_bet: bool) -> char {
        match self {
            BettingAction::Fold => 'f',
            BettingAction::CheckCall => 'c',
            BettingAction::Bet33 | BettingAction::Bet66 | BettingAction::BetPot | BettingAction::AllIn => {
                if is_opening_bet {
                    'b'
                } else {
                    'r'
                }
            }
            BettingAction::Discard0 | BettingAction::Discard1 | BettingAction::Discard2 => {
                unreachable!("discards don't enter the betting history")
            }
        }
    }
}

impl Display for BettingAction {
    fn fmt(&self, f: &mut Formatter) -> Result {
        #[cfg(feature = "native")]
        {
            use colored::Colorize;
            return write!(
                f,
                "{}",
                match self {
                    BettingAction::Fold => "FOLD".red().to_string(),
                    BettingAction::CheckCall => "CHECK/CALL".cyan().to_string(),
                    BettingAction::Bet33 => "BET_33".green().to_string(),
                    BettingAction::Bet66 => "BET_66".green().to_string(),
                    BettingAction::BetPot => "BET_POT".green().to_string(),
                    BettingAction::AllIn => "ALL_IN".magenta().to_string(),
                    BettingAction::Discard0 => "DISCARD_0".white().to_string(),
                    BettingAction::Discard1 => "DISCARD_1".white().to_string(),
                    BettingAction::Discard2 => "DISCARD_2".white().to_string(),
                }
            );
        }
        #[cfg(not(feature = "native"))]
        {
            write!(
                f,
                "{}",
                match self {
                    BettingAction::Fold => "FOLD",
                    BettingAction::CheckCall => "CHECK/CALL",
                    BettingAction::Bet33 => "BET_33",
                    BettingAction::Bet66 => "BET_66",
                    BettingAction::BetPot => "BET_POT",
                    BettingAction::AllIn => "ALL_IN",
                    BettingAction::Discard0 => "DISCARD_0",
                    BettingAction::Discard1 => "DISCARD_1",
                    BettingAction::Discard2 => "DISCARD_2",
                }
            )
        }
    }
}
