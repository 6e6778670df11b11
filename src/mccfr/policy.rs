use super::profile::Profile;
use crate::game::{BettingAction, GameState};
use crate::Probability;
use rand::Rng;

/// a read-only snapshot of a trained `Profile`, used at play time to sample
/// from the averaged strategy. Never panics (matching the "never aborts"
/// runtime contract): any inconsistency between the engine's legal actions
/// and what the profile has seen degrades to `None`, signalling the caller
/// to fall back to an external heuristic rather than this crate improvising
/// one.
pub struct Policy {
    profile: Profile,
}

impl From<Profile> for Policy {
    fn from(profile: Profile) -> Self {
        Self { profile }
    }
}

impl Policy {
    /// samples an action for the seat to act in `state` from the averaged
    /// strategy at its infoset, using `rng`. Returns `None` if the infoset
    /// was never visited during training -- the caller should escalate to a
    /// fallback heuristic rather than treat this as an error.
    pub fn decide<R: Rng>(&self, state: &GameState, rng: &mut R) -> Option<BettingAction> {
        if state.is_terminal() {
            return None;
        }
        let seat = state.to_act();
        let infoset = state.infoset_key(seat);
        let actions = state.legal_actions();
        if actions.is_empty() {
            return None;
        }
        if !self.profile.has_seen(&infoset) {
            return None;
        }
        let averaged = self.profile.average_policy(&infoset, &actions);
        Some(sample(&actions, &averaged, rng))
    }

    pub fn iterations(&self) -> u64 {
        self.profile.iterations()
    }
}

fn sample<R: Rng>(
    actions: &[BettingAction],
    weights: &std::collections::BTreeMap<BettingAction, Probability>,
    rng: &mut R,
) -> BettingAction {
    let mut draw: Probability = rng.random();
    for &action in actions {
        let weight = weights.get(&action).copied().unwrap_or(0.0);
        if draw < weight {
            return action;
        }
        draw -= weight;
    }
    *actions.last().expect("legal_actions is never empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn unseen_infoset_returns_none() {
        let policy = Policy::from(Profile::new());
        let state = GameState::new(3);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(policy.decide(&state, &mut rng), None);
    }

    #[test]
    fn seen_infoset_returns_a_legal_action() {
        let state = GameState::new(3);
        let infoset = state.infoset_key(state.to_act());
        let mut profile = Profile::new();
        profile.add_regret(&infoset, BettingAction::CheckCall, 1.0);
        let policy = Policy::from(profile);
        let mut rng = SmallRng::seed_from_u64(1);
        let action = policy.decide(&state, &mut rng).expect("infoset was seeded");
        assert!(state.legal_actions().contains(&action));
    }
}
