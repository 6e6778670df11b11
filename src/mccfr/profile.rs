use crate::game::BettingAction;
use crate::Probability;
use crate::Utility;
use std::collections::BTreeMap;

/// the accumulated regret and average-strategy mass for every infoset visited
/// during training, keyed directly by the infoset key string built by
/// `GameState::infoset_key`.
#[derive(Debug, Default, Clone)]
pub struct Profile {
    iterations: u64,
    regret_sum: BTreeMap<String, BTreeMap<BettingAction, Utility>>,
    strategy_sum: BTreeMap<String, BTreeMap<BettingAction, Probability>>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn infoset_count(&self) -> usize {
        self.regret_sum.len()
    }

    pub fn has_seen(&self, infoset: &str) -> bool {
        self.strategy_sum.contains_key(infoset)
    }

    /// combines two independently trained profiles by elementwise addition of
    /// their regret and strategy tables -- both are additive monoids, so a
    /// sharded `parallel` run can merge worker profiles without re-deriving
    /// anything. Iteration counts add too, reflecting the total work done
    /// across shards.
    pub fn merge(mut self, other: Profile) -> Profile {
        self.iterations += other.iterations;
        for (infoset, row) in other.regret_sum {
            let entry = self.regret_sum.entry(infoset).or_default();
            for (action, value) in row {
                *entry.entry(action).or_insert(0.0) += value;
            }
        }
        for (infoset, row) in other.strategy_sum {
            let entry = self.strategy_sum.entry(infoset).or_default();
            for (action, value) in row {
                *entry.entry(action).or_insert(0.0) += value;
            }
        }
        self
    }

    /// advances the iteration counter and returns the new count.
    pub fn next(&mut self) -> u64 {
        self.iterations += 1;
        self.iterations
    }

    /// current strategy at `infoset` over `actions`, via regret matching:
    /// proportional to positive regret, uniform if no action has positive
    /// regret yet.
    pub fn sigma(&self, infoset: &str, actions: &[BettingAction]) -> BTreeMap<BettingAction, Probability> {
        let row = self.regret_sum.get(infoset);
        let positive: Vec<Utility> = actions
            .iter()
            .map(|a| row.and_then(|r| r.get(a)).copied().unwrap_or(0.0).max(0.0))
            .collect();
        let total: Utility = positive.iter().sum();
        if total > 0.0 {
            actions
                .iter()
                .zip(positive.iter())
                .map(|(&a, &r)| (a, r / total))
                .collect()
        } else {
            let uniform = 1.0 / actions.len() as Probability;
            actions.iter().map(|&a| (a, uniform)).collect()
        }
    }

    /// accumulates instantaneous regret for each action at `infoset`, per the
    /// external-sampling update `regret_sum[I][a] += v(a) - v_bar`.
    pub fn add_regret(&mut self, infoset: &str, action: BettingAction, regret: Utility) {
        *self
            .regret_sum
            .entry(infoset.to_string())
            .or_default()
            .entry(action)
            .or_insert(0.0) += regret;
        log::trace!("regret[{infoset}][{action}] += {regret}");
    }

    /// accumulates `sigma` into the running average-strategy mass at
    /// `infoset`.
    pub fn add_strategy(&mut self, infoset: &str, sigma: &BTreeMap<BettingAction, Probability>) {
        let row = self.strategy_sum.entry(infoset.to_string()).or_default();
        for (&action, &probability) in sigma {
            *row.entry(action).or_insert(0.0) += probability;
        }
        log::trace!("policy[{infoset}] += {sigma:?}");
    }

    /// the averaged policy that converges to Nash, normalized over
    /// `actions`. Unseen infosets fall back to uniform.
    pub fn average_policy(&self, infoset: &str, actions: &[BettingAction]) -> BTreeMap<BettingAction, Probability> {
        let row = match self.strategy_sum.get(infoset) {
            Some(row) => row,
            None => {
                let uniform = 1.0 / actions.len() as Probability;
                return actions.iter().map(|&a| (a, uniform)).collect();
            }
        };
        let total: Probability = actions.iter().map(|a| row.get(a).copied().unwrap_or(0.0)).sum();
        if total > 0.0 {
            actions
                .iter()
                .map(|&a| (a, row.get(&a).copied().unwrap_or(0.0) / total))
                .collect()
        } else {
            let uniform = 1.0 / actions.len() as Probability;
            actions.iter().map(|&a| (a, uniform)).collect()
        }
    }

    pub(crate) fn regret_sum(&self) -> &BTreeMap<String, BTreeMap<BettingAction, Utility>> {
        &self.regret_sum
    }
    pub(crate) fn strategy_sum(&self) -> &BTreeMap<String, BTreeMap<BettingAction, Probability>> {
        &self.strategy_sum
    }
    pub(crate) fn from_parts(
        iterations: u64,
        regret_sum: BTreeMap<String, BTreeMap<BettingAction, Utility>>,
        strategy_sum: BTreeMap<String, BTreeMap<BettingAction, Probability>>,
    ) -> Self {
        Self {
            iterations,
            regret_sum,
            strategy_sum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_infoset_is_uniform() {
        let profile = Profile::new();
        let actions = vec![BettingAction::Fold, BettingAction::CheckCall];
        let sigma = profile.sigma("nowhere", &actions);
        assert!((sigma[&BettingAction::Fold] - 0.5).abs() < 1e-6);
        assert!((sigma[&BettingAction::CheckCall] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn positive_regret_skews_sigma() {
        let mut profile = Profile::new();
        let actions = vec![BettingAction::Fold, BettingAction::CheckCall];
        profile.add_regret("I", BettingAction::CheckCall, 10.0);
        let sigma = profile.sigma("I", &actions);
        assert!(sigma[&BettingAction::CheckCall] > sigma[&BettingAction::Fold]);
    }

    #[test]
    fn negative_only_regret_falls_back_to_uniform() {
        let mut profile = Profile::new();
        let actions = vec![BettingAction::Fold, BettingAction::CheckCall];
        profile.add_regret("I", BettingAction::CheckCall, -5.0);
        let sigma = profile.sigma("I", &actions);
        assert!((sigma[&BettingAction::Fold] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn average_policy_normalizes_accumulated_mass() {
        let mut profile = Profile::new();
        let actions = vec![BettingAction::Fold, BettingAction::CheckCall];
        let mut sigma = BTreeMap::new();
        sigma.insert(BettingAction::Fold, 0.25);
        sigma.insert(BettingAction::CheckCall, 0.75);
        profile.add_strategy("I", &sigma);
        profile.add_strategy("I", &sigma);
        let avg = profile.average_policy("I", &actions);
        assert!((avg[&BettingAction::CheckCall] - 0.75).abs() < 1e-6);
    }

    #[test]
    fn merge_sums_overlapping_regret_and_iterations() {
        let mut a = Profile::new();
        a.add_regret("I", BettingAction::Fold, 1.0);
        a.next();
        let mut b = Profile::new();
        b.add_regret("I", BettingAction::Fold, 2.0);
        b.next();
        let merged = a.merge(b);
        assert_eq!(merged.iterations(), 2);
        assert_eq!(merged.regret_sum()["I"][&BettingAction::Fold], 3.0);
    }

    #[test]
    fn merging_disjoint_infosets_equals_one_concatenated_run() {
        let mut a = Profile::new();
        a.add_regret("I_a", BettingAction::Fold, 1.0);
        a.add_regret("I_a", BettingAction::CheckCall, 4.0);
        let mut b = Profile::new();
        b.add_regret("I_b", BettingAction::Fold, 7.0);

        let mut combined = Profile::new();
        combined.add_regret("I_a", BettingAction::Fold, 1.0);
        combined.add_regret("I_a", BettingAction::CheckCall, 4.0);
        combined.add_regret("I_b", BettingAction::Fold, 7.0);

        let merged = a.merge(b);
        assert_eq!(merged.regret_sum(), combined.regret_sum());
    }

    #[test]
    fn sigma_is_a_non_negative_probability_distribution_over_any_regret_history() {
        let actions = vec![
            BettingAction::Fold,
            BettingAction::CheckCall,
            BettingAction::Bet33,
            BettingAction::AllIn,
        ];
        let mut profile = Profile::new();
        profile.add_regret("I", BettingAction::Fold, -3.0);
        profile.add_regret("I", BettingAction::CheckCall, 2.5);
        profile.add_regret("I", BettingAction::Bet33, 0.0);
        profile.add_regret("I", BettingAction::AllIn, 6.0);

        let sigma = profile.sigma("I", &actions);
        let total: Probability = sigma.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(sigma.values().all(|&p| p >= 0.0));
    }

    #[test]
    fn iterations_counts_monotonically() {
        let mut profile = Profile::new();
        assert_eq!(profile.next(), 1);
        assert_eq!(profile.next(), 2);
        assert_eq!(profile.iterations(), 2);
    }
}
