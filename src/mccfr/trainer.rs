use super::profile::Profile;
use crate::game::GameState;
use crate::persist::TrainingConfig;
use crate::Utility;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// derives the RNG seed for iteration `t` of a run started from `base_seed`.
/// Reseeding independently every iteration (rather than advancing one
/// long-lived stream) means the randomness consumed by iteration `t` depends
/// only on `(base_seed, t)`, never on how many iterations ran before it --
/// so resuming from a checkpoint at iteration `k` and continuing reproduces
/// the same draws a single uninterrupted run would make at iterations
/// `k+1..`. A splitmix64-style finalizer gives the per-iteration seeds
/// enough diffusion that consecutive `t` don't produce correlated shuffles.
fn iteration_seed(base_seed: u64, t: u64) -> u64 {
    let mut z = base_seed.wrapping_add(t.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// owns the accumulated regret/strategy tables and drives external-sampling
/// MCCFR over freshly dealt `GameState` roots, via direct recursion rather
/// than an explicit tree, since this game has no shared-subgame reuse to
/// exploit.
pub struct Trainer {
    profile: Profile,
    config: TrainingConfig,
    rng: SmallRng,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            profile: Profile::new(),
            rng: SmallRng::seed_from_u64(config.seed),
            config,
        }
    }

    /// resumes a trainer from a loaded `Profile`. `config.seed` must be the
    /// same seed the original run used: each iteration reseeds its own RNG
    /// stream from `(config.seed, iteration)` (see `iteration_seed`), so the
    /// continuation is bitwise-identical to a single uninterrupted run given
    /// the same seed -- no RNG state needs to survive the checkpoint itself.
    pub fn from_checkpoint(profile: Profile, config: TrainingConfig) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(config.seed),
            profile,
            config,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// runs `config.iterations` further training iterations, alternating the
    /// traverser seat, checkpointing every `config.checkpoint_interval`
    /// iterations, and logging a rolling-mean root utility for convergence
    /// health. When the `parallel` feature is enabled and `config.shard_count`
    /// names more than one shard, splits the run across independent
    /// single-threaded trainers and merges their profiles additively.
    pub fn train(&mut self) -> anyhow::Result<()> {
        #[cfg(feature = "parallel")]
        if let Some(shards) = self.config.shard_count.filter(|&n| n > 1) {
            return self.train_sharded(shards);
        }
        self.train_sequential()
    }

    #[cfg(feature = "parallel")]
    fn train_sharded(&mut self, shards: usize) -> anyhow::Result<()> {
        use rayon::iter::IntoParallelIterator;
        use rayon::iter::ParallelIterator;
        log::info!("training {} iterations across {shards} shards", self.config.iterations);
        let per_shard = (self.config.iterations / shards as u64).max(1);
        let merged = (0..shards)
            .into_par_iter()
            .map(|shard| {
                let mut shard_config = self.config.clone();
                shard_config.iterations = per_shard;
                shard_config.seed = self.config.seed.wrapping_add(shard as u64);
                shard_config.checkpoint_path = format!("{}.shard{shard}", self.config.checkpoint_path);
                let mut trainer = Trainer::new(shard_config);
                trainer.train_sequential().map(|_| trainer.profile)
            })
            .collect::<anyhow::Result<Vec<Profile>>>()?;
        self.profile = merged
            .into_iter()
            .fold(std::mem::take(&mut self.profile), Profile::merge);
        crate::persist::save_checkpoint(&self.config.checkpoint_path, &self.profile)?;
        Ok(())
    }

    fn train_sequential(&mut self) -> anyhow::Result<()> {
        log::info!("training for {} iterations", self.config.iterations);
        #[cfg(feature = "native")]
        let bar = crate::progress(self.config.iterations as usize);
        let mut rolling_mean: Utility = 0.0;
        for _ in 0..self.config.iterations {
            let t = self.profile.next();
            let traverser = (t % 2) as usize;
            self.rng = SmallRng::seed_from_u64(iteration_seed(self.config.seed, t));
            let root = GameState::new(self.rng_seed());
            let value = self.cfr(&root, traverser);
            rolling_mean += (value - rolling_mean) / t as Utility;

            #[cfg(feature = "native")]
            bar.inc(1);

            if t % self.config.checkpoint_interval == 0 {
                log::info!(
                    "iteration {t}: rolling mean utility {rolling_mean:.4}, {} infosets",
                    self.profile.infoset_count()
                );
                if let Err(error) = crate::persist::save_checkpoint(&self.config.checkpoint_path, &self.profile) {
                    log::error!("checkpoint write failed at iteration {t}: {error}; will retry next boundary");
                }
            }
        }
        crate::persist::save_checkpoint(&self.config.checkpoint_path, &self.profile)?;
        #[cfg(feature = "native")]
        bar.finish();
        Ok(())
    }

    fn rng_seed(&mut self) -> u64 {
        use rand::RngCore;
        self.rng.next_u64()
    }

    /// the counterfactual value of `state` for `traverser`, mutating regret
    /// and strategy-sum tables at every `traverser` decision node along the
    /// sampled line. Opponent nodes sample a single action from the current
    /// regret-matched strategy rather than enumerating all of them
    /// (external sampling).
    fn cfr(&mut self, state: &GameState, traverser: usize) -> Utility {
        if state.is_terminal() {
            return state.utility(traverser);
        }

        let actor = state.to_act();
        let infoset = state.infoset_key(actor);
        let actions = state.legal_actions();
        let sigma = self.profile.sigma(&infoset, &actions);

        if actor != traverser {
            let action = self.sample(&actions, &sigma);
            let next = state.apply_action(action);
            return self.cfr(&next, traverser);
        }

        let values: Vec<Utility> = actions
            .iter()
            .map(|&action| {
                let next = state.apply_action(action);
                self.cfr(&next, traverser)
            })
            .collect();
        let baseline: Utility = actions
            .iter()
            .zip(values.iter())
            .map(|(a, &v)| sigma[a] * v)
            .sum();

        for (&action, &value) in actions.iter().zip(values.iter()) {
            self.profile.add_regret(&infoset, action, value - baseline);
        }
        self.profile.add_strategy(&infoset, &sigma);
        baseline
    }

    fn sample(
        &mut self,
        actions: &[crate::game::BettingAction],
        sigma: &std::collections::BTreeMap<crate::game::BettingAction, crate::Probability>,
    ) -> crate::game::BettingAction {
        use rand::Rng;
        let mut draw: crate::Probability = self.rng.random();
        for &action in actions {
            let weight = sigma[&action];
            if draw < weight {
                return action;
            }
            draw -= weight;
        }
        *actions.last().expect("legal_actions is never empty")
    }
}
