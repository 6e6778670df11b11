/// parameters for a training run: how long to run, where to checkpoint, and
/// how often. Constructed via `Default` and overridden from environment
/// variables rather than threading a config struct through every call site.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TrainingConfig {
    pub seed: u64,
    pub iterations: u64,
    pub checkpoint_path: String,
    pub checkpoint_interval: u64,
    /// number of independent shards to train in parallel and merge, when the
    /// `parallel` feature is enabled. `None` (or 1) trains single-threaded.
    pub shard_count: Option<usize>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            iterations: 10_000,
            checkpoint_path: "holdem-toss.profile".to_string(),
            checkpoint_interval: 1_000,
            shard_count: None,
        }
    }
}

impl TrainingConfig {
    /// starts from `Default` and overrides any field with a matching
    /// environment variable, if set and parseable: `HOLDEM_TOSS_SEED`,
    /// `HOLDEM_TOSS_ITERATIONS`, `HOLDEM_TOSS_CHECKPOINT_PATH`,
    /// `HOLDEM_TOSS_CHECKPOINT_INTERVAL`, `HOLDEM_TOSS_SHARD_COUNT`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(seed) = parse_env("HOLDEM_TOSS_SEED") {
            config.seed = seed;
        }
        if let Some(iterations) = parse_env("HOLDEM_TOSS_ITERATIONS") {
            config.iterations = iterations;
        }
        if let Ok(path) = std::env::var("HOLDEM_TOSS_CHECKPOINT_PATH") {
            config.checkpoint_path = path;
        }
        if let Some(interval) = parse_env("HOLDEM_TOSS_CHECKPOINT_INTERVAL") {
            config.checkpoint_interval = interval.max(1);
        }
        if let Some(shards) = parse_env::<usize>("HOLDEM_TOSS_SHARD_COUNT") {
            config.shard_count = Some(shards);
        }
        config
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

impl TrainingConfig {
    /// serializes alongside a checkpoint so a saved run's parameters are
    /// self-describing; the checkpoint blob itself stays a dense binary
    /// format, this is just the human-readable sidecar.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_positive_interval() {
        let config = TrainingConfig::default();
        assert!(config.checkpoint_interval > 0);
        assert!(config.iterations > 0);
    }

    #[test]
    fn json_round_trips_all_fields() {
        let config = TrainingConfig {
            seed: 42,
            shard_count: Some(4),
            ..TrainingConfig::default()
        };
        let text = config.to_json().expect("serialize should succeed");
        let back = TrainingConfig::from_json(&text).expect("deserialize should succeed");
        assert_eq!(back.seed, 42);
        assert_eq!(back.shard_count, Some(4));
        assert_eq!(back.iterations, config.iterations);
    }

    #[test]
    fn from_env_falls_back_to_default_when_unset() {
        // SAFETY: test runs single-threaded with respect to this env var; no
        // other test reads or writes HOLDEM_TOSS_SEED concurrently.
        unsafe { std::env::remove_var("HOLDEM_TOSS_SEED") };
        let config = TrainingConfig::from_env();
        assert_eq!(config.seed, TrainingConfig::default().seed);
    }
}
