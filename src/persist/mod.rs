pub mod checkpoint;
pub mod config;

pub use checkpoint::{load_checkpoint, save_checkpoint, save_policy_export};
pub use config::TrainingConfig;
