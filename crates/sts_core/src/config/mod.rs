//! # Simulation configuration
//!
//! Every tunable lives in [`Rules`]; per-match knobs (seed, persistence,
//! verbosity) live in [`MatchConfig`].
//!
//! ```rust
//! use sts_core::config::{MatchConfig, Rules};
//!
//! let rules = Rules::default();
//! let collection = Rules::data_collection();
//! let config = MatchConfig { seed: 7, ..MatchConfig::default() };
//! assert!(rules.validate().is_ok() && collection.validate().is_ok());
//! assert_eq!(config.seed, 7);
//! ```

mod rules;

pub use rules::{LayoutConstraint, Rules};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Per-match settings that are not game rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Seed for the match RNG (position init, kickoff possession)
    pub seed: u64,
    /// 0 = quiet, 1 = phase transitions, 2+ = ASCII arena every tick
    pub verbosity: u8,
    /// Persist the full history when the match reaches GAME_OVER
    pub save_states: bool,
    /// Directory under which `datasets/<date>/STATEHISTORY.json` is written
    pub dataset_root: PathBuf,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { seed: 0, verbosity: 0, save_states: false, dataset_root: PathBuf::from(".") }
    }
}
