//! # sts_core - Deterministic Two-Team Stick-Sport Simulation
//!
//! A discrete-time match between two small teams, built to produce
//! reinforcement-learning trajectories far faster than a full game engine.
//!
//! ## Features
//! - 100% deterministic simulation (same seed + same agent commands = same history)
//! - Phase state machine, possession, ball flight, shots, passes and checks
//! - Per-tick RL encoding of every player's decision
//! - JSON state histories and episode tooling for offline datasets
//!
//! ```rust
//! use sts_core::{MatchConfig, MatchEngine, Player, PolicyKind, Rules, TeamSide};
//!
//! let players = vec![
//!     Player::new("h_sim_1", TeamSide::Home, PolicyKind::Simple),
//!     Player::new("a_sim_1", TeamSide::Away, PolicyKind::Simple),
//! ];
//! let rules = Rules { max_tick: 50, ..Rules::default() };
//! let mut engine = MatchEngine::new(players, rules, MatchConfig::default()).unwrap();
//! engine.run(1_000).unwrap();
//! assert!(engine.is_simulation_complete());
//! assert_eq!(engine.history().len(), 51);
//! ```

// Game engine APIs often require many parameters for physics, state, etc.
#![allow(clippy::too_many_arguments)]
// Loop style - can fix incrementally
#![allow(clippy::needless_range_loop)]

pub mod adapter;
pub mod arena;
pub mod config;
pub mod engine;
pub mod environment;
pub mod error;
pub mod geometry;
pub mod history;
pub mod models;
pub mod player;
pub mod rl;

pub use adapter::{AgentCommand, ClientAdapter, Observation};
pub use config::{LayoutConstraint, MatchConfig, Rules};
pub use engine::{MatchEngine, MatchState};
pub use environment::{EnvConfig, Environment, TeamComposition};
pub use error::{Result, SimError};
pub use models::{Action, GameEvent, GameEventKind, GamePhase, PlayerId, TeamSide};
pub use player::{Decision, Player, PolicyKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<MatchEngine>();
        assert_send::<Environment>();
    }
}
