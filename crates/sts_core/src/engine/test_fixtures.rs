//! Test Fixtures Module
//!
//! Shared builders for engine tests.
//!
//! ## Usage
//! ```ignore
//! use crate::engine::test_fixtures::*;
//! ```

use super::MatchEngine;
use crate::config::{MatchConfig, Rules};
use crate::geometry::Vec2;
use crate::models::{PlayerId, TeamSide};
use crate::player::{Player, PolicyKind};

// =============================================================================
// Roster Helpers
// =============================================================================

/// Players named like the environment names them: `h_sim_1`, `a_agg_2`, ...
/// The counter runs per side across kinds.
pub fn roster(home: &[PolicyKind], away: &[PolicyKind]) -> Vec<Player> {
    let mut players = Vec::with_capacity(home.len() + away.len());
    for (side, kinds, tag) in [(TeamSide::Home, home, "h"), (TeamSide::Away, away, "a")] {
        for (i, kind) in kinds.iter().enumerate() {
            players.push(Player::new(format!("{tag}_{}_{}", kind.short_name(), i + 1), side, *kind));
        }
    }
    players
}

// =============================================================================
// Engine Helpers
// =============================================================================

/// Engine in PRE_GAME with standard rules.
pub fn engine_with(home: &[PolicyKind], away: &[PolicyKind], seed: u64) -> MatchEngine {
    engine_with_rules(home, away, Rules::default(), seed)
}

pub fn engine_with_rules(home: &[PolicyKind], away: &[PolicyKind], rules: Rules, seed: u64) -> MatchEngine {
    let config = MatchConfig { seed, ..MatchConfig::default() };
    MatchEngine::new(roster(home, away), rules, config).expect("fixture roster and rules are valid")
}

/// Engine after its first tick: in GAME_ON with kickoff possession granted.
pub fn started_engine(home: &[PolicyKind], away: &[PolicyKind], seed: u64) -> MatchEngine {
    let mut engine = engine_with(home, away, seed);
    engine.update().expect("first tick succeeds");
    engine
}

/// Teleport a player without touching velocity or lockouts.
pub fn place(engine: &mut MatchEngine, id: PlayerId, position: Vec2) {
    engine.player_mut(id).expect("fixture player exists").set_position(position);
}

/// Put the ball on `id` at `position`, standing still and free to act.
pub fn hand_ball(engine: &mut MatchEngine, id: PlayerId, position: Vec2) {
    for player in engine.players_mut() {
        player.on_play_start();
    }
    place(engine, id, position);
    engine.give_control(id).expect("fixture player exists");
}
