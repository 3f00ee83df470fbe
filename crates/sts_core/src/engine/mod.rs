//! # Match engine
//!
//! [`MatchEngine`] owns everything one match needs: rules, arena, rosters,
//! mutable [`MatchState`], the seeded RNG, the scheduler (clock, events,
//! history) and the client adapter. Behaviour is split across submodules,
//! each adding an `impl MatchEngine` block:
//!
//! - `phase` - phase state machine and play start
//! - `possession` - control grants and revocation
//! - `ball` - ball kinematics and catching
//! - `shooting` - shot, pass and check resolution
//! - `goal` - goal detection
//! - `locomotion` - decisions, RL encoding and movement
//! - `physics` - player separation and board bounces
//! - `tick` - per-tick orchestration
//! - `snapshot` - flat state records
//! - `render` - ASCII debug view

mod ball;
mod goal;
mod locomotion;
mod phase;
mod physics;
mod possession;
mod render;
pub mod scheduler;
mod shooting;
mod snapshot;
pub mod state;
mod tick;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use scheduler::{Scheduler, TickHooks};
pub use state::{BallMechanism, BallState, MatchState};

use std::collections::HashSet;
use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::adapter::ClientAdapter;
use crate::arena::Arena;
use crate::config::{MatchConfig, Rules};
use crate::error::{Result, SimError};
use crate::history::HistoryRecorder;
use crate::models::{EventLog, GameEvent, GameEventKind, GamePhase, PlayerId, TeamSide};
use crate::player::Player;
use crate::rl::EncodedDecision;

/// Largest roster a side may field; one `PASS_k` action per slot.
pub const MAX_TEAM_SIZE: usize = 4;

/// Reward given to the scoring side (and taken from the other) on a goal.
pub const GOAL_REWARD: f32 = 1.0;

/// Per-tick RL lists, one slot per player in global order.
#[derive(Debug, Clone, Default)]
pub(crate) struct TickFrame {
    decisions: Vec<EncodedDecision>,
    rewards: Vec<f32>,
}

impl TickFrame {
    fn reset(&mut self, players: usize) {
        self.decisions.clear();
        self.decisions.resize(players, EncodedDecision::idle());
        self.rewards.clear();
        self.rewards.resize(players, 0.0);
    }
}

#[derive(Debug)]
pub struct MatchEngine {
    rules: Rules,
    config: MatchConfig,
    arena: Arena,
    teams: [Vec<Player>; 2],
    state: MatchState,
    scheduler: Scheduler,
    rng: ChaCha8Rng,
    adapter: ClientAdapter,
    round_start_tick: u64,
    /// Rank of each player by distance to the ball, per team
    distance_ranks: [Vec<usize>; 2],
    frame: TickFrame,
    /// Where the history was written on reaching GAME_OVER
    persisted_to: Option<PathBuf>,
}

impl MatchEngine {
    /// Build a match from a mixed roster. Players are split by side keeping
    /// their relative order, which fixes roster indices.
    pub fn new(players: Vec<Player>, rules: Rules, config: MatchConfig) -> Result<Self> {
        rules.validate()?;

        let mut names = HashSet::new();
        let mut teams: [Vec<Player>; 2] = [Vec::new(), Vec::new()];
        for mut player in players {
            if !names.insert(player.name().to_string()) {
                return Err(SimError::InvalidRoster(format!("duplicate player name {}", player.name())));
            }
            let team = &mut teams[player.side().index()];
            player.set_index(team.len());
            team.push(player);
        }
        for side in TeamSide::BOTH {
            let size = teams[side.index()].len();
            if size > MAX_TEAM_SIZE {
                return Err(SimError::InvalidRoster(format!(
                    "{side} fields {size} players, at most {MAX_TEAM_SIZE} allowed"
                )));
            }
        }

        debug!(
            seed = config.seed,
            home = teams[0].len(),
            away = teams[1].len(),
            max_tick = rules.max_tick,
            "match created"
        );

        Ok(Self {
            arena: Arena::from_rules(&rules),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            rules,
            config,
            teams,
            state: MatchState::new(),
            scheduler: Scheduler::new(),
            adapter: ClientAdapter::new(),
            round_start_tick: 0,
            distance_ranks: [Vec::new(), Vec::new()],
            frame: TickFrame::default(),
            persisted_to: None,
        })
    }

    /// Re-seed the match RNG. Only affects draws made after the call.
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    // ===========================================
    // Accessors
    // ===========================================

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn tick(&self) -> u64 {
        self.scheduler.tick()
    }

    pub fn events(&self) -> &EventLog {
        self.scheduler.events()
    }

    pub fn history(&self) -> &HistoryRecorder {
        self.scheduler.history()
    }

    pub fn adapter(&self) -> &ClientAdapter {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut ClientAdapter {
        &mut self.adapter
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn score(&self, side: TeamSide) -> u32 {
        self.state.score(side)
    }

    pub fn round_start_tick(&self) -> u64 {
        self.round_start_tick
    }

    pub fn persisted_to(&self) -> Option<&PathBuf> {
        self.persisted_to.as_ref()
    }

    /// `true` once the match has reached GAME_OVER.
    pub fn is_simulation_complete(&self) -> bool {
        self.state.phase() == GamePhase::GameOver
    }

    // ===========================================
    // Rosters
    // ===========================================

    pub fn team(&self, side: TeamSide) -> &[Player] {
        &self.teams[side.index()]
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.teams[id.side.index()].get(id.index)
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.teams[id.side.index()].get_mut(id.index)
    }

    pub(crate) fn require_player(&self, id: PlayerId) -> Result<&Player> {
        self.player(id).ok_or(SimError::InvalidPlayer(id))
    }

    pub(crate) fn require_player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.player_mut(id).ok_or(SimError::InvalidPlayer(id))
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players().find(|p| p.name() == name)
    }

    /// All players in global order: home roster, then away roster.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.teams.iter().flatten()
    }

    pub(crate) fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.teams.iter_mut().flatten()
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players().map(Player::id).collect()
    }

    pub fn player_count(&self) -> usize {
        self.teams[0].len() + self.teams[1].len()
    }

    // ===========================================
    // Events
    // ===========================================

    pub(crate) fn emit(&mut self, kind: GameEventKind, actor: impl Into<String>, target: impl Into<String>) {
        let tick = self.tick();
        self.scheduler.push_event(GameEvent::new(tick, kind, actor, target));
    }
}
