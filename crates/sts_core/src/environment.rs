//! Gym-style wrapper around a [`MatchEngine`].
//!
//! ```rust
//! use sts_core::environment::{EnvConfig, Environment};
//!
//! let mut env = Environment::new(EnvConfig::default()).unwrap();
//! let first = env.reset().unwrap();
//! assert_eq!(first.current_phase(), Some("PRE_GAME"));
//! let step = env.step(Default::default()).unwrap();
//! assert!(!step.done);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::adapter::{AgentCommand, Observation};
use crate::config::{MatchConfig, Rules};
use crate::engine::{MatchEngine, MAX_TEAM_SIZE};
use crate::error::{Result, SimError};
use crate::models::TeamSide;
use crate::player::{Player, PolicyKind};

/// How many players of each kind a side fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamComposition {
    pub agents: usize,
    pub simple: usize,
    pub adapted_simple: usize,
    pub egoistic: usize,
    pub aggressive: usize,
    pub defensive: usize,
    pub shy: usize,
}

impl TeamComposition {
    pub fn of(kind: PolicyKind, count: usize) -> Self {
        let mut team = Self::default();
        *team.slot_mut(kind) = count;
        team
    }

    fn slot_mut(&mut self, kind: PolicyKind) -> &mut usize {
        match kind {
            PolicyKind::Agent => &mut self.agents,
            PolicyKind::Simple => &mut self.simple,
            PolicyKind::AdaptedSimple => &mut self.adapted_simple,
            PolicyKind::Egoistic => &mut self.egoistic,
            PolicyKind::Aggressive => &mut self.aggressive,
            PolicyKind::Defensive => &mut self.defensive,
            PolicyKind::Shy => &mut self.shy,
        }
    }

    /// Counts in roster order: agents first, then the scripted kinds.
    pub fn counts(&self) -> [(PolicyKind, usize); 7] {
        [
            (PolicyKind::Agent, self.agents),
            (PolicyKind::Simple, self.simple),
            (PolicyKind::AdaptedSimple, self.adapted_simple),
            (PolicyKind::Egoistic, self.egoistic),
            (PolicyKind::Aggressive, self.aggressive),
            (PolicyKind::Defensive, self.defensive),
            (PolicyKind::Shy, self.shy),
        ]
    }

    pub fn size(&self) -> usize {
        self.counts().iter().fold(0, |total, (_, n)| total.saturating_add(*n))
    }

    /// Build this side's players. Names carry a side tag, the policy tag and
    /// a counter shared by all kinds on the side: `h_ai_1`, `h_sim_2`.
    pub fn players(&self, side: TeamSide) -> Vec<Player> {
        let tag = match side {
            TeamSide::Home => "h",
            TeamSide::Away => "a",
        };
        let mut players = Vec::with_capacity(self.size());
        for (kind, count) in self.counts() {
            for _ in 0..count {
                let name = format!("{tag}_{}_{}", kind.short_name(), players.len() + 1);
                players.push(Player::new(name, side, kind));
            }
        }
        players
    }
}

/// Parses `sim:2,agg:1` (a bare tag counts as one).
impl FromStr for TeamComposition {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        let mut team = Self::default();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (tag, count) = match part.split_once(':') {
                Some((tag, count)) => {
                    let count = count
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| SimError::InvalidRoster(format!("bad count in {part:?}")))?;
                    (tag.trim(), count)
                }
                None => (part, 1),
            };
            let kind = PolicyKind::from_short_name(tag)
                .ok_or_else(|| SimError::InvalidRoster(format!("unknown player kind {tag:?}")))?;
            let slot = team.slot_mut(kind);
            *slot = slot
                .checked_add(count)
                .ok_or_else(|| SimError::InvalidRoster(format!("player count overflows in {s:?}")))?;
        }
        if team.size() > MAX_TEAM_SIZE {
            return Err(SimError::InvalidRoster(format!("{s:?} has more than {MAX_TEAM_SIZE} players")));
        }
        Ok(team)
    }
}

impl fmt::Display for TeamComposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .counts()
            .iter()
            .filter(|(_, n)| *n > 0)
            .map(|(kind, n)| format!("{}:{n}", kind.short_name()))
            .collect();
        f.write_str(&parts.join(","))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub home: TeamComposition,
    pub away: TeamComposition,
    /// Overrides `rules.max_tick`
    pub timeout_ticks: u64,
    pub rules: Rules,
    pub seed: u64,
    pub verbosity: u8,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            home: TeamComposition::of(PolicyKind::Simple, 3),
            away: TeamComposition::of(PolicyKind::Simple, 3),
            timeout_ticks: 10_000_000_000,
            rules: Rules::default(),
            seed: 0,
            verbosity: 0,
        }
    }
}

/// Result of one [`Environment::step`].
#[derive(Debug, Clone)]
pub struct Step {
    pub observation: Observation,
    /// Set once the match reports GAME_OVER
    pub done: bool,
}

pub struct Environment {
    config: EnvConfig,
    engine: MatchEngine,
}

impl Environment {
    pub fn new(config: EnvConfig) -> Result<Self> {
        let engine = Self::build(&config)?;
        Ok(Self { config, engine })
    }

    fn build(config: &EnvConfig) -> Result<MatchEngine> {
        for team in [&config.home, &config.away] {
            if team.size() > MAX_TEAM_SIZE {
                return Err(SimError::InvalidRoster(format!("{team} has more than {MAX_TEAM_SIZE} players")));
            }
        }
        let mut players = config.home.players(TeamSide::Home);
        players.extend(config.away.players(TeamSide::Away));
        let rules = Rules { max_tick: config.timeout_ticks, ..config.rules.clone() };
        let match_config = MatchConfig { seed: config.seed, verbosity: config.verbosity, ..MatchConfig::default() };
        MatchEngine::new(players, rules, match_config)
    }

    /// Seed used by the next [`reset`](Self::reset), applied to the running
    /// match as well.
    pub fn seed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.engine.reseed(seed);
    }

    /// Start a fresh match and return its initial observation.
    pub fn reset(&mut self) -> Result<Observation> {
        self.engine = Self::build(&self.config)?;
        info!(seed = self.config.seed, home = %self.config.home, away = %self.config.away, "environment reset");
        Ok(self.engine.send_state())
    }

    /// Hand `commands` to the agents, advance one tick and observe.
    pub fn step(&mut self, commands: BTreeMap<String, AgentCommand>) -> Result<Step> {
        self.engine.adapter_mut().receive_action(commands);
        self.advance()
    }

    /// [`step`](Self::step) with a JSON command payload.
    pub fn step_json(&mut self, payload: &str) -> Result<Step> {
        self.engine.adapter_mut().receive_action_json(payload)?;
        self.advance()
    }

    fn advance(&mut self) -> Result<Step> {
        self.engine.update()?;
        let observation = self.engine.send_state();
        let done = observation.is_game_over();
        Ok(Step { observation, done })
    }

    pub fn render(&self) -> String {
        self.engine.render_arena()
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Names of the externally driven players.
    pub fn agent_names(&self) -> Vec<String> {
        self.engine
            .players()
            .filter(|p| p.policy() == PolicyKind::Agent)
            .map(|p| p.name().to_string())
            .collect()
    }
}
