use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Optional positional constraint applied after locomotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutConstraint {
    #[default]
    None,
    /// Snap each player onto a fixed diagonal lane keyed by roster index,
    /// mirrored for the away team.
    CrossoverConstraint,
}

/// Tunable rule set. Distances are arena units, durations are ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Tick at which GAME_ON turns into STOPPAGE_TIMEUP
    pub max_tick: u64,
    /// Ticks a round may last before it is wiped and restarted
    pub max_round_tick: u64,
    /// Arena width (x) and length (z)
    pub arena_size: [u32; 2],
    /// Distance of each net from its end board
    pub net_inset: f32,
    /// Half width of the goal mouth segment
    pub goal_half_width: f32,
    pub player_radius: f32,
    pub ball_radius: f32,
    /// Speed of a released ball on its first free tick
    pub ball_speed: f32,
    /// Per-tick multiplicative decay of free ball velocity
    pub ball_velocity_decay: f32,
    /// Catch radius and defender interception radius
    pub max_intercept_dist: f32,
    pub receive_response_time: u32,
    pub shot_response_time: u32,
    pub pass_response_time: u32,
    pub check_stun_time: u32,
    /// Distance within which a CHECK action reaches the ball carrier
    pub check_dist: f32,
    /// Forward distance at which shots stop losing accuracy
    pub shot_distance_accuracy_scale: f32,
    /// Top skating speed per tick
    pub player_speed: f32,
    /// Fraction of the velocity gap closed per tick (0..=1)
    pub player_acceleration: f32,
    /// Exponent applied to the sampled depth when placing players at kickoff
    pub init_position_exponent: f32,
    pub layout_constraint: LayoutConstraint,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_tick: 3000,
            max_round_tick: 400,
            arena_size: [24, 40],
            net_inset: 3.0,
            goal_half_width: 0.5,
            player_radius: 1.0,
            ball_radius: 0.25,
            ball_speed: 3.0,
            ball_velocity_decay: 0.9,
            max_intercept_dist: 1.5,
            receive_response_time: 2,
            shot_response_time: 3,
            pass_response_time: 3,
            check_stun_time: 10,
            check_dist: 2.5,
            shot_distance_accuracy_scale: 8.0,
            player_speed: 0.6,
            player_acceleration: 0.5,
            init_position_exponent: 1.0,
            layout_constraint: LayoutConstraint::None,
        }
    }
}

impl Rules {
    /// Standard match rules.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Rules used for offline dataset collection: players kept on lanes and
    /// long rounds so that most episodes end in a goal.
    pub fn data_collection() -> Self {
        Self {
            max_tick: 100_000,
            max_round_tick: 1_000,
            layout_constraint: LayoutConstraint::CrossoverConstraint,
            ..Self::default()
        }
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        let rules: Rules = serde_json::from_str(data)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn validate(&self) -> Result<()> {
        if self.arena_size[0] == 0 || self.arena_size[1] == 0 {
            return Err(SimError::InvalidRules("arena_size must be non-zero".into()));
        }
        if self.net_inset * 2.0 >= self.arena_size[1] as f32 {
            return Err(SimError::InvalidRules("nets overlap: net_inset too large".into()));
        }
        if !(0.0..=1.0).contains(&self.ball_velocity_decay) {
            return Err(SimError::InvalidRules("ball_velocity_decay must be in [0, 1]".into()));
        }
        if !(0.0..=1.0).contains(&self.player_acceleration) {
            return Err(SimError::InvalidRules("player_acceleration must be in [0, 1]".into()));
        }
        let positive = [
            ("player_radius", self.player_radius),
            ("ball_speed", self.ball_speed),
            ("max_intercept_dist", self.max_intercept_dist),
            ("goal_half_width", self.goal_half_width),
            ("shot_distance_accuracy_scale", self.shot_distance_accuracy_scale),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidRules(format!("{name} must be positive, got {value}")));
            }
        }
        let non_negative = [
            ("net_inset", self.net_inset),
            ("ball_radius", self.ball_radius),
            ("check_dist", self.check_dist),
            ("player_speed", self.player_speed),
            ("init_position_exponent", self.init_position_exponent),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::InvalidRules(format!("{name} must be finite and non-negative, got {value}")));
            }
        }
        if self.max_round_tick == 0 {
            return Err(SimError::InvalidRules("max_round_tick must be at least 1".into()));
        }
        Ok(())
    }
}
