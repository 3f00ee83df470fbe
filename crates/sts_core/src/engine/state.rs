//! Mutable per-match state: phases, score, ball and possession.
//!
//! Fields are private; the engine mutates them through the methods below so
//! every phase change records its predecessor and possession stays a single
//! `Option`.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;
use crate::models::{GamePhase, PlayerId, TeamSide};

/// How the ball moved on the last update. The discriminant is the value
/// written to `ball_mechanism` in state records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BallMechanism {
    /// Freshly initialised for a play
    #[default]
    Reset = 0,
    Controlled = 7,
    Free = 8,
    /// Bounced off a board this tick
    Rebound = 9,
}

impl BallMechanism {
    pub const fn code(self) -> i64 {
        self as i64
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BallState {
    position: Vec2,
    velocity: Vec2,
    /// Unit direction of a release waiting to be turned into an impulse
    send_direction: Option<Vec2>,
    mechanism: BallMechanism,
}

impl BallState {
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn send_direction(&self) -> Option<Vec2> {
        self.send_direction
    }

    pub fn mechanism(&self) -> BallMechanism {
        self.mechanism
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchState {
    current_phase: GamePhase,
    previous_phase: GamePhase,
    score: [u32; 2],
    ball: BallState,
    control: Option<PlayerId>,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===========================================
    // Phases
    // ===========================================

    pub fn phase(&self) -> GamePhase {
        self.current_phase
    }

    pub fn previous_phase(&self) -> GamePhase {
        self.previous_phase
    }

    /// Move to `phase`, remembering the phase being left.
    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        self.previous_phase = self.current_phase;
        self.current_phase = phase;
    }

    // ===========================================
    // Score
    // ===========================================

    pub fn score(&self, side: TeamSide) -> u32 {
        self.score[side.index()]
    }

    pub fn total_score(&self) -> u32 {
        self.score.iter().sum()
    }

    pub(crate) fn add_goal(&mut self, side: TeamSide) {
        self.score[side.index()] += 1;
    }

    // ===========================================
    // Ball
    // ===========================================

    pub fn ball(&self) -> &BallState {
        &self.ball
    }

    pub fn ball_position(&self) -> Vec2 {
        self.ball.position
    }

    pub fn ball_velocity(&self) -> Vec2 {
        self.ball.velocity
    }

    pub(crate) fn set_ball_position(&mut self, position: Vec2) {
        self.ball.position = position;
    }

    pub(crate) fn set_ball_velocity(&mut self, velocity: Vec2) {
        self.ball.velocity = velocity;
    }

    pub(crate) fn set_send_direction(&mut self, direction: Option<Vec2>) {
        self.ball.send_direction = direction;
    }

    /// Consume a pending release, if any.
    pub(crate) fn take_send_direction(&mut self) -> Option<Vec2> {
        self.ball.send_direction.take()
    }

    pub(crate) fn set_ball_mechanism(&mut self, mechanism: BallMechanism) {
        self.ball.mechanism = mechanism;
    }

    /// Clear mechanism and pending release ahead of a new play.
    pub(crate) fn init_ball(&mut self) {
        self.ball.mechanism = BallMechanism::Reset;
        self.ball.send_direction = None;
    }

    // ===========================================
    // Possession
    // ===========================================

    pub fn control(&self) -> Option<PlayerId> {
        self.control
    }

    pub(crate) fn set_control(&mut self, control: Option<PlayerId>) {
        self.control = control;
    }

    /// `control_team` as persisted, `-1` when the ball is loose.
    pub fn control_team(&self) -> i64 {
        self.control.map_or(-1, |id| id.side.index() as i64)
    }

    /// `control_index` as persisted, `-1` when the ball is loose.
    pub fn control_index(&self) -> i64 {
        self.control.map_or(-1, |id| id.index as i64)
    }
}
