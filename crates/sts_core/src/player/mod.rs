//! Players: identity, kinematics, lockouts and the motion model.
//!
//! Policy objects only decide; every spatial field is owned and written by
//! the match engine.

mod policy;

pub use policy::{Decision, PolicyKind};

use crate::config::Rules;
use crate::geometry::{clamp_length, Vec2};
use crate::models::{Action, PlayerId, TeamSide};

#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    side: TeamSide,
    /// Roster index, assigned when the match is built
    index: usize,
    policy: PolicyKind,
    position: Vec2,
    velocity: Vec2,
    action: Action,
    input: Vec2,
    /// Remaining ticks during which the player cannot act
    action_time: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, side: TeamSide, policy: PolicyKind) -> Self {
        Self {
            name: name.into(),
            side,
            index: 0,
            policy,
            position: Vec2::zeros(),
            velocity: Vec2::zeros(),
            action: Action::None,
            input: Vec2::zeros(),
            action_time: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> TeamSide {
        self.side
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn id(&self) -> PlayerId {
        PlayerId::new(self.side, self.index)
    }

    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn set_action(&mut self, action: Action) {
        self.action = action;
    }

    pub fn input(&self) -> Vec2 {
        self.input
    }

    pub fn set_input(&mut self, input: Vec2) {
        self.input = input;
    }

    pub fn action_time(&self) -> u32 {
        self.action_time
    }

    pub fn set_action_time(&mut self, ticks: u32) {
        self.action_time = ticks;
    }

    /// A capable player may catch, intercept and act this tick.
    pub fn is_capable(&self) -> bool {
        self.action_time == 0
    }

    pub fn is_stunned(&self) -> bool {
        self.action == Action::Stunned && self.action_time > 0
    }

    /// Lock the player out for `ticks` after catching, passing or shooting.
    pub fn response_time(&mut self, ticks: u32) {
        self.action_time = ticks;
    }

    pub fn stun(&mut self, ticks: u32) {
        self.action = Action::Stunned;
        self.action_time = ticks;
        self.input = Vec2::zeros();
    }

    /// Reset kinematics and lockouts at the start of every play.
    pub fn on_play_start(&mut self) {
        self.velocity = Vec2::zeros();
        self.action = Action::None;
        self.input = Vec2::zeros();
        self.action_time = 0;
    }

    pub(crate) fn apply_decision(&mut self, decision: Decision) {
        self.action = decision.action;
        self.input = decision.input;
    }

    /// Advance one tick of skating. Stunned players stand still; everyone
    /// else eases toward `input * player_speed`.
    pub fn run_motion_model(&mut self, rules: &Rules) {
        if self.is_stunned() {
            self.velocity = Vec2::zeros();
        } else {
            let input = if self.input.iter().all(|c| c.is_finite()) { self.input } else { Vec2::zeros() };
            let desired = clamp_length(input, 1.0) * rules.player_speed;
            self.velocity += (desired - self.velocity) * rules.player_acceleration;
        }
        self.position += self.velocity;

        if self.action_time > 0 {
            self.action_time -= 1;
            if self.action_time == 0 && self.action == Action::Stunned {
                self.action = Action::None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vec2;

    fn skater() -> Player {
        Player::new("h_sim_1", TeamSide::Home, PolicyKind::Simple)
    }

    #[test]
    fn test_motion_eases_toward_input() {
        let rules = Rules::default();
        let mut p = skater();
        p.set_input(vec2(0.0, 1.0));
        p.run_motion_model(&rules);
        let expected = rules.player_speed * rules.player_acceleration;
        assert!((p.velocity().y - expected).abs() < 1e-6);
        assert!((p.position().y - expected).abs() < 1e-6);

        for _ in 0..50 {
            p.run_motion_model(&rules);
        }
        assert!((p.velocity().y - rules.player_speed).abs() < 1e-3);
    }

    #[test]
    fn test_input_longer_than_unit_is_clamped() {
        let rules = Rules { player_acceleration: 1.0, ..Rules::default() };
        let mut p = skater();
        p.set_input(vec2(3.0, 4.0));
        p.run_motion_model(&rules);
        assert!((p.velocity().norm() - rules.player_speed).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_input_does_not_move_player() {
        let rules = Rules::default();
        let mut p = skater();
        p.set_position(vec2(1.0, 2.0));
        p.set_input(vec2(f32::NAN, 1.0));
        p.run_motion_model(&rules);
        assert_eq!(p.position(), vec2(1.0, 2.0));
    }

    #[test]
    fn test_stun_freezes_and_expires() {
        let rules = Rules::default();
        let mut p = skater();
        p.set_velocity(vec2(0.5, 0.5));
        p.stun(2);
        assert!(p.is_stunned());
        assert!(!p.is_capable());

        p.run_motion_model(&rules);
        assert_eq!(p.velocity(), Vec2::zeros());
        assert_eq!(p.action_time(), 1);

        p.run_motion_model(&rules);
        assert!(p.is_capable());
        assert_eq!(p.action(), Action::None);
    }

    #[test]
    fn test_response_time_keeps_action() {
        let rules = Rules::default();
        let mut p = skater();
        p.set_action(Action::Shoot);
        p.response_time(1);
        p.run_motion_model(&rules);
        assert!(p.is_capable());
        assert_eq!(p.action(), Action::Shoot);
    }
}
