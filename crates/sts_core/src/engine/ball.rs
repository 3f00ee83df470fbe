//! Ball kinematics and catching.

use tracing::trace;

use super::{BallMechanism, MatchEngine};
use crate::error::Result;
use crate::geometry::Vec2;
use crate::models::PlayerId;

impl MatchEngine {
    /// Advance the ball one tick.
    ///
    /// A controlled ball follows its carrier. A loose ball is first offered
    /// to the nearest capable player in reach; if nobody catches it, it
    /// flies: a pending release becomes a one-tick impulse, otherwise the
    /// previous velocity decays.
    pub(crate) fn ball_update(&mut self) -> Result<()> {
        if let Some(carrier) = self.controller() {
            let position = carrier.position();
            let previous = self.state.ball_position();
            self.state.set_ball_position(position);
            self.state.set_ball_velocity(position - previous);
            self.state.set_ball_mechanism(BallMechanism::Controlled);
            return Ok(());
        }

        if let Some(catcher) = self.find_catcher() {
            self.give_control(catcher)?;
            self.state.set_ball_mechanism(BallMechanism::Controlled);
            let lockout = self.rules.receive_response_time;
            self.require_player_mut(catcher)?.response_time(lockout);
            return Ok(());
        }

        let velocity = match self.state.take_send_direction() {
            Some(direction) => direction * self.rules.ball_speed,
            None => self.state.ball_velocity() * self.rules.ball_velocity_decay,
        };
        let position = self.state.ball_position() + velocity;
        self.state.set_ball_position(position);
        self.state.set_ball_velocity(velocity);
        self.state.set_ball_mechanism(BallMechanism::Free);
        trace!(tick = self.tick(), x = position.x, z = position.y, "ball in flight");
        Ok(())
    }

    /// Nearest capable player within catching reach of the loose ball.
    ///
    /// Players are visited in global order and only a strictly closer player
    /// replaces the current best, so equal distances go to the earlier one.
    pub fn find_catcher(&self) -> Option<PlayerId> {
        let ball = self.state.ball_position();
        let reach = self.rules.max_intercept_dist;
        let mut best: Option<(PlayerId, f32)> = None;
        for player in self.players().filter(|p| p.is_capable()) {
            let dist = (ball - player.position()).norm();
            if dist <= reach && best.map_or(true, |(_, d)| dist < d) {
                best = Some((player.id(), dist));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Release the ball toward `target`. The impulse is applied on the next
    /// ball update; a zero-length release leaves the ball to drift.
    pub(crate) fn send_ball(&mut self, target: Vec2) {
        self.remove_control();
        let delta = target - self.state.ball_position();
        let len = delta.norm();
        let direction = if len > f32::EPSILON { Some(delta / len) } else { None };
        self.state.set_send_direction(direction);
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::test_fixtures::{engine_with, place};
    use crate::engine::BallMechanism;
    use crate::geometry::vec2;
    use crate::models::{PlayerId, TeamSide};
    use crate::player::PolicyKind;

    #[test]
    fn test_released_ball_gets_one_impulse_then_decays() {
        let mut engine = engine_with(&[PolicyKind::Simple], &[], 1);
        let home = PlayerId::new(TeamSide::Home, 0);
        place(&mut engine, home, vec2(0.0, 0.0));
        engine.give_control(home).unwrap();
        engine.send_ball(vec2(0.0, 10.0));
        engine.player_mut(home).unwrap().response_time(5);

        engine.ball_update().unwrap();
        let speed = engine.rules().ball_speed;
        assert_eq!(engine.state().ball_velocity(), vec2(0.0, speed));
        assert_eq!(engine.state().ball_position(), vec2(0.0, speed));
        assert_eq!(engine.state().ball().mechanism(), BallMechanism::Free);

        engine.ball_update().unwrap();
        let decayed = speed * engine.rules().ball_velocity_decay;
        assert!((engine.state().ball_velocity().y - decayed).abs() < 1e-6);
        assert!((engine.state().ball_position().y - (speed + decayed)).abs() < 1e-5);
    }

    #[test]
    fn test_locked_out_player_cannot_catch() {
        let mut engine = engine_with(&[PolicyKind::Simple], &[], 1);
        let home = PlayerId::new(TeamSide::Home, 0);
        place(&mut engine, home, vec2(0.0, 0.0));
        engine.player_mut(home).unwrap().response_time(2);
        assert_eq!(engine.find_catcher(), None);

        engine.player_mut(home).unwrap().set_action_time(0);
        assert_eq!(engine.find_catcher(), Some(home));
    }

    #[test]
    fn test_catch_grants_control_with_lockout() {
        let mut engine = engine_with(&[], &[PolicyKind::Simple], 1);
        let away = PlayerId::new(TeamSide::Away, 0);
        place(&mut engine, away, vec2(1.0, 0.0));

        engine.ball_update().unwrap();
        assert!(engine.has_control(away));
        assert_eq!(engine.state().ball_position(), vec2(1.0, 0.0));
        assert_eq!(engine.player(away).unwrap().action_time(), engine.rules().receive_response_time);
    }

    #[test]
    fn test_zero_length_release_has_no_direction() {
        let mut engine = engine_with(&[PolicyKind::Simple], &[], 1);
        let home = PlayerId::new(TeamSide::Home, 0);
        place(&mut engine, home, vec2(2.0, 2.0));
        engine.give_control(home).unwrap();
        engine.send_ball(vec2(2.0, 2.0));
        assert_eq!(engine.control(), None);
        assert_eq!(engine.state().ball().send_direction(), None);
    }
}
