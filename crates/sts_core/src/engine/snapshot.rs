//! Flat state records.
//!
//! The record written each tick (and sent to agents) is a key-sorted map of
//! scalars. Player keys are prefixed with side and roster index
//! (`home0_pos_x`, `away2_action`); loose-ball possession is `-1`.
//! A player's `_mechanism` is the index of its current action, mirroring
//! `ball_mechanism` for object-centric datasets.

use super::MatchEngine;
use crate::history::StateVector;
use crate::models::TeamSide;

impl MatchEngine {
    pub fn state_vector(&self) -> StateVector {
        let mut record = StateVector::new();
        let state = &self.state;
        let ball = state.ball();

        record.insert("tick", self.tick() as i64);
        record.insert("current_phase", state.phase().as_str());
        record.insert("previous_phase", state.previous_phase().as_str());
        record.insert("ball_pos_x", ball.position().x);
        record.insert("ball_pos_z", ball.position().y);
        record.insert("ball_vel_x", ball.velocity().x);
        record.insert("ball_vel_z", ball.velocity().y);
        record.insert("ball_mechanism", ball.mechanism().code());
        record.insert("control_team", state.control_team());
        record.insert("control_index", state.control_index());

        for side in TeamSide::BOTH {
            let name = side.name();
            let net = self.arena.scoring_net(side);
            record.insert(format!("{name}_score"), state.score(side));
            record.insert(format!("{name}_net_x"), net.x);
            record.insert(format!("{name}_net_z"), net.y);
            record.insert(format!("{name}_players"), self.team(side).len() as i64);
        }

        for player in self.players() {
            let prefix = player.id().key_prefix();
            record.insert(format!("{prefix}_name"), player.name());
            record.insert(format!("{prefix}_pos_x"), player.position().x);
            record.insert(format!("{prefix}_pos_z"), player.position().y);
            record.insert(format!("{prefix}_vel_x"), player.velocity().x);
            record.insert(format!("{prefix}_vel_z"), player.velocity().y);
            record.insert(format!("{prefix}_input_x"), player.input().x);
            record.insert(format!("{prefix}_input_z"), player.input().y);
            record.insert(format!("{prefix}_action"), player.action().as_str());
            record.insert(format!("{prefix}_action_time"), player.action_time());
            record.insert(format!("{prefix}_mechanism"), player.action().index() as i64);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::test_fixtures::{engine_with, place};
    use crate::geometry::vec2;
    use crate::models::{PlayerId, TeamSide};
    use crate::player::PolicyKind;

    #[test]
    fn test_record_keys_and_sentinels() {
        let mut engine = engine_with(&[PolicyKind::Simple], &[PolicyKind::Simple, PolicyKind::Simple], 1);
        place(&mut engine, PlayerId::new(TeamSide::Away, 1), vec2(2.0, 3.0));
        let record = engine.state_vector();

        assert_eq!(record.get_i64("tick"), Some(0));
        assert_eq!(record.get_str("current_phase"), Some("PRE_GAME"));
        assert_eq!(record.get_i64("control_team"), Some(-1));
        assert_eq!(record.get_i64("control_index"), Some(-1));
        assert_eq!(record.get_i64("away_players"), Some(2));
        assert_eq!(record.get_f64("home_net_z"), Some(17.0));
        assert_eq!(record.get_f64("away_net_z"), Some(-17.0));
        assert_eq!(record.get_str("away1_name"), Some("a_sim_2"));
        assert_eq!(record.get_f64("away1_pos_z"), Some(3.0));
        assert_eq!(record.get_str("home0_action"), Some("NONE"));
        assert_eq!(record.get_i64("home0_mechanism"), Some(0));
        assert!(record.get("away2_name").is_none());
    }

    #[test]
    fn test_control_fields_follow_possession() {
        let mut engine = engine_with(&[PolicyKind::Simple], &[PolicyKind::Simple, PolicyKind::Simple], 1);
        engine.give_control(PlayerId::new(TeamSide::Away, 1)).unwrap();
        let record = engine.state_vector();
        assert_eq!(record.get_i64("control_team"), Some(1));
        assert_eq!(record.get_i64("control_index"), Some(1));
        assert_eq!(record.get_i64("ball_mechanism"), Some(0));
    }
}
