//! Goal detection.
//!
//! A goal is scored when the ball's path over the last tick crosses the
//! goal-mouth segment of a net. Home scores on the `+z` net, away on the
//! `-z` net.

use tracing::info;

use super::{MatchEngine, GOAL_REWARD};
use crate::geometry::{segments_intersect, sign, vec2};
use crate::models::{GameEventKind, GamePhase, TeamSide};

impl MatchEngine {
    /// Test both nets against the ball's last movement. The leading edge of
    /// the ball is used, so the position is pushed outward by the ball
    /// radius along the forward axis.
    pub(crate) fn check_goal(&mut self) {
        let mut ball = self.state.ball_position();
        ball.y += sign(ball.y) * self.rules.ball_radius;
        let previous = ball - self.state.ball_velocity();
        let half_width = self.rules.goal_half_width;

        for side in TeamSide::BOTH {
            let net = self.arena.scoring_net(side);
            let left_post = vec2(net.x - half_width, net.y);
            let right_post = vec2(net.x + half_width, net.y);
            if segments_intersect(previous, ball, left_post, right_post) {
                self.award_goal(side);
            }
        }
    }

    /// Credit `side` with a goal and stop play.
    pub(crate) fn award_goal(&mut self, side: TeamSide) {
        self.emit(GameEventKind::Goal, side.name(), "");
        self.state.add_goal(side);
        self.set_game_phase(GamePhase::StoppageGoal);

        let home = self.teams[0].len();
        for (slot, reward) in self.frame.rewards.iter_mut().enumerate() {
            let on_scoring_side = match side {
                TeamSide::Home => slot < home,
                TeamSide::Away => slot >= home,
            };
            *reward = if on_scoring_side { GOAL_REWARD } else { -GOAL_REWARD };
        }
        self.remove_control();

        info!(
            tick = self.tick(),
            team = %side,
            home = self.state.score(TeamSide::Home),
            away = self.state.score(TeamSide::Away),
            "goal"
        );
    }
}
