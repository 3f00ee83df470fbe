//! Contact handling: players pushing each other apart and the ball
//! bouncing off the boards.

use tracing::trace;

use super::{BallMechanism, MatchEngine};
use crate::geometry::vec2;

/// Overlaps shallower than this are ignored.
const CONTACT_EPSILON: f32 = 1e-6;

impl MatchEngine {
    /// Separate overlapping players symmetrically, then keep everyone inside
    /// the boards. Pairs are visited in global order.
    pub(crate) fn resolve_player_collisions(&mut self) {
        let radius = self.rules.player_radius;
        let min_dist = 2.0 * radius;
        let ids = self.player_ids();

        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                let (Some(pa), Some(pb)) = (self.player(a), self.player(b)) else { continue };
                let (pos_a, pos_b) = (pa.position(), pb.position());
                let delta = pos_b - pos_a;
                let dist = delta.norm();
                let overlap = min_dist - dist;
                if overlap <= CONTACT_EPSILON {
                    continue;
                }
                // Coincident players are split along x.
                let normal = if dist > CONTACT_EPSILON { delta / dist } else { vec2(1.0, 0.0) };
                let push = normal * (overlap * 0.5);
                if let Some(p) = self.player_mut(a) {
                    p.set_position(pos_a - push);
                }
                if let Some(p) = self.player_mut(b) {
                    p.set_position(pos_b + push);
                }
            }
        }

        let arena = &self.arena;
        for player in self.teams.iter_mut().flatten() {
            let clamped = arena.clamp_inside(player.position(), radius);
            player.set_position(clamped);
        }
    }

    /// Reflect a loose ball off the boards. Runs last in the tick.
    pub(crate) fn board_ball_collision(&mut self) {
        if self.state.control().is_some() {
            return;
        }
        let r = self.rules.ball_radius;
        let (lo_x, hi_x) = (self.arena.min_x + r, self.arena.max_x - r);
        let (lo_z, hi_z) = (self.arena.min_z + r, self.arena.max_z - r);
        let mut pos = self.state.ball_position();
        let mut vel = self.state.ball_velocity();
        let mut bounced = false;

        if pos.x < lo_x || pos.x > hi_x {
            let wall = if pos.x < lo_x { lo_x } else { hi_x };
            pos.x = (2.0 * wall - pos.x).clamp(lo_x, hi_x);
            vel.x = -vel.x;
            bounced = true;
        }
        if pos.y < lo_z || pos.y > hi_z {
            let wall = if pos.y < lo_z { lo_z } else { hi_z };
            pos.y = (2.0 * wall - pos.y).clamp(lo_z, hi_z);
            vel.y = -vel.y;
            bounced = true;
        }

        if bounced {
            trace!(tick = self.tick(), x = pos.x, z = pos.y, "ball off the boards");
            self.state.set_ball_position(pos);
            self.state.set_ball_velocity(vel);
            self.state.set_ball_mechanism(BallMechanism::Rebound);
        }
    }
}
