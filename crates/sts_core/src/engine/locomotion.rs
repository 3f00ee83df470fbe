//! Decisions, RL encoding and movement.

use super::MatchEngine;
use crate::arena::Arena;
use crate::config::LayoutConstraint;
use crate::geometry::{vec2, Vec2};
use crate::models::{Action, PlayerId, TeamSide};
use crate::player::{Decision, Player};
use crate::rl::encode_decision;

/// Lane endpoints (normalized x at own end, at far end) for even roster
/// slots; odd slots use the mirror image.
const CROSSOVER_LANE: (f32, f32) = (0.2, 0.6);

impl MatchEngine {
    /// Rank every player within its team by distance to the ball, nearest
    /// first. Equal distances keep roster order.
    pub(crate) fn rank_players_by_ball_distance(&mut self) {
        let ball = self.state.ball_position();
        for side in TeamSide::BOTH {
            let team = &self.teams[side.index()];
            let mut order: Vec<(f32, usize)> =
                team.iter().map(|p| ((p.position() - ball).norm(), p.index())).collect();
            order.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

            let mut ranks = vec![0; team.len()];
            for (rank, (_, index)) in order.into_iter().enumerate() {
                ranks[index] = rank;
            }
            self.distance_ranks[side.index()] = ranks;
        }
    }

    /// 0 for the teammate nearest the ball. Unranked players report
    /// `usize::MAX`.
    pub fn distance_rank(&self, id: PlayerId) -> usize {
        self.distance_ranks[id.side.index()].get(id.index).copied().unwrap_or(usize::MAX)
    }

    /// Let every capable player think, apply the decisions, then encode them.
    ///
    /// Decisions are gathered against an unchanged match before any is
    /// applied. Locked-out players skip thinking: their action resets to
    /// NONE (a stun stays) and their input is kept.
    pub(crate) fn ai_update(&mut self) {
        self.rank_players_by_ball_distance();

        let decisions: Vec<(PlayerId, Option<Decision>)> = self
            .players()
            .map(|p| (p.id(), p.is_capable().then(|| p.policy().think(self, p.id()))))
            .collect();

        for (id, decision) in decisions {
            let Some(player) = self.player_mut(id) else { continue };
            match decision {
                Some(decision) => player.apply_decision(decision),
                None if !player.is_stunned() => player.set_action(Action::None),
                None => {}
            }
        }

        self.encode_decisions();
    }

    fn encode_decisions(&mut self) {
        let encoded: Vec<_> = self
            .players()
            .map(|p| encode_decision(p.action(), p.input(), self.arena.attack_dir(p.side())))
            .collect();
        self.frame.decisions = encoded;
    }

    /// Move every player, then apply the layout constraint if one is set.
    pub(crate) fn locomotion_update(&mut self) {
        let rules = &self.rules;
        let arena = &self.arena;
        for player in self.teams.iter_mut().flatten() {
            player.run_motion_model(rules);
            if rules.layout_constraint == LayoutConstraint::CrossoverConstraint {
                let constrained = crossover_position(arena, player);
                player.set_position(constrained);
            }
        }
    }
}

/// Snap `player` onto its diagonal lane at its current depth. Lanes are
/// defined from the home end and mirrored through the centre for away.
fn crossover_position(arena: &Arena, player: &Player) -> Vec2 {
    let (mut x1, mut x2) = CROSSOVER_LANE;
    if player.index() % 2 == 1 {
        (x1, x2) = (1.0 - x1, 1.0 - x2);
    }

    let away = player.side() == TeamSide::Away;
    let mut depth = arena.normalized(player.position()).y;
    if away {
        depth = 1.0 - depth;
    }

    let mut x = x1 + (x2 - x1) * depth;
    if away {
        x = 1.0 - x;
        depth = 1.0 - depth;
    }
    arena.from_normalized(vec2(x, depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rules;
    use crate::engine::test_fixtures::{engine_with, engine_with_rules, place};
    use crate::player::PolicyKind;

    #[test]
    fn test_distance_ranks_per_team() {
        let mut engine = engine_with(&[PolicyKind::Simple; 3], &[PolicyKind::Simple; 2], 1);
        let home = |i| PlayerId::new(TeamSide::Home, i);
        let away = |i| PlayerId::new(TeamSide::Away, i);
        place(&mut engine, home(0), vec2(0.0, 9.0));
        place(&mut engine, home(1), vec2(0.0, 1.0));
        place(&mut engine, home(2), vec2(0.0, -4.0));
        place(&mut engine, away(0), vec2(2.0, 0.0));
        place(&mut engine, away(1), vec2(-2.0, 0.0));

        engine.rank_players_by_ball_distance();
        assert_eq!(engine.distance_rank(home(1)), 0);
        assert_eq!(engine.distance_rank(home(2)), 1);
        assert_eq!(engine.distance_rank(home(0)), 2);
        // Tie: roster order decides.
        assert_eq!(engine.distance_rank(away(0)), 0);
        assert_eq!(engine.distance_rank(away(1)), 1);
    }

    #[test]
    fn test_locked_out_player_does_not_think() {
        let mut engine = engine_with(&[PolicyKind::Simple], &[], 1);
        let id = PlayerId::new(TeamSide::Home, 0);
        {
            let player = engine.player_mut(id).unwrap();
            player.set_action(Action::Shoot);
            player.set_input(vec2(1.0, 0.0));
            player.response_time(2);
        }
        engine.ai_update();
        let player = engine.player(id).unwrap();
        assert_eq!(player.action(), Action::None);
        assert_eq!(player.input(), vec2(1.0, 0.0));
    }

    #[test]
    fn test_stun_survives_ai_update() {
        let mut engine = engine_with(&[PolicyKind::Simple], &[], 1);
        let id = PlayerId::new(TeamSide::Home, 0);
        engine.player_mut(id).unwrap().stun(4);
        engine.ai_update();
        assert_eq!(engine.player(id).unwrap().action(), Action::Stunned);
        assert_eq!(engine.frame.decisions.len(), 1);
    }

    #[test]
    fn test_crossover_lanes() {
        let rules = Rules { layout_constraint: LayoutConstraint::CrossoverConstraint, ..Rules::default() };
        let mut engine = engine_with_rules(&[PolicyKind::Simple; 2], &[PolicyKind::Simple], rules, 1);
        let arena = engine.arena().clone();

        // Home slot 0 at its own end sits at 0.2 of the width.
        place(&mut engine, PlayerId::new(TeamSide::Home, 0), arena.from_normalized(vec2(0.9, 0.0)));
        // Home slot 1 mirrors: 0.8 at its own end.
        place(&mut engine, PlayerId::new(TeamSide::Home, 1), arena.from_normalized(vec2(0.1, 0.0)));
        // Away slot 0 at its own end (far z) mirrors to 0.8.
        place(&mut engine, PlayerId::new(TeamSide::Away, 0), arena.from_normalized(vec2(0.5, 1.0)));
        engine.locomotion_update();

        let norm = |side, i| arena.normalized(engine.player(PlayerId::new(side, i)).unwrap().position());
        assert!((norm(TeamSide::Home, 0).x - 0.2).abs() < 1e-5);
        assert!((norm(TeamSide::Home, 1).x - 0.8).abs() < 1e-5);
        assert!((norm(TeamSide::Away, 0).x - 0.8).abs() < 1e-5);
    }
}
