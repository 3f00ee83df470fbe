//! Phase state machine.
//!
//! ```text
//! PRE_GAME -> START_PLAY -> GAME_ON -> STOPPAGE_GOAL -> START_PLAY
//!                              |
//!                              +-> STOPPAGE_TIMEUP -> GAME_OVER
//! ```
//!
//! Transitions that follow each other within one tick are run by a bounded
//! loop in [`MatchEngine::phase_update`].

use rand::Rng;
use tracing::debug;

use super::MatchEngine;
use crate::error::{Result, SimError};
use crate::geometry::{collision_test, vec2, Vec2};
use crate::models::{GameEventKind, GamePhase, PlayerId, TeamSide};

/// Upper bound on phase transitions within a single tick.
pub const MAX_PHASE_STEPS: usize = 8;

/// Kickoff placement draws per player before giving up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

impl MatchEngine {
    /// Change phase, recording the one being left.
    pub(crate) fn set_game_phase(&mut self, phase: GamePhase) {
        let from = self.state.phase();
        self.state.set_phase(phase);
        if from != phase {
            debug!(tick = self.tick(), from = %from, to = %phase, "phase transition");
        }
    }

    /// Run the phase machine until it settles for this tick. A tick that
    /// enters GAME_ON from START_PLAY ends with `previous_phase` still
    /// START_PLAY; a tick that stays in GAME_ON clears it.
    pub(crate) fn phase_update(&mut self) -> Result<()> {
        let mut entered_game_on = false;
        for _ in 0..MAX_PHASE_STEPS {
            let tick = self.tick();
            match self.state.phase() {
                GamePhase::PreGame => {
                    self.set_game_phase(GamePhase::StartPlay);
                    self.emit(GameEventKind::GameStart, "", "");
                }
                GamePhase::StartPlay => {
                    self.on_play_start()?;
                    self.set_game_phase(GamePhase::GameOn);
                    entered_game_on = true;
                }
                GamePhase::GameOn => {
                    if tick >= self.rules.max_tick {
                        self.set_game_phase(GamePhase::StoppageTimeup);
                        self.emit(GameEventKind::GameEnd, "", "");
                    } else if tick.saturating_sub(self.round_start_tick) >= self.rules.max_round_tick {
                        debug!(tick, round_start = self.round_start_tick, "round timed out");
                        self.wipe_current_round();
                        self.set_game_phase(GamePhase::StartPlay);
                    } else {
                        if !entered_game_on {
                            self.set_game_phase(GamePhase::GameOn);
                        }
                        return Ok(());
                    }
                }
                GamePhase::StoppageGoal => self.set_game_phase(GamePhase::StartPlay),
                GamePhase::StoppageTimeup => self.set_game_phase(GamePhase::GameOver),
                GamePhase::GameOver => return Ok(()),
            }
        }
        Err(SimError::PhaseCascade { steps: MAX_PHASE_STEPS, phase: self.state.phase().to_string() })
    }

    /// Reset players, place them, re-initialise the ball and hand it to
    /// someone.
    pub(crate) fn on_play_start(&mut self) -> Result<()> {
        for player in self.players_mut() {
            player.on_play_start();
        }
        self.init_player_positions()?;
        self.state.init_ball();
        self.randomly_give_control()?;
        self.round_start_tick = self.tick();
        Ok(())
    }

    /// Drop possession and the ball's motion; the score stands.
    pub(crate) fn wipe_current_round(&mut self) {
        self.remove_control();
        self.state.init_ball();
        self.state.set_ball_velocity(Vec2::zeros());
    }

    /// Scatter players over their own half without overlaps. Depth is
    /// sampled in `[0, 0.5)` and shaped by `init_position_exponent`; the
    /// lateral coordinate is a whole number inside the boards.
    pub(crate) fn init_player_positions(&mut self) -> Result<()> {
        let radius = self.rules.player_radius;
        let exponent = self.rules.init_position_exponent;
        let min_x = self.arena.min_x.round() as i32;
        let max_x = (self.arena.max_x.round() as i32).max(min_x + 1);

        let mut placed: Vec<Vec2> = Vec::with_capacity(self.player_count());
        for id in self.player_ids() {
            let attack_z = self.arena.scoring_net(id.side).y;
            let mut attempts = 0;
            let position = loop {
                if attempts >= MAX_PLACEMENT_ATTEMPTS {
                    let player = self.require_player(id)?.name().to_string();
                    return Err(SimError::PlacementFailed { player, attempts });
                }
                attempts += 1;
                let r: f32 = self.rng.gen_range(0.0..0.5);
                let r = r.powf(exponent);
                let z = attack_z * r - attack_z * (1.0 - r);
                let x = self.rng.gen_range(min_x..max_x) as f32;
                let candidate = vec2(x, z);
                if !collision_test(candidate, &placed, radius) {
                    break candidate;
                }
            };
            placed.push(position);
            self.require_player_mut(id)?.set_position(position);
        }
        Ok(())
    }

    /// Give the ball to a random player. Sides alternate with the total
    /// score so kickoffs take turns; an empty side defers to the other.
    pub(crate) fn randomly_give_control(&mut self) -> Result<()> {
        let mut side = if self.state.total_score() % 2 == 0 { TeamSide::Home } else { TeamSide::Away };
        if self.team(side).is_empty() {
            side = side.opponent();
        }
        let size = self.team(side).len();
        if size == 0 {
            return Ok(());
        }
        let id = PlayerId::new(side, self.rng.gen_range(0..size));
        self.give_control(id)?;
        let lockout = self.rules.receive_response_time;
        self.require_player_mut(id)?.response_time(lockout);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Rules;
    use crate::engine::test_fixtures::{engine_with, engine_with_rules};
    use crate::error::SimError;
    use crate::geometry::collision_test;
    use crate::models::{GameEventKind, GamePhase, TeamSide};
    use crate::player::PolicyKind;

    const SIMS: [PolicyKind; 3] = [PolicyKind::Simple; 3];

    #[test]
    fn test_pre_game_reaches_game_on_in_one_call() {
        let mut engine = engine_with(&SIMS, &SIMS, 7);
        engine.phase_update().unwrap();
        assert_eq!(engine.phase(), GamePhase::GameOn);
        assert_eq!(engine.state().previous_phase(), GamePhase::StartPlay);
        assert_eq!(engine.events().of_kind(GameEventKind::GameStart).count(), 1);
        assert!(engine.control().is_some());
    }

    #[test]
    fn test_previous_phase_clears_while_play_continues() {
        let mut engine = engine_with(&SIMS, &SIMS, 7);
        engine.phase_update().unwrap();
        assert_eq!(engine.state().previous_phase(), GamePhase::StartPlay);

        engine.phase_update().unwrap();
        assert_eq!(engine.phase(), GamePhase::GameOn);
        assert_eq!(engine.state().previous_phase(), GamePhase::GameOn);
    }

    #[test]
    fn test_goal_restart_exposes_start_play_edge() {
        let mut engine = engine_with(&SIMS, &SIMS, 7);
        engine.phase_update().unwrap();
        engine.award_goal(TeamSide::Home);
        engine.phase_update().unwrap();
        assert_eq!(engine.phase(), GamePhase::GameOn);
        assert_eq!(engine.state().previous_phase(), GamePhase::StartPlay);
    }

    #[test]
    fn test_round_timeout_reinitialises_ball_and_possession() {
        let rules = Rules { max_round_tick: 5, ..Rules::default() };
        let mut engine = engine_with_rules(&SIMS, &SIMS, rules, 2);
        engine.run(5).unwrap();
        assert_eq!(engine.tick(), 5);
        let before = engine.events().count(GameEventKind::GainControl);

        engine.phase_update().unwrap();
        assert_eq!(engine.round_start_tick(), 5);
        assert_eq!(engine.state().previous_phase(), GamePhase::StartPlay);
        assert_eq!(engine.events().count(GameEventKind::GainControl), before + 1);
        let kickoff = engine.events().last().unwrap();
        assert_eq!((kickoff.kind, kickoff.tick), (GameEventKind::GainControl, 5));

        let carrier = engine.controller().unwrap();
        assert_eq!(kickoff.actor, carrier.name());
        assert_eq!(engine.state().ball_position(), carrier.position());
    }

    #[test]
    fn test_kickoff_goes_to_home_first_then_alternates() {
        let mut engine = engine_with(&SIMS, &SIMS, 3);
        engine.phase_update().unwrap();
        assert_eq!(engine.control().unwrap().side, TeamSide::Home);

        engine.award_goal(TeamSide::Home);
        engine.phase_update().unwrap();
        assert_eq!(engine.phase(), GamePhase::GameOn);
        assert_eq!(engine.control().unwrap().side, TeamSide::Away);
    }

    #[test]
    fn test_kickoff_with_empty_home_goes_away() {
        let mut engine = engine_with(&[], &[PolicyKind::Simple], 3);
        engine.phase_update().unwrap();
        assert_eq!(engine.control().unwrap().side, TeamSide::Away);
    }

    #[test]
    fn test_kickoff_receiver_is_locked_out() {
        let mut engine = engine_with(&SIMS, &SIMS, 11);
        engine.phase_update().unwrap();
        let carrier = engine.controller().unwrap();
        assert_eq!(carrier.action_time(), engine.rules().receive_response_time);
    }

    #[test]
    fn test_players_start_in_own_half_without_overlap() {
        let mut engine = engine_with(&[PolicyKind::Simple; 4], &[PolicyKind::Simple; 4], 21);
        engine.phase_update().unwrap();

        let radius = engine.rules().player_radius;
        let mut seen = Vec::new();
        for player in engine.players() {
            let pos = player.position();
            match player.side() {
                TeamSide::Home => assert!(pos.y <= 0.0, "{} at {pos:?}", player.name()),
                TeamSide::Away => assert!(pos.y >= 0.0, "{} at {pos:?}", player.name()),
            }
            assert_eq!(pos.x.fract(), 0.0);
            assert!(!collision_test(pos, &seen, radius));
            seen.push(pos);
        }
    }

    #[test]
    fn test_zero_max_tick_ends_immediately() {
        let rules = Rules { max_tick: 0, ..Rules::default() };
        let mut engine = engine_with_rules(&SIMS, &SIMS, rules, 1);
        engine.phase_update().unwrap();
        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert_eq!(engine.state().previous_phase(), GamePhase::StoppageTimeup);
        assert_eq!(engine.events().of_kind(GameEventKind::GameEnd).count(), 1);
    }

    #[test]
    fn test_crowded_arena_fails_placement() {
        let rules = Rules { arena_size: [2, 40], player_radius: 5.0, ..Rules::default() };
        let mut engine = engine_with_rules(&[PolicyKind::Simple; 3], &[], rules, 1);
        let err = engine.phase_update().unwrap_err();
        assert!(matches!(err, SimError::PlacementFailed { .. }));
        assert!(err.is_fatal());
    }
}
