//! Shot, pass and check resolution.
//!
//! Chances are products of two factors: how likely the ball gets past
//! capable defenders ([`intercept_test`]) and, for shots, how well placed
//! the shooter is. Non-simulated calls also carry out the action.

use tracing::debug;

use super::MatchEngine;
use crate::error::Result;
use crate::geometry::{intercept_test, Vec2};
use crate::models::{Action, GameEventKind, PlayerId, TeamSide};

impl MatchEngine {
    /// Positions of players on `side` who are not locked out.
    pub(crate) fn capable_positions(&self, side: TeamSide) -> Vec<Vec2> {
        self.team(side).iter().filter(|p| p.is_capable()).map(|p| p.position()).collect()
    }

    /// Chance that a shot by `id` from where it stands would be on target.
    pub fn on_net_chance(&self, id: PlayerId) -> Result<f32> {
        let player = self.require_player(id)?;
        Ok(self.on_net_chance_from(player.side(), player.position()))
    }

    /// On-net chance for a `side` shooter at `position`: directness (forward
    /// share of the net direction) times a distance factor that is 1 up to
    /// `shot_distance_accuracy_scale` and falls off beyond it.
    pub fn on_net_chance_from(&self, side: TeamSide, position: Vec2) -> f32 {
        let delta = self.arena.scoring_net(side) - position;
        let len = delta.norm();
        if len <= f32::EPSILON {
            return 1.0;
        }
        let directness = (delta.y / len).abs();
        let forward = delta.y.abs();
        let distance = if forward <= f32::EPSILON {
            1.0
        } else {
            (self.rules.shot_distance_accuracy_scale / forward).min(1.0)
        };
        directness * distance
    }

    /// Scoring chance of a shot by `id`, without taking it. Zero when nobody
    /// controls the ball.
    pub fn shot_chance(&self, id: PlayerId) -> Result<f32> {
        let shooter = self.require_player(id)?;
        let Some(carrier) = self.controller() else {
            return Ok(0.0);
        };
        let net = self.arena.scoring_net(shooter.side());
        let defenders = self.capable_positions(carrier.side().opponent());
        let through = intercept_test(shooter.position(), net, &defenders, self.rules.max_intercept_dist);
        Ok(through * self.on_net_chance_from(shooter.side(), shooter.position()))
    }

    /// Shoot at the attacking net. With `simulate` only the chance is
    /// computed; otherwise `id` must hold the ball and the shot is taken.
    pub fn player_shot(&mut self, id: PlayerId, simulate: bool) -> Result<f32> {
        if simulate {
            return self.shot_chance(id);
        }
        let shooter = self.require_control(id)?;
        let name = shooter.name().to_string();
        let net = self.arena.scoring_net(shooter.side());
        let chance = self.shot_chance(id)?;

        self.emit(GameEventKind::Shot, name.clone(), "");
        let lockout = self.rules.shot_response_time;
        self.require_player_mut(id)?.response_time(lockout);
        self.send_ball(net);
        debug!(tick = self.tick(), shooter = %name, chance, "shot");
        Ok(chance)
    }

    /// Chance that a pass from `source` (who must hold the ball) reaches
    /// `target` without being intercepted.
    pub fn pass_chance(&self, source: PlayerId, target: PlayerId) -> Result<f32> {
        let passer = self.require_control(source)?;
        let receiver = self.require_player(target)?;
        let defenders = self.capable_positions(passer.side().opponent());
        Ok(intercept_test(passer.position(), receiver.position(), &defenders, self.rules.max_intercept_dist))
    }

    pub fn player_pass(&mut self, source: PlayerId, target: PlayerId, simulate: bool) -> Result<f32> {
        let chance = self.pass_chance(source, target)?;
        if simulate {
            return Ok(chance);
        }
        let passer = self.require_player(source)?.name().to_string();
        let receiver = self.require_player(target)?;
        let (receiver_name, receiver_pos) = (receiver.name().to_string(), receiver.position());

        self.emit(GameEventKind::Pass, passer.clone(), receiver_name.clone());
        self.send_ball(receiver_pos);
        let lockout = self.rules.pass_response_time;
        self.require_player_mut(source)?.response_time(lockout);
        debug!(tick = self.tick(), passer = %passer, receiver = %receiver_name, chance, "pass");
        Ok(chance)
    }

    /// `checker` knocks the ball off `controller`: the controller is stunned
    /// and the ball is left loose.
    pub fn complete_check(&mut self, controller: PlayerId, checker: PlayerId) -> Result<()> {
        let victim = self.require_control(controller)?.name().to_string();
        let hitter = self.require_player(checker)?.name().to_string();

        self.emit(GameEventKind::Check, hitter.clone(), victim.clone());
        let stun = self.rules.check_stun_time;
        self.require_player_mut(controller)?.stun(stun);
        self.remove_control();
        debug!(tick = self.tick(), checker = %hitter, victim = %victim, "check");
        Ok(())
    }

    /// Carry out the controller's SHOOT or PASS_k. Passes to oneself or to an
    /// empty roster slot are ignored.
    pub(crate) fn action_update(&mut self) -> Result<()> {
        let Some(carrier) = self.controller() else {
            return Ok(());
        };
        let id = carrier.id();
        match carrier.action() {
            Action::Shoot => {
                self.player_shot(id, false)?;
            }
            action => {
                if let Some(slot) = action.pass_target() {
                    let target = PlayerId::new(id.side, slot);
                    if slot != id.index && self.player(target).is_some() {
                        self.player_pass(id, target, false)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolve checks against the controller: the first capable opponent in
    /// roster order whose action is CHECK and who is within `check_dist`.
    pub(crate) fn check_update(&mut self) -> Result<()> {
        let Some(carrier) = self.controller() else {
            return Ok(());
        };
        let (controller, carrier_pos) = (carrier.id(), carrier.position());
        let reach = self.rules.check_dist;
        let checker = self
            .team(controller.side.opponent())
            .iter()
            .find(|p| p.is_capable() && p.action() == Action::Check && (p.position() - carrier_pos).norm() <= reach)
            .map(|p| p.id());

        if let Some(checker) = checker {
            self.complete_check(controller, checker)?;
        }
        Ok(())
    }
}
