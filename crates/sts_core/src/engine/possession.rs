//! Possession: who controls the ball.
//!
//! Control is a single `Option<PlayerId>` in [`MatchState`](super::MatchState),
//! so at most one player holds the ball at any time.

use tracing::trace;

use super::MatchEngine;
use crate::error::{Result, SimError};
use crate::models::{GameEventKind, PlayerId};
use crate::player::Player;

impl MatchEngine {
    /// Hand the ball to `id`: the ball snaps to the player, its velocity
    /// becomes the jump it just made and any pending release is dropped.
    pub fn give_control(&mut self, id: PlayerId) -> Result<()> {
        let player = self.require_player(id)?;
        let position = player.position();
        let name = player.name().to_string();

        let previous = self.state.ball_position();
        self.state.set_control(Some(id));
        self.state.set_ball_position(position);
        self.state.set_ball_velocity(position - previous);
        self.state.set_send_direction(None);

        trace!(tick = self.tick(), player = %name, "control gained");
        self.emit(GameEventKind::GainControl, name, "");
        Ok(())
    }

    /// Leave the ball loose. Idempotent.
    pub fn remove_control(&mut self) {
        self.state.set_control(None);
    }

    pub fn control(&self) -> Option<PlayerId> {
        self.state.control()
    }

    pub fn controller(&self) -> Option<&Player> {
        self.control().and_then(|id| self.player(id))
    }

    pub fn has_control(&self, id: PlayerId) -> bool {
        self.control() == Some(id)
    }

    /// The player `id`, provided it holds the ball.
    pub(crate) fn require_control(&self, id: PlayerId) -> Result<&Player> {
        let player = self.require_player(id)?;
        if self.has_control(id) {
            Ok(player)
        } else {
            Err(SimError::NotInControl { player: player.name().to_string() })
        }
    }
}
