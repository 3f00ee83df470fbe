//! Bridge between external agents and the match.
//!
//! Agents submit commands keyed by player name; `AGENT` policies read them
//! during the next tick. Observations are the same flat state record that
//! the history stores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::MatchEngine;
use crate::error::Result;
use crate::geometry::{vec2, Vec2};
use crate::history::StateVector;
use crate::models::{Action, GamePhase};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentCommand {
    pub action: Action,
    pub input: Vec2,
}

/// Wire form of a command: the action may be omitted or null.
#[derive(Debug, Deserialize)]
struct RawCommand {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    input: [f32; 2],
}

impl RawCommand {
    fn into_command(self) -> Result<AgentCommand> {
        let action = match self.action {
            Some(name) => name.parse()?,
            None => Action::None,
        };
        Ok(AgentCommand { action, input: vec2(self.input[0], self.input[1]) })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientAdapter {
    pending: BTreeMap<String, AgentCommand>,
}

impl ClientAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending commands. Commands persist until replaced.
    pub fn receive_action(&mut self, commands: BTreeMap<String, AgentCommand>) {
        debug!(players = commands.len(), "agent commands received");
        self.pending = commands;
    }

    /// Parse `{"h_ai_1": {"action": "SHOOT", "input": [0.0, 1.0]}, ...}`.
    ///
    /// Unknown action names are rejected and leave the pending commands as
    /// they were.
    pub fn receive_action_json(&mut self, payload: &str) -> Result<()> {
        let raw: BTreeMap<String, RawCommand> = serde_json::from_str(payload)?;
        let commands = raw
            .into_iter()
            .map(|(name, cmd)| cmd.into_command().map(|c| (name, c)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        self.receive_action(commands);
        Ok(())
    }

    pub fn unpack_action(&self, player_name: &str) -> Option<&AgentCommand> {
        self.pending.get(player_name)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// What an agent sees after a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub state: StateVector,
    pub player_names: Vec<String>,
}

impl Observation {
    pub fn current_phase(&self) -> Option<&str> {
        self.state.get_str("current_phase")
    }

    pub fn is_game_over(&self) -> bool {
        self.current_phase() == Some(GamePhase::GameOver.as_str())
    }
}

impl MatchEngine {
    pub fn send_state(&self) -> Observation {
        Observation {
            state: self.state_vector(),
            player_names: self.players().map(|p| p.name().to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn test_receive_json_payload() {
        let mut adapter = ClientAdapter::new();
        adapter
            .receive_action_json(r#"{"h_ai_1": {"action": "PASS_2", "input": [0.5, 1.0]}, "a_ai_1": {"action": null}}"#)
            .unwrap();

        let cmd = adapter.unpack_action("h_ai_1").unwrap();
        assert_eq!(cmd.action, Action::Pass2);
        assert_eq!(cmd.input, vec2(0.5, 1.0));
        assert_eq!(adapter.unpack_action("a_ai_1").unwrap().action, Action::None);
        assert!(adapter.unpack_action("h_ai_2").is_none());
    }

    #[test]
    fn test_unknown_action_keeps_previous_commands() {
        let mut adapter = ClientAdapter::new();
        adapter.receive_action_json(r#"{"h_ai_1": {"action": "SHOOT"}}"#).unwrap();
        let err = adapter.receive_action_json(r#"{"h_ai_1": {"action": "DEKE"}}"#).unwrap_err();
        assert!(matches!(err, SimError::UnknownAction(_)));
        assert_eq!(adapter.unpack_action("h_ai_1").unwrap().action, Action::Shoot);
    }

    #[test]
    fn test_commands_are_replaced_wholesale() {
        let mut adapter = ClientAdapter::new();
        adapter.receive_action_json(r#"{"h_ai_1": {"action": "SHOOT"}}"#).unwrap();
        adapter.receive_action(BTreeMap::new());
        assert!(adapter.unpack_action("h_ai_1").is_none());
    }

    #[test]
    fn test_observation_game_over() {
        let mut state = StateVector::new();
        state.insert("current_phase", "GAME_OVER");
        let obs = Observation { state, player_names: vec![] };
        assert!(obs.is_game_over());
    }
}
