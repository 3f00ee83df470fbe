use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Match phase. Transitions live in `engine::phase`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    #[default]
    PreGame,
    StartPlay,
    GameOn,
    StoppageGoal,
    StoppageTimeup,
    GameOver,
}

impl GamePhase {
    pub const ALL: [GamePhase; 6] = [
        GamePhase::PreGame,
        GamePhase::StartPlay,
        GamePhase::GameOn,
        GamePhase::StoppageGoal,
        GamePhase::StoppageTimeup,
        GamePhase::GameOver,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            GamePhase::PreGame => "PRE_GAME",
            GamePhase::StartPlay => "START_PLAY",
            GamePhase::GameOn => "GAME_ON",
            GamePhase::StoppageGoal => "STOPPAGE_GOAL",
            GamePhase::StoppageTimeup => "STOPPAGE_TIMEUP",
            GamePhase::GameOver => "GAME_OVER",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == GamePhase::GameOver
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GamePhase {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| SimError::UnknownPhase(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_strings() {
        for phase in GamePhase::ALL {
            assert_eq!(phase.as_str().parse::<GamePhase>().unwrap(), phase);
            assert_eq!(serde_json::to_value(phase).unwrap(), phase.as_str());
        }
    }

    #[test]
    fn test_unknown_phase_is_error() {
        let err = "HALF_TIME".parse::<GamePhase>().unwrap_err();
        assert!(matches!(err, SimError::UnknownPhase(ref s) if s == "HALF_TIME"));
        assert!(err.is_fatal());
    }
}
