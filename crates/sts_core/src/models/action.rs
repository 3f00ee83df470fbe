use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Discrete player action.
///
/// The position in [`Action::ALL`] is the action index handed to learners, so
/// the order is part of the dataset format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    #[default]
    None,
    Shoot,
    #[serde(rename = "PASS_1")]
    Pass1,
    #[serde(rename = "PASS_2")]
    Pass2,
    #[serde(rename = "PASS_3")]
    Pass3,
    #[serde(rename = "PASS_4")]
    Pass4,
    Check,
    Stunned,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::None,
        Action::Shoot,
        Action::Pass1,
        Action::Pass2,
        Action::Pass3,
        Action::Pass4,
        Action::Check,
        Action::Stunned,
    ];

    /// `PASSES[k]` passes to the teammate at roster index `k`.
    pub const PASSES: [Action; 4] = [Action::Pass1, Action::Pass2, Action::Pass3, Action::Pass4];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|a| *a == self).unwrap_or(0)
    }

    pub fn pass_to(roster_index: usize) -> Option<Action> {
        Self::PASSES.get(roster_index).copied()
    }

    /// Roster index targeted by a pass action.
    pub fn pass_target(self) -> Option<usize> {
        Self::PASSES.iter().position(|a| *a == self)
    }

    pub fn is_pass(self) -> bool {
        self.pass_target().is_some()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Action::None => "NONE",
            Action::Shoot => "SHOOT",
            Action::Pass1 => "PASS_1",
            Action::Pass2 => "PASS_2",
            Action::Pass3 => "PASS_3",
            Action::Pass4 => "PASS_4",
            Action::Check => "CHECK",
            Action::Stunned => "STUNNED",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| SimError::UnknownAction(s.to_string()))
    }
}
