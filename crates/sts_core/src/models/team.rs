use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// TeamSide
// ============================================================================

/// Which bench a player belongs to. The discriminant doubles as the team index
/// stored in persisted records (`control_team`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    #[default]
    Home = 0,
    Away = 1,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::Home, TeamSide::Away];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(TeamSide::Home),
            1 => Some(TeamSide::Away),
            _ => None,
        }
    }

    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    /// Prefix used for per-team keys in state records (`home_score`, `away0_pos_x`).
    pub const fn name(self) -> &'static str {
        match self {
            TeamSide::Home => "home",
            TeamSide::Away => "away",
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// PlayerId
// ============================================================================

/// Stable handle of a player: team side plus roster index ("control index").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId {
    pub side: TeamSide,
    pub index: usize,
}

impl PlayerId {
    pub const fn new(side: TeamSide, index: usize) -> Self {
        Self { side, index }
    }

    /// Key prefix for this player in state records, e.g. `away1`.
    pub fn key_prefix(&self) -> String {
        format!("{}{}", self.side.name(), self.index)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.side.name(), self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        for side in TeamSide::BOTH {
            assert_eq!(side.opponent().opponent(), side);
            assert_ne!(side.opponent(), side);
        }
    }

    #[test]
    fn test_index_round_trip() {
        assert_eq!(TeamSide::from_index(0), Some(TeamSide::Home));
        assert_eq!(TeamSide::from_index(1), Some(TeamSide::Away));
        assert_eq!(TeamSide::from_index(-1), None);
        assert_eq!(TeamSide::Away.index(), 1);
    }

    #[test]
    fn test_key_prefix() {
        assert_eq!(PlayerId::new(TeamSide::Away, 2).key_prefix(), "away2");
        assert_eq!(PlayerId::new(TeamSide::Home, 0).to_string(), "home0");
    }
}
