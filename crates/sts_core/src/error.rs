use thiserror::Error;

use crate::models::PlayerId;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("player {player} does not control the ball")]
    NotInControl { player: String },

    #[error("no player at {0:?}")]
    InvalidPlayer(PlayerId),

    #[error("unknown game phase: {0}")]
    UnknownPhase(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("phase transitions did not settle after {steps} steps (stuck in {phase})")]
    PhaseCascade { steps: usize, phase: String },

    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    #[error("invalid rules: {0}")]
    InvalidRules(String),

    #[error("could not place {player} after {attempts} attempts")]
    PlacementFailed { player: String, attempts: usize },

    #[error("state record is missing {key}")]
    MissingKey { key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Fatal errors indicate a caller or configuration bug; the tick that
    /// produced them must not be continued.
    pub fn is_fatal(&self) -> bool {
        match self {
            SimError::NotInControl { .. } => true,
            SimError::InvalidPlayer(_) => true,
            SimError::UnknownPhase(_) => true,
            SimError::PhaseCascade { .. } => true,
            SimError::UnknownAction(_) => false,
            SimError::InvalidRoster(_) => true,
            SimError::InvalidRules(_) => true,
            SimError::PlacementFailed { .. } => true,
            SimError::MissingKey { .. } => false,
            SimError::Io(_) => false,
            SimError::Json(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamSide;

    #[test]
    fn test_precondition_errors_are_fatal() {
        let err = SimError::NotInControl { player: "h_sim_1".to_string() };
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "player h_sim_1 does not control the ball");

        let err = SimError::InvalidPlayer(PlayerId::new(TeamSide::Away, 7));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_io_errors_are_recoverable() {
        let err: SimError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(!err.is_fatal());
        assert!(!SimError::UnknownAction("DANCE".into()).is_fatal());
    }
}
