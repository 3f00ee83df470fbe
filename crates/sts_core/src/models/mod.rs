//! Shared value types: team sides, player ids, actions, phases and events.

pub mod action;
pub mod events;
pub mod phase;
pub mod team;

pub use action::Action;
pub use events::{EventLog, GameEvent, GameEventKind};
pub use phase::GamePhase;
pub use team::{PlayerId, TeamSide};
