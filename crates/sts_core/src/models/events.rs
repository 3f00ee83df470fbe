use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEventKind {
    GameStart,
    GameEnd,
    Goal,
    Shot,
    Pass,
    Check,
    GainControl,
}

impl GameEventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            GameEventKind::GameStart => "GAME_START",
            GameEventKind::GameEnd => "GAME_END",
            GameEventKind::Goal => "GOAL",
            GameEventKind::Shot => "SHOT",
            GameEventKind::Pass => "PASS",
            GameEventKind::Check => "CHECK",
            GameEventKind::GainControl => "GAIN_CONTROL",
        }
    }
}

impl fmt::Display for GameEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One match event. `target` is empty when the event has no secondary actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub tick: u64,
    pub kind: GameEventKind,
    pub actor: String,
    pub target: String,
}

impl GameEvent {
    pub fn new(tick: u64, kind: GameEventKind, actor: impl Into<String>, target: impl Into<String>) -> Self {
        Self { tick, kind, actor: actor.into(), target: target.into() }
    }
}

/// Append-only event log for the lifetime of a match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }

    pub fn count(&self, kind: GameEventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn of_kind(&self, kind: GameEventKind) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    /// Events recorded during `tick`.
    pub fn at_tick(&self, tick: u64) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().filter(move |e| e.tick == tick)
    }

    pub fn as_slice(&self) -> &[GameEvent] {
        &self.events
    }
}
