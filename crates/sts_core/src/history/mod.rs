//! Per-tick history of a match.
//!
//! Every tick appends one [`HistoryEntry`]: a flat state record plus the RL
//! encoding of each player's decision. The state records are what gets
//! persisted as `STATEHISTORY.json`.

mod dataset;
mod episodes;
mod io;

pub use dataset::{build_dataset, episode_transitions, object_rows, save_dataset, ObjectRow, TransitionSample, OBJECT_FEATURES};
pub use episodes::{flatten_episodes, split_episodes, subsample_episodes, Episode};
pub use io::{dated_history_path, load_states, save_states, HISTORY_FILE_NAME};

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::GamePhase;
use crate::rl::PolicyVector;

/// One value in a flat state record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(v) => Some(*v),
            Scalar::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(v) => Some(*v as f64),
            Scalar::Float(v) => Some(*v),
            Scalar::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<u32> for Scalar {
    fn from(v: u32) -> Self {
        Scalar::Int(i64::from(v))
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Scalar::Float(f64::from(v))
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

/// Flat, key-sorted state record (`tick`, `current_phase`, `home0_pos_x`, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateVector(BTreeMap<String, Scalar>);

impl StateVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Scalar>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.0.get(key)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Scalar::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Scalar::as_f64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Scalar::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn tick(&self) -> Option<u64> {
        self.get_i64("tick").and_then(|t| u64::try_from(t).ok())
    }

    /// `current_phase`, parsed. Missing or unknown phases are errors.
    pub fn current_phase(&self) -> Result<GamePhase> {
        self.get_str("current_phase").unwrap_or_default().parse()
    }
}

/// One tick of recorded play. Entries loaded from disk only carry `tick` and
/// `state`; the per-player lists stay empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub tick: u64,
    pub state: StateVector,
    pub player_names: Vec<String>,
    pub policies: Vec<PolicyVector>,
    pub actions: Vec<usize>,
    pub value_estimates: Vec<f32>,
    pub rewards: Vec<f32>,
}

/// Append-only list of [`HistoryEntry`].
#[derive(Debug, Clone, Default)]
pub struct HistoryRecorder {
    entries: Vec<HistoryEntry>,
}

impl HistoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn states(&self) -> impl Iterator<Item = &StateVector> {
        self.entries.iter().map(|e| &e.state)
    }

    /// Write every state record as a JSON array.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let states: Vec<&StateVector> = self.states().collect();
        save_states(path, &states)
    }

    /// Append the records stored at `path`, skipping the first `start`.
    ///
    /// Returns the number of entries added.
    pub fn load_json(&mut self, path: &Path, start: usize) -> Result<usize> {
        let states = load_states(path)?;
        let before = self.entries.len();
        for state in states.into_iter().skip(start) {
            let tick = state.tick().unwrap_or_default();
            self.entries.push(HistoryEntry { tick, state, ..HistoryEntry::default() });
        }
        Ok(self.entries.len() - before)
    }
}
