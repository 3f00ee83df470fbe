//! Object-centric transition datasets.
//!
//! Every record becomes one row per object (ball first, then the home and
//! away rosters): `[is_ball, is_home, is_away, x, z, vx, vz]`. An episode
//! turns into `obs`/`next_obs` pairs, with each object's mechanism on the
//! `next_obs` side kept aside under `info`.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Episode, StateVector};
use crate::error::{Result, SimError};
use crate::models::TeamSide;

pub const OBJECT_FEATURES: usize = 7;

pub type ObjectRow = [f32; OBJECT_FEATURES];

/// One episode as consecutive transitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionSample {
    /// Placeholder action per transition (always 0)
    pub action: Vec<i64>,
    pub obs: Vec<Vec<ObjectRow>>,
    pub next_obs: Vec<Vec<ObjectRow>>,
    /// `"<object>_mechanism"` -> mechanism per transition
    pub info: BTreeMap<String, Vec<i64>>,
}

fn float(state: &StateVector, key: &str) -> Result<f32> {
    state.get_f64(key).map(|v| v as f32).ok_or_else(|| SimError::MissingKey { key: key.to_string() })
}

fn int(state: &StateVector, key: &str) -> Result<i64> {
    state.get_i64(key).ok_or_else(|| SimError::MissingKey { key: key.to_string() })
}

/// Rows and mechanisms of every object in `state`.
pub fn object_rows(state: &StateVector) -> Result<(Vec<ObjectRow>, Vec<i64>)> {
    let mut rows = vec![[
        1.0,
        0.0,
        0.0,
        float(state, "ball_pos_x")?,
        float(state, "ball_pos_z")?,
        float(state, "ball_vel_x")?,
        float(state, "ball_vel_z")?,
    ]];
    let mut mechanisms = vec![int(state, "ball_mechanism")?];

    for side in TeamSide::BOTH {
        let name = side.name();
        let flags = match side {
            TeamSide::Home => (1.0, 0.0),
            TeamSide::Away => (0.0, 1.0),
        };
        let count = int(state, &format!("{name}_players"))?.max(0);
        for i in 0..count {
            let prefix = format!("{name}{i}");
            rows.push([
                0.0,
                flags.0,
                flags.1,
                float(state, &format!("{prefix}_pos_x"))?,
                float(state, &format!("{prefix}_pos_z"))?,
                float(state, &format!("{prefix}_vel_x"))?,
                float(state, &format!("{prefix}_vel_z"))?,
            ]);
            mechanisms.push(int(state, &format!("{prefix}_mechanism"))?);
        }
    }
    Ok((rows, mechanisms))
}

/// Pair each record of `episode` with its successor.
pub fn episode_transitions(episode: &Episode) -> Result<TransitionSample> {
    let frames = episode.iter().map(object_rows).collect::<Result<Vec<_>>>()?;
    let mut sample = TransitionSample::default();
    for pair in frames.windows(2) {
        let (obs, _) = &pair[0];
        let (next_obs, mechanisms) = &pair[1];
        sample.action.push(0);
        sample.obs.push(obs.clone());
        sample.next_obs.push(next_obs.clone());
        for (i, mechanism) in mechanisms.iter().enumerate() {
            sample.info.entry(format!("{i}_mechanism")).or_default().push(*mechanism);
        }
    }
    Ok(sample)
}

pub fn build_dataset(episodes: &[Episode]) -> Result<Vec<TransitionSample>> {
    episodes.iter().map(episode_transitions).collect()
}

/// Write `samples` as one JSON array, creating parent directories.
pub fn save_dataset(path: &Path, samples: &[TransitionSample]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, samples)?;
    writer.flush()?;
    info!(path = %path.display(), episodes = samples.len(), "transition dataset saved");
    Ok(())
}
