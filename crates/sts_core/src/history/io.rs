//! JSON persistence for state histories.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use super::StateVector;
use crate::error::Result;

pub const HISTORY_FILE_NAME: &str = "STATEHISTORY.json";

/// `<root>/datasets/<YYYY-MM-DD>/STATEHISTORY.json`
pub fn dated_history_path(root: &Path, date: NaiveDate) -> PathBuf {
    root.join("datasets").join(date.format("%Y-%m-%d").to_string()).join(HISTORY_FILE_NAME)
}

/// Write `states` as one JSON array, creating parent directories.
pub fn save_states<S: AsRef<StateVector>>(path: &Path, states: &[S]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let records: Vec<&StateVector> = states.iter().map(|s| AsRef::<StateVector>::as_ref(s)).collect();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, &records)?;
    writer.flush()?;
    info!(path = %path.display(), records = records.len(), "state history saved");
    Ok(())
}

pub fn load_states(path: &Path) -> Result<Vec<StateVector>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

impl AsRef<StateVector> for StateVector {
    fn as_ref(&self) -> &StateVector {
        self
    }
}
