//! File-backed save/load of the dynasty state.
//!
//! One JSON document at a fixed path holds the whole state: the character
//! mapping, the player's character ID, and the last-saved timestamp.
//! Failures surface as [`StoreError`] so callers can retry or alert.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Character, DynastyGraph};

/// Fixed file name for the save slot.
pub const SAVE_FILE_NAME: &str = "dynastylife-save-v1.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("save file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The persisted record: everything needed to resume a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveState {
    pub dynasty: BTreeMap<u64, Character>,
    #[serde(default)]
    pub player_id: Option<u64>,
    /// Unix-epoch milliseconds, stamped by [`SaveFile::save`].
    #[serde(default)]
    pub last_saved: Option<u64>,
}

impl SaveState {
    pub fn from_graph(graph: &DynastyGraph, player_id: Option<u64>) -> Self {
        Self {
            dynasty: graph.characters.clone(),
            player_id,
            last_saved: None,
        }
    }

    /// Rebuild the graph, with the ID generator resumed past the highest
    /// saved ID.
    pub fn into_graph(self) -> DynastyGraph {
        DynastyGraph::from_characters(self.dynasty)
    }
}

/// Handle to one save file on disk.
#[derive(Debug, Clone)]
pub struct SaveFile {
    path: PathBuf,
}

impl SaveFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The canonical save slot inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SAVE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stamp `last_saved` with the current time and write the state out.
    pub fn save(&self, state: &mut SaveState) -> Result<(), StoreError> {
        state.last_saved = Some(now_millis());
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer(&mut writer, state)?;
        // BufWriter's Drop discards flush errors; flush explicitly so a
        // failed write comes back as an error instead of a silent no-op.
        writer.flush()?;
        Ok(())
    }

    /// Read the save back; `Ok(None)` when no save file exists yet.
    pub fn load(&self) -> Result<Option<SaveState>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let state = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(state))
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
