//! Final-score persistence
//!
//! At game over a single score row is appended to a versioned JSON score
//! file. Writes go to a `.tmp` sibling first and are renamed over the
//! target so a crash mid-write never corrupts existing rows. A corrupt or
//! missing file is logged and replaced with a fresh store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Current score file format version
pub const SCORE_FILE_VERSION: u32 = 1;

/// One finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRow {
    /// Player name; guest runs are never written
    pub user: String,
    /// Game title ("Space War", "Space War 2P", "Shape Catcher")
    pub game: String,
    pub score: u32,
    /// Level reached (Shape Catcher always reports 1)
    pub level: u32,
    /// Unix timestamp, seconds
    pub timestamp: u64,
}

/// Versioned on-disk envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreFile {
    pub version: u32,
    pub rows: Vec<ScoreRow>,
}

impl Default for ScoreFile {
    fn default() -> Self {
        Self {
            version: SCORE_FILE_VERSION,
            rows: Vec::new(),
        }
    }
}

/// Handle on the score file
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the score file, tolerating a missing or corrupt one
    pub fn load(&self) -> ScoreFile {
        match fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str::<ScoreFile>(&json) {
                Ok(file) if file.version == SCORE_FILE_VERSION => file,
                Ok(file) => {
                    log::warn!(
                        "Score file {} has unsupported version {}, starting fresh",
                        self.path.display(),
                        file.version
                    );
                    ScoreFile::default()
                }
                Err(err) => {
                    log::warn!(
                        "Score file {} is corrupt: {err}, starting fresh",
                        self.path.display()
                    );
                    ScoreFile::default()
                }
            },
            Err(_) => ScoreFile::default(),
        }
    }

    /// Append one row and write the file back (tmp then rename)
    pub fn append(&self, row: ScoreRow) -> io::Result<()> {
        let mut file = self.load();
        file.rows.push(row);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&file).map_err(io::Error::other)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Seconds since the Unix epoch
pub fn now_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
