//! Game settings and preferences
//!
//! Persisted as JSON alongside the score data.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Arena dimensions in pixels
    pub arena_width: f32,
    pub arena_height: f32,
    /// Where score and high-score files live
    pub data_dir: PathBuf,
    /// HUD status line cadence, in ticks (50 = once a second)
    pub hud_every_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            data_dir: PathBuf::from("data"),
            hud_every_ticks: 50,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => settings,
                Err(err) => {
                    log::warn!("Settings file {} is corrupt: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }

    /// Path of the shared score file
    pub fn score_path(&self) -> PathBuf {
        self.data_dir.join("scores.json")
    }

    /// Path of a game's high score file
    pub fn highscores_path(&self, game_slug: &str) -> PathBuf {
        self.data_dir.join(format!("{game_slug}-highscores.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.arena_width, 1280.0);
        assert_eq!(settings.arena_height, 720.0);
        assert_eq!(settings.hud_every_ticks, 50);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings.arena_width, Settings::default().arena_width);
    }

    #[test]
    fn test_paths() {
        let settings = Settings::default();
        assert_eq!(settings.score_path(), PathBuf::from("data/scores.json"));
        assert_eq!(
            settings.highscores_path("space-war"),
            PathBuf::from("data/space-war-highscores.json")
        );
    }
}
