// loaded on startup and saved on quit; the transport knobs survive restarts
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ghost::PlayMode;
use crate::shared::MAX_LENGTH;

pub const GHOST_DIR: &str = ".ghost";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostSettings {
    pub max_length: usize, // in frames
    pub rate: f64,
    pub looping: bool,
    pub noise: f64,
    pub mode: PlayMode,
}

impl Default for GhostSettings {
    fn default() -> Self {
        Self {
            max_length: MAX_LENGTH,
            rate: 1.0,
            looping: true,
            noise: 0.0,
            mode: PlayMode::Linear,
        }
    }
}

// <project_dir>/.ghost/settings.json
fn settings_path(project_dir: &Path) -> PathBuf {
    project_dir.join(GHOST_DIR).join(SETTINGS_FILE)
}

pub fn load_settings(project_dir: &Path) -> Option<GhostSettings> {
    let data = std::fs::read_to_string(settings_path(project_dir)).ok()?;
    serde_json::from_str(&data).ok()
}

pub fn save_settings(project_dir: &Path, settings: &GhostSettings) -> anyhow::Result<()> {
    let path = settings_path(project_dir);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?; // create .ghost/ if needed
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(&path, json)?;
    Ok(())
}
