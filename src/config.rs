//! Gallery settings, stored as `settings.json` in the user's config directory.
//!
//! A missing file yields the defaults. An unreadable file is an error; a file
//! with invalid JSON falls back to the defaults with a warning.

use crate::error::Result;
use crate::platform::DEFAULT_SELECTION_LIMIT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILE: &str = "settings.json";
const APP_DIR: &str = "photo-gallery";

/// Placeholder replaced by the capture file path in `camera_command`
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

pub const DEFAULT_THUMBNAIL_SIZE: f32 = 160.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of images taken from one library pick
    pub library_selection_limit: usize,
    /// Directory the library picker opens in
    pub library_dir: Option<PathBuf>,
    /// Capture program and arguments, e.g. `["fswebcam", "-r", "1280x720", "{output}"]`
    pub camera_command: Option<Vec<String>>,
    /// Where captures are written; defaults to the cache directory
    pub capture_dir: Option<PathBuf>,
    /// Edge length of grid thumbnails in logical pixels
    pub thumbnail_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_selection_limit: DEFAULT_SELECTION_LIMIT,
            library_dir: None,
            camera_command: None,
            capture_dir: None,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

impl Config {
    /// Directory the library picker should start in.
    /// Falls back to the user's Pictures directory, then home.
    pub fn picker_start_dir(&self) -> Option<PathBuf> {
        self.library_dir
            .clone()
            .or_else(dirs::picture_dir)
            .or_else(dirs::home_dir)
    }

    /// Directory where camera captures are written
    pub fn capture_dir(&self) -> PathBuf {
        if let Some(dir) = &self.capture_dir {
            return dir.clone();
        }
        let mut path = dirs::cache_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(std::env::temp_dir);
        path.push(APP_DIR);
        path.push("captures");
        path
    }

    /// Selection limit clamped to `1..=DEFAULT_SELECTION_LIMIT`
    pub fn selection_limit(&self) -> usize {
        self.library_selection_limit.clamp(1, DEFAULT_SELECTION_LIMIT)
    }

    /// True when a non-empty capture command is configured
    pub fn has_camera(&self) -> bool {
        self.camera_command
            .as_ref()
            .and_then(|argv| argv.first())
            .is_some_and(|program| !program.trim().is_empty())
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match serde_json::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            warn!(path = %path.display(), %err, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_camera_command() {
        let config = Config {
            library_selection_limit: 4,
            library_dir: Some(PathBuf::from("/srv/photos")),
            camera_command: Some(vec!["imagesnap".to_string(), OUTPUT_PLACEHOLDER.to_string()]),
            capture_dir: Some(PathBuf::from("/srv/captures")),
            thumbnail_size: 96.0,
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join(CONFIG_FILE);

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_json() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "{ not json").expect("failed to write invalid json");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, r#"{ "thumbnail_size": 120.0 }"#).expect("failed to write json");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.thumbnail_size, 120.0);
        assert_eq!(loaded.library_selection_limit, DEFAULT_SELECTION_LIMIT);
        assert!(loaded.camera_command.is_none());
    }

    #[test]
    fn load_from_missing_path_is_an_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        assert!(load_from_path(&temp_dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn selection_limit_is_clamped() {
        let mut config = Config::default();
        assert_eq!(config.selection_limit(), DEFAULT_SELECTION_LIMIT);

        config.library_selection_limit = 0;
        assert_eq!(config.selection_limit(), 1);

        config.library_selection_limit = 50;
        assert_eq!(config.selection_limit(), DEFAULT_SELECTION_LIMIT);

        config.library_selection_limit = 3;
        assert_eq!(config.selection_limit(), 3);
    }

    #[test]
    fn has_camera_requires_a_program() {
        let mut config = Config::default();
        assert!(!config.has_camera());

        config.camera_command = Some(vec![]);
        assert!(!config.has_camera());

        config.camera_command = Some(vec![" ".to_string()]);
        assert!(!config.has_camera());

        config.camera_command = Some(vec!["fswebcam".to_string(), OUTPUT_PLACEHOLDER.to_string()]);
        assert!(config.has_camera());
    }
}
