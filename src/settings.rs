use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, RwLock};

pub const CURRENT_VERSION: u32 = 1;
const SETTINGS_FILENAME: &str = "config.yaml";
const APP_NAME: &str = "pagebar";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_theme")]
    pub theme: String,

    /// Target number of visible page-number buttons.
    #[serde(default = "default_button_count")]
    pub button_count: u32,

    /// Query-string key the current page is mirrored into; empty disables
    /// the mirroring.
    #[serde(default)]
    pub page_query: String,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

fn default_theme() -> String {
    "Oceanic Next".to_string()
}

fn default_button_count() -> u32 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            theme: default_theme(),
            button_count: default_button_count(),
            page_query: String::new(),
        }
    }
}

static SETTINGS: LazyLock<RwLock<Settings>> = LazyLock::new(|| RwLock::new(Settings::default()));

fn preferred_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join(APP_NAME).join(SETTINGS_FILENAME))
}

pub fn load_settings() {
    let Some(path) = preferred_config_path() else {
        warn!("Could not determine config directory, using default settings");
        return;
    };
    if path.exists() {
        load_settings_from_path(&path);
    } else {
        info!("Settings file not found, creating with defaults at {path:?}");
        if let Ok(settings) = SETTINGS.read() {
            save_settings_to_file(&settings, &path);
        }
    }
}

fn load_settings_from_path(path: &Path) {
    match fs::read_to_string(path) {
        Ok(content) => match serde_yaml::from_str::<Settings>(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {path:?}");
                if let Ok(mut global) = SETTINGS.write() {
                    *global = settings;
                }
            }
            Err(e) => {
                error!("Failed to parse settings file {path:?}: {e}");
            }
        },
        Err(e) => {
            error!("Failed to read settings file {path:?}: {e}");
        }
    }
}

fn save_settings_to_file(settings: &Settings, path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            error!("Failed to create config directory {parent:?}: {e}");
            return;
        }
    }
    match serde_yaml::to_string(settings) {
        Ok(content) => {
            if let Err(e) = fs::write(path, content) {
                error!("Failed to write settings file {path:?}: {e}");
            }
        }
        Err(e) => {
            error!("Failed to serialize settings: {e}");
        }
    }
}

pub fn settings() -> Settings {
    SETTINGS.read().map(|s| s.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.version, CURRENT_VERSION);
        assert_eq!(s.theme, "Oceanic Next");
        assert_eq!(s.button_count, 10);
        assert!(s.page_query.is_empty());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let s: Settings = serde_yaml::from_str("theme: Gruvbox Dark\n").unwrap();
        assert_eq!(s.theme, "Gruvbox Dark");
        assert_eq!(s.button_count, 10);
        assert_eq!(s.version, CURRENT_VERSION);
    }

    #[test]
    fn settings_round_trip() {
        let original = Settings {
            version: CURRENT_VERSION,
            theme: "Gruvbox Dark".to_string(),
            button_count: 7,
            page_query: "page".to_string(),
        };
        let yaml = serde_yaml::to_string(&original).unwrap();
        let parsed: Settings = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.theme, original.theme);
        assert_eq!(parsed.button_count, 7);
        assert_eq!(parsed.page_query, "page");
    }
}
