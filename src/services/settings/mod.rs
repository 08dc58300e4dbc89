//! Settings persistence.
//!
//! TOML file in the platform config directory. Load never fails: a
//! missing or unparsable file logs and falls back to defaults so the app
//! always starts.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{info, warn};

use crate::models::settings::Settings;

const SETTINGS_FILE: &str = "settings.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    /// Resolve the settings path under the platform config directory,
    /// falling back to the working directory if it cannot be determined.
    pub fn from_project_dirs() -> Self {
        let path = ProjectDirs::from("com", "habitgrid", "HabitGrid")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .unwrap_or_else(|| {
                warn!("no config directory available, using working directory");
                PathBuf::from(SETTINGS_FILE)
            });
        Self { path }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load settings, or defaults when the file is missing or malformed.
    pub fn load(&self) -> Settings {
        match fs::read_to_string(&self.path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!("settings file unreadable ({err}), using defaults");
                    Settings::default()
                }
            },
            Err(_) => {
                info!("no settings file at {}, using defaults", self.path.display());
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(settings).context("serializing settings")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}
