//! Player preferences
//!
//! Persisted as a small JSON file next to the executable. Any load problem
//! falls back to defaults with a log line rather than failing startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Screen shake on solid-brick hits
    pub screen_shake: bool,
    /// Ball particle trail
    pub particles: bool,
    /// Sound effects
    pub sfx: bool,
    /// Reduced motion (suppresses shake regardless of the toggle)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            particles: true,
            sfx: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("settings file {} invalid ({err}), using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Best-effort save; failure is logged and ignored
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    log::warn!("could not save settings to {} ({err})", path.display());
                }
            }
            Err(err) => log::warn!("could not serialize settings ({err})"),
        }
    }

    /// Effective screen shake, respecting reduced motion
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }
}
