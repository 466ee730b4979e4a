//! Game settings and preferences
//!
//! Persisted separately from the leaderboard.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::{Storage, load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === HUD ===
    /// Show height labels on every tenth platform
    pub show_labels: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            show_labels: true,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "skyhop_settings";

    /// Volume actually applied to sound cues
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(storage: &dyn Storage) -> Self {
        match load_json::<Settings>(storage, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<()> {
        save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn mute_silences() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        assert_eq!(settings.effective_volume(), 0.0);
        assert!((Settings::default().effective_volume() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn volume_is_clamped() {
        let settings = Settings {
            master_volume: 3.0,
            sfx_volume: 0.5,
            ..Settings::default()
        };
        assert_eq!(settings.effective_volume(), 0.5);
    }

    #[test]
    fn round_trips_through_storage() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            muted: true,
            show_labels: false,
            ..Settings::default()
        };
        settings.save(&mut storage).unwrap();
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn corrupt_settings_fall_back_to_defaults() {
        let mut storage = MemoryStorage::new();
        storage.set_item(Settings::STORAGE_KEY, "{ nope").unwrap();
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let mut storage = MemoryStorage::new();
        storage.set_item(Settings::STORAGE_KEY, r#"{"muted": true}"#).unwrap();
        let settings = Settings::load(&storage);
        assert!(settings.muted);
        assert_eq!(settings.master_volume, 0.8);
    }
}
