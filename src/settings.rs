//! Maze Race preferences
//!
//! Persisted separately from the item pool in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MIN_PATHS, MAX_RACERS};
use crate::maze::{MazeConfig, MazeVariant};

/// Maze Race settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeSettings {
    /// Generation/repair tuning family
    pub variant: MazeVariant,
    /// Path-diversity target
    pub min_paths: usize,
    /// Racers taken from the item pool
    pub racer_count: usize,
    /// Fixed seed for replaying a round; `None` draws a fresh one
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            variant: MazeVariant::Strict,
            min_paths: DEFAULT_MIN_PATHS,
            racer_count: MAX_RACERS,
            seed: None,
        }
    }
}

impl MazeSettings {
    /// Create settings from a variant (applies variant defaults)
    pub fn from_variant(variant: MazeVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Generation config for these settings
    pub fn maze_config(&self) -> MazeConfig {
        MazeConfig {
            min_paths: self.min_paths.max(1),
            ..MazeConfig::from_variant(self.variant)
        }
    }

    /// Racer count clamped to what the scene can show
    pub fn effective_racer_count(&self) -> usize {
        self.racer_count.clamp(1, MAX_RACERS)
    }

    /// Parse settings sent by the scene's config form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "maze_rally_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded maze settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable maze settings: {}", e),
                }
            }
        }

        log::info!("Using default maze settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Maze settings saved");
            }
        }
    }

    /// Native builds have no storage; every run starts from the defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
