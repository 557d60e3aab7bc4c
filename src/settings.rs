//! Player preferences
//!
//! Persisted separately from scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, StoreError};
use crate::leaderboard::Player;
use crate::sim::{BalloonConfig, Ruleset};

/// Name shown until the player enters one
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

/// Longest accepted player name (characters)
pub const MAX_NAME_LEN: usize = 20;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Display name on the leaderboard
    pub player_name: String,
    /// ISO 3166 alpha-2 country code
    #[serde(default)]
    pub country_code: Option<String>,

    /// Balloon Pop ruleset
    pub ruleset: Ruleset,
    /// Hand-tuned ruleset that replaces the preset when present
    #[serde(default)]
    pub custom_rules: Option<BalloonConfig>,

    /// Draw the fitted circle over the stroke after scoring
    pub show_fit_overlay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            country_code: None,

            ruleset: Ruleset::Drift,
            custom_rules: None,

            show_fit_overlay: true,
        }
    }
}

impl Settings {
    /// Create settings from a ruleset preset
    pub fn from_ruleset(ruleset: Ruleset) -> Self {
        Self {
            ruleset,
            ..Self::default()
        }
    }

    /// Set the display name (trimmed, truncated). Blank names are ignored.
    pub fn set_player_name(&mut self, name: &str) -> bool {
        let name: String = name.trim().chars().take(MAX_NAME_LEN).collect();
        if name.is_empty() {
            return false;
        }
        self.player_name = name;
        true
    }

    /// Set the country code (two ASCII letters, stored upper-case)
    pub fn set_country(&mut self, code: &str) -> bool {
        let code = code.trim();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return false;
        }
        self.country_code = Some(code.to_ascii_uppercase());
        true
    }

    /// Leaderboard identity for these settings
    pub fn player(&self) -> Player {
        Player {
            country_code: self.country_code.clone(),
            ..Player::from_name(&self.player_name)
        }
    }

    /// Effective balloon configuration for an arena, validated
    pub fn balloon_config(&self, width: f32, height: f32) -> Result<BalloonConfig, ConfigError> {
        let config = self
            .custom_rules
            .clone()
            .unwrap_or_else(|| self.ruleset.config())
            .with_arena(width, height);
        config.validate()?;
        Ok(config)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pop_circle_settings";

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(err) => log::warn!("Discarding stored settings: {}", err),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), StoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("no LocalStorage".to_string()))?;

        let json = self.to_json()?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| StoreError::Unavailable("LocalStorage write failed".to_string()))?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), StoreError> {
        // No-op for native
        Ok(())
    }
}
