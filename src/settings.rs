//! Game settings and preferences
//!
//! Persisted as JSON in LocalStorage. Missing fields take their defaults so
//! older saves keep loading.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game balance used for the next game
    pub tuning: Tuning,
    /// Draw the vision box around the player
    pub show_vision_overlay: bool,
    /// Log frame rate once per second
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            show_vision_overlay: true,
            show_fps: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "impostor_hunt_settings";

    /// Parse stored JSON, clamping the tuning into range
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                settings.tuning = settings.tuning.sanitized();
                Some(settings)
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                None
            }
        }
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let (Some(storage), Some(json)) = (storage, self.to_json()) {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::VoteMatch;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.show_vision_overlay);
        assert_eq!(settings.tuning, Tuning::default());
    }

    #[test]
    fn test_json_roundtrip_with_partial_fields() {
        let json = r#"{"tuning": {"vote_match": "Coordinate", "impostor_kill_chance": 4.0}}"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.tuning.vote_match, VoteMatch::Coordinate);
        assert_eq!(settings.tuning.impostor_kill_chance, 1.0);
        assert!(settings.show_vision_overlay);

        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(Settings::from_json("not json"), None);
    }
}
