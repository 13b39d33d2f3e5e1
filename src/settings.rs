//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web. Scoring constants are not
//! settings; see `consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::PrizeTier;

/// Settings that failed to load or validate
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be within 0.0..=1.0, got {value}")]
    VolumeOutOfRange { field: &'static str, value: f32 },
    #[error("prize label for tier {tier} is empty")]
    EmptyPrizeLabel { tier: u8 },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Reward labels, lowest tier first
    pub prize_labels: [String; 4],

    // === Celebration ===
    /// Confetti and win flash on a winning stroke
    pub celebrations: bool,
    /// How long the win flash stays up (ms)
    pub win_flash_ms: u32,
    /// Delay before the prize dialog opens (ms)
    pub modal_delay_ms: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Stroke-start chime volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Win fanfare volume (0.0 - 1.0)
    pub win_volume: f32,
    /// Lose sting volume (0.0 - 1.0)
    pub lose_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no confetti, no flashing)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prize_labels: [
                "20% discount".to_string(),
                "40% discount".to_string(),
                "1 hour free ride".to_string(),
                "Yacht trip".to_string(),
            ],

            celebrations: true,
            win_flash_ms: 5200,
            modal_delay_ms: 1000,

            master_volume: 1.0,
            music_volume: 0.18,
            win_volume: 0.85,
            lose_volume: 0.6,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "circle_lab_settings";

    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validated JSON form, as written to storage
    pub fn to_json(&self) -> Result<String, SettingsError> {
        self.validate()?;
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let volumes = [
            ("master_volume", self.master_volume),
            ("music_volume", self.music_volume),
            ("win_volume", self.win_volume),
            ("lose_volume", self.lose_volume),
        ];
        for (field, value) in volumes {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::VolumeOutOfRange { field, value });
            }
        }

        for tier in PrizeTier::ALL {
            if self.prize_label(tier).trim().is_empty() {
                return Err(SettingsError::EmptyPrizeLabel { tier: tier.level() });
            }
        }
        Ok(())
    }

    /// Label shown to the player for a tier
    pub fn prize_label(&self, tier: PrizeTier) -> &str {
        &self.prize_labels[tier.index()]
    }

    /// Effective celebrations (respects reduced_motion)
    pub fn effective_celebrations(&self) -> bool {
        self.celebrations && !self.reduced_motion
    }

    /// Scale a cue volume by master volume and mute
    pub fn effective_volume(&self, cue_volume: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * cue_volume).clamp(0.0, 1.0)
        }
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
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
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

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return;
        };
        match self.to_json() {
            Ok(json) => {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
            Err(e) => log::warn!("Not saving settings: {e}"),
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.prize_label(PrizeTier::Tier1), "20% discount");
        assert_eq!(settings.prize_label(PrizeTier::Tier4), "Yacht trip");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"muted": true}"#).expect("valid");
        assert!(settings.muted);
        assert_eq!(settings.win_flash_ms, 5200);
        assert_eq!(settings.effective_volume(0.85), 0.0);
    }

    #[test]
    fn test_round_trip_json() {
        let mut settings = Settings::default();
        settings.reduced_motion = true;
        settings.prize_labels[2] = "Free coffee".to_string();
        let json = settings.to_json().expect("serialize");
        assert_eq!(Settings::from_json(&json).expect("parse"), settings);
    }

    #[test]
    fn test_invalid_settings_are_not_serialized() {
        let mut settings = Settings::default();
        settings.master_volume = -0.5;
        assert!(matches!(
            settings.to_json(),
            Err(SettingsError::VolumeOutOfRange {
                field: "master_volume",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_bad_volume() {
        let err = Settings::from_json(r#"{"win_volume": 1.5}"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::VolumeOutOfRange {
                field: "win_volume",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_empty_prize_label() {
        let json = r#"{"prize_labels": ["a", " ", "c", "d"]}"#;
        let err = Settings::from_json(json).unwrap_err();
        assert!(matches!(err, SettingsError::EmptyPrizeLabel { tier: 2 }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_reduced_motion_disables_celebrations() {
        let mut settings = Settings::default();
        assert!(settings.effective_celebrations());
        settings.reduced_motion = true;
        assert!(!settings.effective_celebrations());
    }
}
