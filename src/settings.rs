//! Game settings and preferences
//!
//! Persisted separately from best times in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_RAY_COUNT;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Visibility rays cast per frame
    pub fn ray_count(&self) -> u32 {
        match self {
            QualityPreset::Low => DEFAULT_RAY_COUNT / 2,
            QualityPreset::Medium => DEFAULT_RAY_COUNT,
            QualityPreset::High => DEFAULT_RAY_COUNT * 2,
        }
    }

    /// Whether walls get a soft glow pass
    pub fn glow_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => false,
            QualityPreset::High => true,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            show_fps: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "ray_maze_settings";

    /// Effective ray count for the current preset
    pub fn ray_count(&self) -> u32 {
        self.quality.ray_count()
    }

    /// Effective glow pass for the current preset
    pub fn glow_enabled(&self) -> bool {
        self.quality.glow_enabled()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
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

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
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

    #[test]
    fn test_preset_ray_counts() {
        assert_eq!(QualityPreset::Low.ray_count(), 180);
        assert_eq!(QualityPreset::Medium.ray_count(), 360);
        assert_eq!(QualityPreset::High.ray_count(), 720);
    }

    #[test]
    fn test_preset_glow() {
        assert!(!QualityPreset::Low.glow_enabled());
        assert!(!QualityPreset::Medium.glow_enabled());
        assert!(QualityPreset::High.glow_enabled());
    }

    #[test]
    fn test_volumes_survive_serialization() {
        let mut settings = Settings::default();
        settings.master_volume = 0.5;
        settings.sfx_volume = 0.25;

        let json = serde_json::to_string(&settings).unwrap();
        let restored: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.master_volume, 0.5);
        assert_eq!(restored.sfx_volume, 0.25);
    }

    #[test]
    fn test_preset_round_trip() {
        for preset in [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High] {
            assert_eq!(QualityPreset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(QualityPreset::from_str("ultra"), None);
    }
}
