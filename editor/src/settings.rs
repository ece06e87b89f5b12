//! Editor settings management
//!
//! Persistent user preferences: the visual style applied at startup, which
//! widgets open visible and the scene the File menu saves to.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from reading or writing the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main editor settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default)]
    pub style: StyleSettings,

    #[serde(default)]
    pub widgets: WidgetSettings,

    /// Scene name used by File > Save/Load
    #[serde(default = "default_scene_name")]
    pub scene_name: String,

    /// Settings version for future migration support
    #[serde(default)]
    pub version: u32,
}

/// Built-in colour presets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Classic,
}

/// Visual style applied once when the editor starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    pub theme: Theme,
    pub window_rounding: f32,
    pub frame_rounding: f32,
    pub font_scale: f32,
}

/// Initial visibility of the built-in widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    pub toolbar: bool,
    pub hierarchy: bool,
    pub properties: bool,
    pub asset_viewer: bool,
    pub stats: bool,
}

fn default_scene_name() -> String {
    "untitled".to_string()
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            style: StyleSettings::default(),
            widgets: WidgetSettings::default(),
            scene_name: default_scene_name(),
            version: 1,
        }
    }
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            window_rounding: 0.0,
            frame_rounding: 2.0,
            font_scale: 1.0,
        }
    }
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            toolbar: true,
            hierarchy: true,
            properties: true,
            asset_viewer: true,
            stats: false,
        }
    }
}

impl EditorSettings {
    /// Save settings to a specific path
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        info!("Saved editor settings to {:?}", path.as_ref());
        Ok(())
    }

    /// Load settings from a specific path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let settings = serde_json::from_str(&content)?;
        info!("Loaded editor settings from {:?}", path.as_ref());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or broken
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to read settings file: {}. Using defaults.", e);
                Self::default()
            }
        }
    }
}
