//! Configuration types for the engine

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors produced while resolving asset paths
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Asset names must be plain file stems
    #[error("invalid asset name: {0}")]
    InvalidName(String),
    /// A configured directory does not exist on disk
    #[error("{kind} directory not found: {path:?}")]
    MissingDirectory { kind: &'static str, path: PathBuf },
}

/// Configuration for asset paths
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Root directory for all assets
    pub asset_root: PathBuf,
    /// Directory name for material files (relative to asset_root)
    pub materials_dir: String,
    /// Directory name for scenes (relative to asset_root)
    pub scenes_dir: String,
    /// Directory name for engine generated assets (relative to asset_root)
    pub standard_assets_dir: String,
}

impl AssetConfig {
    /// Create a config rooted at `asset_root` with the default directory names
    pub fn with_root(asset_root: impl Into<PathBuf>) -> Self {
        let asset_root = asset_root.into();
        debug!(asset_root = ?asset_root, "Creating new AssetConfig");
        Self {
            asset_root,
            ..Default::default()
        }
    }

    /// Get the full path to a material file
    pub fn material_path(&self, name: &str) -> Result<PathBuf, ConfigError> {
        validate_name(name)?;
        let path = self
            .asset_root
            .join(&self.materials_dir)
            .join(format!("{name}.material"));
        debug!(name = name, path = ?path, "Generated material path");
        Ok(path)
    }

    /// Get the full path to a scene file
    pub fn scene_path(&self, name: &str) -> Result<PathBuf, ConfigError> {
        validate_name(name)?;
        let path = self
            .asset_root
            .join(&self.scenes_dir)
            .join(format!("{name}.scene"));
        debug!(name = name, path = ?path, "Generated scene path");
        Ok(path)
    }

    /// Directory where engine generated assets (standard material) live
    pub fn standard_assets_path(&self) -> PathBuf {
        self.asset_root.join(&self.standard_assets_dir)
    }

    /// Check if the asset directories exist
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dir("Asset root", &self.asset_root)?;
        check_dir("Materials", &self.asset_root.join(&self.materials_dir))?;
        check_dir("Scenes", &self.asset_root.join(&self.scenes_dir))?;
        Ok(())
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            materials_dir: "materials".to_string(),
            scenes_dir: "scenes".to_string(),
            standard_assets_dir: "standard_assets".to_string(),
        }
    }
}

fn validate_name(name: &str) -> Result<(), ConfigError> {
    // Path traversal
    if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(ConfigError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn check_dir(kind: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ConfigError::MissingDirectory {
            kind,
            path: path.to_path_buf(),
        })
    }
}
