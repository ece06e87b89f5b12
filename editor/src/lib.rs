//! ImGui-based editor shell for the engine
//!
//! The [`Editor`] hosts a list of [`Widget`]s, forwards window events to them
//! and rebuilds their UI every frame against a shared engine
//! [`engine::core::Context`].

pub mod editor;
pub mod platform;
pub mod settings;
pub mod widget;
pub mod widgets;

pub use editor::{Editor, FrameStats};
pub use platform::{HeadlessBackend, PlatformBackend, WinitBackend};
pub use settings::{EditorSettings, SettingsError, StyleSettings, Theme};
pub use widget::{EditorCommand, EditorShared, Widget};

use thiserror::Error;

/// Errors reported by the editor shell
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("editor is not initialized")]
    NotInitialized,
    #[error("platform error: {0}")]
    Platform(String),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
}
