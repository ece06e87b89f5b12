//! Scene and material runtime for the engine
//!
//! This crate provides the engine context, the material/shader resources,
//! the binary component stream and the scene graph with its `MeshRenderer`
//! component.

pub mod config;
pub mod core;
pub mod graphics;
pub mod io;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub mod prelude {
    pub use crate::config::AssetConfig;
    pub use crate::core::entity::{Entity, Name, Transform};
    pub use crate::core::Context;
    pub use crate::graphics::{CullMode, Material, ShaderFlags, TextureType};
    pub use crate::io::{FileStream, StreamReader, StreamWriter};
    pub use crate::resources::ResourceManager;
    pub use crate::scene::{MeshFilter, MeshRenderer, Primitive, Scene, SceneError};

    pub use glam::{Quat, Vec3, Vec4};
}

/// Initialize logging for the engine
///
/// Honours `RUST_LOG`; defaults to `info`. Safe to call more than once.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
}
