//! Engine context shared by every subsystem
//!
//! The context is created once at startup and handed explicitly to whoever
//! needs a subsystem (components, editor widgets, the frame loop).

use crate::config::AssetConfig;
use crate::graphics::{RenderQueue, ShaderLibrary};
use crate::resources::ResourceManager;
use crate::scene::Scene;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

/// Subsystems of a running engine instance
pub struct Context {
    config: AssetConfig,
    resources: Mutex<ResourceManager>,
    shaders: Mutex<ShaderLibrary>,
    render_queue: Arc<RenderQueue>,
    scene: Mutex<Scene>,
}

impl Context {
    pub fn new(config: AssetConfig) -> Self {
        info!(asset_root = ?config.asset_root, "Creating engine context");
        let render_queue = Arc::new(RenderQueue::new());
        Self {
            resources: Mutex::new(ResourceManager::new(config.standard_assets_path())),
            shaders: Mutex::new(ShaderLibrary::new(Arc::clone(&render_queue))),
            render_queue,
            scene: Mutex::new(Scene::new()),
            config,
        }
    }

    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    /// Material cache
    pub fn resources(&self) -> MutexGuard<'_, ResourceManager> {
        lock(&self.resources)
    }

    /// Shader variations
    pub fn shaders(&self) -> MutexGuard<'_, ShaderLibrary> {
        lock(&self.shaders)
    }

    /// Draw calls submitted this frame
    pub fn render_queue(&self) -> &Arc<RenderQueue> {
        &self.render_queue
    }

    /// The active scene
    pub fn scene(&self) -> MutexGuard<'_, Scene> {
        lock(&self.scene)
    }

    /// Swap in a new scene and return the old one
    pub fn replace_scene(&self, scene: Scene) -> Scene {
        std::mem::replace(&mut *self.scene(), scene)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(AssetConfig::default())
    }
}

// A panic while a subsystem was locked leaves it usable; the engine is single threaded.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
