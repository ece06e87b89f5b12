//! Scene graph
//!
//! A scene is a hecs world of game objects. Every game object has a [`Name`]
//! and a [`Transform`]; [`MeshFilter`] and [`MeshRenderer`] are optional.
//!
//! Scene files are written with the binary [`crate::io`] stream:
//!
//! ```text
//! magic "SCN1" | version u32 | object count u32
//! per object: name | transform | component mask u32 | component payloads
//! ```

mod mesh_filter;
mod mesh_renderer;

pub use mesh_filter::{MeshFilter, Primitive};
pub use mesh_renderer::{MeshRenderer, NOT_ASSIGNED, STANDARD_MATERIAL_NAME};

use crate::core::entity::{Entity, Name, Transform, World};
use crate::core::Context;
use crate::io::{FileStream, StreamError, StreamReader, StreamWriter};
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

const SCENE_MAGIC: u32 = u32::from_le_bytes(*b"SCN1");
const SCENE_VERSION: u32 = 1;

const HAS_MESH_FILTER: u32 = 1 << 0;
const HAS_MESH_RENDERER: u32 = 1 << 1;
const KNOWN_COMPONENTS: u32 = HAS_MESH_FILTER | HAS_MESH_RENDERER;

/// Errors that can occur during scene operations
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("stream error: {0}")]
    Stream(#[from] StreamError),
    #[error("not a scene file")]
    InvalidHeader,
    #[error("unsupported scene version {0}")]
    UnsupportedVersion(u32),
    #[error("unknown component mask {0:#x}")]
    UnknownComponent(u32),
    #[error("entity not found")]
    Entity(#[from] hecs::NoSuchEntity),
}

/// The game objects of a level
pub struct Scene {
    world: World,
    // Spawn order; hecs iteration order follows archetypes
    order: Vec<Entity>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            order: Vec::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Spawn a game object with a name and default transform
    pub fn create_game_object(&mut self, name: impl Into<String>) -> Entity {
        let entity = self
            .world
            .spawn((Name::new(name), Transform::default()));
        self.order.push(entity);
        entity
    }

    pub fn remove(&mut self, entity: Entity) -> Result<(), SceneError> {
        self.world.despawn(entity)?;
        self.order.retain(|e| *e != entity);
        Ok(())
    }

    /// Game objects in creation order
    pub fn game_objects(&self) -> &[Entity] {
        &self.order
    }

    pub fn game_object_name(&self, entity: Entity) -> Option<String> {
        self.world
            .get::<Name>(entity)
            .ok()
            .map(|name| name.0.clone())
    }

    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        self.order
            .iter()
            .copied()
            .find(|e| self.game_object_name(*e).as_deref() == Some(name))
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }

    pub fn add_component(
        &mut self,
        entity: Entity,
        component: impl hecs::Component,
    ) -> Result<(), SceneError> {
        self.world.insert_one(entity, component)?;
        Ok(())
    }

    pub fn get<T: hecs::Component>(&self, entity: Entity) -> Option<hecs::Ref<'_, T>> {
        self.world.get::<T>(entity).ok()
    }

    pub fn get_mut<T: hecs::Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.world.get_mut::<T>(entity).ok()
    }

    /// Submit every renderable game object; returns how many were visited
    pub fn render(&self) -> usize {
        let mut visited = 0;
        for (_, (name, filter, renderer)) in self
            .world
            .query::<(&Name, &MeshFilter, &MeshRenderer)>()
            .iter()
        {
            renderer.render(name.as_str(), filter.index_count);
            visited += 1;
        }
        visited
    }

    pub fn save<W: Write>(&self, stream: &mut StreamWriter<W>) -> Result<(), SceneError> {
        stream.write(&SCENE_MAGIC)?;
        stream.write(&SCENE_VERSION)?;
        stream.write(&(self.order.len() as u32))?;

        for &entity in &self.order {
            let name = self
                .get::<Name>(entity)
                .map(|n| (*n).clone())
                .unwrap_or_default();
            let transform = self
                .get::<Transform>(entity)
                .map(|t| *t)
                .unwrap_or_default();
            let filter = self.get::<MeshFilter>(entity);
            let renderer = self.get::<MeshRenderer>(entity);

            let mut mask = 0;
            if filter.is_some() {
                mask |= HAS_MESH_FILTER;
            }
            if renderer.is_some() {
                mask |= HAS_MESH_RENDERER;
            }

            stream.write(&name)?;
            transform.serialize(stream)?;
            stream.write(&mask)?;
            if let Some(filter) = filter {
                filter.serialize(stream)?;
            }
            if let Some(renderer) = renderer {
                renderer.serialize(stream)?;
            }
        }

        debug!(objects = self.order.len(), "Serialized scene");
        Ok(())
    }

    /// Read a scene; material names resolve through `ctx`'s resource cache
    pub fn load<R: Read>(stream: &mut StreamReader<R>, ctx: &Context) -> Result<Self, SceneError> {
        if stream.read::<u32>()? != SCENE_MAGIC {
            return Err(SceneError::InvalidHeader);
        }
        let version: u32 = stream.read()?;
        if version != SCENE_VERSION {
            return Err(SceneError::UnsupportedVersion(version));
        }

        let count: u32 = stream.read()?;
        let mut scene = Scene::new();
        for _ in 0..count {
            let name: Name = stream.read()?;
            let transform = Transform::deserialize(stream)?;
            let mask: u32 = stream.read()?;
            if mask & !KNOWN_COMPONENTS != 0 {
                return Err(SceneError::UnknownComponent(mask));
            }

            let entity = scene.create_game_object(name.0);
            if let Some(t) = scene.get_mut::<Transform>(entity) {
                *t = transform;
            }
            if mask & HAS_MESH_FILTER != 0 {
                scene.add_component(entity, MeshFilter::deserialize(stream)?)?;
            }
            if mask & HAS_MESH_RENDERER != 0 {
                let mut renderer = MeshRenderer::new();
                renderer.deserialize(stream, ctx)?;
                scene.add_component(entity, renderer)?;
            }
        }

        debug!(objects = count, "Deserialized scene");
        Ok(scene)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneError> {
        let path = path.as_ref();
        let mut stream = FileStream::create(path)?;
        self.save(&mut stream)?;
        stream.flush()?;
        info!(path = ?path, objects = self.len(), "Saved scene");
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P, ctx: &Context) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let mut stream = FileStream::open(path)?;
        let scene = Self::load(&mut stream, ctx)?;
        info!(path = ?path, objects = scene.len(), "Loaded scene");
        Ok(scene)
    }

    /// Log objects that would be skipped by [`Scene::render`]
    pub fn report_unrenderable(&self) -> usize {
        let mut missing = 0;
        for (_, (name, renderer)) in self.world.query::<(&Name, &MeshRenderer)>().iter() {
            if !renderer.has_material() {
                warn!(object = name.as_str(), "Game object has no material");
                missing += 1;
            }
        }
        missing
    }
}
