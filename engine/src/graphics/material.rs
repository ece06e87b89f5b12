//! Shared material resource
//!
//! Materials describe surface appearance and bind a shader variation. Once a
//! material is handed to the resource cache it is shared as `Arc<Material>`
//! and treated as immutable; components keep `Weak` references.

use super::shader::{ShaderFlags, ShaderLibrary, ShaderVariation};
use bytemuck::{Pod, Zeroable};
use glam::Vec4;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading or saving a material file
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("material file {0:?} has no name")]
    MissingName(PathBuf),
}

/// Face culling mode used by the rasterizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CullMode {
    None,
    Front,
    #[default]
    Back,
}

/// Texture slots a material can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureType {
    Albedo,
    Roughness,
    Metallic,
    Normal,
    Height,
    Occlusion,
    Emission,
    Mask,
}

impl TextureType {
    /// Shader feature bit enabled when this slot is bound
    pub fn shader_flag(self) -> ShaderFlags {
        let bit = match self {
            TextureType::Albedo => 0,
            TextureType::Roughness => 1,
            TextureType::Metallic => 2,
            TextureType::Normal => 3,
            TextureType::Height => 4,
            TextureType::Occlusion => 5,
            TextureType::Emission => 6,
            TextureType::Mask => 7,
        };
        ShaderFlags(1 << bit)
    }
}

/// A texture bound to a slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSlot {
    pub texture_type: TextureType,
    pub path: PathBuf,
}

/// Material resource defining surface properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    name: String,
    #[serde(skip)]
    file_path: Option<PathBuf>,
    #[serde(default)]
    cull_mode: CullMode,
    color_albedo: Vec4,
    #[serde(default = "default_roughness")]
    roughness: f32,
    #[serde(default)]
    metallic: f32,
    #[serde(default)]
    textures: Vec<TextureSlot>,
    #[serde(default = "default_editable")]
    is_editable: bool,
    #[serde(skip)]
    shader: Weak<ShaderVariation>,
}

fn default_roughness() -> f32 {
    1.0
}

fn default_editable() -> bool {
    true
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            file_path: None,
            cull_mode: CullMode::Back,
            color_albedo: Vec4::ONE, // White by default
            roughness: default_roughness(),
            metallic: 0.0,
            textures: Vec::new(),
            is_editable: true,
            shader: Weak::new(),
        }
    }
}

impl Material {
    /// Create an empty material with the given resource name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn has_file_path(&self) -> bool {
        self.file_path.is_some()
    }

    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.file_path = Some(path.into());
    }

    pub fn cull_mode(&self) -> CullMode {
        self.cull_mode
    }

    pub fn set_cull_mode(&mut self, cull_mode: CullMode) {
        self.cull_mode = cull_mode;
    }

    pub fn color_albedo(&self) -> Vec4 {
        self.color_albedo
    }

    pub fn set_color_albedo(&mut self, color: Vec4) {
        self.color_albedo = color;
    }

    pub fn roughness(&self) -> f32 {
        self.roughness
    }

    pub fn set_roughness(&mut self, roughness: f32) {
        self.roughness = roughness.clamp(0.0, 1.0);
    }

    pub fn metallic(&self) -> f32 {
        self.metallic
    }

    pub fn set_metallic(&mut self, metallic: f32) {
        self.metallic = metallic.clamp(0.0, 1.0);
    }

    pub fn is_editable(&self) -> bool {
        self.is_editable
    }

    pub fn set_is_editable(&mut self, editable: bool) {
        self.is_editable = editable;
    }

    pub fn textures(&self) -> &[TextureSlot] {
        &self.textures
    }

    pub fn texture(&self, texture_type: TextureType) -> Option<&Path> {
        self.textures
            .iter()
            .find(|slot| slot.texture_type == texture_type)
            .map(|slot| slot.path.as_path())
    }

    /// Bind a texture to a slot, replacing whatever was bound there
    pub fn set_texture(&mut self, texture_type: TextureType, path: impl Into<PathBuf>) {
        let path = path.into();
        match self
            .textures
            .iter_mut()
            .find(|slot| slot.texture_type == texture_type)
        {
            Some(slot) => slot.path = path,
            None => self.textures.push(TextureSlot { texture_type, path }),
        }
    }

    /// Shader features required by the bound texture slots
    pub fn shader_flags(&self) -> ShaderFlags {
        let mut flags = ShaderFlags::NONE;
        for slot in &self.textures {
            flags.insert(slot.texture_type.shader_flag());
        }
        flags
    }

    /// Bind the shader variation matching this material's texture slots
    pub fn acquire_shader(&mut self, library: &mut ShaderLibrary) {
        let shader = library.get_or_create(self.shader_flags());
        debug!(material = %self.name, shader = shader.name(), "Acquired shader");
        self.shader = Arc::downgrade(&shader);
    }

    pub fn has_shader(&self) -> bool {
        self.shader.strong_count() > 0
    }

    pub fn shader(&self) -> Option<Arc<ShaderVariation>> {
        self.shader.upgrade()
    }

    /// GPU-side view of the material constants
    pub fn uniform(&self) -> MaterialUniform {
        MaterialUniform::from(self)
    }

    /// Write the material as JSON, creating parent directories as needed
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), MaterialError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(material = %self.name, path = ?path, "Saved material");
        Ok(())
    }

    /// Load a material from JSON. The returned material has no shader bound.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, MaterialError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut material: Material = serde_json::from_str(&content)?;
        if material.name.is_empty() {
            return Err(MaterialError::MissingName(path.to_path_buf()));
        }
        material.file_path = Some(path.to_path_buf());
        info!(material = %material.name, path = ?path, "Loaded material");
        Ok(material)
    }
}

/// Material data for GPU uniform buffer
///
/// This struct is aligned for GPU uniform buffer requirements
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MaterialUniform {
    /// Base color of the material (RGBA)
    pub color: [f32; 4],
    pub roughness: f32,
    pub metallic: f32,
    pub _padding: [f32; 2],
}

impl From<&Material> for MaterialUniform {
    fn from(material: &Material) -> Self {
        Self {
            color: material.color_albedo.to_array(),
            roughness: material.roughness,
            metallic: material.metallic,
            _padding: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::shader::RenderQueue;

    #[test]
    fn test_material_default() {
        let mat = Material::default();
        assert_eq!(mat.color_albedo(), Vec4::ONE);
        assert_eq!(mat.cull_mode(), CullMode::Back);
        assert!(mat.is_editable());
        assert!(!mat.has_file_path());
        assert!(!mat.has_shader());
    }

    #[test]
    fn test_shader_flags_follow_textures() {
        let mut mat = Material::new("brick");
        assert_eq!(mat.shader_flags(), ShaderFlags::NONE);

        mat.set_texture(TextureType::Albedo, "brick_albedo.png");
        mat.set_texture(TextureType::Normal, "brick_normal.png");
        assert_eq!(mat.shader_flags(), ShaderFlags(0b1001));

        // Rebinding a slot replaces it
        mat.set_texture(TextureType::Albedo, "brick_albedo_2.png");
        assert_eq!(mat.textures().len(), 2);
        assert_eq!(
            mat.texture(TextureType::Albedo),
            Some(Path::new("brick_albedo_2.png"))
        );
    }

    #[test]
    fn test_acquire_shader_is_weak() {
        let mut library = ShaderLibrary::new(Arc::new(RenderQueue::new()));
        let mut mat = Material::new("brick");
        mat.acquire_shader(&mut library);
        assert!(mat.has_shader());
        assert_eq!(mat.shader().unwrap().flags(), ShaderFlags::NONE);

        library.clear();
        assert!(!mat.has_shader());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("materials").join("brick.material");

        let mut mat = Material::new("brick");
        mat.set_color_albedo(Vec4::new(0.5, 0.25, 0.1, 1.0));
        mat.set_cull_mode(CullMode::None);
        mat.set_roughness(2.0);
        mat.set_texture(TextureType::Albedo, "brick.png");
        mat.save_to_file(&path).unwrap();

        let loaded = Material::load_from_file(&path).unwrap();
        assert_eq!(loaded.name(), "brick");
        assert_eq!(loaded.file_path(), Some(path.as_path()));
        assert_eq!(loaded.color_albedo(), Vec4::new(0.5, 0.25, 0.1, 1.0));
        assert_eq!(loaded.cull_mode(), CullMode::None);
        assert_eq!(loaded.roughness(), 1.0);
        assert_eq!(loaded.shader_flags(), ShaderFlags(1));
        assert!(!loaded.has_shader());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Material::load_from_file(dir.path().join("missing.material"));
        assert!(matches!(result, Err(MaterialError::Io(_))));
    }

    #[test]
    fn test_load_rejects_nameless_material() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nameless.material");
        std::fs::write(&path, r#"{"name": "", "color_albedo": [1.0, 1.0, 1.0, 1.0]}"#).unwrap();
        assert!(matches!(
            Material::load_from_file(&path),
            Err(MaterialError::MissingName(_))
        ));
    }

    #[test]
    fn test_material_uniform_size() {
        use std::mem;
        // Ensure MaterialUniform is the expected size for GPU
        assert_eq!(mem::size_of::<MaterialUniform>(), 32);
        let uniform = Material::new("white").uniform();
        assert_eq!(uniform.color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 32);
    }
}
