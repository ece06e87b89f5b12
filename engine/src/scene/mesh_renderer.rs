//! MeshRenderer component
//!
//! Binds a game object's mesh to a shared [`Material`] and submits it for
//! drawing through the material's shader. The material itself is owned by the
//! resource cache; the component only keeps a weak handle and re-checks it on
//! every use.

use crate::core::Context;
use crate::graphics::{CullMode, Material};
use crate::io::{StreamError, StreamReader, StreamWriter};
use glam::Vec4;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

/// Name written in place of a material that isn't assigned
pub const NOT_ASSIGNED: &str = "N/A";

/// Resource name of the engine generated default material
pub const STANDARD_MATERIAL_NAME: &str = "Standard";

/// Renders a mesh with a material
#[derive(Debug, Clone)]
pub struct MeshRenderer {
    cast_shadows: bool,
    receive_shadows: bool,
    using_standard_material: bool,
    material: Weak<Material>,
}

impl Default for MeshRenderer {
    fn default() -> Self {
        Self {
            cast_shadows: true,
            receive_shadows: true,
            using_standard_material: false,
            material: Weak::new(),
        }
    }
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cast_shadows(&self) -> bool {
        self.cast_shadows
    }

    pub fn set_cast_shadows(&mut self, cast_shadows: bool) {
        self.cast_shadows = cast_shadows;
    }

    pub fn receive_shadows(&self) -> bool {
        self.receive_shadows
    }

    pub fn set_receive_shadows(&mut self, receive_shadows: bool) {
        self.receive_shadows = receive_shadows;
    }

    pub fn is_using_standard_material(&self) -> bool {
        self.using_standard_material
    }

    /// The assigned material, or `None` if it was never set or has expired
    pub fn material(&self) -> Option<Arc<Material>> {
        self.material.upgrade()
    }

    /// Weak handle to the assigned material
    pub fn material_weak(&self) -> Weak<Material> {
        self.material.clone()
    }

    pub fn has_material(&self) -> bool {
        self.material.strong_count() > 0
    }

    /// Name of the assigned material, or [`NOT_ASSIGNED`]
    pub fn material_name(&self) -> String {
        self.material()
            .map(|material| material.name().to_string())
            .unwrap_or_else(|| NOT_ASSIGNED.to_string())
    }

    pub fn serialize<W: Write>(&self, stream: &mut StreamWriter<W>) -> Result<(), StreamError> {
        stream.write(&self.cast_shadows)?;
        stream.write(&self.receive_shadows)?;
        stream.write(&self.using_standard_material)?;
        if !self.using_standard_material {
            stream.write_str(&self.material_name())?;
        }
        Ok(())
    }

    pub fn deserialize<R: Read>(
        &mut self,
        stream: &mut StreamReader<R>,
        ctx: &Context,
    ) -> Result<(), StreamError> {
        self.cast_shadows = stream.read()?;
        self.receive_shadows = stream.read()?;
        self.using_standard_material = stream.read()?;

        if self.using_standard_material {
            self.use_standard_material(ctx);
        } else {
            let name: String = stream.read()?;
            self.material = if name == NOT_ASSIGNED {
                Weak::new()
            } else {
                ctx.resources().get_material_by_name(&name)
            };
        }
        Ok(())
    }

    /// Submit `index_count` indices of the owner's mesh with the assigned material
    pub fn render(&self, game_object_name: &str, index_count: u32) {
        let Some(material) = self.material() else {
            warn!(
                "MeshRenderer: \"{}\" has no material. It can't be rendered.",
                game_object_name
            );
            return;
        };

        let Some(shader) = material.shader() else {
            warn!(
                "MeshRenderer: \"{}\" has a material but not a shader associated with it. It can't be rendered.",
                game_object_name
            );
            return;
        };

        shader.render(index_count, material.uniform());
    }

    /// Assign a material that already lives in memory
    ///
    /// With `auto_cache` the material is routed through the resource cache and
    /// the component points at the canonical cached instance. If that instance
    /// has a file path it is written to the path of the material passed in. Without caching the component
    /// points at `material` directly, so it stays valid only as long as someone
    /// else keeps it alive.
    pub fn set_material_from_memory(
        &mut self,
        material: &Weak<Material>,
        auto_cache: bool,
        ctx: &Context,
    ) {
        let Some(material) = material.upgrade() else {
            warn!("MeshRenderer::set_material_from_memory(): Provided material is null, can't execute function");
            return;
        };

        if !auto_cache {
            self.material = Arc::downgrade(&material);
            return;
        }

        let incoming_path = material.file_path().map(Path::to_path_buf);
        let cached = ctx.resources().cache(material);
        self.material = Arc::downgrade(&cached);
        if cached.has_file_path() {
            match incoming_path {
                Some(path) => {
                    if let Err(e) = cached.save_to_file(&path) {
                        warn!(
                            material = cached.name(),
                            path = ?path,
                            error = %e,
                            "MeshRenderer::set_material_from_memory(): Failed to save material"
                        );
                    }
                }
                None => warn!(
                    material = cached.name(),
                    "MeshRenderer::set_material_from_memory(): Provided material has no file path, nothing saved"
                ),
            }
            self.using_standard_material = false;
        }
        debug!(material = cached.name(), "Material assigned");
    }

    /// Load a material file and assign it. Returns an empty handle on failure.
    pub fn set_material_from_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        ctx: &Context,
    ) -> Weak<Material> {
        let path = path.as_ref();
        let mut material = match Material::load_from_file(path) {
            Ok(material) => material,
            Err(e) => {
                warn!(
                    error = %e,
                    "MeshRenderer::set_material_from_file(): Failed to load material from \"{}\"",
                    path.display()
                );
                return Weak::new();
            }
        };
        material.acquire_shader(&mut ctx.shaders());

        let material = Arc::new(material);
        self.set_material_from_memory(&Arc::downgrade(&material), true, ctx);
        self.material_weak()
    }

    /// Replace the material with the engine's default opaque white material
    pub fn use_standard_material(&mut self, ctx: &Context) {
        self.using_standard_material = true;

        let standard_dir = ctx.resources().standard_assets_directory().to_path_buf();
        if let Err(e) = std::fs::create_dir_all(&standard_dir) {
            warn!(path = ?standard_dir, error = %e, "Failed to create standard assets directory");
        }

        let mut material = Material::new(STANDARD_MATERIAL_NAME);
        material.set_cull_mode(CullMode::Back);
        material.set_color_albedo(Vec4::new(1.0, 1.0, 1.0, 1.0));
        material.set_is_editable(false);
        material.acquire_shader(&mut ctx.shaders());

        // Cached in memory only; the standard material is never written to disk
        let cached = ctx.resources().cache(Arc::new(material));
        self.set_material_from_memory(&Arc::downgrade(&cached), false, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetConfig;
    use std::io::Cursor;

    fn test_context(dir: &tempfile::TempDir) -> Context {
        Context::new(AssetConfig::with_root(dir.path()))
    }

    fn cached_material(ctx: &Context, name: &str, with_shader: bool) -> Arc<Material> {
        let mut material = Material::new(name);
        if with_shader {
            material.acquire_shader(&mut ctx.shaders());
        }
        ctx.resources().cache(Arc::new(material))
    }

    #[test]
    fn test_defaults() {
        let renderer = MeshRenderer::new();
        assert!(renderer.cast_shadows());
        assert!(renderer.receive_shadows());
        assert!(!renderer.is_using_standard_material());
        assert!(!renderer.has_material());
        assert_eq!(renderer.material_name(), NOT_ASSIGNED);
    }

    #[test]
    fn test_render_without_material_submits_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);
        let renderer = MeshRenderer::new();

        renderer.render("Cube", 36);
        assert!(ctx.render_queue().is_empty());
    }

    #[test]
    fn test_render_without_shader_submits_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);
        let material = cached_material(&ctx, "brick", false);

        let mut renderer = MeshRenderer::new();
        renderer.set_material_from_memory(&Arc::downgrade(&material), false, &ctx);
        renderer.render("Cube", 36);

        assert!(ctx.render_queue().is_empty());
    }

    #[test]
    fn test_render_delegates_to_shader() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);
        let material = cached_material(&ctx, "brick", true);

        let mut renderer = MeshRenderer::new();
        renderer.set_material_from_memory(&Arc::downgrade(&material), true, &ctx);
        renderer.render("Cube", 36);

        let calls = ctx.render_queue().drain();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].index_count, 36);
        assert_eq!(calls[0].uniform, material.uniform());
    }

    #[test]
    fn test_render_carries_material_constants() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);
        let mut material = Material::new("rust");
        material.set_color_albedo(Vec4::new(0.7, 0.3, 0.1, 1.0));
        material.set_roughness(0.8);
        material.set_metallic(1.0);
        material.acquire_shader(&mut ctx.shaders());
        let material = ctx.resources().cache(Arc::new(material));

        let mut renderer = MeshRenderer::new();
        renderer.set_material_from_memory(&Arc::downgrade(&material), false, &ctx);
        renderer.render("Pipe", 12);

        let calls = ctx.render_queue().drain();
        assert_eq!(calls[0].uniform.color, [0.7, 0.3, 0.1, 1.0]);
        assert_eq!(calls[0].uniform.roughness, 0.8);
        assert_eq!(calls[0].uniform.metallic, 1.0);
    }

    #[test]
    fn test_null_material_leaves_reference_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);
        let material = cached_material(&ctx, "brick", true);

        let mut renderer = MeshRenderer::new();
        renderer.set_material_from_memory(&Arc::downgrade(&material), false, &ctx);
        renderer.set_material_from_memory(&Weak::new(), true, &ctx);
        renderer.set_material_from_memory(&Weak::new(), false, &ctx);

        assert_eq!(renderer.material_name(), "brick");
        assert!(Arc::ptr_eq(&renderer.material().unwrap(), &material));
    }

    #[test]
    fn test_auto_cache_points_at_canonical_instance() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);
        let canonical = cached_material(&ctx, "brick", true);

        let duplicate = Arc::new(Material::new("brick"));
        let mut renderer = MeshRenderer::new();
        renderer.set_material_from_memory(&Arc::downgrade(&duplicate), true, &ctx);

        assert!(Arc::ptr_eq(&renderer.material().unwrap(), &canonical));
        drop(duplicate);
        assert!(renderer.has_material());
    }

    #[test]
    fn test_uncached_material_expires_with_owner() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);

        let material = Arc::new(Material::new("temporary"));
        let mut renderer = MeshRenderer::new();
        renderer.set_material_from_memory(&Arc::downgrade(&material), false, &ctx);
        assert!(renderer.has_material());

        drop(material);
        assert!(!renderer.has_material());
        assert_eq!(renderer.material_name(), NOT_ASSIGNED);
        assert!(!ctx.resources().contains("temporary"));
    }

    #[test]
    fn test_cached_material_with_path_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);
        let path = ctx.config().material_path("brick").unwrap();

        let mut material = Material::new("brick");
        material.set_file_path(&path);

        let mut renderer = MeshRenderer::new();
        renderer.use_standard_material(&ctx);
        assert!(renderer.is_using_standard_material());

        let material = Arc::new(material);
        renderer.set_material_from_memory(&Arc::downgrade(&material), true, &ctx);

        assert!(path.exists());
        assert!(!renderer.is_using_standard_material());
        assert_eq!(renderer.material_name(), "brick");
    }

    #[test]
    fn test_cached_material_is_saved_to_incoming_path() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);
        let original_path = dir.path().join("a").join("brick.material");
        let incoming_path = dir.path().join("b").join("brick.material");

        let mut original = Material::new("brick");
        original.set_file_path(&original_path);
        let original = ctx.resources().cache(Arc::new(original));

        let mut incoming = Material::new("brick");
        incoming.set_file_path(&incoming_path);
        let incoming = Arc::new(incoming);

        let mut renderer = MeshRenderer::new();
        renderer.set_material_from_memory(&Arc::downgrade(&incoming), true, &ctx);

        assert!(Arc::ptr_eq(&renderer.material().unwrap(), &original));
        assert!(incoming_path.exists());
        assert!(!original_path.exists());
        assert!(!renderer.is_using_standard_material());
    }

    #[test]
    fn test_cached_material_without_path_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);
        let original_path = dir.path().join("a").join("brick.material");

        let mut original = Material::new("brick");
        original.set_file_path(&original_path);
        ctx.resources().cache(Arc::new(original));

        let incoming = Arc::new(Material::new("brick"));
        let mut renderer = MeshRenderer::new();
        renderer.use_standard_material(&ctx);
        renderer.set_material_from_memory(&Arc::downgrade(&incoming), true, &ctx);

        assert!(!original_path.exists());
        assert_eq!(renderer.material_name(), "brick");
        assert!(!renderer.is_using_standard_material());
    }

    #[test]
    fn test_set_material_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);
        let path = ctx.config().material_path("marble").unwrap();
        Material::new("marble").save_to_file(&path).unwrap();

        let mut renderer = MeshRenderer::new();
        let weak = renderer.set_material_from_file(&path, &ctx);

        let material = weak.upgrade().unwrap();
        assert_eq!(material.name(), "marble");
        assert!(material.has_shader());
        assert!(ctx.resources().contains("marble"));
        assert_eq!(renderer.material_name(), "marble");
    }

    #[test]
    fn test_set_material_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);
        let material = cached_material(&ctx, "brick", true);

        let mut renderer = MeshRenderer::new();
        renderer.set_material_from_memory(&Arc::downgrade(&material), false, &ctx);
        let weak = renderer.set_material_from_file(dir.path().join("missing.material"), &ctx);

        assert!(weak.upgrade().is_none());
        assert_eq!(renderer.material_name(), "brick");
    }

    #[test]
    fn test_use_standard_material() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);

        let mut renderer = MeshRenderer::new();
        renderer.use_standard_material(&ctx);

        let material = renderer.material().unwrap();
        assert_eq!(material.name(), STANDARD_MATERIAL_NAME);
        assert_eq!(material.color_albedo(), Vec4::ONE);
        assert_eq!(material.cull_mode(), CullMode::Back);
        assert!(!material.is_editable());
        assert!(material.has_shader());
        assert!(!material.has_file_path());
        assert!(renderer.is_using_standard_material());
        assert!(ctx.config().standard_assets_path().is_dir());

        renderer.render("Cube", 36);
        assert_eq!(ctx.render_queue().len(), 1);
    }

    #[test]
    fn test_serialize_round_trip_named_material() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);
        let material = cached_material(&ctx, "brick", true);

        let mut renderer = MeshRenderer::new();
        renderer.set_cast_shadows(false);
        renderer.set_material_from_memory(&Arc::downgrade(&material), false, &ctx);

        let mut writer = StreamWriter::new(Vec::new());
        renderer.serialize(&mut writer).unwrap();

        let mut restored = MeshRenderer::new();
        let mut reader = StreamReader::new(Cursor::new(writer.into_inner()));
        restored.deserialize(&mut reader, &ctx).unwrap();

        assert!(!restored.cast_shadows());
        assert!(restored.receive_shadows());
        assert!(!restored.is_using_standard_material());
        assert_eq!(restored.material_name(), "brick");
    }

    #[test]
    fn test_serialize_unassigned_writes_sentinel() {
        let renderer = MeshRenderer::new();
        let mut writer = StreamWriter::new(Vec::new());
        renderer.serialize(&mut writer).unwrap();

        let bytes = writer.into_inner();
        assert_eq!(&bytes[..3], &[1, 1, 0]);
        assert_eq!(&bytes[11..], NOT_ASSIGNED.as_bytes());
    }

    #[test]
    fn test_deserialize_standard_reads_no_name() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);

        // Three flags only, followed by an unrelated trailing value
        let mut writer = StreamWriter::new(Vec::new());
        writer.write(&true).unwrap();
        writer.write(&false).unwrap();
        writer.write(&true).unwrap();
        writer.write(&0xdead_beef_u32).unwrap();

        let mut renderer = MeshRenderer::new();
        let mut reader = StreamReader::new(Cursor::new(writer.into_inner()));
        renderer.deserialize(&mut reader, &ctx).unwrap();

        assert!(renderer.is_using_standard_material());
        assert!(!renderer.receive_shadows());
        assert_eq!(renderer.material_name(), STANDARD_MATERIAL_NAME);
        assert_eq!(reader.read::<u32>().unwrap(), 0xdead_beef);
    }

    #[test]
    fn test_deserialize_unknown_material_name() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);

        let mut writer = StreamWriter::new(Vec::new());
        writer.write(&true).unwrap();
        writer.write(&true).unwrap();
        writer.write(&false).unwrap();
        writer.write_str("does_not_exist").unwrap();

        let mut renderer = MeshRenderer::new();
        let mut reader = StreamReader::new(Cursor::new(writer.into_inner()));
        renderer.deserialize(&mut reader, &ctx).unwrap();

        assert!(!renderer.has_material());
    }

    #[test]
    fn test_deserialize_truncated_stream() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);

        let mut renderer = MeshRenderer::new();
        let mut reader = StreamReader::new(Cursor::new(vec![1u8, 1]));
        assert!(renderer.deserialize(&mut reader, &ctx).is_err());
    }
}
