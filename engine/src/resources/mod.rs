//! Resource cache for shared materials

use crate::graphics::Material;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

/// Name-keyed cache owning every shared material
///
/// Components never own materials; they hold `Weak` handles obtained from
/// this cache and must upgrade them before use.
pub struct ResourceManager {
    materials: HashMap<String, Arc<Material>>,
    standard_assets_dir: PathBuf,
}

impl ResourceManager {
    /// Create an empty cache
    pub fn new(standard_assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            materials: HashMap::new(),
            standard_assets_dir: standard_assets_dir.into(),
        }
    }

    /// Return the canonical instance for `material`
    ///
    /// If a material with the same name is already cached that instance is
    /// returned and `material` is discarded; otherwise `material` is inserted.
    pub fn cache(&mut self, material: Arc<Material>) -> Arc<Material> {
        if material.name().is_empty() {
            warn!("ResourceManager::cache(): material has no name, it will not be cached");
            return material;
        }

        if let Some(existing) = self.materials.get(material.name()) {
            debug!(material = material.name(), "Material already cached");
            return Arc::clone(existing);
        }

        debug!(material = material.name(), "Caching material");
        self.materials
            .insert(material.name().to_string(), Arc::clone(&material));
        material
    }

    /// Look a material up by name; the result is empty if it isn't cached
    pub fn get_material_by_name(&self, name: &str) -> Weak<Material> {
        match self.materials.get(name) {
            Some(material) => Arc::downgrade(material),
            None => {
                debug!(material = name, "Material not found in cache");
                Weak::new()
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    /// Sorted names of every cached material
    pub fn material_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.materials.keys().cloned().collect();
        names.sort();
        names
    }

    /// Remove a material. Outstanding weak handles expire unless someone else holds it.
    pub fn unload(&mut self, name: &str) -> bool {
        let removed = self.materials.remove(name).is_some();
        if removed {
            debug!(material = name, "Unloaded material");
        }
        removed
    }

    pub fn clear(&mut self) {
        info!(count = self.materials.len(), "Unloading all materials");
        self.materials.clear();
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Directory that holds engine generated assets such as the standard material
    pub fn standard_assets_directory(&self) -> &Path {
        &self.standard_assets_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_returns_canonical_instance() {
        let mut resources = ResourceManager::new("standard_assets");

        let first = resources.cache(Arc::new(Material::new("brick")));
        let second = resources.cache(Arc::new(Material::new("brick")));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(resources.len(), 1);
    }

    #[test]
    fn test_lookup_by_name() {
        let mut resources = ResourceManager::new("standard_assets");
        resources.cache(Arc::new(Material::new("brick")));

        let found = resources.get_material_by_name("brick");
        assert_eq!(found.upgrade().unwrap().name(), "brick");

        let missing = resources.get_material_by_name("marble");
        assert!(missing.upgrade().is_none());
    }

    #[test]
    fn test_unnamed_material_not_cached() {
        let mut resources = ResourceManager::new("standard_assets");
        let material = resources.cache(Arc::new(Material::default()));
        assert_eq!(material.name(), "");
        assert!(resources.is_empty());
    }

    #[test]
    fn test_unload_expires_weak_handles() {
        let mut resources = ResourceManager::new("standard_assets");
        resources.cache(Arc::new(Material::new("brick")));
        let weak = resources.get_material_by_name("brick");

        assert!(resources.unload("brick"));
        assert!(!resources.unload("brick"));
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_material_names_sorted() {
        let mut resources = ResourceManager::new("standard_assets");
        resources.cache(Arc::new(Material::new("wood")));
        resources.cache(Arc::new(Material::new("brick")));
        assert_eq!(resources.material_names(), vec!["brick", "wood"]);

        resources.clear();
        assert!(resources.material_names().is_empty());
    }
}
