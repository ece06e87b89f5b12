//! World wrapper providing helper methods for entity management

use hecs::Entity;
use tracing::debug;

/// Wrapper around hecs::World providing additional helper methods
pub struct World {
    inner: hecs::World,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            inner: hecs::World::new(),
        }
    }

    /// Spawn a new entity with the given components
    pub fn spawn(&mut self, components: impl hecs::DynamicBundle) -> Entity {
        let entity = self.inner.spawn(components);
        debug!(entity = ?entity, "Spawned entity");
        entity
    }

    /// Get a reference to a component on an entity
    pub fn get<T: hecs::Component>(
        &self,
        entity: Entity,
    ) -> Result<hecs::Ref<'_, T>, hecs::ComponentError> {
        self.inner.get::<&T>(entity)
    }

    /// Get a mutable reference to a component on an entity
    pub fn get_mut<T: hecs::Component>(
        &mut self,
        entity: Entity,
    ) -> Result<&mut T, hecs::QueryOneError> {
        self.inner.query_one_mut::<&mut T>(entity)
    }

    /// Insert a component into an entity
    pub fn insert_one(
        &mut self,
        entity: Entity,
        component: impl hecs::Component,
    ) -> Result<(), hecs::NoSuchEntity> {
        self.inner.insert_one(entity, component)
    }

    /// Query entities with specific components
    pub fn query<Q: hecs::Query>(&self) -> hecs::QueryBorrow<'_, Q> {
        self.inner.query()
    }

    /// Despawn an entity and all its components
    pub fn despawn(&mut self, entity: Entity) -> Result<(), hecs::NoSuchEntity> {
        self.inner.despawn(entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(entity)
    }

    pub fn len(&self) -> u32 {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{Name, Transform};

    #[test]
    fn test_spawn_and_get() {
        let mut world = World::new();
        let entity = world.spawn((Name::new("Cube"), Transform::default()));

        assert!(world.contains(entity));
        assert_eq!(world.get::<Name>(entity).unwrap().as_str(), "Cube");
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_get_mut() {
        let mut world = World::new();
        let entity = world.spawn((Name::new("Cube"),));

        world.get_mut::<Name>(entity).unwrap().0 = "Renamed".to_string();
        assert_eq!(world.get::<Name>(entity).unwrap().as_str(), "Renamed");
        assert!(world.get_mut::<Transform>(entity).is_err());
    }

    #[test]
    fn test_despawn() {
        let mut world = World::new();
        let entity = world.spawn((Name::new("Cube"),));
        world.despawn(entity).unwrap();
        assert!(!world.contains(entity));
        assert!(world.is_empty());
    }
}
