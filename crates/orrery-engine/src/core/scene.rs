use std::collections::HashMap;

use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity storage in spawn order with an id index.
///
/// Spawn order is draw order for equal depths, so entities are never
/// reordered.
pub struct Scene {
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Add an entity. An entity with an id already present replaces the
    /// old one in its slot.
    pub fn spawn(&mut self, entity: Entity) {
        match self.index.get(&entity.id) {
            Some(&slot) => {
                log::warn!("scene: entity {:?} spawned twice, replacing", entity.id);
                self.entities[slot] = entity;
            }
            None => {
                self.index.insert(entity.id, self.entities.len());
                self.entities.push(entity);
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&slot| &self.entities[slot])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = *self.index.get(&id)?;
        self.entities.get_mut(slot)
    }

    /// Entities in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn lookup_by_id() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(7)));
        scene.spawn(Entity::new(EntityId(3)).with_translation(Vec3::new(10.0, 20.0, 30.0)));
        assert_eq!(scene.get(EntityId(3)).unwrap().translation, Vec3::new(10.0, 20.0, 30.0));
        assert!(scene.get(EntityId(4)).is_none());

        scene.get_mut(EntityId(7)).unwrap().visible = false;
        assert!(!scene.get(EntityId(7)).unwrap().visible);
    }

    #[test]
    fn iteration_keeps_spawn_order() {
        let mut scene = Scene::new();
        for id in [5, 2, 9] {
            scene.spawn(Entity::new(EntityId(id)));
        }
        let order: Vec<u32> = scene.iter().map(|e| e.id.0).collect();
        assert_eq!(order, vec![5, 2, 9]);
    }

    #[test]
    fn respawn_replaces_in_place() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)));
        scene.spawn(Entity::new(EntityId(2)));
        scene.spawn(Entity::new(EntityId(1)).with_pick_tag(4));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.iter().next().unwrap().pick_tag, Some(4));
    }
}
