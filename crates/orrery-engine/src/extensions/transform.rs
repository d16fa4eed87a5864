// extensions/transform.rs
//
// Scene-graph links between entities. Local transforms live on the Entity;
// this graph only records who hangs off whom and composes world matrices.
//
// Usage:
//   graph.register(group_id);
//   graph.attach(mesh_id, group_id);
//   graph.propagate(&mut scene);  // Writes Entity.world for every linked entity

use std::collections::HashMap;
use glam::Mat4;
use crate::api::types::EntityId;
use crate::core::scene::Scene;

#[derive(Debug, Default)]
pub struct TransformGraph {
    parents: HashMap<EntityId, EntityId>,
    children: HashMap<EntityId, Vec<EntityId>>,
    /// Top-level entities in registration order.
    roots: Vec<EntityId>,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` as a top-level entity.
    pub fn register(&mut self, id: EntityId) {
        if !self.parents.contains_key(&id) && !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    /// Hang `child` under `parent`, detaching it from wherever it was.
    /// A link that would make `child` its own ancestor is refused.
    pub fn attach(&mut self, child: EntityId, parent: EntityId) {
        if self.is_ancestor(child, parent) {
            log::warn!("transform: refusing to attach {child:?} under its descendant {parent:?}");
            return;
        }
        self.detach(child);
        self.roots.retain(|&r| r != child);
        self.parents.insert(child, parent);
        self.children.entry(parent).or_default().push(child);
        if !self.parents.contains_key(&parent) && !self.roots.contains(&parent) {
            self.roots.push(parent);
        }
    }

    fn detach(&mut self, child: EntityId) {
        if let Some(old) = self.parents.remove(&child) {
            if let Some(siblings) = self.children.get_mut(&old) {
                siblings.retain(|&c| c != child);
            }
        }
    }

    /// Whether `ancestor` is `id` or one of its parents.
    fn is_ancestor(&self, ancestor: EntityId, id: EntityId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.get_parent(cur);
        }
        false
    }

    pub fn get_parent(&self, id: EntityId) -> Option<EntityId> {
        self.parents.get(&id).copied()
    }

    pub fn get_children(&self, id: EntityId) -> Option<&[EntityId]> {
        self.children.get(&id).map(Vec::as_slice)
    }

    /// Write `Entity.world` for every entity reachable from a root.
    /// Local transforms change every frame, so this always runs in full.
    pub fn propagate(&self, scene: &mut Scene) {
        let mut stack: Vec<(EntityId, Mat4)> = self
            .roots
            .iter()
            .rev()
            .map(|&root| (root, Mat4::IDENTITY))
            .collect();

        while let Some((id, parent_world)) = stack.pop() {
            let world = match scene.get_mut(id) {
                Some(entity) => {
                    entity.world = parent_world * entity.local_matrix();
                    entity.world
                }
                // Link-only node: pass the parent frame through.
                None => parent_world,
            };
            if let Some(children) = self.children.get(&id) {
                stack.extend(children.iter().rev().map(|&child| (child, world)));
            }
        }
    }

    /// Compose the world matrix of `id` from current local transforms by
    /// walking up the parent chain. Does not touch `Entity.world`.
    pub fn world_matrix(&self, scene: &Scene, id: EntityId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut current = Some(id);
        while let Some(cur) = current {
            if let Some(entity) = scene.get(cur) {
                matrix = entity.local_matrix() * matrix;
            }
            current = self.get_parent(cur);
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use glam::Vec3;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn attach_links_both_ways() {
        let mut graph = TransformGraph::new();
        let (group, mesh) = (EntityId(1), EntityId(2));
        graph.register(group);
        graph.register(mesh);
        graph.attach(mesh, group);

        assert_eq!(graph.get_parent(mesh), Some(group));
        assert_eq!(graph.get_children(group), Some([mesh].as_slice()));
        assert_eq!(graph.roots, vec![group]);
    }

    #[test]
    fn reattach_moves_child() {
        let mut graph = TransformGraph::new();
        let (a, b, child) = (EntityId(1), EntityId(2), EntityId(3));
        graph.attach(child, a);
        graph.attach(child, b);
        assert_eq!(graph.get_parent(child), Some(b));
        assert_eq!(graph.get_children(a), Some([].as_slice()));
    }

    #[test]
    fn cycles_are_refused() {
        let mut graph = TransformGraph::new();
        let (outer, inner) = (EntityId(1), EntityId(2));
        graph.attach(inner, outer);
        graph.attach(outer, inner);
        assert_eq!(graph.get_parent(outer), None);
        assert_eq!(graph.get_parent(inner), Some(outer));
    }

    #[test]
    fn rotating_group_carries_child_around() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();

        let (group, body) = (EntityId(1), EntityId(2));
        scene.spawn(Entity::new(group).with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0)));
        scene.spawn(Entity::new(body).with_translation(Vec3::new(40.0, 0.0, 0.0)));
        graph.register(group);
        graph.attach(body, group);

        graph.propagate(&mut scene);

        let pos = scene.get(body).unwrap().world_position();
        assert!(approx(pos, Vec3::new(0.0, 0.0, -40.0)), "pos={pos}");
    }

    #[test]
    fn nested_groups_compose() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();

        let (outer, inner, leaf) = (EntityId(1), EntityId(2), EntityId(3));
        scene.spawn(Entity::new(outer).with_translation(Vec3::new(10.0, 0.0, 0.0)));
        scene.spawn(Entity::new(inner).with_scale(Vec3::splat(2.0)));
        scene.spawn(Entity::new(leaf).with_translation(Vec3::new(0.0, 1.0, 0.0)));
        graph.register(outer);
        graph.attach(inner, outer);
        graph.attach(leaf, inner);

        graph.propagate(&mut scene);

        let pos = scene.get(leaf).unwrap().world_position();
        assert!(approx(pos, Vec3::new(10.0, 2.0, 0.0)), "pos={pos}");
        assert!(approx(graph.world_matrix(&scene, leaf).transform_point3(Vec3::ZERO), pos));
    }

    #[test]
    fn world_matrix_sees_unpropagated_changes() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id));
        graph.register(id);
        graph.propagate(&mut scene);

        scene.get_mut(id).unwrap().translation = Vec3::new(3.0, 0.0, 0.0);

        assert!(approx(scene.get(id).unwrap().world_position(), Vec3::ZERO));
        assert!(approx(graph.world_matrix(&scene, id).transform_point3(Vec3::ZERO), Vec3::new(3.0, 0.0, 0.0)));
    }
}
