use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::mesh::MeshShape;
use crate::core::scene::Scene;

/// A half-line from `origin` along unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; `direction` is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first intersection with a sphere,
    /// or `None` if the ray misses. A ray starting inside the sphere hits
    /// its far side.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let near = -b - sqrt_disc;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + sqrt_disc;
        (far >= 0.0).then_some(far)
    }
}

/// A pickable entity hit by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub id: EntityId,
    /// The entity's `pick_tag`.
    pub tag: u32,
    pub distance: f32,
}

/// Cast `ray` against every visible, tagged sphere mesh in world space
/// (as of the last propagation). The nearest hit wins.
pub fn raycast(scene: &Scene, ray: &Ray) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;

    for entity in scene.iter() {
        if !entity.visible {
            continue;
        }
        let Some(tag) = entity.pick_tag else { continue };
        let Some(mesh) = &entity.mesh else { continue };
        let MeshShape::Sphere { radius } = mesh.shape else { continue };

        let center = entity.world_position();
        let world_radius = radius * entity.world_scale();
        if let Some(distance) = ray.intersect_sphere(center, world_radius) {
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(RayHit {
                    id: entity.id,
                    tag,
                    distance,
                });
            }
        }
    }

    best
}
