use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;
use crate::components::path::PathComponent;
use crate::components::points::PointCloud;

/// Fat Entity: a single struct with optional components.
/// Designed for simplicity and rapid prototyping over ECS purity.
///
/// The transform fields are local to the entity's parent in the
/// `TransformGraph`; `world` is written by propagation.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Whether this entity is drawn and pickable. Not inherited by children.
    pub visible: bool,
    /// Position relative to parent.
    pub translation: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
    /// Scale relative to parent.
    pub scale: Vec3,
    /// World matrix as of the last propagation.
    pub world: Mat4,
    /// Solid mesh (optional; groups have none).
    pub mesh: Option<MeshComponent>,
    /// Point cloud (optional).
    pub points: Option<PointCloud>,
    /// Polyline (optional).
    pub path: Option<PathComponent>,
    /// Game-defined tag returned by ray casts. Entities without one are not pickable.
    pub pick_tag: Option<u32>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            visible: true,
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            world: Mat4::IDENTITY,
            mesh: None,
            points: None,
            path: None,
            pick_tag: None,
        }
    }

    // -- Builder pattern --

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_points(mut self, points: PointCloud) -> Self {
        self.points = Some(points);
        self
    }

    pub fn with_path(mut self, path: PathComponent) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_pick_tag(mut self, tag: u32) -> Self {
        self.pick_tag = Some(tag);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Local transform as a matrix: scale, then rotate, then translate.
    pub fn local_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.translation)
    }

    /// World-space position of the entity origin, as of the last propagation.
    pub fn world_position(&self) -> Vec3 {
        self.world.transform_point3(Vec3::ZERO)
    }

    /// Largest world-space scale factor, as of the last propagation.
    pub fn world_scale(&self) -> f32 {
        let (scale, _, _) = self.world.to_scale_rotation_translation();
        scale.abs().max_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_matrix_rotates_then_translates() {
        let e = Entity::new(EntityId(1))
            .with_translation(Vec3::new(0.0, 0.0, 3.0))
            .with_rotation(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        let p = e.local_matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        // +X rotated a quarter turn about Y lands on -Z.
        assert!((p - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5, "p={p}");
    }

    #[test]
    fn world_scale_reads_largest_axis() {
        let mut e = Entity::new(EntityId(1));
        e.world = Mat4::from_scale(Vec3::new(1.0, 2.5, 1.5));
        assert!((e.world_scale() - 2.5).abs() < 1e-5);
    }
}
