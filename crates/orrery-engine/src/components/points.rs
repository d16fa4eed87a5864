use glam::Vec3;
use crate::components::color::Color;

/// A cloud of unconnected points (stars, asteroid belts, dust).
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    /// Point positions in the entity's local space.
    pub positions: Vec<Vec3>,
    pub color: Color,
    /// Point size in world units, attenuated by distance when drawn.
    pub size: f32,
}

impl PointCloud {
    pub fn new(positions: Vec<Vec3>, color: Color, size: f32) -> Self {
        Self {
            positions,
            color,
            size,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
