use glam::Vec3;
use crate::components::color::Color;

/// A polyline through local-space vertices, drawn one pixel wide.
#[derive(Debug, Clone, PartialEq)]
pub struct PathComponent {
    pub vertices: Vec<Vec3>,
    pub color: Color,
    pub opacity: f32,
}

impl PathComponent {
    pub fn new(vertices: Vec<Vec3>, color: Color) -> Self {
        Self {
            vertices,
            color,
            opacity: 1.0,
        }
    }

    /// A circle of `radius` in the local XZ plane, sampled as `segments + 1`
    /// vertices so the last vertex repeats the first.
    pub fn circle_xz(radius: f32, segments: usize, color: Color) -> Self {
        let vertices = (0..=segments)
            .map(|i| {
                let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
                Vec3::new(theta.cos() * radius, 0.0, theta.sin() * radius)
            })
            .collect();
        Self::new(vertices, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_closes_on_itself() {
        let path = PathComponent::circle_xz(40.0, 128, Color::WHITE);
        assert_eq!(path.vertices.len(), 129);
        let first = path.vertices[0];
        let last = path.vertices[128];
        assert!((first - last).length() < 1e-3);
        for v in &path.vertices {
            assert!((v.length() - 40.0).abs() < 1e-3);
            assert_eq!(v.y, 0.0);
        }
    }
}
