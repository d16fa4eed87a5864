use crate::components::color::Color;

/// Mesh shape primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    /// Sphere centered on the entity origin.
    Sphere { radius: f32 },
    /// Flat annulus in the entity's local XY plane.
    Ring { inner: f32, outer: f32 },
}

/// Component for solid meshes, drawn as shaded discs and filled annuli.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: MeshShape,
    pub color: Color,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub opacity: f32,
    /// Self-illumination in [0, 1]. 0 = lit only by scene lights, 1 = unlit full color.
    pub emissive: f32,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            shape: MeshShape::Sphere { radius: 1.0 },
            color: Color::default(),
            opacity: 1.0,
            emissive: 0.0,
        }
    }
}

impl MeshComponent {
    pub fn new(shape: MeshShape, color: Color) -> Self {
        Self {
            shape,
            color,
            ..Default::default()
        }
    }

    pub fn sphere(radius: f32, color: Color) -> Self {
        Self::new(MeshShape::Sphere { radius }, color)
    }

    pub fn ring(inner: f32, outer: f32, color: Color) -> Self {
        Self::new(MeshShape::Ring { inner, outer }, color)
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    /// Radius of the shape's bounding sphere in local units.
    pub fn bounding_radius(&self) -> f32 {
        match self.shape {
            MeshShape::Sphere { radius } => radius,
            MeshShape::Ring { outer, .. } => outer,
        }
    }
}
