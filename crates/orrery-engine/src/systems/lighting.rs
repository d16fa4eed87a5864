/// Point lights and the ambient floor for shaded spheres.
///
/// The render pass asks for the dominant light at every non-emissive sphere
/// and bakes the result into its instance.

use glam::Vec3;
use crate::components::color::Color;

/// A point light with linear falloff to zero at `range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
    /// Distance at which the light's contribution reaches zero. 0 = no falloff.
    pub range: f32,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color, intensity: f32, range: f32) -> Self {
        Self {
            position,
            color,
            intensity,
            range,
        }
    }

    /// Strength of this light at `point`, after distance falloff.
    pub fn strength_at(&self, point: Vec3) -> f32 {
        if self.range <= 0.0 {
            return self.intensity;
        }
        let d = self.position.distance(point);
        self.intensity * (1.0 - d / self.range).clamp(0.0, 1.0)
    }
}

/// Dominant light contribution at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shade {
    /// Unit vector from the point toward the light.
    pub toward_light: Vec3,
    /// Diffuse strength of the light on a surface facing it head-on.
    pub diffuse: f32,
}

/// Scene lighting. Ambient defaults to white so a scene without lights
/// draws meshes at full color.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: Color,
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient: Color::WHITE,
        }
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, ambient: Color) {
        self.ambient = ambient;
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    /// Mean ambient level, used as the floor of sphere shading.
    pub fn ambient_level(&self) -> f32 {
        (self.ambient.r + self.ambient.g + self.ambient.b) / 3.0
    }

    /// The strongest light reaching `point`, if any reaches it at all.
    pub fn shade_at(&self, point: Vec3) -> Option<Shade> {
        self.lights
            .iter()
            .map(|light| (light, light.strength_at(point)))
            .filter(|(_, strength)| *strength > 0.0)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(light, strength)| Shade {
                toward_light: (light.position - point).normalize_or_zero(),
                diffuse: strength,
            })
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_lights_no_shade() {
        let state = LightState::new();
        assert_eq!(state.count(), 0);
        assert!(state.shade_at(Vec3::ZERO).is_none());
    }

    #[test]
    fn ambient_default_and_override() {
        let mut state = LightState::new();
        assert_eq!(state.ambient(), Color::WHITE);
        state.set_ambient(Color::from_hex(0x333333));
        assert!((state.ambient_level() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn strength_falls_off_linearly() {
        let light = PointLight::new(Vec3::ZERO, Color::WHITE, 2.0, 300.0);
        assert_eq!(light.strength_at(Vec3::ZERO), 2.0);
        assert!((light.strength_at(Vec3::new(150.0, 0.0, 0.0)) - 1.0).abs() < 1e-5);
        assert_eq!(light.strength_at(Vec3::new(400.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn shade_points_toward_strongest_light() {
        let mut state = LightState::new();
        state.add(PointLight::new(Vec3::ZERO, Color::WHITE, 2.0, 300.0));
        state.add(PointLight::new(Vec3::new(100.0, 0.0, 0.0), Color::WHITE, 0.1, 300.0));

        let shade = state.shade_at(Vec3::new(40.0, 0.0, 0.0)).unwrap();
        assert!((shade.toward_light - Vec3::NEG_X).length() < 1e-5);
        assert!(shade.diffuse > 1.0);
    }

    #[test]
    fn shade_none_out_of_range() {
        let mut state = LightState::new();
        state.add(PointLight::new(Vec3::ZERO, Color::WHITE, 2.0, 10.0));
        assert!(state.shade_at(Vec3::new(50.0, 0.0, 0.0)).is_none());
    }
}
