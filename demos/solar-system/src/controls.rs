//! Speed multiplier and orbit-line visibility.

use orrery_engine::{EntityId, Scene};

/// Global multiplier on every angular delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedFactor(f32);

impl SpeedFactor {
    pub const MIN: f32 = 0.1;
    pub const MAX: f32 = 10.0;
    pub const STEP: f32 = 1.5;

    pub fn get(self) -> f32 {
        self.0
    }

    pub fn faster(&mut self) {
        self.0 = (self.0 * Self::STEP).min(Self::MAX);
    }

    pub fn slower(&mut self) {
        self.0 = (self.0 / Self::STEP).max(Self::MIN);
    }

    pub fn reset(&mut self) {
        self.0 = 1.0;
    }
}

impl Default for SpeedFactor {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Shared visibility flag for every orbit line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbitVisibility {
    visible: bool,
}

impl OrbitVisibility {
    pub fn new() -> Self {
        Self { visible: true }
    }

    pub fn visible(self) -> bool {
        self.visible
    }

    /// Flip the flag and apply it to `orbits`.
    pub fn toggle(&mut self, scene: &mut Scene, orbits: &[EntityId]) {
        self.visible = !self.visible;
        for id in orbits {
            if let Some(entity) = scene.get_mut(*id) {
                entity.visible = self.visible;
            }
        }
    }
}

impl Default for OrbitVisibility {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{Color, Entity, PathComponent};

    #[test]
    fn speed_stays_in_range() {
        let mut speed = SpeedFactor::default();
        for _ in 0..50 {
            speed.faster();
            assert!(speed.get() <= SpeedFactor::MAX);
        }
        assert_eq!(speed.get(), SpeedFactor::MAX);
        for _ in 0..100 {
            speed.slower();
            assert!(speed.get() >= SpeedFactor::MIN);
        }
        assert_eq!(speed.get(), SpeedFactor::MIN);
    }

    #[test]
    fn mixed_sequence_then_reset() {
        let mut speed = SpeedFactor::default();
        speed.faster();
        assert!((speed.get() - 1.5).abs() < 1e-6);
        for i in 0..37 {
            if i % 3 == 0 { speed.slower() } else { speed.faster() }
            assert!((SpeedFactor::MIN..=SpeedFactor::MAX).contains(&speed.get()));
        }
        speed.reset();
        assert_eq!(speed.get(), 1.0);
    }

    #[test]
    fn orbit_toggle_twice_is_identity() {
        let mut scene = Scene::new();
        let ids: Vec<EntityId> = (1..=3).map(EntityId).collect();
        for id in &ids {
            scene.spawn(Entity::new(*id).with_path(PathComponent::circle_xz(10.0, 8, Color::WHITE)));
        }
        let before: Vec<bool> = ids.iter().map(|id| scene.get(*id).unwrap().visible).collect();

        let mut orbits = OrbitVisibility::new();
        orbits.toggle(&mut scene, &ids);
        assert!(!orbits.visible());
        assert!(ids.iter().all(|id| !scene.get(*id).unwrap().visible));

        orbits.toggle(&mut scene, &ids);
        let after: Vec<bool> = ids.iter().map(|id| scene.get(*id).unwrap().visible).collect();
        assert_eq!(before, after);
    }
}
