//! Per-frame motion: revolutions, spins, the moon anchor, glow pulse and
//! decorative drifts. Everything scales with wall-clock Δt.

use glam::Vec3;
use orrery_engine::{EngineContext, EntityId, FrameTime};

use crate::bodies::{self, Registry};
use crate::scene::SceneHandles;

/// Ties authored angular speeds to elapsed seconds.
pub const ANGULAR_SCALE: f32 = 10.0;
/// Decorative rates are authored per frame at this rate.
const REFERENCE_FPS: f32 = 60.0;

const SUN_SPIN: f32 = 0.005;
const BELT_DRIFT: f32 = 0.001;
const METEOROID_DRIFT: f32 = 0.0005;

const GLOW_PULSE_AMPLITUDE: f32 = 0.1;
/// Scale of each glow layer relative to the shared pulse.
const GLOW_LAYER_RATIOS: [f32; 3] = [1.0, 0.95, 1.05];

/// Shared glow pulse at `elapsed` seconds.
pub fn glow_pulse(elapsed: f32) -> f32 {
    elapsed.sin() * GLOW_PULSE_AMPLITUDE + 1.0
}

/// Revolution or spin increment for an authored angular speed.
pub fn angular_step(speed: f32, factor: f32, dt: f32) -> f32 {
    speed * factor * dt * ANGULAR_SCALE
}

fn drift_step(rate: f32, factor: f32, dt: f32) -> f32 {
    rate * factor * dt * REFERENCE_FPS
}

fn rotate_y(ctx: &mut EngineContext, id: EntityId, delta: f32) {
    if let Some(entity) = ctx.scene.get_mut(id) {
        entity.rotation.y += delta;
    }
}

/// Advance the scene by one frame at speed factor `factor`.
pub fn tick(ctx: &mut EngineContext, handles: &SceneHandles, registry: &Registry, factor: f32, time: FrameTime) {
    let dt = time.dt;

    let pulse = glow_pulse(time.elapsed);
    for (id, ratio) in handles.glows.iter().zip(GLOW_LAYER_RATIOS) {
        if let Some(glow) = ctx.scene.get_mut(*id) {
            glow.scale = Vec3::splat(pulse * ratio);
        }
    }

    rotate_y(ctx, handles.sun, drift_step(SUN_SPIN, factor, dt));

    for body in &handles.bodies {
        let Some(desc) = registry.get(body.descriptor) else { continue };
        rotate_y(ctx, body.group, angular_step(desc.orbital_speed, factor, dt));
        rotate_y(ctx, body.mesh, angular_step(desc.rotation_speed, factor, dt));
    }

    // Groups were just rotated, so read Earth's position from the live locals.
    if let Some(earth) = handles.earth.and_then(|i| handles.bodies.get(i)) {
        let anchor = ctx.world_position(earth.mesh);
        if let Some(group) = ctx.scene.get_mut(handles.moon_group) {
            group.translation = anchor;
        }
    }
    rotate_y(ctx, handles.moon_group, angular_step(bodies::MOON_ORBITAL_SPEED, factor, dt));

    rotate_y(ctx, handles.belt, drift_step(BELT_DRIFT, factor, dt));
    if let Some(meteoroids) = ctx.scene.get_mut(handles.meteoroids) {
        let step = drift_step(METEOROID_DRIFT, factor, dt);
        meteoroids.rotation.x += step;
        meteoroids.rotation.y += step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::build_scene;

    fn setup() -> (EngineContext, Registry, SceneHandles) {
        let registry = Registry::load().unwrap();
        let mut ctx = EngineContext::new();
        let handles = build_scene(&mut ctx, &registry);
        (ctx, registry, handles)
    }

    fn frame(dt: f32, elapsed: f32) -> FrameTime {
        FrameTime { dt, elapsed }
    }

    fn group_rotation(ctx: &EngineContext, registry: &Registry, handles: &SceneHandles, key: &str) -> f32 {
        let (index, _) = registry.by_key(key).unwrap();
        let body = handles.body(index).unwrap();
        ctx.scene.get(body.group).unwrap().rotation.y
    }

    #[test]
    fn one_tick_advances_each_orbit_exactly() {
        let (mut ctx, registry, handles) = setup();
        let (dt, s) = (0.016, 2.25);
        let keys = ["mercury", "earth", "neptune"];
        let before: Vec<f32> = keys.iter().map(|k| group_rotation(&ctx, &registry, &handles, k)).collect();

        tick(&mut ctx, &handles, &registry, s, frame(dt, 1.0));

        for (key, start) in keys.iter().zip(before) {
            let speed = registry.by_key(key).unwrap().1.orbital_speed;
            let delta = group_rotation(&ctx, &registry, &handles, key) - start;
            let expected = speed * s * dt * 10.0;
            assert!((delta - expected).abs() < 1e-7, "{key}: {delta} vs {expected}");
        }
    }

    #[test]
    fn spin_uses_rotation_speed() {
        let (mut ctx, registry, handles) = setup();
        let (index, jupiter) = registry.by_key("jupiter").unwrap();
        let mesh = handles.body(index).unwrap().mesh;
        tick(&mut ctx, &handles, &registry, 1.0, frame(0.5, 0.5));
        let spin = ctx.scene.get(mesh).unwrap().rotation.y;
        assert!((spin - jupiter.rotation_speed * 5.0).abs() < 1e-6);
        // Tilt is untouched by animation.
        assert!((ctx.scene.get(mesh).unwrap().rotation.x - jupiter.axial_tilt()).abs() < 1e-6);
    }

    #[test]
    fn zero_dt_changes_nothing_but_the_pulse() {
        let (mut ctx, registry, handles) = setup();
        tick(&mut ctx, &handles, &registry, 3.0, frame(0.0, 0.0));
        for body in &handles.bodies {
            assert_eq!(ctx.scene.get(body.group).unwrap().rotation.y, 0.0);
        }
        assert_eq!(ctx.scene.get(handles.belt).unwrap().rotation, Vec3::ZERO);
    }

    #[test]
    fn moon_follows_earth() {
        let (mut ctx, registry, handles) = setup();
        for i in 1..=30 {
            tick(&mut ctx, &handles, &registry, 10.0, frame(0.1, i as f32 * 0.1));
        }
        ctx.propagate_transforms();

        let earth = handles.bodies[handles.earth.unwrap()];
        let earth_pos = ctx.scene.get(earth.mesh).unwrap().world_position();
        let moon_pos = ctx.scene.get(handles.moon).unwrap().world_position();
        assert!(
            ((moon_pos - earth_pos).length() - bodies::MOON_OFFSET).abs() < 1e-3,
            "moon {moon_pos} earth {earth_pos}"
        );
        // Earth has left its starting point.
        assert!((earth_pos - Vec3::new(40.0, 0.0, 0.0)).length() > 1.0);
    }

    #[test]
    fn glow_layers_share_one_pulse() {
        let (mut ctx, registry, handles) = setup();
        let t: f32 = 1.3;
        tick(&mut ctx, &handles, &registry, 1.0, frame(0.016, t));
        let p = t.sin() * 0.1 + 1.0;
        let scales: Vec<f32> = handles.glows.iter().map(|id| ctx.scene.get(*id).unwrap().scale.x).collect();
        assert!((scales[0] - p).abs() < 1e-6);
        assert!((scales[1] - 0.95 * p).abs() < 1e-6);
        assert!((scales[2] - 1.05 * p).abs() < 1e-6);
    }

    #[test]
    fn decorative_drift_is_frame_rate_independent() {
        let (mut a, registry, handles) = setup();
        let (mut b, _, _) = setup();
        tick(&mut a, &handles, &registry, 1.0, frame(1.0 / 30.0, 0.0));
        for _ in 0..2 {
            tick(&mut b, &handles, &registry, 1.0, frame(1.0 / 60.0, 0.0));
        }
        let ya = a.scene.get(handles.belt).unwrap().rotation.y;
        let yb = b.scene.get(handles.belt).unwrap().rotation.y;
        assert!((ya - yb).abs() < 1e-7);
        assert!((ya - 0.002).abs() < 1e-6);
    }
}
