/// Scene construction: turns the registry into entities once at startup.
///
/// Layout per orbiting body: an orbit group at the origin whose Y rotation is
/// the revolution, holding the body mesh at `(distance, 0, 0)` tilted about X,
/// optionally holding a ring. The moon gets its own group that the animation
/// tick keeps on top of Earth.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;
use orrery_engine::*;

use crate::bodies::{self, Registry};
use crate::picking::PickTarget;

// ── Sun ──────────────────────────────────────────────────────────────

/// Glow layer radii as multiples of the sun radius, with their colors.
const GLOW_LAYERS: [(f32, u32); 3] = [(1.2, 0xffdd00), (1.5, 0xffaa00), (2.0, 0xff7700)];
const GLOW_OPACITY: f32 = 0.15;

// ── Lighting ─────────────────────────────────────────────────────────

const SUN_LIGHT_INTENSITY: f32 = 2.0;
const SUN_LIGHT_RANGE: f32 = 300.0;
const AMBIENT: u32 = 0x333333;

// ── Orbits ───────────────────────────────────────────────────────────

const ORBIT_SEGMENTS: usize = 128;
const ORBIT_COLOR: u32 = 0x444444;

// ── Point clouds ─────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 5000;
const STAR_FIELD_SIDE: f32 = 1000.0;
const STAR_SIZE: f32 = 0.7;

pub const ASTEROID_COUNT: usize = 2000;
const BELT_INNER: f32 = 65.0;
const BELT_OUTER: f32 = 80.0;
const BELT_HALF_HEIGHT: f32 = 1.5;
const ASTEROID_COLOR: u32 = 0x888888;
const ASTEROID_SIZE: f32 = 0.3;

pub const METEOROID_COUNT: usize = 500;
const METEOROID_FIELD_SIDE: f32 = 100.0;
const METEOROID_COLOR: u32 = 0xcccccc;
const METEOROID_SIZE: f32 = 0.2;

/// Runtime pairing of a registry entry with its entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyInstance {
    /// Registry index.
    pub descriptor: usize,
    /// Orbit group; its Y rotation is the revolution.
    pub group: EntityId,
    /// Body mesh; its Y rotation is the spin.
    pub mesh: EntityId,
}

/// Entity ids the animation tick and the controls write to.
#[derive(Debug, Clone)]
pub struct SceneHandles {
    pub sun: EntityId,
    /// Glow layers, innermost first.
    pub glows: [EntityId; 3],
    pub bodies: Vec<BodyInstance>,
    /// Orbit path lines, one per body.
    pub orbits: Vec<EntityId>,
    /// Index into `bodies` of the moon's anchor.
    pub earth: Option<usize>,
    pub moon_group: EntityId,
    pub moon: EntityId,
    pub stars: EntityId,
    pub belt: EntityId,
    pub meteoroids: EntityId,
}

impl SceneHandles {
    /// The instance for registry entry `descriptor`, if it orbits.
    pub fn body(&self, descriptor: usize) -> Option<&BodyInstance> {
        self.bodies.iter().find(|b| b.descriptor == descriptor)
    }
}

/// Populate `ctx` from `registry`. Calling this twice duplicates the scene.
pub fn build_scene(ctx: &mut EngineContext, registry: &Registry) -> SceneHandles {
    ctx.lights.add(PointLight::new(
        Vec3::ZERO,
        Color::WHITE,
        SUN_LIGHT_INTENSITY,
        SUN_LIGHT_RANGE,
    ));
    ctx.lights.set_ambient(Color::from_hex(AMBIENT));

    let (sun, glows) = spawn_sun(ctx, registry);

    let mut instances = Vec::with_capacity(registry.len());
    let mut orbits = Vec::with_capacity(registry.len());
    let mut earth = None;
    for (index, desc) in registry.planets() {
        let group = ctx.next_id();
        ctx.spawn(Entity::new(group));

        let mesh = ctx.next_id();
        ctx.spawn_child(
            Entity::new(mesh)
                .with_translation(Vec3::new(desc.orbital_distance, 0.0, 0.0))
                .with_rotation(Vec3::new(desc.axial_tilt(), 0.0, 0.0))
                .with_mesh(MeshComponent::sphere(desc.radius, desc.color))
                .with_pick_tag(PickTarget::Body(index).tag()),
            group,
        );

        if let Some(ring) = &desc.ring {
            let id = ctx.next_id();
            ctx.spawn_child(
                Entity::new(id)
                    .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
                    .with_mesh(
                        MeshComponent::ring(desc.radius * ring.inner, desc.radius * ring.outer, ring.color)
                            .with_opacity(ring.opacity)
                            .with_emissive(1.0),
                    ),
                mesh,
            );
        }

        let orbit = ctx.next_id();
        ctx.spawn(Entity::new(orbit).with_path(PathComponent::circle_xz(
            desc.orbital_distance,
            ORBIT_SEGMENTS,
            Color::from_hex(ORBIT_COLOR),
        )));
        orbits.push(orbit);

        if desc.key == "earth" {
            earth = Some(instances.len());
        }
        instances.push(BodyInstance { descriptor: index, group, mesh });
    }

    let moon_group = ctx.next_id();
    ctx.spawn(Entity::new(moon_group));
    let moon = ctx.next_id();
    ctx.spawn_child(
        Entity::new(moon)
            .with_translation(Vec3::new(bodies::MOON_OFFSET, 0.0, 0.0))
            .with_mesh(MeshComponent::sphere(bodies::MOON_RADIUS, Color::from_hex(bodies::MOON_COLOR)))
            .with_pick_tag(PickTarget::Moon.tag()),
        moon_group,
    );
    if earth.is_none() {
        log::warn!("scene: registry has no earth; the moon stays at the origin");
    }

    let star_field = star_positions(&mut ctx.rng);
    let stars = spawn_cloud(ctx, star_field, 0xffffff, STAR_SIZE);
    let belt_field = belt_positions(&mut ctx.rng);
    let belt = spawn_cloud(ctx, belt_field, ASTEROID_COLOR, ASTEROID_SIZE);
    let meteoroid_field = meteoroid_positions(&mut ctx.rng);
    let meteoroids = spawn_cloud(ctx, meteoroid_field, METEOROID_COLOR, METEOROID_SIZE);

    log::debug!(
        "scene: {} bodies, {} orbits, {} entities",
        instances.len(),
        orbits.len(),
        ctx.scene.len()
    );

    SceneHandles {
        sun,
        glows,
        bodies: instances,
        orbits,
        earth,
        moon_group,
        moon,
        stars,
        belt,
        meteoroids,
    }
}

/// Sun core plus glow layers. Glows are spawned first so that, at equal
/// depth, the core draws over them.
fn spawn_sun(ctx: &mut EngineContext, registry: &Registry) -> (EntityId, [EntityId; 3]) {
    let desc = registry.sun();

    let glows = GLOW_LAYERS.map(|(ratio, hex)| {
        let id = ctx.next_id();
        ctx.spawn(
            Entity::new(id).with_mesh(
                MeshComponent::sphere(desc.radius * ratio, Color::from_hex(hex))
                    .with_opacity(GLOW_OPACITY)
                    .with_emissive(1.0),
            ),
        )
    });

    let sun = ctx.next_id();
    ctx.spawn(
        Entity::new(sun)
            .with_mesh(MeshComponent::sphere(desc.radius, desc.color).with_emissive(1.0))
            .with_pick_tag(PickTarget::Body(registry.sun_index()).tag()),
    );
    (sun, glows)
}

fn spawn_cloud(ctx: &mut EngineContext, positions: Vec<Vec3>, hex: u32, size: f32) -> EntityId {
    let id = ctx.next_id();
    ctx.spawn(Entity::new(id).with_points(PointCloud::new(positions, Color::from_hex(hex), size)))
}

/// Uniform in a cube centered on the origin.
fn star_positions(rng: &mut Rng) -> Vec<Vec3> {
    cube_positions(rng, STAR_COUNT, STAR_FIELD_SIDE)
}

fn meteoroid_positions(rng: &mut Rng) -> Vec<Vec3> {
    cube_positions(rng, METEOROID_COUNT, METEOROID_FIELD_SIDE)
}

fn cube_positions(rng: &mut Rng, count: usize, side: f32) -> Vec<Vec3> {
    let half = side * 0.5;
    (0..count)
        .map(|_| Vec3::new(rng.centered(half), rng.centered(half), rng.centered(half)))
        .collect()
}

/// Annulus in the orbital plane with a little vertical jitter.
fn belt_positions(rng: &mut Rng) -> Vec<Vec3> {
    (0..ASTEROID_COUNT)
        .map(|_| {
            let angle = rng.range(0.0, TAU);
            let distance = rng.range(BELT_INNER, BELT_OUTER);
            let height = rng.centered(BELT_HALF_HEIGHT);
            Vec3::new(angle.cos() * distance, height, angle.sin() * distance)
        })
        .collect()
}
