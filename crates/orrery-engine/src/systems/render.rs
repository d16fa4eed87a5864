use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Vec2, Vec3};
use crate::components::entity::Entity;
use crate::components::mesh::{MeshComponent, MeshShape};
use crate::core::scene::Scene;
use crate::renderer::camera::Camera3D;
use crate::renderer::instance::{AnnulusRun, PathRun, PointInstance, RenderBuffer, SphereInstance};
use crate::systems::lighting::LightState;

/// Vertices per half-ring arc, both ends included.
const RING_ARC_SAMPLES: usize = 33;
/// Smallest point size drawn, in CSS pixels.
const MIN_POINT_SIZE: f32 = 0.5;

/// Build the render buffer from world matrices as of the last propagation.
///
/// Projects every visible entity through `camera`, shades lit spheres from
/// `lights`, and sorts solids back-to-front (painter's algorithm). Anything
/// behind the near plane or off-screen is dropped.
pub fn build_render_buffer(
    scene: &Scene,
    camera: &Camera3D,
    lights: &LightState,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    for entity in scene.iter() {
        if !entity.visible {
            continue;
        }
        if let Some(mesh) = &entity.mesh {
            match mesh.shape {
                MeshShape::Sphere { radius } => push_sphere(entity, mesh, radius, camera, lights, buffer),
                MeshShape::Ring { inner, outer } => push_annulus(entity, mesh, inner, outer, camera, buffer),
            }
        }
        push_points(entity, camera, buffer);
        push_path(entity, camera, buffer);
    }

    // Descending order: farther solids rendered first
    buffer.spheres.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    buffer.annuli.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}

fn on_screen(pos: Vec2, margin: f32, viewport: Vec2) -> bool {
    pos.x >= -margin && pos.y >= -margin && pos.x <= viewport.x + margin && pos.y <= viewport.y + margin
}

fn push_sphere(
    entity: &Entity,
    mesh: &MeshComponent,
    radius: f32,
    camera: &Camera3D,
    lights: &LightState,
    buffer: &mut RenderBuffer,
) {
    let center = entity.world_position();
    let world_radius = radius * entity.world_scale();
    let Some(proj) = camera.project(center) else { return };
    let screen_radius = world_radius * proj.scale;
    if !on_screen(proj.pos, screen_radius, camera.viewport()) {
        return;
    }

    let mut light_offset = Vec2::ZERO;
    let mut lit = 0.0;
    let floor = lights.ambient_level().max(mesh.emissive).min(1.0);

    if mesh.emissive < 1.0 {
        if let Some(shade) = lights.shade_at(center) {
            // Highlight sits where the light-facing pole lands on screen.
            let pole = center + shade.toward_light * world_radius;
            if let Some(pole_proj) = camera.project(pole) {
                if screen_radius > 0.0 {
                    light_offset = ((pole_proj.pos - proj.pos) / screen_radius).clamp_length_max(1.0);
                }
            }
            let toward_camera = (camera.eye() - center).normalize_or_zero();
            let facing = 0.5 + 0.5 * shade.toward_light.dot(toward_camera);
            lit = shade.diffuse * facing;
        }
    }

    buffer.spheres.push(SphereInstance {
        x: proj.pos.x,
        y: proj.pos.y,
        radius: screen_radius,
        depth: proj.depth,
        r: mesh.color.r,
        g: mesh.color.g,
        b: mesh.color.b,
        alpha: mesh.opacity,
        light_dx: light_offset.x,
        light_dy: light_offset.y,
        lit,
        floor,
    });
}

/// Half-ring arc of `radius` in the entity's local XY plane, starting at
/// angle `from` and sweeping half a turn.
fn ring_arc(entity: &Entity, radius: f32, from: f32, camera: &Camera3D) -> Option<Vec<Vec2>> {
    (0..RING_ARC_SAMPLES)
        .map(|i| {
            let theta = from + i as f32 / (RING_ARC_SAMPLES - 1) as f32 * PI;
            let local = Vec3::new(theta.cos() * radius, theta.sin() * radius, 0.0);
            camera.project(entity.world.transform_point3(local)).map(|p| p.pos)
        })
        .collect()
}

fn push_annulus(
    entity: &Entity,
    mesh: &MeshComponent,
    inner: f32,
    outer: f32,
    camera: &Camera3D,
    buffer: &mut RenderBuffer,
) {
    // The far half is centered on the in-plane direction pointing away from the eye.
    let eye_local = entity.world.inverse().transform_point3(camera.eye());
    let away = -eye_local.truncate();
    let far_mid = if away.length_squared() > 1e-8 { away.y.atan2(away.x) } else { 0.0 };
    let mid_radius = 0.5 * (inner + outer);

    for mid in [far_mid, far_mid + PI] {
        let anchor = Vec3::new(mid.cos() * mid_radius, mid.sin() * mid_radius, 0.0);
        let Some(anchor) = camera.project(entity.world.transform_point3(anchor)) else { continue };
        let Some(outer_arc) = ring_arc(entity, outer, mid - FRAC_PI_2, camera) else { continue };
        let Some(inner_arc) = ring_arc(entity, inner, mid - FRAC_PI_2, camera) else { continue };

        let outer_start = buffer.vertices.len() as u32;
        buffer.vertices.extend_from_slice(&outer_arc);
        let inner_start = buffer.vertices.len() as u32;
        buffer.vertices.extend_from_slice(&inner_arc);

        buffer.annuli.push(AnnulusRun {
            depth: anchor.depth,
            outer_start,
            inner_start,
            samples: RING_ARC_SAMPLES as u32,
            color: mesh.color,
            alpha: mesh.opacity,
        });
    }
}

fn push_points(entity: &Entity, camera: &Camera3D, buffer: &mut RenderBuffer) {
    let Some(cloud) = &entity.points else { return };
    let viewport = camera.viewport();
    let half_height = viewport.y * 0.5;

    for &local in &cloud.positions {
        let Some(proj) = camera.project(entity.world.transform_point3(local)) else { continue };
        let size = (cloud.size * half_height / proj.depth).max(MIN_POINT_SIZE);
        if !on_screen(proj.pos, size, viewport) {
            continue;
        }
        buffer.points.push(PointInstance::new(proj.pos, size, cloud.color, 1.0));
    }
}

fn push_path(entity: &Entity, camera: &Camera3D, buffer: &mut RenderBuffer) {
    let Some(path) = &entity.path else { return };
    let mut start = buffer.vertices.len();

    // A vertex that fails to project splits the polyline into separate runs.
    let close_run = |buffer: &mut RenderBuffer, start: usize| {
        let len = buffer.vertices.len() - start;
        if len >= 2 {
            buffer.paths.push(PathRun {
                start: start as u32,
                len: len as u32,
                color: path.color,
                alpha: path.opacity,
            });
        } else {
            buffer.vertices.truncate(start);
        }
    };

    for &local in &path.vertices {
        match camera.project(entity.world.transform_point3(local)) {
            Some(p) => buffer.vertices.push(p.pos),
            None => {
                close_run(buffer, start);
                start = buffer.vertices.len();
            }
        }
    }
    close_run(buffer, start);
}
