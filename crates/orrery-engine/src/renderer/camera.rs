use glam::{Mat4, Vec2, Vec3};
use crate::api::game::GameConfig;
use crate::systems::picking::Ray;

/// Projection result from 3D world space to 2D screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Screen position in CSS pixels, origin top-left, Y down.
    pub pos: Vec2,
    /// Distance in front of the camera along the view axis.
    pub depth: f32,
    /// Pixels per world unit at this depth.
    pub scale: f32,
}

/// Perspective camera looking from `eye` toward `target`.
///
/// Callers position the camera with `look_from`; the camera itself holds no
/// orbit state.
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    viewport: Vec2,
    eye: Vec3,
    target: Vec3,
}

impl Camera3D {
    pub fn new(fov_y_degrees: f32, near: f32, far: f32, width: f32, height: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            near,
            far,
            viewport: Vec2::new(width.max(1.0), height.max(1.0)),
            eye: Vec3::new(0.0, 0.0, 100.0),
            target: Vec3::ZERO,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.fov_y_degrees,
            config.near,
            config.far,
            config.viewport[0],
            config.viewport[1],
        )
    }

    /// Resize the viewport (CSS pixels). Zero sizes are clamped to one pixel.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    /// Place the camera at `eye`, looking at the world origin.
    pub fn look_from(&mut self, eye: Vec3) {
        self.eye = eye;
        self.target = Vec3::ZERO;
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Up vector for the view basis. Falls back to the horizontal forward
    /// direction when looking straight up or down, where world Y is degenerate.
    fn up(&self) -> Vec3 {
        let forward = (self.target - self.eye).normalize_or_zero();
        if forward.cross(Vec3::Y).length_squared() > 1e-8 {
            Vec3::Y
        } else if forward.y < 0.0 {
            Vec3::NEG_Z
        } else {
            Vec3::Z
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up())
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Pixels per world unit at unit depth.
    pub fn focal_length(&self) -> f32 {
        (self.viewport.y * 0.5) / (self.fov_y * 0.5).tan()
    }

    /// Project a world position to screen space.
    /// Returns `None` for points closer than the near plane (including behind the camera).
    pub fn project(&self, world: Vec3) -> Option<Projection> {
        let view = self.view_matrix().transform_point3(world);
        let depth = -view.z;
        if depth < self.near || depth > self.far {
            return None;
        }
        let scale = self.focal_length() / depth;
        Some(Projection {
            pos: Vec2::new(
                self.viewport.x * 0.5 + view.x * scale,
                self.viewport.y * 0.5 - view.y * scale,
            ),
            depth,
            scale,
        })
    }

    /// Convert a screen position (CSS pixels) to normalized device coordinates
    /// in [-1, 1], Y up.
    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.viewport.x * 2.0 - 1.0,
            -(screen.y / self.viewport.y * 2.0 - 1.0),
        )
    }

    /// World-space ray from the eye through an NDC position.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let half_h = (self.fov_y * 0.5).tan();
        let view_dir = Vec3::new(ndc.x * half_h * self.aspect(), ndc.y * half_h, -1.0);
        let world_dir = self.view_matrix().inverse().transform_vector3(view_dir);
        Ray::new(self.eye, world_dir)
    }

    /// World-space ray from the eye through a screen position.
    pub fn ray_from_screen(&self, screen: Vec2) -> Ray {
        self.ray_from_ndc(self.screen_to_ndc(screen))
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(eye: Vec3) -> Camera3D {
        let mut cam = Camera3D::new(60.0, 0.1, 1000.0, 800.0, 600.0);
        cam.look_from(eye);
        cam
    }

    #[test]
    fn origin_projects_to_viewport_center() {
        let cam = camera_at(Vec3::new(0.0, 0.0, 120.0));
        let p = cam.project(Vec3::ZERO).unwrap();
        assert!((p.pos - Vec2::new(400.0, 300.0)).length() < 1e-3, "pos={}", p.pos);
        assert!((p.depth - 120.0).abs() < 1e-3);
    }

    #[test]
    fn points_behind_camera_do_not_project() {
        let cam = camera_at(Vec3::new(0.0, 0.0, 120.0));
        assert!(cam.project(Vec3::new(0.0, 0.0, 200.0)).is_none());
    }

    #[test]
    fn screen_y_grows_downward() {
        let cam = camera_at(Vec3::new(0.0, 0.0, 120.0));
        let above = cam.project(Vec3::new(0.0, 10.0, 0.0)).unwrap();
        let right = cam.project(Vec3::new(10.0, 0.0, 0.0)).unwrap();
        assert!(above.pos.y < 300.0);
        assert!(right.pos.x > 400.0);
    }

    #[test]
    fn closer_objects_scale_larger() {
        let cam = camera_at(Vec3::new(0.0, 0.0, 120.0));
        let near = cam.project(Vec3::new(0.0, 0.0, 50.0)).unwrap();
        let far = cam.project(Vec3::new(0.0, 0.0, -50.0)).unwrap();
        assert!(near.scale > far.scale);
    }

    #[test]
    fn screen_to_ndc_corners() {
        let cam = camera_at(Vec3::new(0.0, 0.0, 120.0));
        assert_eq!(cam.screen_to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(cam.screen_to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(cam.screen_to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = camera_at(Vec3::new(30.0, 40.0, 120.0));
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        let expected = (Vec3::ZERO - cam.eye()).normalize();
        assert!((ray.direction - expected).length() < 1e-4, "dir={}", ray.direction);
    }

    #[test]
    fn ray_passes_through_projected_point() {
        let cam = camera_at(Vec3::new(50.0, 20.0, 100.0));
        let world = Vec3::new(12.0, -3.0, 8.0);
        let p = cam.project(world).unwrap();
        let ray = cam.ray_from_screen(p.pos);
        let to_point = (world - ray.origin).normalize();
        assert!((ray.direction - to_point).length() < 1e-3);
    }

    #[test]
    fn straight_down_view_is_not_degenerate() {
        let cam = camera_at(Vec3::new(0.0, 120.0, 0.0));
        let p = cam.project(Vec3::ZERO).unwrap();
        assert!(p.pos.is_finite());
        assert!((p.pos - Vec2::new(400.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn resize_changes_aspect() {
        let mut cam = camera_at(Vec3::new(0.0, 0.0, 120.0));
        cam.resize(1920.0, 1080.0);
        assert!((cam.aspect() - 1920.0 / 1080.0).abs() < 1e-5);
        cam.resize(0.0, 0.0);
        assert_eq!(cam.viewport(), Vec2::ONE);
    }
}
