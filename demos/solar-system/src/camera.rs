//! Spherical orbit camera and the pointer/touch/wheel gestures that drive it.
//!
//! The controller is the only writer of the engine camera's eye position.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};
use orrery_engine::{Camera3D, Touches};

/// Spherical camera coordinates around the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Distance from the origin, within `[MIN_DISTANCE, MAX_DISTANCE]`.
    pub distance: f32,
    /// Rotation around the vertical axis (radians, unbounded).
    pub yaw: f32,
    /// Elevation above the orbital plane (radians, clamped to ±π/2).
    pub pitch: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            distance: Self::DEFAULT_DISTANCE,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl CameraState {
    pub const MIN_DISTANCE: f32 = 30.0;
    pub const MAX_DISTANCE: f32 = 300.0;
    pub const DEFAULT_DISTANCE: f32 = 120.0;
    /// Radians per dragged pixel.
    pub const ROTATE_SENSITIVITY: f32 = 0.01;
    /// Distance per wheel delta unit.
    pub const WHEEL_ZOOM: f32 = 0.1;
    /// Distance per zoom button press.
    pub const BUTTON_ZOOM_STEP: f32 = 15.0;

    /// Eye position for these coordinates.
    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.distance * Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch)
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }

    /// Move closer (negative) or farther (positive).
    pub fn zoom_by(&mut self, delta: f32) {
        self.set_distance(self.distance + delta);
    }

    /// Orbit by a pixel delta.
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw += delta.x * Self::ROTATE_SENSITIVITY;
        self.pitch = (self.pitch + delta.y * Self::ROTATE_SENSITIVITY).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Transient per-gesture state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    /// One pointer or finger rotating the view.
    Dragging { last: Vec2 },
    /// Two fingers zooming; distances are taken relative to the baseline.
    Pinching { baseline_span: f32, baseline_distance: f32 },
}

#[derive(Debug, Clone)]
pub struct CameraController {
    state: CameraState,
    gesture: Gesture,
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            state: CameraState::default(),
            gesture: Gesture::Idle,
        }
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    // ── Mouse ──────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.gesture = Gesture::Dragging { last: pos };
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if let Gesture::Dragging { last } = self.gesture {
            self.state.rotate(pos - last);
            self.gesture = Gesture::Dragging { last: pos };
        }
    }

    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    // ── Touch ──────────────────────────────────────────────────────

    /// One finger starts a drag; a second finger switches to pinching.
    pub fn touch_start(&mut self, touches: &Touches) {
        match (touches.count, touches.first(), touches.span()) {
            (1, Some(pos), _) => self.gesture = Gesture::Dragging { last: pos },
            (_, _, Some(span)) => {
                self.gesture = Gesture::Pinching {
                    baseline_span: span,
                    baseline_distance: self.state.distance,
                }
            }
            _ => {}
        }
    }

    pub fn touch_move(&mut self, touches: &Touches) {
        match self.gesture {
            Gesture::Dragging { .. } if touches.count == 1 => {
                if let Some(pos) = touches.first() {
                    self.pointer_move(pos);
                }
            }
            Gesture::Pinching { baseline_span, baseline_distance } => {
                if let Some(span) = touches.span().filter(|s| *s > 0.0) {
                    self.state.set_distance(baseline_distance * (baseline_span / span));
                }
            }
            // A second finger landed mid-drag without its own touchstart.
            Gesture::Dragging { .. } | Gesture::Idle if touches.count >= 2 => self.touch_start(touches),
            _ => {}
        }
    }

    pub fn touch_end(&mut self) {
        self.gesture = Gesture::Idle;
    }

    // ── Discrete actions ───────────────────────────────────────────

    /// Positive `delta_y` (scrolling down) moves away.
    pub fn wheel(&mut self, delta_y: f32) {
        self.state.zoom_by(delta_y * CameraState::WHEEL_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.state.zoom_by(-CameraState::BUTTON_ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.state.zoom_by(CameraState::BUTTON_ZOOM_STEP);
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Place the engine camera for the current state, looking at the origin.
    pub fn apply(&self, camera: &mut Camera3D) {
        camera.look_from(self.state.position());
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_range(d: f32) -> bool {
        (CameraState::MIN_DISTANCE..=CameraState::MAX_DISTANCE).contains(&d)
    }

    #[test]
    fn default_view() {
        let state = CameraState::default();
        assert_eq!((state.distance, state.yaw, state.pitch), (120.0, 0.0, 0.0));
        assert!((state.position() - Vec3::new(0.0, 0.0, 120.0)).length() < 1e-4);
    }

    #[test]
    fn position_is_spherical() {
        let state = CameraState { distance: 100.0, yaw: FRAC_PI_2, pitch: 0.0 };
        assert!((state.position() - Vec3::new(100.0, 0.0, 0.0)).length() < 1e-3);

        let state = CameraState { distance: 50.0, yaw: 0.7, pitch: FRAC_PI_2 };
        assert!((state.position() - Vec3::new(0.0, 50.0, 0.0)).length() < 1e-3);

        let state = CameraState { distance: 80.0, yaw: 2.1, pitch: -0.4 };
        assert!((state.position().length() - 80.0).abs() < 1e-3);
    }

    #[test]
    fn wheel_clamps_distance() {
        let mut cam = CameraController::new();
        for delta in [1e6, -1e6, 250.0, -3.0, 1e9, -1e9] {
            cam.wheel(delta);
            assert!(in_range(cam.state().distance), "distance {}", cam.state().distance);
        }
        cam.wheel(1e6);
        assert_eq!(cam.state().distance, CameraState::MAX_DISTANCE);
        cam.wheel(-1e6);
        assert_eq!(cam.state().distance, CameraState::MIN_DISTANCE);
    }

    #[test]
    fn wheel_step() {
        let mut cam = CameraController::new();
        cam.wheel(100.0);
        assert!((cam.state().distance - 130.0).abs() < 1e-4);
    }

    #[test]
    fn zoom_buttons_clamp() {
        let mut cam = CameraController::new();
        cam.zoom_in();
        assert_eq!(cam.state().distance, 105.0);
        for _ in 0..20 {
            cam.zoom_in();
        }
        assert_eq!(cam.state().distance, CameraState::MIN_DISTANCE);
        for _ in 0..40 {
            cam.zoom_out();
            assert!(in_range(cam.state().distance));
        }
        assert_eq!(cam.state().distance, CameraState::MAX_DISTANCE);
    }

    #[test]
    fn drag_rotates_and_clamps_pitch() {
        let mut cam = CameraController::new();
        cam.pointer_down(Vec2::new(100.0, 100.0));
        cam.pointer_move(Vec2::new(150.0, 120.0));
        let s = cam.state();
        assert!((s.yaw - 0.5).abs() < 1e-5);
        assert!((s.pitch - 0.2).abs() < 1e-5);

        for y in [10_000.0, -50_000.0, 3.0, 90_000.0] {
            cam.pointer_move(Vec2::new(150.0, y));
            let pitch = cam.state().pitch;
            assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&pitch), "pitch {pitch}");
        }
    }

    #[test]
    fn moves_without_drag_are_ignored() {
        let mut cam = CameraController::new();
        cam.pointer_move(Vec2::new(500.0, 500.0));
        assert_eq!(cam.state(), CameraState::default());

        cam.pointer_down(Vec2::ZERO);
        cam.pointer_up();
        cam.pointer_move(Vec2::new(500.0, 500.0));
        assert_eq!(cam.state(), CameraState::default());
        assert_eq!(cam.gesture(), Gesture::Idle);
    }

    #[test]
    fn pinch_scales_distance_from_baseline() {
        let mut cam = CameraController::new();
        cam.touch_start(&Touches::two(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)));
        assert!(matches!(cam.gesture(), Gesture::Pinching { .. }));

        // Fingers apart: zoom in.
        cam.touch_move(&Touches::two(Vec2::new(0.0, 0.0), Vec2::new(200.0, 0.0)));
        assert!((cam.state().distance - 60.0).abs() < 1e-4);

        // Back to the baseline span: back to the baseline distance.
        cam.touch_move(&Touches::two(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)));
        assert!((cam.state().distance - 120.0).abs() < 1e-4);
    }

    #[test]
    fn pinch_clamps_distance() {
        let mut cam = CameraController::new();
        cam.touch_start(&Touches::two(Vec2::ZERO, Vec2::new(100.0, 0.0)));
        for span in [1.0, 10_000.0, 0.001, 3.0, 1e7] {
            cam.touch_move(&Touches::two(Vec2::ZERO, Vec2::new(span, 0.0)));
            assert!(in_range(cam.state().distance));
        }
        // Degenerate span leaves the distance alone.
        let before = cam.state().distance;
        cam.touch_move(&Touches::two(Vec2::ZERO, Vec2::ZERO));
        assert_eq!(cam.state().distance, before);
    }

    #[test]
    fn second_finger_switches_drag_to_pinch() {
        let mut cam = CameraController::new();
        cam.touch_start(&Touches::one(Vec2::new(10.0, 10.0)));
        assert!(matches!(cam.gesture(), Gesture::Dragging { .. }));
        cam.touch_move(&Touches::one(Vec2::new(30.0, 10.0)));
        assert!((cam.state().yaw - 0.2).abs() < 1e-5);

        cam.touch_start(&Touches::two(Vec2::new(30.0, 10.0), Vec2::new(130.0, 10.0)));
        assert_eq!(
            cam.gesture(),
            Gesture::Pinching { baseline_span: 100.0, baseline_distance: 120.0 }
        );
        cam.touch_end();
        assert_eq!(cam.gesture(), Gesture::Idle);
    }

    #[test]
    fn reset_restores_defaults_from_anywhere() {
        let mut cam = CameraController::new();
        cam.pointer_down(Vec2::ZERO);
        cam.pointer_move(Vec2::new(-700.0, 4000.0));
        cam.wheel(900.0);
        cam.reset();
        assert_eq!(cam.state(), CameraState { distance: 120.0, yaw: 0.0, pitch: 0.0 });
    }

    #[test]
    fn apply_places_engine_camera() {
        let mut cam = CameraController::new();
        let mut engine_cam = Camera3D::default();
        cam.zoom_out();
        cam.apply(&mut engine_cam);
        assert!((engine_cam.eye() - Vec3::new(0.0, 0.0, 135.0)).length() < 1e-3);
        assert_eq!(engine_cam.target(), Vec3::ZERO);
    }
}
