/// Solar System: a 3D orrery with drag/pinch camera, speed controls,
/// click-to-inspect bodies and gated background music.
///
/// All view state lives on `SolarSystem`; `update` drains input, places the
/// camera and advances the scene by the frame's wall-clock Δt.

use glam::Vec2;
use orrery_engine::*;

use crate::animation;
use crate::audio::AudioGate;
use crate::bodies::Registry;
use crate::camera::CameraController;
use crate::controls::{OrbitVisibility, SpeedFactor};
use crate::picking::{self, TapTracker};
use crate::scene::{self, SceneHandles};

// ── Custom event kinds from page controls ────────────────────────────

pub const CUSTOM_ZOOM_IN: u32 = 1;
pub const CUSTOM_ZOOM_OUT: u32 = 2;
pub const CUSTOM_RESET_VIEW: u32 = 3;
pub const CUSTOM_SPEED_SLOWER: u32 = 4;
pub const CUSTOM_SPEED_RESET: u32 = 5;
pub const CUSTOM_SPEED_FASTER: u32 = 6;
pub const CUSTOM_TOGGLE_ORBITS: u32 = 7;
pub const CUSTOM_TOGGLE_MUTE: u32 = 8;

// ── Keys ─────────────────────────────────────────────────────────────

/// Space toggles pause.
const KEY_PAUSE: u32 = 32;

// ── Config ───────────────────────────────────────────────────────────

/// 5000 stars + 2000 asteroids + 500 meteoroids.
const MAX_POINTS: usize = 7500;

pub struct SolarSystem {
    registry: Registry,
    handles: Option<SceneHandles>,
    camera: CameraController,
    speed: SpeedFactor,
    orbits: OrbitVisibility,
    taps: TapTracker,
    audio: AudioGate,
    paused: bool,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            registry: Registry::load().expect("Failed to load body registry"),
            handles: None,
            camera: CameraController::new(),
            speed: SpeedFactor::default(),
            orbits: OrbitVisibility::new(),
            taps: TapTracker::default(),
            audio: AudioGate::new(),
            paused: false,
        }
    }

    pub fn speed(&self) -> SpeedFactor {
        self.speed
    }

    pub fn orbits_visible(&self) -> bool {
        self.orbits.visible()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn audio(&self) -> &AudioGate {
        &self.audio
    }

    pub fn handles(&self) -> Option<&SceneHandles> {
        self.handles.as_ref()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Pick at `screen` and show or hide the panel.
    fn pick_at(&self, ctx: &mut EngineContext, screen: Vec2) {
        let target = picking::pick(ctx, screen);
        log::debug!("pick at {screen}: {target:?}");
        ctx.emit(picking::panel_command(&self.registry, target));
    }

    /// Handle custom events from page buttons.
    fn handle_control(&mut self, ctx: &mut EngineContext, kind: u32) {
        if kind == CUSTOM_TOGGLE_MUTE {
            self.audio.toggle_mute(ctx);
            return;
        }
        self.audio.on_gesture(ctx);
        match kind {
            CUSTOM_ZOOM_IN => self.camera.zoom_in(),
            CUSTOM_ZOOM_OUT => self.camera.zoom_out(),
            CUSTOM_RESET_VIEW => self.camera.reset(),
            CUSTOM_SPEED_SLOWER => self.speed.slower(),
            CUSTOM_SPEED_RESET => self.speed.reset(),
            CUSTOM_SPEED_FASTER => self.speed.faster(),
            CUSTOM_TOGGLE_ORBITS => {
                if let Some(handles) = &self.handles {
                    self.orbits.toggle(&mut ctx.scene, &handles.orbits);
                }
            }
            other => log::warn!("solar-system: unknown control kind {other}"),
        }
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.camera.pointer_down(Vec2::new(*x, *y)),
            InputEvent::PointerMove { x, y } => self.camera.pointer_move(Vec2::new(*x, *y)),
            InputEvent::PointerUp { .. } => self.camera.pointer_up(),
            InputEvent::Click { x, y } => self.pick_at(ctx, Vec2::new(*x, *y)),
            InputEvent::TouchStart { touches } => {
                self.camera.touch_start(touches);
                self.taps.touch_start(touches);
            }
            InputEvent::TouchMove { touches } => self.camera.touch_move(touches),
            InputEvent::TouchEnd { changed, .. } => {
                self.camera.touch_end();
                if let Some(pos) = self.taps.touch_end(*changed) {
                    self.pick_at(ctx, pos);
                }
            }
            InputEvent::Wheel { delta_y } => self.camera.wheel(*delta_y),
            InputEvent::KeyDown { key_code } => {
                if *key_code == KEY_PAUSE {
                    self.paused = !self.paused;
                    log::info!("solar-system: {}", if self.paused { "paused" } else { "resumed" });
                }
            }
            InputEvent::UserGesture => self.audio.on_gesture(ctx),
            InputEvent::AudioSettled { played } => self.audio.on_settled(ctx, *played),
            InputEvent::Custom { kind, .. } => self.handle_control(ctx, *kind),
            InputEvent::KeyUp { .. } | InputEvent::Resize { .. } => {}
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_points: MAX_POINTS,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.handles = Some(scene::build_scene(ctx, &self.registry));
        self.camera.apply(&mut ctx.camera);
        self.audio.start(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, time: FrameTime) {
        for event in input.iter() {
            self.handle_input(ctx, event);
        }

        self.camera.apply(&mut ctx.camera);

        let factor = if self.paused { 0.0 } else { self.speed.get() };
        if let Some(handles) = &self.handles {
            animation::tick(ctx, handles, &self.registry, factor, time);
        }
    }
}
