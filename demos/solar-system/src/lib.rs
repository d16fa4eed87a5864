use wasm_bindgen::prelude::*;

pub mod animation;
pub mod audio;
pub mod bodies;
pub mod camera;
pub mod controls;
pub mod game;
pub mod picking;
pub mod scene;

use game::*;
use orrery_web::{ControlBinding, HostConfig};

/// Page buttons and the custom events they raise.
const CONTROLS: [ControlBinding; 8] = [
    ControlBinding::new("zoom-in", CUSTOM_ZOOM_IN),
    ControlBinding::new("zoom-out", CUSTOM_ZOOM_OUT),
    ControlBinding::new("reset-view", CUSTOM_RESET_VIEW),
    ControlBinding::new("speed-slower", CUSTOM_SPEED_SLOWER),
    ControlBinding::new("speed-reset", CUSTOM_SPEED_RESET),
    ControlBinding::new("speed-faster", CUSTOM_SPEED_FASTER),
    ControlBinding::new("toggle-orbits", CUSTOM_TOGGLE_ORBITS),
    ControlBinding::new("mute-toggle", CUSTOM_TOGGLE_MUTE),
];

pub fn host_config() -> HostConfig {
    HostConfig::default().with_controls(&CONTROLS)
}

orrery_web::export_game!(SolarSystem, "solar-system", host_config());
