//! Click/tap picking and the info card for the picked body.

use glam::Vec2;
use orrery_engine::{raycast, EngineContext, HostCommand, Touches};

use crate::bodies::{self, Registry};

/// Maximum movement on either axis, in CSS pixels, for a touch to count as a tap.
pub const TAP_THRESHOLD: f32 = 10.0;

/// Tag reserved for the moon; registry indices use the low range.
const MOON_TAG: u32 = u32::MAX;

/// What a pick tag points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    /// A registry entry (the sun or a planet).
    Body(usize),
    Moon,
}

impl PickTarget {
    pub fn tag(self) -> u32 {
        match self {
            PickTarget::Body(index) => index as u32,
            PickTarget::Moon => MOON_TAG,
        }
    }

    pub fn from_tag(tag: u32) -> Self {
        match tag {
            MOON_TAG => PickTarget::Moon,
            index => PickTarget::Body(index as usize),
        }
    }
}

/// Separates stationary taps from drags and pinches.
#[derive(Debug, Clone, Copy, Default)]
pub struct TapTracker {
    start: Option<Vec2>,
}

impl TapTracker {
    /// Arm on a single-finger start; anything else cancels.
    pub fn touch_start(&mut self, touches: &Touches) {
        self.start = match touches.count {
            1 => touches.first(),
            _ => None,
        };
    }

    /// The tap position if the touch that just ended stayed put.
    pub fn touch_end(&mut self, end: Vec2) -> Option<Vec2> {
        let start = self.start.take()?;
        let moved = (end - start).abs();
        (moved.x < TAP_THRESHOLD && moved.y < TAP_THRESHOLD).then_some(end)
    }
}

/// Ray-cast from the camera through `screen` against pickable bodies.
pub fn pick(ctx: &EngineContext, screen: Vec2) -> Option<PickTarget> {
    let ray = ctx.camera.ray_from_screen(screen);
    raycast(&ctx.scene, &ray).map(|hit| PickTarget::from_tag(hit.tag))
}

/// Title and ordered facts for `target`.
pub fn info_card(registry: &Registry, target: PickTarget) -> Option<(String, Vec<(String, String)>)> {
    match target {
        PickTarget::Body(index) => {
            let desc = registry.get(index)?;
            Some((desc.title.clone(), desc.facts.clone()))
        }
        PickTarget::Moon => Some((
            bodies::MOON_TITLE.to_string(),
            bodies::MOON_FACTS
                .iter()
                .map(|(label, text)| (label.to_string(), text.to_string()))
                .collect(),
        )),
    }
}

/// Panel command for a pick result: show the card, or hide on a miss.
pub fn panel_command(registry: &Registry, target: Option<PickTarget>) -> HostCommand {
    match target.and_then(|t| info_card(registry, t)) {
        Some((title, rows)) => HostCommand::ShowPanel { title, rows },
        None => HostCommand::HidePanel,
    }
}
