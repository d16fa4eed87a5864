//! Background-music gate under browser autoplay policy.
//!
//! Playback is attempted at load. If the browser blocks it, the first user
//! gesture anywhere on the page gets exactly one more attempt. The mute
//! control toggles play/pause on its own and does not count as that gesture.

use orrery_engine::{EngineContext, HostCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    /// Not playing because the browser has not allowed it yet.
    Blocked,
    Playing,
    /// Paused by the user.
    Muted,
}

#[derive(Debug, Clone)]
pub struct AudioGate {
    state: AudioState,
    /// The one-shot retry on the first gesture is still available.
    retry_armed: bool,
}

impl AudioGate {
    pub fn new() -> Self {
        Self {
            state: AudioState::Blocked,
            retry_armed: true,
        }
    }

    pub fn state(&self) -> AudioState {
        self.state
    }

    pub fn retry_armed(&self) -> bool {
        self.retry_armed
    }

    /// Show the muted indicator and make the load-time attempt.
    pub fn start(&mut self, ctx: &mut EngineContext) {
        ctx.emit(HostCommand::SetMuteIndicator { muted: true });
        ctx.emit(HostCommand::PlayAudio);
    }

    /// A page-level click, key or touch. Only the first one can trigger a retry.
    pub fn on_gesture(&mut self, ctx: &mut EngineContext) {
        if !self.retry_armed {
            return;
        }
        self.retry_armed = false;
        if self.state != AudioState::Playing {
            ctx.emit(HostCommand::PlayAudio);
        }
    }

    /// The mute control: pause when playing, otherwise try to play.
    pub fn toggle_mute(&mut self, ctx: &mut EngineContext) {
        match self.state {
            AudioState::Playing => {
                self.state = AudioState::Muted;
                ctx.emit(HostCommand::PauseAudio);
                ctx.emit(HostCommand::SetMuteIndicator { muted: true });
            }
            AudioState::Blocked | AudioState::Muted => ctx.emit(HostCommand::PlayAudio),
        }
    }

    /// A play attempt finished.
    pub fn on_settled(&mut self, ctx: &mut EngineContext, played: bool) {
        if played {
            self.state = AudioState::Playing;
            ctx.emit(HostCommand::SetMuteIndicator { muted: false });
        } else {
            log::info!("audio: playback prevented, staying muted");
        }
    }
}

impl Default for AudioGate {
    fn default() -> Self {
        Self::new()
    }
}
