/// A DOM button that forwards clicks to the game as `InputEvent::Custom { kind, .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBinding {
    pub element_id: &'static str,
    pub kind: u32,
}

impl ControlBinding {
    pub const fn new(element_id: &'static str, kind: u32) -> Self {
        Self { element_id, kind }
    }
}

/// Page wiring for the browser host: which elements exist and how they map to input.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Buttons forwarded as custom events. Missing elements are skipped with a warning.
    pub controls: Vec<ControlBinding>,
    /// Detail panel container, toggled with `display`.
    pub panel_id: &'static str,
    /// Panel heading filled by `HostCommand::ShowPanel`.
    pub panel_title_id: &'static str,
    /// Table receiving one row per label/value pair.
    pub panel_table_id: &'static str,
    /// Looped background audio element.
    pub audio_id: &'static str,
    /// Playback volume in [0, 1].
    pub audio_volume: f64,
    /// Element reflecting the mute state.
    pub mute_indicator_id: &'static str,
    /// CSS class set on the indicator while muted.
    pub muted_class: &'static str,
    pub muted_title: &'static str,
    pub unmuted_title: &'static str,
    /// Optional `<script type="application/json">` holding `GameConfig` overrides.
    pub config_element_id: Option<&'static str>,
    /// Reseed the engine RNG from the wall clock on every load.
    pub seed_from_clock: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            controls: Vec::new(),
            panel_id: "info-panel",
            panel_title_id: "info-title",
            panel_table_id: "info-table",
            audio_id: "bg-music",
            audio_volume: 0.3,
            mute_indicator_id: "mute-toggle",
            muted_class: "muted",
            muted_title: "Sound is muted - click to enable",
            unmuted_title: "Click to mute",
            config_element_id: Some("engine-config"),
            seed_from_clock: true,
        }
    }
}

impl HostConfig {
    pub fn with_controls(mut self, controls: &[ControlBinding]) -> Self {
        self.controls = controls.to_vec();
        self
    }

    /// Kind bound to `element_id`, if any.
    pub fn control_kind(&self, element_id: &str) -> Option<u32> {
        self.controls
            .iter()
            .find(|c| c.element_id == element_id)
            .map(|c| c.kind)
    }
}
