/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// A command emitted by game logic for the browser host to carry out.
/// Generic container: the host decides which DOM elements each command touches.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// Fill the detail panel with a title and ordered label/value rows, then show it.
    ShowPanel {
        title: String,
        rows: Vec<(String, String)>,
    },
    /// Hide the detail panel.
    HidePanel,
    /// Attempt playback of the background track.
    /// The host answers asynchronously with `InputEvent::AudioSettled`.
    PlayAudio,
    /// Pause the background track.
    PauseAudio,
    /// Update the mute indicator.
    SetMuteIndicator { muted: bool },
}
