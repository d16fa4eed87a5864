//! Thin wrappers over the page elements the host drives.

use js_sys::Promise;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAudioElement, HtmlElement, HtmlTableElement};

use crate::config::HostConfig;
use crate::error::HostError;

fn element<T: JsCast>(document: &Document, id: &'static str, expected: &'static str) -> Result<T, HostError> {
    document
        .get_element_by_id(id)
        .ok_or(HostError::MissingElement(id))?
        .dyn_into::<T>()
        .map_err(|_| HostError::WrongElementType { id, expected })
}

/// Detail panel: a heading plus a two-column table.
pub struct InfoPanel {
    panel: HtmlElement,
    title: Element,
    table: HtmlTableElement,
}

impl InfoPanel {
    pub fn bind(document: &Document, config: &HostConfig) -> Result<Self, HostError> {
        Ok(Self {
            panel: element(document, config.panel_id, "HtmlElement")?,
            title: element(document, config.panel_title_id, "Element")?,
            table: element(document, config.panel_table_id, "HtmlTableElement")?,
        })
    }

    /// Replace the panel content and show it. Text goes in through
    /// `textContent`, never as markup.
    pub fn show(&self, document: &Document, title: &str, rows: &[(String, String)]) -> Result<(), HostError> {
        self.title.set_text_content(Some(title));
        self.table.set_text_content(None);
        for (label, value) in rows {
            let tr = document.create_element("tr")?;
            let label_td = document.create_element("td")?;
            label_td.set_text_content(Some(label));
            let value_td = document.create_element("td")?;
            value_td.set_text_content(Some(value));
            tr.append_child(&label_td)?;
            tr.append_child(&value_td)?;
            self.table.append_child(&tr)?;
        }
        self.panel.style().set_property("display", "block")?;
        Ok(())
    }

    pub fn hide(&self) -> Result<(), HostError> {
        self.panel.style().set_property("display", "none")?;
        Ok(())
    }
}

/// The looped background track.
pub struct AudioTrack {
    audio: HtmlAudioElement,
}

impl AudioTrack {
    pub fn bind(document: &Document, config: &HostConfig) -> Result<Self, HostError> {
        let audio: HtmlAudioElement = element(document, config.audio_id, "HtmlAudioElement")?;
        audio.set_loop(true);
        audio.set_volume(config.audio_volume.clamp(0.0, 1.0));
        Ok(Self { audio })
    }

    /// Start playback. The promise rejects when autoplay policy blocks it.
    pub fn play(&self) -> Result<Promise, HostError> {
        Ok(self.audio.play()?)
    }

    pub fn pause(&self) -> Result<(), HostError> {
        Ok(self.audio.pause()?)
    }
}

/// Mute indicator: a CSS class plus a tooltip.
pub struct MuteIndicator {
    element: HtmlElement,
    muted_class: &'static str,
    muted_title: &'static str,
    unmuted_title: &'static str,
}

impl MuteIndicator {
    pub fn bind(document: &Document, config: &HostConfig) -> Result<Self, HostError> {
        Ok(Self {
            element: element(document, config.mute_indicator_id, "HtmlElement")?,
            muted_class: config.muted_class,
            muted_title: config.muted_title,
            unmuted_title: config.unmuted_title,
        })
    }

    pub fn set_muted(&self, muted: bool) -> Result<(), HostError> {
        self.element.class_list().toggle_with_force(self.muted_class, muted)?;
        self.element
            .set_title(if muted { self.muted_title } else { self.unmuted_title });
        Ok(())
    }
}

/// Every element the host writes to.
pub struct Dom {
    pub document: Document,
    pub panel: InfoPanel,
    pub audio: AudioTrack,
    pub mute: MuteIndicator,
}

impl Dom {
    pub fn bind(document: Document, config: &HostConfig) -> Result<Self, HostError> {
        Ok(Self {
            panel: InfoPanel::bind(&document, config)?,
            audio: AudioTrack::bind(&document, config)?,
            mute: MuteIndicator::bind(&document, config)?,
            document,
        })
    }
}
