//! Browser host: owns the canvas, forwards DOM events into a `GameRunner`,
//! drives it from `requestAnimationFrame` and carries out its commands.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;
use orrery_engine::{Game, GameConfig, HostCommand, InputEvent, Touches};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AddEventListenerOptions, Document, Event, EventTarget, HtmlCanvasElement, KeyboardEvent,
    MouseEvent, TouchEvent, TouchList, WheelEvent, Window,
};

use crate::canvas::CanvasPainter;
use crate::config::HostConfig;
use crate::dom::Dom;
use crate::error::HostError;
use crate::runner::GameRunner;

type Shared<G> = Rc<RefCell<GameRunner<G>>>;

/// Everything the frame callback and command handlers need.
struct Host<G: Game> {
    window: Window,
    canvas: HtmlCanvasElement,
    runner: Shared<G>,
    painter: RefCell<CanvasPainter>,
    dom: Dom,
    /// No page-level gesture has been reported yet.
    awaiting_gesture: Cell<bool>,
}

/// Wire `game` into the current page and start the animation loop.
pub fn run<G: Game + 'static>(game: G, host_config: HostConfig) -> Result<(), HostError> {
    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let document = window.document().ok_or(HostError::NoDocument)?;

    let canvas = create_canvas(&document)?;
    let painter = CanvasPainter::new(canvas.clone())?;
    let dom = Dom::bind(document.clone(), &host_config)?;

    let config = resolve_config(&game, &document, &host_config);
    let runner = Rc::new(RefCell::new(GameRunner::with_config(game, config)));

    let host = Rc::new(Host {
        window: window.clone(),
        canvas: canvas.clone(),
        runner: runner.clone(),
        painter: RefCell::new(painter),
        dom,
        awaiting_gesture: Cell::new(true),
    });

    host.resize()?;
    runner.borrow_mut().init();
    host.apply_commands();

    attach_mouse(&host)?;
    attach_touch(&host)?;
    attach_wheel(&host)?;
    attach_keys(&host, &document)?;
    attach_first_gesture(&host, &document)?;
    attach_resize(&host)?;
    attach_controls(&host, &document, &host_config)?;
    start_loop(host)?;

    log::debug!("host: listeners attached, loop started");
    Ok(())
}

fn create_canvas(document: &Document) -> Result<HtmlCanvasElement, HostError> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| HostError::WrongElementType { id: "canvas", expected: "HtmlCanvasElement" })?;
    let style = canvas.style();
    style.set_property("display", "block")?;
    style.set_property("position", "fixed")?;
    style.set_property("left", "0")?;
    style.set_property("top", "0")?;
    style.set_property("touch-action", "none")?;
    document
        .body()
        .ok_or(HostError::MissingElement("body"))?
        .prepend_with_node_1(&canvas)?;
    Ok(canvas)
}

/// Start from the game's config, apply JSON overrides from the page if any,
/// then reseed from the wall clock when asked to.
fn resolve_config<G: Game>(game: &G, document: &Document, host_config: &HostConfig) -> GameConfig {
    let mut config = game.config();
    if let Some(id) = host_config.config_element_id {
        if let Some(text) = document.get_element_by_id(id).and_then(|e| e.text_content()) {
            match config.with_overrides(&text) {
                Ok(merged) => config = merged,
                Err(err) => log::warn!("host: ignoring #{id} config overrides: {err}"),
            }
        }
    }
    if host_config.seed_from_clock {
        config.seed = js_sys::Date::now() as u64;
    }
    config
}

impl<G: Game + 'static> Host<G> {
    fn push(&self, event: InputEvent) {
        self.runner.borrow_mut().push_input(event);
    }

    /// Canvas-relative CSS pixel position for client coordinates.
    fn local(&self, client_x: i32, client_y: i32) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        Vec2::new(
            client_x as f32 - rect.left() as f32,
            client_y as f32 - rect.top() as f32,
        )
    }

    fn mouse_pos(&self, event: &MouseEvent) -> Vec2 {
        self.local(event.client_x(), event.client_y())
    }

    fn touches(&self, list: &TouchList) -> Touches {
        let point = |i| list.get(i).map(|t| self.local(t.client_x(), t.client_y()));
        match (point(0), point(1)) {
            (Some(a), Some(b)) => Touches { count: list.length(), points: [a, b] },
            (Some(a), None) => Touches::one(a),
            _ => Touches::default(),
        }
    }

    fn resize(&self) -> Result<(), HostError> {
        let width = self.window.inner_width()?.as_f64().unwrap_or(800.0);
        let height = self.window.inner_height()?.as_f64().unwrap_or(600.0);
        let ratio = self.window.device_pixel_ratio();
        self.painter.borrow_mut().resize(width, height, ratio)?;
        self.push(InputEvent::Resize { width: width as f32, height: height as f32 });
        Ok(())
    }

    fn frame(self: &Rc<Self>, now_ms: f64) {
        {
            let mut runner = self.runner.borrow_mut();
            runner.frame(now_ms);
            if let Err(err) = self.painter.borrow().paint(runner.render_buffer()) {
                log::warn!("host: paint failed: {err:?}");
            }
        }
        self.apply_commands();
    }

    /// Run queued input through the game and carry out its commands while
    /// the DOM handler that queued it is still on the stack.
    fn flush(self: &Rc<Self>) {
        self.runner.borrow_mut().flush_input();
        self.apply_commands();
    }

    fn apply_commands(self: &Rc<Self>) {
        let commands = self.runner.borrow_mut().take_commands();
        for command in commands {
            if let Err(err) = self.apply(command) {
                log::warn!("host: command failed: {err}");
            }
        }
    }

    fn apply(self: &Rc<Self>, command: HostCommand) -> Result<(), HostError> {
        match command {
            HostCommand::ShowPanel { title, rows } => {
                self.dom.panel.show(&self.dom.document, &title, &rows)
            }
            HostCommand::HidePanel => self.dom.panel.hide(),
            HostCommand::PlayAudio => {
                let promise = self.dom.audio.play()?;
                let runner = self.runner.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let played = match JsFuture::from(promise).await {
                        Ok(_) => true,
                        Err(err) => {
                            log::info!("audio: playback blocked until a user gesture ({err:?})");
                            false
                        }
                    };
                    runner.borrow_mut().push_input(InputEvent::AudioSettled { played });
                });
                Ok(())
            }
            HostCommand::PauseAudio => self.dom.audio.pause(),
            HostCommand::SetMuteIndicator { muted } => self.dom.mute.set_muted(muted),
        }
    }
}

/// Register `handler` for `event` on `target` for the lifetime of the page.
fn listen<E, F>(target: &EventTarget, event: &str, passive: bool, mut handler: F) -> Result<(), HostError>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(move |e: Event| handler(e.unchecked_into::<E>()));
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

fn attach_mouse<G: Game + 'static>(host: &Rc<Host<G>>) -> Result<(), HostError> {
    let canvas: &EventTarget = host.canvas.as_ref();
    let window: &EventTarget = host.window.as_ref();

    let h = host.clone();
    listen(canvas, "mousedown", true, move |e: MouseEvent| {
        let p = h.mouse_pos(&e);
        h.push(InputEvent::PointerDown { x: p.x, y: p.y });
    })?;

    // Move and release track the whole window so drags survive leaving the canvas.
    let h = host.clone();
    listen(window, "mousemove", true, move |e: MouseEvent| {
        let p = h.mouse_pos(&e);
        h.push(InputEvent::PointerMove { x: p.x, y: p.y });
    })?;

    let h = host.clone();
    listen(window, "mouseup", true, move |e: MouseEvent| {
        let p = h.mouse_pos(&e);
        h.push(InputEvent::PointerUp { x: p.x, y: p.y });
    })?;

    let h = host.clone();
    listen(canvas, "click", true, move |e: MouseEvent| {
        let p = h.mouse_pos(&e);
        h.push(InputEvent::Click { x: p.x, y: p.y });
    })?;
    Ok(())
}

fn attach_touch<G: Game + 'static>(host: &Rc<Host<G>>) -> Result<(), HostError> {
    let canvas: &EventTarget = host.canvas.as_ref();

    let h = host.clone();
    listen(canvas, "touchstart", false, move |e: TouchEvent| {
        e.prevent_default();
        let touches = h.touches(&e.touches());
        h.push(InputEvent::TouchStart { touches });
    })?;

    let h = host.clone();
    listen(canvas, "touchmove", false, move |e: TouchEvent| {
        e.prevent_default();
        let touches = h.touches(&e.touches());
        h.push(InputEvent::TouchMove { touches });
    })?;

    let h = host.clone();
    listen(canvas, "touchend", false, move |e: TouchEvent| {
        e.prevent_default();
        let Some(touch) = e.changed_touches().get(0) else { return };
        let changed = h.local(touch.client_x(), touch.client_y());
        h.push(InputEvent::TouchEnd { changed, remaining: e.touches().length() });
    })?;
    Ok(())
}

fn attach_wheel<G: Game + 'static>(host: &Rc<Host<G>>) -> Result<(), HostError> {
    let h = host.clone();
    listen(host.canvas.as_ref(), "wheel", false, move |e: WheelEvent| {
        e.prevent_default();
        h.push(InputEvent::Wheel { delta_y: e.delta_y() as f32 });
    })
}

fn attach_keys<G: Game + 'static>(host: &Rc<Host<G>>, document: &Document) -> Result<(), HostError> {
    let h = host.clone();
    listen(document.as_ref(), "keydown", true, move |e: KeyboardEvent| {
        h.push(InputEvent::KeyDown { key_code: e.key_code() });
    })?;

    let h = host.clone();
    listen(document.as_ref(), "keyup", true, move |e: KeyboardEvent| {
        h.push(InputEvent::KeyUp { key_code: e.key_code() });
    })
}

/// The first click, key or touch anywhere on the page is reported once and
/// flushed at once, so a play request it triggers still has user activation.
fn attach_first_gesture<G: Game + 'static>(host: &Rc<Host<G>>, document: &Document) -> Result<(), HostError> {
    for event in ["click", "keydown", "touchstart"] {
        let h = host.clone();
        listen(document.as_ref(), event, true, move |_: Event| {
            if h.awaiting_gesture.replace(false) {
                h.push(InputEvent::UserGesture);
                h.flush();
            }
        })?;
    }
    Ok(())
}

fn attach_resize<G: Game + 'static>(host: &Rc<Host<G>>) -> Result<(), HostError> {
    let h = host.clone();
    listen(host.window.as_ref(), "resize", true, move |_: Event| {
        if let Err(err) = h.resize() {
            log::warn!("host: resize failed: {err}");
        }
    })
}

fn attach_controls<G: Game + 'static>(
    host: &Rc<Host<G>>,
    document: &Document,
    host_config: &HostConfig,
) -> Result<(), HostError> {
    for binding in &host_config.controls {
        let Some(element) = document.get_element_by_id(binding.element_id) else {
            log::warn!("host: control #{} not found", binding.element_id);
            continue;
        };
        let h = host.clone();
        let kind = binding.kind;
        listen(element.as_ref(), "click", true, move |e: Event| {
            // Controls act on their own; keep their clicks from the page-level gesture listener.
            e.stop_propagation();
            h.push(InputEvent::Custom { kind, a: 0.0, b: 0.0, c: 0.0 });
            h.flush();
        })?;
    }
    Ok(())
}

fn start_loop<G: Game + 'static>(host: Rc<Host<G>>) -> Result<(), HostError> {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = callback.clone();
    let window = host.window.clone();

    *callback.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
        host.frame(now_ms);
        if let Some(cb) = next.borrow().as_ref() {
            if let Err(err) = host.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::warn!("host: requestAnimationFrame failed: {err:?}");
            }
        }
    }));

    if let Some(cb) = callback.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}
