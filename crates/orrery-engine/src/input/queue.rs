use glam::Vec2;

/// Up to two active touch points, in CSS pixels relative to the canvas.
/// Only the first two fingers matter for drag and pinch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Touches {
    /// Number of touches currently on the surface (may exceed 2).
    pub count: u32,
    pub points: [Vec2; 2],
}

impl Touches {
    pub fn one(p: Vec2) -> Self {
        Self {
            count: 1,
            points: [p, Vec2::ZERO],
        }
    }

    pub fn two(a: Vec2, b: Vec2) -> Self {
        Self {
            count: 2,
            points: [a, b],
        }
    }

    /// First touch, if any.
    pub fn first(&self) -> Option<Vec2> {
        (self.count >= 1).then_some(self.points[0])
    }

    /// Distance between the first two touches, if there are at least two.
    pub fn span(&self) -> Option<f32> {
        (self.count >= 2).then(|| self.points[0].distance(self.points[1]))
    }
}

/// Input event types the engine understands.
/// Generic: no game-specific semantics. Positions are CSS pixels relative to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A mouse button was pressed.
    PointerDown { x: f32, y: f32 },
    /// A mouse button was released.
    PointerUp { x: f32, y: f32 },
    /// The cursor moved.
    PointerMove { x: f32, y: f32 },
    /// A full click (press and release) landed on the canvas.
    Click { x: f32, y: f32 },
    /// Touches began; `touches` is the full active set.
    TouchStart { touches: Touches },
    /// Touches moved; `touches` is the full active set.
    TouchMove { touches: Touches },
    /// A touch ended; `changed` is the lifted touch, `remaining` the touches still down.
    TouchEnd { changed: Vec2, remaining: u32 },
    /// Scroll wheel; positive `delta_y` scrolls down.
    Wheel { delta_y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// The canvas was resized to the given CSS size.
    Resize { width: f32, height: f32 },
    /// A user activation anywhere on the page (click, key or touch).
    /// Hosts may report only the first one.
    UserGesture,
    /// An audio play attempt settled.
    AudioSettled { played: bool },
    /// A page control fired. `kind` is the bound event kind; `a`, `b`, `c`
    /// carry optional payload.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Events collected between two frames, in arrival order.
///
/// DOM listeners fire far more often than frames. A move that directly
/// follows another move of the same kind replaces it: drags only care about
/// the latest pointer position and pinches only about the latest span.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        let coalesce = matches!(
            (self.events.last(), &event),
            (Some(InputEvent::PointerMove { .. }), InputEvent::PointerMove { .. })
                | (Some(InputEvent::TouchMove { .. }), InputEvent::TouchMove { .. })
        );
        match self.events.last_mut() {
            Some(last) if coalesce => *last = event,
            _ => self.events.push(event),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Forget everything; called once the game has seen the frame's events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
