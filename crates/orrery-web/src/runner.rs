use orrery_engine::{
    build_render_buffer, EngineContext, FrameClock, FrameTime, Game, GameConfig, HostCommand,
    InputEvent, InputQueue, RenderBuffer,
};

/// Generic game runner that wires up the engine loop.
///
/// The browser host owns one runner behind `Rc<RefCell<_>>`; DOM listeners
/// push input into it and the animation-frame callback calls `frame`.
/// Nothing here touches the browser, so the whole loop is testable natively.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    clock: FrameClock,
    config: GameConfig,
    last_time: FrameTime,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self::with_config(game, config)
    }

    /// Create a runner with an explicit config instead of `Game::config()`.
    pub fn with_config(game: G, config: GameConfig) -> Self {
        let mut render_buffer = RenderBuffer::with_capacity(config.max_entities, config.max_points);
        render_buffer.clear_color = config.clear_color.into();

        Self {
            game,
            ctx: EngineContext::with_config(&config),
            input: InputQueue::new(),
            render_buffer,
            clock: FrameClock::new(),
            config,
            last_time: FrameTime::default(),
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        if self.initialized {
            log::warn!("GameRunner::init called twice; ignoring");
            return;
        }
        self.game.init(&mut self.ctx);
        self.ctx.propagate_transforms();
        build_render_buffer(&self.ctx.scene, &self.ctx.camera, &self.ctx.lights, &mut self.render_buffer);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    /// Resizes also update the camera viewport immediately.
    pub fn push_input(&mut self, event: InputEvent) {
        if let InputEvent::Resize { width, height } = event {
            self.ctx.camera.resize(width, height);
        }
        self.input.push(event);
    }

    /// Run one animation frame at `now_ms` (a `requestAnimationFrame` timestamp):
    /// update the game with the wall-clock delta, propagate transforms and
    /// rebuild the render buffer.
    pub fn frame(&mut self, now_ms: f64) {
        if !self.initialized {
            return;
        }

        let time = self.clock.tick(now_ms);
        self.last_time = time;

        self.game.update(&mut self.ctx, &self.input, time);
        self.input.clear();

        self.ctx.propagate_transforms();
        build_render_buffer(&self.ctx.scene, &self.ctx.camera, &self.ctx.lights, &mut self.render_buffer);
    }

    /// Hand queued input to the game now, between frames, without advancing
    /// time. Commands it emits can then be carried out inside the DOM handler
    /// that caused them, which media playback needs.
    pub fn flush_input(&mut self) {
        if !self.initialized || self.input.is_empty() {
            return;
        }
        let time = FrameTime { dt: 0.0, elapsed: self.last_time.elapsed };
        self.game.update(&mut self.ctx, &self.input, time);
        self.input.clear();
        self.ctx.propagate_transforms();
    }

    /// Take the host commands emitted since the last call.
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        self.ctx.drain_commands()
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Timing of the most recent frame.
    pub fn last_time(&self) -> FrameTime {
        self.last_time
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }
}
