/// Timing of one animation frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame (0 on the first frame).
    pub dt: f32,
    /// Seconds since the first frame.
    pub elapsed: f32,
}

/// Wall-clock frame timer.
/// Converts `requestAnimationFrame` timestamps (milliseconds) into per-frame deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    start_ms: Option<f64>,
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock to `now_ms`.
    /// The first call yields `dt = 0`. A timestamp earlier than the previous one
    /// also yields `dt = 0` rather than running time backwards.
    pub fn tick(&mut self, now_ms: f64) -> FrameTime {
        let start = *self.start_ms.get_or_insert(now_ms);
        let dt_ms = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(self.last_ms.map_or(now_ms, |last| last.max(now_ms)));

        FrameTime {
            dt: (dt_ms / 1000.0) as f32,
            elapsed: ((now_ms - start).max(0.0) / 1000.0) as f32,
        }
    }

    /// Timestamp of the most recent tick, if any.
    pub fn last_ms(&self) -> Option<f64> {
        self.last_ms
    }
}
