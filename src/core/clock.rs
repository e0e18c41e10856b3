use std::time::Instant;

/// Fixed-rate step source fed by wall-clock deltas.
/// Navigation constants are per step, so motion speed does not depend on
/// the display refresh rate.
#[derive(Debug, Clone)]
pub struct FixedStep {
    timestep: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedStep {
    pub fn new(hz: f32, max_steps: u32) -> Self {
        Self {
            timestep: 1.0 / hz,
            accumulator: 0.0,
            max_steps,
        }
    }

    /// Add elapsed seconds, returns how many steps to run now.
    /// Backlog beyond `max_steps` is dropped.
    pub fn advance(&mut self, delta: f32) -> u32 {
        self.accumulator += delta.max(0.0);

        let due = (self.accumulator / self.timestep) as u32;
        let steps = due.min(self.max_steps);

        if due > self.max_steps {
            self.accumulator = 0.0;
        } else {
            self.accumulator -= steps as f32 * self.timestep;
        }
        steps
    }

    pub fn timestep(&self) -> f32 {
        self.timestep
    }
}

/// Frames-per-second estimate refreshed once per interval
#[derive(Debug, Clone)]
pub struct FpsCounter {
    interval: f32,
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            frames: 0,
            elapsed: 0.0,
            fps: 0.0,
        }
    }

    /// Record one rendered frame, returns the new estimate when it refreshes
    pub fn record(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed >= self.interval {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Render clock: measures frame deltas and converts them into
/// navigation steps
#[derive(Debug)]
pub struct FrameClock {
    last_tick: Instant,
    steps: FixedStep,
    fps: FpsCounter,
}

/// What the host should do for one rendered frame
#[derive(Debug, Clone, Copy)]
pub struct FrameTiming {
    pub delta: f32,
    pub steps: u32,
}

impl FrameClock {
    pub fn new(step_hz: f32) -> Self {
        Self {
            last_tick: Instant::now(),
            steps: FixedStep::new(step_hz, 8),
            fps: FpsCounter::new(1.0),
        }
    }

    pub fn tick(&mut self) -> FrameTiming {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        if let Some(fps) = self.fps.record(delta) {
            log::debug!("FPS: {:.1}", fps);
        }

        FrameTiming {
            delta,
            steps: self.steps.advance(delta),
        }
    }

    /// Forget time spent away, e.g. while suspended
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }

    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }
}
