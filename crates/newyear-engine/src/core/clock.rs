/// Maximum fixed steps run for a single frame. Longer stalls (background tab)
/// are dropped instead of replayed.
pub const MAX_STEPS_PER_FRAME: u32 = 10;

/// Fixed-step session clock.
/// Turns variable `requestAnimationFrame` deltas into whole ticks so every
/// timer in the session advances by the same quantum.
#[derive(Debug, Clone)]
pub struct SessionClock {
    step: f32,
    carry: f32,
    frames: u64,
    elapsed: f64,
}

impl SessionClock {
    pub fn new(step: f32) -> Self {
        Self {
            step: if step > 0.0 { step } else { 1.0 / 60.0 },
            carry: 0.0,
            frames: 0,
            elapsed: 0.0,
        }
    }

    /// Feed one frame's delta. Returns how many fixed steps to run.
    pub fn frame(&mut self, frame_dt: f32) -> u32 {
        self.frames += 1;
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.carry = (self.carry + frame_dt).min(self.step * MAX_STEPS_PER_FRAME as f32);
        let steps = (self.carry / self.step) as u32;
        self.carry -= steps as f32 * self.step;
        self.elapsed += (steps as f32 * self.step) as f64;
        steps
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Frames seen so far (including ones that ran zero steps).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Simulated seconds, i.e. steps actually run times the step size.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
