//! Loading screen progression: a progress bar, then a short ready/exit outro.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    Filling,
    Outro,
    Done,
}

#[derive(Debug, Clone)]
pub struct LoadingSequence {
    progress: f32,
    rate: f32,
    outro_left: f32,
    outro: f32,
    phase: LoadingPhase,
}

impl LoadingSequence {
    /// `rate` in percent per second, `outro` in seconds.
    pub fn new(rate: f32, outro: f32) -> Self {
        Self {
            progress: 0.0,
            rate: rate.max(f32::EPSILON),
            outro_left: outro,
            outro,
            phase: LoadingPhase::Filling,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    /// Advance. Returns true exactly once, when the outro has finished.
    pub fn advance(&mut self, dt: f32) -> bool {
        match self.phase {
            LoadingPhase::Filling => {
                self.progress = (self.progress + self.rate * dt).min(100.0);
                if self.progress >= 100.0 {
                    self.phase = LoadingPhase::Outro;
                }
                false
            }
            LoadingPhase::Outro => {
                self.outro_left -= dt;
                if self.outro_left <= 0.0 {
                    self.phase = LoadingPhase::Done;
                    true
                } else {
                    false
                }
            }
            LoadingPhase::Done => false,
        }
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.outro_left = self.outro;
        self.phase = LoadingPhase::Filling;
    }
}
