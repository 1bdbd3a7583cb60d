//! Transition gate: keeps the curtain/wipe overlay up while a stage swap settles.

use crate::core::timer::TimerSlot;

#[derive(Debug, Clone)]
pub struct TransitionGate {
    active: bool,
    window: f32,
    bypass: bool,
    lower_timer: TimerSlot<()>,
}

impl TransitionGate {
    /// `window` is how long a raised gate stays up if nothing lowers it first.
    pub fn new(window: f32) -> Self {
        Self {
            active: false,
            window,
            bypass: false,
            lower_timer: TimerSlot::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Raise the gate and (re)start its window. Returns whether the gate actually went up.
    /// Raising an already-raised gate restarts the single lower-timer.
    pub fn raise(&mut self) -> bool {
        if self.bypass {
            return false;
        }
        self.active = true;
        self.lower_timer.arm(self.window, ());
        true
    }

    /// Lower immediately and drop the pending lower-timer.
    pub fn lower(&mut self) {
        self.active = false;
        self.lower_timer.cancel();
    }

    /// Lite mode: `raise()` becomes a no-op and any raised gate drops at once.
    pub fn set_bypass(&mut self, bypass: bool) {
        self.bypass = bypass;
        if bypass {
            self.lower();
        }
    }

    /// Advance the window. Returns true on the tick the gate drops by timeout.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.lower_timer.advance(dt).is_some() {
            self.active = false;
            return true;
        }
        false
    }
}
