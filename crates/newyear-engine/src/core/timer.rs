//! Single-slot cancellable timer.
//!
//! A `TimerSlot` holds at most one armed deadline. Arming it again replaces
//! whatever was pending, so "newest request wins" is the only behavior the
//! slot can express.

#[derive(Debug, Clone)]
struct Armed<T> {
    remaining: f32,
    payload: T,
}

/// A slot for one pending delayed action carrying `payload` when it fires.
#[derive(Debug, Clone)]
pub struct TimerSlot<T> {
    armed: Option<Armed<T>>,
}

impl<T> TimerSlot<T> {
    pub fn new() -> Self {
        Self { armed: None }
    }

    /// Arm the slot, cancelling any pending deadline.
    pub fn arm(&mut self, delay: f32, payload: T) {
        self.armed = Some(Armed {
            remaining: delay.max(0.0),
            payload,
        });
    }

    /// Cancel whatever is pending. Returns the dropped payload.
    pub fn cancel(&mut self) -> Option<T> {
        self.armed.take().map(|a| a.payload)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.armed.as_ref().map(|a| &a.payload)
    }

    pub fn remaining(&self) -> Option<f32> {
        self.armed.as_ref().map(|a| a.remaining)
    }

    /// Advance by `dt`. Yields the payload exactly once, on the tick the deadline passes.
    pub fn advance(&mut self, dt: f32) -> Option<T> {
        let armed = self.armed.as_mut()?;
        armed.remaining -= dt;
        if armed.remaining <= 0.0 {
            self.armed.take().map(|a| a.payload)
        } else {
            None
        }
    }
}

impl<T> Default for TimerSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
