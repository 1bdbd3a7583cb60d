//! Triple-tap gift box gesture and the 3-2-1 countdown that follows it.

use crate::core::timer::TimerSlot;
use super::cues::HapticKind;

/// Taps needed before the box opens.
pub const TAPS_TO_OPEN: u32 = 3;

/// Countdown marks as (seconds since the countdown started, number shown).
/// Zero is the closing "GO" frame.
pub const COUNTDOWN_MARKS: [(f32, u32); 4] = [(0.3, 3), (1.3, 2), (2.3, 1), (3.3, 0)];

/// Seconds from countdown start until the box opens.
pub const COUNTDOWN_LENGTH: f32 = 4.1;

/// Result of one tap on the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftTap {
    /// Box is charging; carries the escalating haptic for this tap.
    Charging { taps: u32, haptic: HapticKind },
    /// Final tap landed; the burst delay and countdown are now scheduled.
    Primed,
    /// Box already primed or opened.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct GiftBox {
    taps: u32,
    opened: bool,
    open_timer: TimerSlot<()>,
    countdown: TimerSlot<()>,
    open_delay: f32,
}

impl GiftBox {
    pub fn new(open_delay: f32) -> Self {
        Self {
            taps: 0,
            opened: false,
            open_timer: TimerSlot::new(),
            countdown: TimerSlot::new(),
            open_delay,
        }
    }

    pub fn taps(&self) -> u32 {
        self.taps
    }

    pub fn is_primed(&self) -> bool {
        self.taps >= TAPS_TO_OPEN
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    /// Number currently shown by the countdown overlay, `Some(0)` on the final frame.
    pub fn countdown(&self) -> Option<u32> {
        let elapsed = COUNTDOWN_LENGTH - self.countdown.remaining()?;
        COUNTDOWN_MARKS
            .iter()
            .rev()
            .find(|(at, _)| elapsed >= *at)
            .map(|(_, shown)| *shown)
    }

    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_armed()
    }

    pub fn tap(&mut self) -> GiftTap {
        if self.is_primed() || self.opened {
            return GiftTap::Ignored;
        }
        self.taps += 1;
        if self.is_primed() {
            self.open_timer.arm(self.open_delay, ());
            return GiftTap::Primed;
        }
        let haptic = match self.taps {
            1 => HapticKind::Light,
            _ => HapticKind::Medium,
        };
        GiftTap::Charging { taps: self.taps, haptic }
    }

    /// Mark the box opened. Returns false if it was already open.
    pub fn mark_opened(&mut self) -> bool {
        self.cancel();
        !std::mem::replace(&mut self.opened, true)
    }

    /// Drop the burst delay and any running countdown without opening.
    pub fn cancel(&mut self) {
        self.open_timer.cancel();
        self.countdown.cancel();
    }

    /// Advance the burst delay, then the countdown. Returns true when the box should open now.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.open_timer.advance(dt).is_some() {
            self.countdown.arm(COUNTDOWN_LENGTH, ());
            return false;
        }
        self.countdown.advance(dt).is_some()
    }
}
