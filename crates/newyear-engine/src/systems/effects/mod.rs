//! Effect triggers: time-boxed presentation flags (confetti, fireworks, light burst).
//!
//! Flags are independent of each other and of the stage pipeline. Each one
//! clears itself after a fixed duration, and a commit to any stage other than
//! the one it was fired for clears it early.

mod rng;
mod confetti;

pub use rng::Rng;
pub use confetti::{ConfettiField, ConfettiPiece, PALETTE_SIZE};

use crate::api::config::Timings;
use crate::api::types::{SessionEvent, Stage};
use crate::core::timer::TimerSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum EffectKind {
    Confetti = 0,
    Fireworks,
    Burst,
}

impl EffectKind {
    pub const ALL: [EffectKind; 3] = [Self::Confetti, Self::Fireworks, Self::Burst];

    fn duration(self, timings: &Timings) -> f32 {
        match self {
            Self::Confetti => timings.confetti_duration,
            Self::Fireworks => timings.fireworks_duration,
            Self::Burst => timings.burst_duration,
        }
    }

    pub fn event(self, on: bool) -> SessionEvent {
        SessionEvent::new(SessionEvent::EFFECT, self as u32 as f32, if on { 1.0 } else { 0.0 })
    }
}

/// Plain snapshot of the three flags, handed to views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectFlags {
    pub confetti_active: bool,
    pub fireworks_active: bool,
    pub burst_active: bool,
}

#[derive(Debug, Clone, Default)]
struct Flag {
    /// Stage the effect belongs to; `None` while inactive.
    stage: Option<Stage>,
    clear_timer: TimerSlot<()>,
}

impl Flag {
    fn is_active(&self) -> bool {
        self.stage.is_some()
    }

    fn clear(&mut self) -> bool {
        self.clear_timer.cancel();
        self.stage.take().is_some()
    }
}

/// Owner of the effect flags and the confetti simulation.
#[derive(Debug, Clone)]
pub struct EffectTriggers {
    flags: [Flag; 3],
    timings: Timings,
    pub confetti: ConfettiField,
    pub rng: Rng,
}

impl EffectTriggers {
    pub fn new(timings: Timings, seed: u64) -> Self {
        Self {
            flags: Default::default(),
            timings,
            confetti: ConfettiField::new(),
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Switch an effect on for `stage`, (re)starting its auto-clear window.
    /// `pieces` only matters for confetti.
    pub fn fire(&mut self, kind: EffectKind, stage: Stage, pieces: usize, events: &mut Vec<SessionEvent>) {
        let duration = kind.duration(&self.timings);
        let flag = &mut self.flags[kind as usize];
        flag.stage = Some(stage);
        flag.clear_timer.arm(duration, ());
        if kind == EffectKind::Confetti {
            self.confetti.burst(pieces, &mut self.rng);
        }
        events.push(kind.event(true));
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.flags[kind as usize].is_active()
    }

    pub fn flags(&self) -> EffectFlags {
        EffectFlags {
            confetti_active: self.is_active(EffectKind::Confetti),
            fireworks_active: self.is_active(EffectKind::Fireworks),
            burst_active: self.is_active(EffectKind::Burst),
        }
    }

    /// Advance auto-clear timers and the confetti simulation.
    pub fn advance(&mut self, dt: f32, events: &mut Vec<SessionEvent>) {
        for kind in EffectKind::ALL {
            let flag = &mut self.flags[kind as usize];
            if flag.clear_timer.advance(dt).is_some() {
                flag.stage = None;
                events.push(kind.event(false));
                if kind == EffectKind::Confetti {
                    self.confetti.clear();
                }
            }
        }
        self.confetti.advance(dt);
    }

    /// Drop effects that were fired for a different stage.
    pub fn on_stage_committed(&mut self, stage: Stage, events: &mut Vec<SessionEvent>) {
        for kind in EffectKind::ALL {
            let stale = self.flags[kind as usize].stage.is_some_and(|s| s != stage);
            if stale {
                self.clear(kind, events);
            }
        }
    }

    pub fn clear(&mut self, kind: EffectKind, events: &mut Vec<SessionEvent>) {
        if self.flags[kind as usize].clear() {
            events.push(kind.event(false));
        }
        if kind == EffectKind::Confetti {
            self.confetti.clear();
        }
    }

    pub fn clear_all(&mut self, events: &mut Vec<SessionEvent>) {
        for kind in EffectKind::ALL {
            self.clear(kind, events);
        }
    }
}
