use serde::{Deserialize, Serialize};
use crate::api::types::Stage;

/// Viewports narrower than this start in lite mode.
pub const DEFAULT_LITE_WIDTH_THRESHOLD: f32 = 768.0;

/// Where `replay()` sends the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayTarget {
    #[default]
    Welcome,
    /// Full reset through the loading screen.
    Loading,
}

impl ReplayTarget {
    pub fn stage(self) -> Stage {
        match self {
            Self::Welcome => Stage::Welcome,
            Self::Loading => Stage::Loading,
        }
    }
}

/// Every delay the session uses, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Commit delay for a transition with the cinematic gate up.
    pub transition_settle: f32,
    /// Commit delay in lite mode (effectively synchronous).
    pub lite_transition_settle: f32,
    /// How long a raised gate stays up if nobody lowers it.
    pub gate_window: f32,
    /// Pause between picking a quiz option and advancing.
    pub answer_debounce: f32,
    /// Reveal stage auto-continues after this long.
    pub reveal_dwell: f32,
    pub confetti_duration: f32,
    pub fireworks_duration: f32,
    pub burst_duration: f32,
    /// Delay between the third gift tap and the open.
    pub gift_open_delay: f32,
    /// Loading progress in percent per second.
    pub loading_rate: f32,
    /// Ready + exit + fade time after loading hits 100%.
    pub loading_outro: f32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            transition_settle: 0.2,
            lite_transition_settle: 0.05,
            gate_window: 0.6,
            answer_debounce: 0.4,
            reveal_dwell: 11.0,
            confetti_duration: 5.0,
            fireworks_duration: 6.0,
            burst_duration: 1.5,
            gift_open_delay: 0.6,
            loading_rate: 50.0,
            loading_outro: 2.0,
        }
    }
}

/// Session configuration, optionally supplied by the host as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    pub lite_mode: bool,
    pub muted: bool,
    pub replay_target: ReplayTarget,
    pub timings: Timings,
    /// Confetti pieces spawned per burst (full quality).
    pub confetti_count: usize,
    /// Confetti pieces spawned per burst in lite mode.
    pub lite_confetti_count: usize,
    /// Maximum confetti pieces exported per frame (default: 128).
    pub max_confetti: usize,
    /// Maximum cues exported per frame (default: 16).
    pub max_cues: usize,
    /// Maximum session events exported per frame (default: 32).
    pub max_events: usize,
    /// Seed for the decorative RNG.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            lite_mode: false,
            muted: false,
            replay_target: ReplayTarget::Welcome,
            timings: Timings::default(),
            confetti_count: 120,
            lite_confetti_count: 40,
            max_confetti: 128,
            max_cues: 16,
            max_events: 32,
            seed: 2026,
        }
    }
}

impl SessionConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Pick the startup lite-mode default from the viewport width.
    /// Only consulted once, at init.
    pub fn with_viewport_width(mut self, width: f32) -> Self {
        if width > 0.0 && width < DEFAULT_LITE_WIDTH_THRESHOLD {
            self.lite_mode = true;
        }
        self
    }

    /// Transition commit delay for the given mode.
    pub fn settle_delay(&self, lite: bool) -> f32 {
        if lite {
            self.timings.lite_transition_settle
        } else {
            self.timings.transition_settle
        }
    }

    pub fn confetti_pieces(&self, lite: bool) -> usize {
        let count = if lite { self.lite_confetti_count } else { self.confetti_count };
        count.min(self.max_confetti)
    }
}
