/// Snapshot buffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 25 floats]
/// [Confetti: max_confetti × 4 floats]
/// [Cues: max_cues × 2 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::config::SessionConfig;
use crate::api::types::SessionEvent;
use crate::session::controller::StageController;
use crate::systems::cues::Cue;
use crate::systems::effects::ConfettiPiece;
use crate::systems::music::MusicState;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 25;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_STAGE: usize = 2;
/// Pending target stage index, or -1.
pub const HEADER_PENDING_STAGE: usize = 3;
pub const HEADER_GATE_ACTIVE: usize = 4;
pub const HEADER_EFFECTS_ENABLED: usize = 5;
pub const HEADER_CONFETTI_ACTIVE: usize = 6;
pub const HEADER_FIREWORKS_ACTIVE: usize = 7;
pub const HEADER_BURST_ACTIVE: usize = 8;
pub const HEADER_LITE_MODE: usize = 9;
pub const HEADER_MUTED: usize = 10;
/// Current question index, or -1 outside the quiz.
pub const HEADER_QUESTION_INDEX: usize = 11;
pub const HEADER_ANSWERED_MASK: usize = 12;
pub const HEADER_GIFT_TAPS: usize = 13;
pub const HEADER_LOADING_PROGRESS: usize = 14;
pub const HEADER_MODAL_BITS: usize = 15;
pub const HEADER_MUSIC_STATE: usize = 16;
pub const HEADER_MAX_CONFETTI: usize = 17;
pub const HEADER_CONFETTI_COUNT: usize = 18;
pub const HEADER_MAX_CUES: usize = 19;
pub const HEADER_CUE_COUNT: usize = 20;
pub const HEADER_MAX_EVENTS: usize = 21;
pub const HEADER_EVENT_COUNT: usize = 22;
pub const HEADER_COMMIT_COUNT: usize = 23;
/// Gift countdown number (0 is the final frame), or -1 when no countdown runs.
pub const HEADER_GIFT_COUNTDOWN: usize = 24;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 2.0;

/// Floats per confetti piece: x, y, rotation, color (wire format).
pub const CONFETTI_FLOATS: usize = ConfettiPiece::FLOATS;

/// Floats per cue: channel, id (wire format).
pub const CUE_FLOATS: usize = Cue::FLOATS;

/// Floats per session event: kind, a, b, c (wire format).
pub const EVENT_FLOATS: usize = SessionEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_confetti: usize,
    pub max_cues: usize,
    pub max_events: usize,

    pub confetti_data_floats: usize,
    pub cue_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where confetti data begins.
    pub confetti_data_offset: usize,
    /// Offset (in floats) where cue data begins.
    pub cue_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_confetti: usize, max_cues: usize, max_events: usize) -> Self {
        let confetti_data_floats = max_confetti * CONFETTI_FLOATS;
        let cue_data_floats = max_cues * CUE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let confetti_data_offset = HEADER_FLOATS;
        let cue_data_offset = confetti_data_offset + confetti_data_floats;
        let event_data_offset = cue_data_offset + cue_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_confetti,
            max_cues,
            max_events,
            confetti_data_floats,
            cue_data_floats,
            event_data_floats,
            confetti_data_offset,
            cue_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.max_confetti, config.max_cues, config.max_events)
    }

    /// Write one frame of session state into `out`, resizing it to the layout.
    /// Sections past their capacity are truncated. Confetti is hidden while
    /// the transition gate is up.
    pub fn write_snapshot(&self, controller: &StageController, frame: u64, out: &mut Vec<f32>) {
        out.clear();
        out.resize(self.buffer_total_floats, 0.0);

        let flags = controller.effect_flags();
        let draft = controller.draft();
        let bool_f = |b: bool| if b { 1.0 } else { 0.0 };

        let header = &mut out[..HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_FRAME_COUNTER] = frame as f32;
        header[HEADER_STAGE] = controller.stage().index() as f32;
        header[HEADER_PENDING_STAGE] = controller
            .pending_transition()
            .map_or(-1.0, |s| s.index() as f32);
        header[HEADER_GATE_ACTIVE] = bool_f(controller.gate_active());
        header[HEADER_EFFECTS_ENABLED] = bool_f(controller.effects_enabled());
        header[HEADER_CONFETTI_ACTIVE] = bool_f(flags.confetti_active);
        header[HEADER_FIREWORKS_ACTIVE] = bool_f(flags.fireworks_active);
        header[HEADER_BURST_ACTIVE] = bool_f(flags.burst_active);
        header[HEADER_LITE_MODE] = bool_f(controller.lite_mode());
        header[HEADER_MUTED] = bool_f(controller.muted());
        header[HEADER_QUESTION_INDEX] = controller
            .current_question()
            .map_or(-1.0, |q| q.index() as f32);
        header[HEADER_ANSWERED_MASK] = draft.answered_mask() as f32;
        header[HEADER_GIFT_TAPS] = controller.gift_taps() as f32;
        header[HEADER_LOADING_PROGRESS] = controller.loading_progress();
        header[HEADER_MODAL_BITS] = controller.modals().bits() as f32;
        header[HEADER_MUSIC_STATE] = music_code(controller.music_state());
        header[HEADER_MAX_CONFETTI] = self.max_confetti as f32;
        header[HEADER_MAX_CUES] = self.max_cues as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_COMMIT_COUNT] = controller.commit_count() as f32;
        header[HEADER_GIFT_COUNTDOWN] = controller.gift_countdown().map_or(-1.0, |n| n as f32);

        let mut scratch = Vec::with_capacity(CONFETTI_FLOATS);
        let mut confetti_count = 0;
        if !controller.gate_active() {
            for piece in controller.effects().confetti.pieces.iter().take(self.max_confetti) {
                scratch.clear();
                piece.write(&mut scratch);
                let at = self.confetti_data_offset + confetti_count * CONFETTI_FLOATS;
                out[at..at + CONFETTI_FLOATS].copy_from_slice(&scratch);
                confetti_count += 1;
            }
        }

        let mut cue_count = 0;
        for cue in controller.cues().iter().take(self.max_cues) {
            let [channel, id] = cue.code();
            let at = self.cue_data_offset + cue_count * CUE_FLOATS;
            out[at] = channel as f32;
            out[at + 1] = id as f32;
            cue_count += 1;
        }

        let events = controller.events();
        let event_count = events.len().min(self.max_events);
        if events.len() > self.max_events {
            log::warn!("dropping {} session events past capacity", events.len() - self.max_events);
        }
        let event_floats: &[f32] = bytemuck::cast_slice(&events[..event_count]);
        out[self.event_data_offset..self.event_data_offset + event_floats.len()]
            .copy_from_slice(event_floats);

        out[HEADER_CONFETTI_COUNT] = confetti_count as f32;
        out[HEADER_CUE_COUNT] = cue_count as f32;
        out[HEADER_EVENT_COUNT] = event_count as f32;
    }
}

fn music_code(state: MusicState) -> f32 {
    match state {
        MusicState::Idle => 0.0,
        MusicState::Playing => 1.0,
        MusicState::Paused => 2.0,
        MusicState::Blocked => 3.0,
        MusicState::Stopped => 4.0,
    }
}
