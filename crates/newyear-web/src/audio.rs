//! Stinger playback on a lazily created Web Audio context.

use newyear_engine::systems::cues::{Note, Waveform, STINGER_VOLUME};
use newyear_engine::StingerKind;
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, OscillatorType};

/// Floor for exponential gain ramps (Web Audio rejects zero).
const SILENCE: f32 = 0.001;

#[derive(Default)]
pub struct StingerPlayer {
    ctx: Option<AudioContext>,
    unavailable: bool,
}

impl StingerPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the host exposes Web Audio at all.
    pub fn is_supported() -> bool {
        web_sys::window()
            .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("AudioContext")).unwrap_or(false))
            .unwrap_or(false)
    }

    fn context(&mut self) -> Option<&AudioContext> {
        if self.ctx.is_none() && !self.unavailable {
            match AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(err) => {
                    log::warn!("audio unavailable: {:?}", err);
                    self.unavailable = true;
                }
            }
        }
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == AudioContextState::Suspended {
            // The returned promise settles on its own; nothing to await.
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    /// Close the context. A later `play` opens a fresh one.
    pub fn close(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            if let Err(err) = ctx.close() {
                log::debug!("audio context close failed: {:?}", err);
            }
        }
    }

    pub fn play(&mut self, kind: StingerKind) {
        let Some(ctx) = self.context() else {
            return;
        };
        let now = ctx.current_time();
        for note in kind.notes() {
            if schedule(ctx, note, now).is_err() {
                log::debug!("dropped a note of {:?}", kind);
            }
        }
    }
}

fn schedule(ctx: &AudioContext, note: &Note, now: f64) -> Result<(), JsValue> {
    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;
    osc.set_type(match note.wave {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Triangle => OscillatorType::Triangle,
    });

    let start = now + note.offset as f64;
    let end = start + note.duration as f64;
    osc.frequency().set_value_at_time(note.freq, start)?;

    let level = gain.gain();
    level.set_value_at_time(STINGER_VOLUME * note.gain, start)?;
    level.exponential_ramp_to_value_at_time(SILENCE, end)?;

    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;
    osc.start_with_when(start)?;
    osc.stop_with_when(end)?;
    Ok(())
}
