pub mod audio;
pub mod haptics;
pub mod music;
pub mod runner;

pub use runner::{SessionHost, SessionRunner};

use std::cell::RefCell;

use newyear_engine::model::personalize;
use newyear_engine::{Capabilities, Command, Cue, Modal, MusicCommand, Question, SessionConfig};
use wasm_bindgen::prelude::*;

use audio::StingerPlayer;
use music::AmbientTrack;

/// Host backed by Web Audio, `navigator.vibrate` and an `<audio>` element.
pub struct BrowserHost {
    stingers: StingerPlayer,
    track: AmbientTrack,
}

impl BrowserHost {
    pub fn new(track_src: &str) -> Self {
        Self {
            stingers: StingerPlayer::new(),
            track: AmbientTrack::new(track_src),
        }
    }
}

impl SessionHost for BrowserHost {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            audio: StingerPlayer::is_supported(),
            vibration: haptics::is_supported(),
        }
    }

    fn play_cue(&mut self, cue: Cue) {
        match cue {
            Cue::Stinger(kind) => self.stingers.play(kind),
            Cue::Haptic(kind) => haptics::vibrate(kind),
        }
    }

    fn music(&mut self, command: MusicCommand) {
        self.track.apply(command);
    }

    fn take_music_blocked(&mut self) -> bool {
        self.track.take_blocked()
    }

    fn teardown(&mut self) {
        self.stingers.close();
    }
}

thread_local! {
    static RUNNER: RefCell<Option<SessionRunner<BrowserHost>>> = RefCell::new(None);
}

/// Run `f` against the live runner. Calls before `session_init` are dropped.
fn with_runner<R>(f: impl FnOnce(&mut SessionRunner<BrowserHost>) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("session not initialized, call session_init() first");
                None
            }
        }
    })
}

fn push(command: Command) {
    with_runner(|r| r.push_command(command));
}

#[wasm_bindgen]
pub fn session_init(config_json: &str, viewport_width: f32) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        SessionConfig::default()
    } else {
        SessionConfig::from_json(config_json).unwrap_or_else(|err| {
            log::warn!("bad session config, using defaults: {}", err);
            SessionConfig::default()
        })
    };
    let config = config.with_viewport_width(viewport_width);
    let lite = config.lite_mode;

    let runner = SessionRunner::new(config, BrowserHost::new(music::DEFAULT_TRACK));
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("newyear: initialized (lite: {})", lite);
}

#[wasm_bindgen]
pub fn session_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn session_teardown() {
    with_runner(|r| r.teardown());
}

// ---- Commands ----

#[wasm_bindgen]
pub fn session_begin_journey() {
    push(Command::BeginJourney);
}

#[wasm_bindgen]
pub fn session_submit_name(name: &str) {
    push(Command::SubmitName(name.to_string()));
}

#[wasm_bindgen]
pub fn session_answer(question_id: &str, option: &str) {
    match Question::from_id(question_id) {
        Some(question) => push(Command::Answer {
            question,
            option: option.to_string(),
        }),
        None => log::warn!("unknown question {:?}", question_id),
    }
}

#[wasm_bindgen]
pub fn session_tap_gift() {
    push(Command::TapGift);
}

#[wasm_bindgen]
pub fn session_open_gift() {
    push(Command::OpenGift);
}

#[wasm_bindgen]
pub fn session_continue_to_celebration() {
    push(Command::ContinueToCelebration);
}

#[wasm_bindgen]
pub fn session_replay() {
    push(Command::Replay);
}

#[wasm_bindgen]
pub fn session_go_home() {
    push(Command::GoHome);
}

#[wasm_bindgen]
pub fn session_set_muted(muted: bool) {
    push(Command::SetMuted(muted));
}

#[wasm_bindgen]
pub fn session_set_lite_mode(lite: bool) {
    push(Command::SetLiteMode(lite));
}

#[wasm_bindgen]
pub fn session_open_modal(code: u32) {
    if let Some(modal) = Modal::from_code(code) {
        push(Command::OpenModal(modal));
    }
}

#[wasm_bindgen]
pub fn session_close_modal(code: u32) {
    if let Some(modal) = Modal::from_code(code) {
        push(Command::CloseModal(modal));
    }
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_snapshot_ptr() -> *const f32 {
    with_runner(|r| r.snapshot_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_snapshot_len() -> u32 {
    with_runner(|r| r.snapshot_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_user_name() -> String {
    with_runner(|r| r.controller().user_name().to_string()).unwrap_or_default()
}

/// The finalized reflection record as JSON, or an empty string before the quiz completes.
#[wasm_bindgen]
pub fn get_reflections_json() -> String {
    with_runner(|r| {
        r.controller()
            .reflections()
            .and_then(|data| serde_json::to_string(&**data).ok())
    })
    .flatten()
    .unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_tagline() -> String {
    with_runner(|r| {
        personalize::tagline(r.controller().reflections().map(|d| &**d)).to_string()
    })
    .unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_celebration_wish() -> String {
    with_runner(|r| {
        let c = r.controller();
        personalize::celebration_wish(c.reflections().map(|d| &**d), c.user_name())
    })
    .unwrap_or_default()
}
