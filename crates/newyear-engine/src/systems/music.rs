//! Ambient background music lifecycle.
//!
//! One looping stream per session. The engine only decides *when* it should
//! play; the host owns the audio element and reports autoplay rejections back.

use crate::api::types::SessionEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicState {
    /// Never started.
    Idle,
    Playing,
    /// Wanted, but muted.
    Paused,
    /// The browser refused autoplay; waiting for the next user gesture.
    Blocked,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum MusicCommand {
    Play = 1,
    Pause,
    Stop,
}

impl MusicCommand {
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Play),
            2 => Some(Self::Pause),
            3 => Some(Self::Stop),
            _ => None,
        }
    }

    pub fn event(self) -> SessionEvent {
        SessionEvent::new(SessionEvent::MUSIC, self.code() as f32, 0.0)
    }
}

#[derive(Debug, Clone)]
pub struct AmbientMusic {
    state: MusicState,
    muted: bool,
}

impl AmbientMusic {
    pub fn new(muted: bool) -> Self {
        Self {
            state: MusicState::Idle,
            muted,
        }
    }

    pub fn state(&self) -> MusicState {
        self.state
    }

    /// Start on a user gesture. A no-op while already playing or paused by mute;
    /// a blocked stream gets retried here.
    pub fn start(&mut self) -> Option<MusicCommand> {
        match self.state {
            MusicState::Playing | MusicState::Paused => None,
            MusicState::Idle | MusicState::Blocked | MusicState::Stopped => {
                if self.muted {
                    self.state = MusicState::Paused;
                    None
                } else {
                    self.state = MusicState::Playing;
                    Some(MusicCommand::Play)
                }
            }
        }
    }

    /// The host's `play()` promise rejected.
    pub fn autoplay_blocked(&mut self) {
        if self.state == MusicState::Playing {
            log::debug!("ambient music blocked until next gesture");
            self.state = MusicState::Blocked;
        }
    }

    pub fn set_muted(&mut self, muted: bool) -> Option<MusicCommand> {
        self.muted = muted;
        match (self.state, muted) {
            (MusicState::Playing, true) => {
                self.state = MusicState::Paused;
                Some(MusicCommand::Pause)
            }
            (MusicState::Paused, false) => {
                self.state = MusicState::Playing;
                Some(MusicCommand::Play)
            }
            _ => None,
        }
    }

    /// Session end.
    pub fn teardown(&mut self) -> Option<MusicCommand> {
        let was_started = !matches!(self.state, MusicState::Idle | MusicState::Stopped);
        self.state = MusicState::Stopped;
        was_started.then_some(MusicCommand::Stop)
    }
}
