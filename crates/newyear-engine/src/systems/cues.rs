//! Audio stingers and haptic pulses.
//!
//! Cues are fire-and-forget. The session queues them; the host reads the
//! queue each frame and plays whatever it can. Muted audio and missing host
//! capabilities drop cues at the queue, silently.

/// Oscillator shape for a stinger note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// One synthesized note: start offset and duration in seconds, gain relative to the base volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq: f32,
    pub offset: f32,
    pub duration: f32,
    pub gain: f32,
    pub wave: Waveform,
}

const fn sine(freq: f32, offset: f32, duration: f32, gain: f32) -> Note {
    Note { freq, offset, duration, gain, wave: Waveform::Sine }
}

const fn tri(freq: f32, offset: f32, duration: f32, gain: f32) -> Note {
    Note { freq, offset, duration, gain, wave: Waveform::Triangle }
}

/// Base stinger volume before per-note gain.
pub const STINGER_VOLUME: f32 = 0.12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum StingerKind {
    GiftOpen = 0,
    Reveal,
    Celebration,
    Success,
    Transition,
}

const GIFT_OPEN: [Note; 5] = [
    sine(523.25, 0.0, 0.3, 1.0),
    sine(659.25, 0.08, 0.3, 1.0),
    sine(783.99, 0.16, 0.4, 1.0),
    sine(1046.50, 0.24, 0.5, 1.2),
    tri(1318.51, 0.3, 0.6, 0.5),
];

const REVEAL: [Note; 6] = [
    sine(261.63, 0.0, 0.8, 1.0),
    sine(329.63, 0.0, 0.8, 1.0),
    sine(392.00, 0.0, 0.8, 1.0),
    sine(523.25, 0.15, 0.7, 1.3),
    tri(1046.50, 0.25, 0.5, 0.6),
    tri(1318.51, 0.35, 0.4, 0.4),
];

const CELEBRATION: [Note; 11] = [
    sine(523.25, 0.00, 0.25, 0.80),
    sine(587.33, 0.06, 0.25, 0.85),
    sine(659.25, 0.12, 0.25, 0.90),
    sine(698.46, 0.18, 0.25, 0.95),
    sine(783.99, 0.24, 0.25, 1.00),
    sine(880.00, 0.30, 0.25, 1.05),
    sine(987.77, 0.36, 0.25, 1.10),
    sine(1046.50, 0.42, 0.25, 1.15),
    sine(1046.50, 0.5, 0.6, 1.2),
    sine(1318.51, 0.5, 0.6, 1.0),
    tri(1567.98, 0.5, 0.6, 0.8),
];

const SUCCESS: [Note; 2] = [
    sine(880.00, 0.0, 0.2, 1.0),
    sine(1108.73, 0.1, 0.3, 1.2),
];

const TRANSITION: [Note; 3] = [
    sine(220.0, 0.0, 0.15, 0.4),
    tri(440.0, 0.05, 0.2, 0.6),
    sine(880.0, 0.1, 0.15, 0.3),
];

impl StingerKind {
    pub const ALL: [StingerKind; 5] = [
        Self::GiftOpen, Self::Reveal, Self::Celebration, Self::Success, Self::Transition,
    ];

    pub fn notes(self) -> &'static [Note] {
        match self {
            Self::GiftOpen => &GIFT_OPEN,
            Self::Reveal => &REVEAL,
            Self::Celebration => &CELEBRATION,
            Self::Success => &SUCCESS,
            Self::Transition => &TRANSITION,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum HapticKind {
    Light = 0,
    Medium,
    Heavy,
    Success,
    Warning,
    Error,
}

impl HapticKind {
    pub const ALL: [HapticKind; 6] = [
        Self::Light, Self::Medium, Self::Heavy, Self::Success, Self::Warning, Self::Error,
    ];

    /// Vibration pattern in milliseconds (on, off, on, ...).
    pub fn pattern(self) -> &'static [u32] {
        match self {
            Self::Light => &[10],
            Self::Medium => &[25],
            Self::Heavy => &[50],
            Self::Success => &[10, 50, 10, 50, 30],
            Self::Warning => &[30, 30, 30],
            Self::Error => &[50, 100, 50],
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Stinger(StingerKind),
    Haptic(HapticKind),
}

impl Cue {
    pub const FLOATS: usize = 2;
    const STINGER: u32 = 1;
    const HAPTIC: u32 = 2;

    /// Wire form: (channel, id).
    pub fn code(self) -> [u32; 2] {
        match self {
            Self::Stinger(k) => [Self::STINGER, k as u32],
            Self::Haptic(k) => [Self::HAPTIC, k as u32],
        }
    }

    pub fn from_code(channel: u32, id: u32) -> Option<Self> {
        match channel {
            Self::STINGER => StingerKind::from_code(id).map(Self::Stinger),
            Self::HAPTIC => HapticKind::from_code(id).map(Self::Haptic),
            _ => None,
        }
    }

    pub fn is_audio(self) -> bool {
        matches!(self, Self::Stinger(_))
    }
}

/// What the host environment can actually do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub audio: bool,
    pub vibration: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self { audio: true, vibration: true }
    }
}

/// Per-frame cue queue with the mute/capability filter applied on push.
#[derive(Debug, Clone, Default)]
pub struct CueQueue {
    cues: Vec<Cue>,
    muted: bool,
    caps: Capabilities,
}

impl CueQueue {
    pub fn new(muted: bool, caps: Capabilities) -> Self {
        Self {
            cues: Vec::with_capacity(16),
            muted,
            caps,
        }
    }

    /// Queue a cue. Returns false when it was dropped by the filter.
    pub fn push(&mut self, cue: Cue) -> bool {
        let playable = match cue {
            Cue::Stinger(_) => !self.muted && self.caps.audio,
            Cue::Haptic(_) => self.caps.vibration,
        };
        if !playable {
            log::trace!("cue dropped: {:?}", cue);
            return false;
        }
        self.cues.push(cue);
        true
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.cues.retain(|c| !c.is_audio());
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_capabilities(&mut self, caps: Capabilities) {
        self.caps = caps;
    }

    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cue> {
        self.cues.iter()
    }

    pub fn clear(&mut self) {
        self.cues.clear();
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muted_drops_audio_but_keeps_haptics() {
        let mut q = CueQueue::new(true, Capabilities::default());
        assert!(!q.push(Cue::Stinger(StingerKind::Reveal)));
        assert!(q.push(Cue::Haptic(HapticKind::Success)));
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![Cue::Haptic(HapticKind::Success)]);
    }

    #[test]
    fn missing_capabilities_are_silent_noops() {
        let caps = Capabilities { audio: false, vibration: false };
        let mut q = CueQueue::new(false, caps);
        assert!(!q.push(Cue::Stinger(StingerKind::Transition)));
        assert!(!q.push(Cue::Haptic(HapticKind::Light)));
        assert!(q.is_empty());
    }

    #[test]
    fn muting_discards_queued_audio() {
        let mut q = CueQueue::new(false, Capabilities::default());
        q.push(Cue::Stinger(StingerKind::Success));
        q.push(Cue::Haptic(HapticKind::Light));
        q.set_muted(true);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn wire_codes_decode() {
        for kind in StingerKind::ALL {
            let [ch, id] = Cue::Stinger(kind).code();
            assert_eq!(Cue::from_code(ch, id), Some(Cue::Stinger(kind)));
        }
        for kind in HapticKind::ALL {
            let [ch, id] = Cue::Haptic(kind).code();
            assert_eq!(Cue::from_code(ch, id), Some(Cue::Haptic(kind)));
        }
        assert_eq!(Cue::from_code(9, 0), None);
        assert_eq!(Cue::from_code(1, 99), None);
    }

    #[test]
    fn stinger_tables_are_sane() {
        for kind in StingerKind::ALL {
            let notes = kind.notes();
            assert!(!notes.is_empty());
            assert!(notes.iter().all(|n| n.freq > 0.0 && n.duration > 0.0 && n.offset >= 0.0));
        }
        assert_eq!(HapticKind::Success.pattern(), &[10, 50, 10, 50, 30]);
    }
}
