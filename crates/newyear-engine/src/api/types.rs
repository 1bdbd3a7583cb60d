use bytemuck::{Pod, Zeroable};

/// One full-screen phase of the guided experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Stage {
    Loading = 0,
    Welcome,
    Name,
    Reflection,
    Gift,
    Reveal,
    Celebration,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Self::Loading, Self::Welcome, Self::Name, Self::Reflection,
        Self::Gift, Self::Reveal, Self::Celebration,
    ];

    /// Wire index written into the snapshot header.
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Decode a wire index. Unknown values yield `None` (rendered as the empty view).
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Lowercase tag used by the TypeScript view layer and in logs.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Welcome => "welcome",
            Self::Name => "name",
            Self::Reflection => "reflection",
            Self::Gift => "gift",
            Self::Reveal => "reveal",
            Self::Celebration => "celebration",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.tag() == tag)
    }

    /// Canonical forward successor. Celebration has none; it loops back via replay/home.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Loading => Some(Self::Welcome),
            Self::Welcome => Some(Self::Name),
            Self::Name => Some(Self::Reflection),
            Self::Reflection => Some(Self::Gift),
            Self::Gift => Some(Self::Reveal),
            Self::Reveal => Some(Self::Celebration),
            Self::Celebration => None,
        }
    }

    /// Whether `self -> target` is one of the documented edges.
    pub fn can_advance_to(self, target: Stage) -> bool {
        if self.next() == Some(target) {
            return true;
        }
        self == Self::Celebration && matches!(target, Self::Welcome | Self::Loading)
    }
}

/// An engine event forwarded to TypeScript through the snapshot buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SessionEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SessionEvent {
    pub const FLOATS: usize = 4;

    /// `a` = new stage index, `b` = previous stage index.
    pub const STAGE_CHANGED: f32 = 1.0;
    /// `a` = requested target stage index.
    pub const TRANSITION_REQUESTED: f32 = 2.0;
    /// `a` = 1.0 raised, 0.0 lowered.
    pub const GATE: f32 = 3.0;
    /// `a` = effect kind, `b` = 1.0 on, 0.0 off.
    pub const EFFECT: f32 = 4.0;
    /// `a` = music command (see `MusicCommand::code`).
    pub const MUSIC: f32 = 5.0;

    pub fn new(kind: f32, a: f32, b: f32) -> Self {
        Self { kind, a, b, c: 0.0 }
    }

    pub fn stage_changed(to: Stage, from: Stage) -> Self {
        Self::new(Self::STAGE_CHANGED, to.index() as f32, from.index() as f32)
    }

    pub fn transition_requested(target: Stage) -> Self {
        Self::new(Self::TRANSITION_REQUESTED, target.index() as f32, 0.0)
    }

    pub fn gate(raised: bool) -> Self {
        Self::new(Self::GATE, if raised { 1.0 } else { 0.0 }, 0.0)
    }
}
