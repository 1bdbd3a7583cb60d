pub mod api;
pub mod core;
pub mod model;
pub mod systems;
pub mod session;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{SessionConfig, Timings, ReplayTarget, DEFAULT_LITE_WIDTH_THRESHOLD};
pub use api::types::{Stage, SessionEvent};
pub use crate::core::clock::SessionClock;
pub use crate::core::timer::TimerSlot;
pub use model::{UserProfile, Question, ReflectionData, ReflectionDraft, DEFAULT_NAME};
pub use model::personalize::WishCard;
pub use session::controller::StageController;
pub use session::modals::{Modal, Modals};
pub use session::quiz::{ReflectionQuiz, QuizStep};
pub use session::view::StageView;
pub use systems::cues::{Capabilities, Cue, CueQueue, HapticKind, Note, StingerKind, Waveform};
pub use systems::effects::{EffectFlags, EffectKind, EffectTriggers};
pub use systems::gate::TransitionGate;
pub use systems::music::{AmbientMusic, MusicCommand, MusicState};
pub use input::queue::{Command, CommandQueue};
pub use bridge::protocol::ProtocolLayout;
