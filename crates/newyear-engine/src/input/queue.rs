use crate::model::reflection::Question;
use crate::session::modals::Modal;

/// The named commands a view may issue. Views never touch session state directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// "Start the journey" on the welcome stage.
    BeginJourney,
    SubmitName(String),
    Answer { question: Question, option: String },
    /// One tap on the gift box.
    TapGift,
    /// Open the gift directly (the box widget counted its own taps).
    OpenGift,
    ContinueToCelebration,
    Replay,
    GoHome,
    SetMuted(bool),
    SetLiteMode(bool),
    OpenModal(Modal),
    CloseModal(Modal),
    /// The host's ambient-music `play()` was rejected.
    MusicBlocked,
}

/// A queue of view commands.
/// JS pushes commands as they happen; the runner drains them once per frame.
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Take every pending command, in arrival order.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}
