//! Reflection quiz progress: the current question plus a debounced advance.

use crate::core::timer::TimerSlot;
use crate::model::reflection::{Question, ReflectionData, ReflectionDraft};

/// What the quiz does when its debounce fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    Next(Question),
    Complete(ReflectionData),
}

#[derive(Debug, Clone)]
pub struct ReflectionQuiz {
    draft: ReflectionDraft,
    question: Question,
    debounce: TimerSlot<()>,
    completed: bool,
}

impl ReflectionQuiz {
    pub fn new() -> Self {
        Self {
            draft: ReflectionDraft::new(),
            question: Question::Highlight2025,
            debounce: TimerSlot::new(),
            completed: false,
        }
    }

    pub fn draft(&self) -> &ReflectionDraft {
        &self.draft
    }

    /// Question currently on screen; `None` once the quiz completed.
    pub fn question(&self) -> Option<Question> {
        (!self.completed).then_some(self.question)
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_settling(&self) -> bool {
        self.debounce.is_armed()
    }

    /// Record an answer and restart the debounce. An answer arriving before the
    /// previous debounce fired replaces that pending advance.
    pub fn answer(&mut self, question: Question, option: &str, debounce: f32) -> bool {
        if self.completed {
            return false;
        }
        let Some(next) = self.draft.with_answer(question, option) else {
            log::warn!("rejected option {:?} for {}", option, question.id());
            return false;
        };
        self.draft = next;
        self.debounce.arm(debounce, ());
        true
    }

    /// Advance the debounce. Yields a step on the tick it fires.
    pub fn advance(&mut self, dt: f32) -> Option<QuizStep> {
        self.debounce.advance(dt)?;
        if self.draft.is_complete() {
            self.completed = true;
            return Some(QuizStep::Complete(self.draft.finalize()));
        }
        self.question = self.draft.first_unanswered().unwrap_or(self.question);
        Some(QuizStep::Next(self.question))
    }

    pub fn cancel_pending(&mut self) {
        self.debounce.cancel();
    }
}

impl Default for ReflectionQuiz {
    fn default() -> Self {
        Self::new()
    }
}
