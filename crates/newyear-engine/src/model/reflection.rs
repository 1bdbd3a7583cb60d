//! The four-question reflection quiz and its answer records.

use serde::{Deserialize, Serialize};

/// Quiz questions, in the order they are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Question {
    #[serde(rename = "highlight2025")]
    Highlight2025,
    #[serde(rename = "lesson2025")]
    Lesson2025,
    #[serde(rename = "goal2026")]
    Goal2026,
    #[serde(rename = "wish2026")]
    Wish2026,
}

impl Question {
    pub const ALL: [Question; 4] = [
        Self::Highlight2025, Self::Lesson2025, Self::Goal2026, Self::Wish2026,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Highlight2025 => "highlight2025",
            Self::Lesson2025 => "lesson2025",
            Self::Goal2026 => "goal2026",
            Self::Wish2026 => "wish2026",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|q| q.id() == id)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The six option tags offered for this question.
    pub fn options(self) -> &'static [&'static str; 6] {
        match self {
            Self::Highlight2025 => &["career", "love", "travel", "health", "friends", "growth"],
            Self::Lesson2025 => &["patience", "self-love", "courage", "balance", "gratitude", "resilience"],
            Self::Goal2026 => &["wealth", "love", "health", "travel", "peace", "success"],
            Self::Wish2026 => &["happiness", "family", "career", "creativity", "adventure", "wisdom"],
        }
    }

    /// Tag substituted when a consumer reads this field before it was answered.
    pub fn fallback(self) -> &'static str {
        match self {
            Self::Highlight2025 => "growth",
            Self::Lesson2025 => "gratitude",
            Self::Goal2026 => "success",
            Self::Wish2026 => "happiness",
        }
    }

    pub fn accepts(self, option: &str) -> bool {
        self.options().contains(&option)
    }
}

/// A complete set of answers, handed to the reveal and celebration stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionData {
    pub highlight2025: String,
    pub lesson2025: String,
    pub goal2026: String,
    pub wish2026: String,
}

impl ReflectionData {
    pub fn new(highlight2025: &str, lesson2025: &str, goal2026: &str, wish2026: &str) -> Self {
        Self {
            highlight2025: highlight2025.to_string(),
            lesson2025: lesson2025.to_string(),
            goal2026: goal2026.to_string(),
            wish2026: wish2026.to_string(),
        }
    }

    pub fn get(&self, question: Question) -> &str {
        match question {
            Question::Highlight2025 => &self.highlight2025,
            Question::Lesson2025 => &self.lesson2025,
            Question::Goal2026 => &self.goal2026,
            Question::Wish2026 => &self.wish2026,
        }
    }
}

/// Answers collected so far. Never mutated in place: every answer yields a new draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflectionDraft {
    answers: [Option<String>; 4],
}

impl ReflectionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one answer into a copy of this draft.
    /// Returns `None` when `option` is not one of the question's tags.
    pub fn with_answer(&self, question: Question, option: &str) -> Option<Self> {
        if !question.accepts(option) {
            return None;
        }
        let mut next = self.clone();
        next.answers[question.index()] = Some(option.to_string());
        Some(next)
    }

    pub fn answer(&self, question: Question) -> Option<&str> {
        self.answers[question.index()].as_deref()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// Bit `i` set when question `i` is answered.
    pub fn answered_mask(&self) -> u32 {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_some())
            .fold(0, |mask, (i, _)| mask | (1 << i))
    }

    pub fn is_complete(&self) -> bool {
        self.answered_count() == Question::ALL.len()
    }

    /// First question still missing an answer, in asking order.
    pub fn first_unanswered(&self) -> Option<Question> {
        Question::ALL.iter().copied().find(|q| self.answer(*q).is_none())
    }

    /// Close the draft, filling any gap with the question's fallback tag.
    pub fn finalize(&self) -> ReflectionData {
        let pick = |q: Question| self.answer(q).unwrap_or(q.fallback());
        ReflectionData::new(
            pick(Question::Highlight2025),
            pick(Question::Lesson2025),
            pick(Question::Goal2026),
            pick(Question::Wish2026),
        )
    }
}
