//! Render boundary: which view to mount for a stage, with plain props.

use std::rc::Rc;

use crate::api::types::Stage;
use crate::model::personalize::{self, WishCard};
use crate::model::reflection::{Question, ReflectionData};
use crate::session::controller::StageController;

#[derive(Debug, Clone, PartialEq)]
pub enum StageView {
    /// Unknown stage: render nothing.
    Empty,
    Loading {
        progress: f32,
    },
    Welcome,
    NameInput,
    Reflection {
        question: Question,
        index: usize,
        answered: usize,
    },
    Gift {
        taps: u32,
        /// Countdown overlay number, `Some(0)` for the final frame.
        countdown: Option<u32>,
    },
    Reveal {
        user_name: String,
        tagline: &'static str,
        wishes: Vec<WishCard>,
        reflections: Option<Rc<ReflectionData>>,
    },
    Celebration {
        user_name: String,
        wish: String,
        reflections: Option<Rc<ReflectionData>>,
    },
}

impl StageView {
    pub fn resolve(stage: Option<Stage>, controller: &StageController) -> Self {
        let Some(stage) = stage else {
            return Self::Empty;
        };
        let reflections = controller.reflections().cloned();
        match stage {
            Stage::Loading => Self::Loading {
                progress: controller.loading_progress(),
            },
            Stage::Welcome => Self::Welcome,
            Stage::Name => Self::NameInput,
            Stage::Reflection => {
                // Past the last question the quiz is waiting on the gift transition.
                let question = controller.current_question().unwrap_or(Question::Wish2026);
                Self::Reflection {
                    question,
                    index: question.index(),
                    answered: controller.draft().answered_count(),
                }
            }
            Stage::Gift => Self::Gift {
                taps: controller.gift_taps(),
                countdown: controller.gift_countdown(),
            },
            Stage::Reveal => Self::Reveal {
                user_name: controller.user_name().to_string(),
                tagline: personalize::tagline(reflections.as_deref()),
                wishes: personalize::wishes(reflections.as_deref()),
                reflections,
            },
            Stage::Celebration => Self::Celebration {
                user_name: controller.user_name().to_string(),
                wish: personalize::celebration_wish(reflections.as_deref(), controller.user_name()),
                reflections,
            },
        }
    }

    /// Resolve from a raw bridge index.
    pub fn from_index(index: u32, controller: &StageController) -> Self {
        Self::resolve(Stage::from_index(index), controller)
    }
}
