//! Collected-input model: who the visitor is and what they answered.

pub mod personalize;
pub mod profile;
pub mod reflection;

pub use profile::{UserProfile, DEFAULT_NAME};
pub use reflection::{Question, ReflectionData, ReflectionDraft};
