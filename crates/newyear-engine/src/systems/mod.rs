pub mod cues;
pub mod effects;
pub mod gate;
pub mod gift;
pub mod loading;
pub mod music;
