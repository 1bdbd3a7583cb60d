//! Session orchestration: the stage controller and what hangs off it.

pub mod controller;
pub mod modals;
pub mod quiz;
pub mod view;
