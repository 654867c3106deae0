//! Preprocessing pipeline
//!
//! Stage traits, the statically-composed [`Pipeline`](runner::Pipeline),
//! its artifacts and observers, and the JSON configuration with its
//! validation engine.

pub mod artifacts;
pub mod observer;
pub mod runner;
pub mod spec;
pub mod traits;
pub mod validation;
