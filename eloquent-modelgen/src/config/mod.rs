//! Configuration: run-wide settings and their per-table specialization

pub mod defaults;
mod generation;
mod settings;

pub use generation::*;
pub use settings::*;
