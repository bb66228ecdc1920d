//! Code generation module

mod emitter;
mod model_generator;
mod naming;
mod type_resolver;

pub use emitter::*;
pub use model_generator::*;
pub use naming::*;
pub use type_resolver::*;
