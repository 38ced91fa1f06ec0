//! Motor de ejecuciones simuladas.

mod builder;
mod core;

pub use builder::RunEngineBuilder;
pub use self::core::{RunEngine, TickOutcome};
