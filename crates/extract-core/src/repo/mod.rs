//! Repositorio de ejecuciones.

mod in_memory;

pub use in_memory::{InMemoryRunRepository, RunRepository};
