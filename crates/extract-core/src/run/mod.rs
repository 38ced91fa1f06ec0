//! Ejecuciones (`FlowRun`) y su máquina de estados.

mod status;
mod types;

pub use status::RunStatus;
pub use types::{FlowRun, RunId};
