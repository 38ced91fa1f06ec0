//! extract-core: ejecuciones simuladas de flujos de extracción.
//!
//! Contiene el ciclo de vida de una `FlowRun` (disparo, ticks de progreso,
//! estado terminal), el repositorio de ejecuciones, el historial de eventos
//! y los puertos hacia catálogo y datos (`FlowCatalog`, `DatasetSource`).
pub mod clock;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod progress;
pub mod repo;
pub mod run;
pub mod source;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{RunEngine, RunEngineBuilder, TickOutcome};
pub use errors::CoreEngineError;
pub use event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
pub use progress::{ProgressSource, RandomProgress, ScriptedProgress};
pub use repo::{InMemoryRunRepository, RunRepository};
pub use run::{FlowRun, RunId, RunStatus};
pub use source::{DatasetSource, FlowCatalog};
