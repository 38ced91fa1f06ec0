//! Builder para `RunEngine`.
//!
//! Sólo el catálogo es obligatorio. El resto tiene defaults de producción:
//! stores en memoria, reloj del sistema, progreso aleatorio y tick de
//! `DEFAULT_TICK_INTERVAL_MS`. Los tests reemplazan reloj y progreso para
//! obtener ejecuciones deterministas.
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;

use crate::clock::{Clock, SystemClock};
use crate::constants::{DEFAULT_TICK_INTERVAL_MS, EVENT_CHANNEL_CAPACITY};
use crate::engine::RunEngine;
use crate::event::{EventStore, InMemoryEventStore};
use crate::progress::{ProgressSource, RandomProgress};
use crate::repo::{InMemoryRunRepository, RunRepository};
use crate::source::FlowCatalog;

pub struct RunEngineBuilder {
    catalog: Arc<dyn FlowCatalog>,
    repository: Option<Arc<dyn RunRepository>>,
    events: Option<Arc<dyn EventStore>>,
    clock: Option<Arc<dyn Clock>>,
    progress: Option<Box<dyn ProgressSource>>,
    tick_interval: Duration,
}

impl RunEngineBuilder {
    pub(crate) fn new(catalog: Arc<dyn FlowCatalog>) -> Self {
        Self { catalog,
               repository: None,
               events: None,
               clock: None,
               progress: None,
               tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS) }
    }

    pub fn repository(mut self, repository: Arc<dyn RunRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn event_store(mut self, events: Arc<dyn EventStore>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn progress(mut self, progress: impl ProgressSource + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    pub fn tick_interval(mut self, every: Duration) -> Self {
        self.tick_interval = every;
        self
    }

    pub fn build(self) -> RunEngine {
        let (live, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        RunEngine { catalog: self.catalog,
                    repository: self.repository
                                    .unwrap_or_else(|| Arc::new(InMemoryRunRepository::new())),
                    events: self.events
                                .unwrap_or_else(|| Arc::new(InMemoryEventStore::default())),
                    clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
                    progress: Mutex::new(self.progress
                                             .unwrap_or_else(|| Box::new(RandomProgress::new()))),
                    tick_interval: self.tick_interval,
                    live }
    }
}
