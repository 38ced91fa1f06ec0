use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::{RunEvent, RunEventKind};
use crate::run::RunId;

/// Almacenamiento de eventos append-only.
pub trait EventStore: Send + Sync {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq).
    fn append_kind(&self, run_id: &RunId, kind: RunEventKind, ts: DateTime<Utc>) -> RunEvent;
    /// Lista eventos de una ejecución (orden ascendente por seq).
    fn list(&self, run_id: &RunId) -> Vec<RunEvent>;
}

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    inner: Mutex<HashMap<RunId, Vec<RunEvent>>>,
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&self, run_id: &RunId, kind: RunEventKind, ts: DateTime<Utc>) -> RunEvent {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let events = inner.entry(run_id.clone()).or_default();
        let ev = RunEvent { seq: events.len() as u64,
                            run_id: run_id.clone(),
                            kind,
                            ts };
        events.push(ev.clone());
        ev
    }

    fn list(&self, run_id: &RunId) -> Vec<RunEvent> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(run_id)
            .cloned()
            .unwrap_or_default()
    }
}
