//! Almacén de `FlowRun` por id.
//!
//! Invariantes que el repositorio hace cumplir:
//! - ids únicos (`insert` rechaza duplicados);
//! - un registro terminal no se vuelve a escribir;
//! - el progreso de un registro no retrocede.
//!
//! Cada escritura reemplaza el registro entero, así los lectores nunca ven
//! un estado a medio actualizar.
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::errors::CoreEngineError;
use crate::run::{FlowRun, RunId};

pub trait RunRepository: Send + Sync {
    fn insert(&self, run: FlowRun) -> Result<(), CoreEngineError>;
    fn get(&self, id: &RunId) -> Option<FlowRun>;
    /// Reemplaza el registro vigente por `next` (mismo id).
    fn replace(&self, next: FlowRun) -> Result<(), CoreEngineError>;
    fn remove(&self, id: &RunId) -> Option<FlowRun>;
    /// Todas las ejecuciones, la más reciente primero.
    fn list(&self) -> Vec<FlowRun>;

    fn contains(&self, id: &RunId) -> bool {
        self.get(id).is_some()
    }
}

#[derive(Debug, Clone)]
struct StoredRun {
    seq: u64,
    run: FlowRun,
}

#[derive(Debug, Default)]
pub struct InMemoryRunRepository {
    runs: DashMap<RunId, StoredRun>,
    next_seq: AtomicU64,
}

impl InMemoryRunRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunRepository for InMemoryRunRepository {
    fn insert(&self, run: FlowRun) -> Result<(), CoreEngineError> {
        match self.runs.entry(run.id.clone()) {
            Entry::Occupied(_) => Err(CoreEngineError::DuplicateRunId(run.id.to_string())),
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(StoredRun { seq, run });
                Ok(())
            }
        }
    }

    fn get(&self, id: &RunId) -> Option<FlowRun> {
        self.runs.get(id).map(|s| s.run.clone())
    }

    fn replace(&self, next: FlowRun) -> Result<(), CoreEngineError> {
        let mut stored = self.runs
                             .get_mut(&next.id)
                             .ok_or_else(|| CoreEngineError::RunNotFound(next.id.to_string()))?;
        stored.run.check_replacement(&next)?;
        stored.run = next;
        Ok(())
    }

    fn remove(&self, id: &RunId) -> Option<FlowRun> {
        self.runs.remove(id).map(|(_, s)| s.run)
    }

    fn list(&self) -> Vec<FlowRun> {
        let mut all: Vec<StoredRun> = self.runs.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| {
               b.run
                .start_time
                .cmp(&a.run.start_time)
                .then_with(|| b.seq.cmp(&a.seq))
           });
        all.into_iter().map(|s| s.run).collect()
    }
}
