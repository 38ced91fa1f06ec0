//! Implementación del `RunEngine`.
//!
//! Ciclo de vida de una ejecución:
//! 1. `trigger` valida el flujo, genera un id único, guarda el registro
//!    inicial y emite `RunTriggered`.
//! 2. Cada `tick` calcula el registro siguiente (`FlowRun::advance`) y lo
//!    reemplaza en el repositorio. Emite `ProgressAdvanced` o, al llegar a
//!    100, `RunCompleted` / `RunFailed`.
//! 3. `spawn_ticker` repite el tick cada `tick_interval` hasta que la
//!    ejecución termina o desaparece del repositorio.
//!
//! El ticker no depende de quien lo lanzó: soltar el `JoinHandle` o cerrar
//! un observador no detiene la ejecución.
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use extract_domain::{Flow, ParameterValues};

use crate::clock::Clock;
use crate::engine::RunEngineBuilder;
use crate::errors::CoreEngineError;
use crate::event::{EventStore, RunEvent, RunEventKind};
use crate::progress::ProgressSource;
use crate::repo::RunRepository;
use crate::run::{FlowRun, RunId, RunStatus};
use crate::source::FlowCatalog;

/// Intentos de generación de id antes de rendirse.
const MAX_ID_ATTEMPTS: usize = 8;

/// Cota de ticks para `run_to_completion` (una fuente que no avanza no
/// debe colgar al llamador).
const MAX_TICKS: usize = 1_000;

/// Resultado de un tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Avanzó y sigue en curso.
    Advanced(FlowRun),
    /// Este tick la llevó a un estado terminal.
    Finished(FlowRun),
    /// No había nada que avanzar (terminal o eliminada).
    Stopped,
}

pub struct RunEngine {
    pub(crate) catalog: Arc<dyn FlowCatalog>,
    pub(crate) repository: Arc<dyn RunRepository>,
    pub(crate) events: Arc<dyn EventStore>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) progress: Mutex<Box<dyn ProgressSource>>,
    pub(crate) tick_interval: Duration,
    pub(crate) live: broadcast::Sender<RunEvent>,
}

impl std::fmt::Debug for RunEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunEngine")
         .field("tick_interval", &self.tick_interval)
         .field("subscribers", &self.live.receiver_count())
         .finish_non_exhaustive()
    }
}

impl RunEngine {
    #[inline]
    pub fn builder(catalog: Arc<dyn FlowCatalog>) -> RunEngineBuilder {
        RunEngineBuilder::new(catalog)
    }

    /// Engine con todos los defaults.
    pub fn new(catalog: Arc<dyn FlowCatalog>) -> Self {
        Self::builder(catalog).build()
    }

    pub fn catalog(&self) -> &Arc<dyn FlowCatalog> {
        &self.catalog
    }

    pub fn repository(&self) -> &Arc<dyn RunRepository> {
        &self.repository
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Crea una ejecución `inProgress` con progreso 0. No arranca el ticker.
    pub fn trigger(&self, flow_id: &str, parameters: ParameterValues) -> Result<FlowRun, CoreEngineError> {
        let flow: Flow = self.catalog
                             .get_flow(flow_id)
                             .ok_or_else(|| CoreEngineError::FlowNotFound(flow_id.to_string()))?;
        let now = self.clock.now();
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let run = FlowRun::start(RunId::generate(now), &flow.id, parameters.clone(), now);
            match self.repository.insert(run.clone()) {
                Ok(()) => {
                    info!("run {} triggered for flow '{}'", run.id, flow.name);
                    self.record(&run.id, RunEventKind::RunTriggered { flow_id: flow.id.clone() });
                    return Ok(run);
                }
                Err(CoreEngineError::DuplicateRunId(id)) => {
                    warn!("run id collision on {id} (attempt {attempt}), regenerating");
                }
                Err(e) => return Err(e),
            }
        }
        Err(CoreEngineError::Internal(format!("could not allocate a unique run id for {flow_id}")))
    }

    /// Avanza una ejecución un tick.
    pub fn tick(&self, run_id: &RunId) -> TickOutcome {
        let current = match self.repository.get(run_id) {
            Some(run) if !run.is_terminal() => run,
            _ => return TickOutcome::Stopped,
        };
        let next = {
            let mut source = self.progress.lock().unwrap_or_else(|e| e.into_inner());
            match current.advance(source.as_mut(), self.clock.now()) {
                Ok(next) => next,
                Err(_) => return TickOutcome::Stopped,
            }
        };
        if let Err(e) = self.repository.replace(next.clone()) {
            // eliminada o ya cerrada por otro tick
            debug!("tick on {run_id} discarded: {e}");
            return TickOutcome::Stopped;
        }
        match next.status {
            RunStatus::InProgress => {
                self.record(run_id, RunEventKind::ProgressAdvanced { progress: next.progress_or_zero() });
                TickOutcome::Advanced(next)
            }
            RunStatus::Completed => {
                info!("run {run_id} completed");
                self.record(run_id, RunEventKind::RunCompleted { progress: next.progress_or_zero() });
                TickOutcome::Finished(next)
            }
            RunStatus::Failed => {
                let error = next.error.clone().unwrap_or_default();
                warn!("run {run_id} failed: {error}");
                self.record(run_id, RunEventKind::RunFailed { error });
                TickOutcome::Finished(next)
            }
        }
    }

    /// Tickea sin esperas hasta el estado terminal.
    pub fn run_to_completion(&self, run_id: &RunId) -> Result<FlowRun, CoreEngineError> {
        for _ in 0..MAX_TICKS {
            match self.tick(run_id) {
                TickOutcome::Advanced(_) => continue,
                TickOutcome::Finished(run) => return Ok(run),
                TickOutcome::Stopped => {
                    return self.repository
                               .get(run_id)
                               .ok_or_else(|| CoreEngineError::RunNotFound(run_id.to_string()));
                }
            }
        }
        Err(CoreEngineError::Internal(format!("run {run_id} did not finish after {MAX_TICKS} ticks")))
    }

    /// Dispara y arranca el ticker en segundo plano.
    pub fn launch(self: &Arc<Self>, flow_id: &str, parameters: ParameterValues) -> Result<FlowRun, CoreEngineError> {
        let run = self.trigger(flow_id, parameters)?;
        self.spawn_ticker(run.id.clone());
        Ok(run)
    }

    /// Tarea periódica que avanza `run_id`. El primer tick ocurre un
    /// intervalo después del disparo.
    pub fn spawn_ticker(self: &Arc<Self>, run_id: RunId) -> JoinHandle<()> {
        let engine = Arc::clone(self);
        let period = self.tick_interval;
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                match engine.tick(&run_id) {
                    TickOutcome::Advanced(_) => continue,
                    TickOutcome::Finished(_) | TickOutcome::Stopped => break,
                }
            }
            debug!("ticker for {run_id} stopped");
        })
    }

    pub fn get_run(&self, run_id: &RunId) -> Option<FlowRun> {
        self.repository.get(run_id)
    }

    /// Ejecuciones, la más reciente primero.
    pub fn list_runs(&self) -> Vec<FlowRun> {
        self.repository.list()
    }

    pub fn events_for(&self, run_id: &RunId) -> Vec<RunEvent> {
        self.events.list(run_id)
    }

    /// Canal en vivo de eventos. Sólo recibe lo emitido después de suscribirse.
    pub fn subscribe(&self) -> broadcast::Receiver<RunEvent> {
        self.live.subscribe()
    }

    fn record(&self, run_id: &RunId, kind: RunEventKind) -> RunEvent {
        let ev = self.events.append_kind(run_id, kind, self.clock.now());
        // sin suscriptores el envío falla y no importa
        let _ = self.live.send(ev.clone());
        ev
    }
}
