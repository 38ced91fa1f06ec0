//! Cliente de polling de ejecuciones.
//!
//! Un `PollHandle` consulta al crearse y luego cada `interval`, mientras
//! viva. Cada consulta corre en su propia tarea: una consulta lenta puede
//! solaparse con la siguiente y gana la que termina última. Soltar el handle
//! detiene el intervalo; las consultas ya lanzadas terminan sin efecto.
use std::sync::Arc;
use std::time::Duration;

use log::warn;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use extract_core::{FlowRun, RunId};

use super::RunsSource;
use crate::config::DEFAULT_POLL_INTERVAL_MS;
use crate::errors::{CoreError, Result};

/// Mensaje del estado de error, sin detalles de la causa.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch flow runs";

#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    /// Aún no terminó ninguna consulta.
    Loading,
    Error(String),
    Data(Vec<FlowRun>),
}

impl PollState {
    pub fn runs(&self) -> &[FlowRun] {
        match self {
            PollState::Data(runs) => runs,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PollState::Loading)
    }
}

/// Qué ejecuciones observar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunQuery {
    All,
    /// Subconjunto por id; los ids desconocidos se descartan del resultado.
    Ids(Vec<RunId>),
}

impl RunQuery {
    /// Una lista vacía equivale a observar todas.
    pub fn from_ids(ids: Vec<RunId>) -> Self {
        if ids.is_empty() {
            RunQuery::All
        } else {
            RunQuery::Ids(ids)
        }
    }

    async fn fetch(&self, source: &Arc<dyn RunsSource>) -> Result<Vec<FlowRun>> {
        match self {
            RunQuery::All => source.fetch_runs().await,
            RunQuery::Ids(ids) => {
                let lookups: Vec<JoinHandle<Result<Option<FlowRun>>>> =
                    ids.iter()
                       .cloned()
                       .map(|id| {
                           let source = Arc::clone(source);
                           tokio::spawn(async move { source.fetch_run(&id).await })
                       })
                       .collect();
                let mut runs = Vec::with_capacity(lookups.len());
                for lookup in lookups {
                    let found = lookup.await.map_err(|e| CoreError::Internal(e.to_string()))??;
                    runs.extend(found);
                }
                Ok(runs)
            }
        }
    }
}

#[derive(Clone)]
pub struct StatusPoller {
    source: Arc<dyn RunsSource>,
    interval: Duration,
}

impl StatusPoller {
    pub fn new(source: Arc<dyn RunsSource>) -> Self {
        Self { source,
               interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS) }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Empieza a observar `query`. La primera consulta sale de inmediato.
    pub fn watch(&self, query: RunQuery) -> PollHandle {
        let (state_tx, state_rx) = watch::channel(PollState::Loading);
        let (refetch_tx, mut refetch_rx) = mpsc::unbounded_channel::<()>();
        let state_tx = Arc::new(state_tx);
        let source = Arc::clone(&self.source);
        let period = self.interval;
        let query = Arc::new(query);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    Some(()) = refetch_rx.recv() => {}
                }
                spawn_fetch(Arc::clone(&source), Arc::clone(&query), Arc::clone(&state_tx));
            }
        });

        PollHandle { state: state_rx,
                     refetch: refetch_tx,
                     task }
    }
}

fn spawn_fetch(source: Arc<dyn RunsSource>, query: Arc<RunQuery>, state: Arc<watch::Sender<PollState>>) {
    tokio::spawn(async move {
        let next = match query.fetch(&source).await {
            Ok(runs) => PollState::Data(runs),
            Err(e) => {
                warn!("run poll failed: {e}");
                PollState::Error(FETCH_ERROR_MESSAGE.to_string())
            }
        };
        // sin observadores el envío falla y no importa
        let _ = state.send(next);
    });
}

/// Observación activa. Se detiene al soltarse.
pub struct PollHandle {
    state: watch::Receiver<PollState>,
    refetch: mpsc::UnboundedSender<()>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Último estado publicado.
    pub fn state(&self) -> PollState {
        self.state.borrow().clone()
    }

    /// Espera el próximo cambio de estado. `false` si el poller terminó.
    pub async fn changed(&mut self) -> bool {
        self.state.changed().await.is_ok()
    }

    /// Receptor independiente para otro observador.
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.clone()
    }

    /// Pide una consulta inmediata fuera del intervalo.
    pub fn refetch(&self) {
        let _ = self.refetch.send(());
    }

    /// Detiene la observación. Consumir el handle lo suelta y `Drop` aborta
    /// la tarea del intervalo; no se publican más estados.
    pub fn stop(self) {}
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
