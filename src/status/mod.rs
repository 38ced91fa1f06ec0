//! Observación del estado de ejecuciones: polling periódico y resúmenes del
//! dashboard.
mod poller;
mod summary;

use async_trait::async_trait;
use extract_core::{FlowRun, RunId};

use crate::errors::Result;

pub use poller::{PollHandle, PollState, RunQuery, StatusPoller, FETCH_ERROR_MESSAGE};
pub use summary::{flow_history, last_run_time, DashboardSummary, StatusCounts, RECENT_RUNS_LIMIT};

/// Origen de ejecuciones consultado por el poller.
#[async_trait]
pub trait RunsSource: Send + Sync {
    /// Todas las ejecuciones, la más reciente primero.
    async fn fetch_runs(&self) -> Result<Vec<FlowRun>>;
    async fn fetch_run(&self, run_id: &RunId) -> Result<Option<FlowRun>>;
}
