//! Tipos de evento de ejecución y estructura `RunEvent`.
//!
//! Rol en el flujo:
//! - El `RunEngine` emite un evento por cada transición de una ejecución, lo
//!   guarda en un `EventStore` append-only y lo publica en el canal en vivo.
//! - Toda ejecución tiene exactamente un evento terminal (`RunCompleted` o
//!   `RunFailed`), siempre el último de su historial.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::run::RunId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RunEventKind {
    /// Primer evento de toda ejecución.
    #[serde(rename_all = "camelCase")]
    RunTriggered { flow_id: String },
    /// Tick no terminal.
    ProgressAdvanced { progress: u8 },
    RunCompleted { progress: u8 },
    RunFailed { error: String },
}

impl RunEventKind {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunEventKind::RunCompleted { .. } | RunEventKind::RunFailed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunEvent {
    pub seq: u64, // por ejecución, en orden de append
    pub run_id: RunId,
    pub kind: RunEventKind,
    pub ts: DateTime<Utc>,
}
