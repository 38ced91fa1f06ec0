//! Registro de una ejecución y la transición de progreso.
//!
//! Rol en el flujo:
//! - `FlowRun::start` crea el registro inicial (`inProgress`, progreso 0).
//! - `FlowRun::advance` es la transición pura de un tick: recibe el registro
//!   vigente y devuelve el siguiente completo, que el engine reemplaza de una
//!   sola vez en el repositorio.
use std::fmt;

use chrono::{DateTime, Utc};
use extract_domain::ParameterValues;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{PROGRESS_COMPLETE, SIMULATED_FAILURE_MESSAGE};
use crate::errors::CoreEngineError;
use crate::progress::ProgressSource;
use crate::run::RunStatus;

/// Identificador de ejecución: `run-<millis>-<sufijo aleatorio>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Genera un id a partir del instante y 32 bits aleatorios. El sufijo
    /// separa ids creados en el mismo milisegundo; el engine igualmente
    /// regenera si el repositorio ya lo conoce.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("run-{}-{}", now.timestamp_millis(), &suffix[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RunId {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for RunId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowRun {
    pub id: RunId,
    pub flow_id: String,
    pub status: RunStatus,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub parameters: ParameterValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

impl FlowRun {
    /// Registro inicial de una ejecución recién disparada.
    pub fn start(id: RunId, flow_id: impl Into<String>, parameters: ParameterValues, now: DateTime<Utc>) -> Self {
        Self { id,
               flow_id: flow_id.into(),
               status: RunStatus::InProgress,
               start_time: now,
               end_time: None,
               parameters,
               error: None,
               progress: Some(0) }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Progreso efectivo (un registro sin progreso cuenta como 0).
    pub fn progress_or_zero(&self) -> u8 {
        self.progress.unwrap_or(0)
    }

    /// Calcula el registro siguiente a un tick.
    ///
    /// Suma el incremento (acotado a 100). Al llegar a 100 decide el estado
    /// terminal con `source`, fija `end_time` y, si falla, el mensaje de
    /// error. Un registro terminal no admite más ticks.
    pub fn advance(&self, source: &mut dyn ProgressSource, now: DateTime<Utc>) -> Result<FlowRun, CoreEngineError> {
        if self.is_terminal() {
            return Err(CoreEngineError::RunAlreadyTerminal(self.id.to_string()));
        }
        let mut next = self.clone();
        let progress = self.progress_or_zero()
                           .saturating_add(source.increment())
                           .min(PROGRESS_COMPLETE);
        next.progress = Some(progress);
        if progress >= PROGRESS_COMPLETE {
            if source.succeeds() {
                next.status = RunStatus::Completed;
            } else {
                next.status = RunStatus::Failed;
                next.error = Some(SIMULATED_FAILURE_MESSAGE.to_string());
            }
            next.end_time = Some(now);
        }
        Ok(next)
    }

    /// Verifica que `next` sea un reemplazo válido de este registro:
    /// misma ejecución, sin retroceso de progreso y sin tocar terminales.
    pub fn check_replacement(&self, next: &FlowRun) -> Result<(), CoreEngineError> {
        if self.id != next.id {
            return Err(CoreEngineError::Internal(format!("replacement id mismatch: {} vs {}", self.id, next.id)));
        }
        if self.is_terminal() {
            return Err(CoreEngineError::RunAlreadyTerminal(self.id.to_string()));
        }
        if next.progress_or_zero() < self.progress_or_zero() {
            return Err(CoreEngineError::Internal(format!("progress regression on {}", self.id)));
        }
        Ok(())
    }
}
