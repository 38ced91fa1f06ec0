//! Errores específicos del core de ejecuciones.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreEngineError {
    #[error("flow not found: {0}")] FlowNotFound(String),
    #[error("run not found: {0}")] RunNotFound(String),
    #[error("run already terminal: {0}")] RunAlreadyTerminal(String),
    #[error("duplicate run id: {0}")] DuplicateRunId(String),
    #[error("internal: {0}")] Internal(String),
}
