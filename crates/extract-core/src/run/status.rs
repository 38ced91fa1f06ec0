use std::fmt;

use serde::{Deserialize, Serialize};

/// Estado de una ejecución.
///
/// Las transiciones válidas son:
/// - `InProgress` -> `Completed`
/// - `InProgress` -> `Failed`
///
/// Los estados terminales no cambian nunca más.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    /// La ejecución sigue avanzando.
    InProgress,
    /// Terminó correctamente.
    Completed,
    /// Terminó con error.
    Failed,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::InProgress)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::InProgress => "inProgress",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
