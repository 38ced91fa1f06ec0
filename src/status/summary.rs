//! Resúmenes derivados del conjunto de ejecuciones observado.
use chrono::{DateTime, Utc};
use serde::Serialize;

use extract_core::{FlowRun, RunStatus};

/// Cantidad de ejecuciones recientes del dashboard y del historial por flujo.
pub const RECENT_RUNS_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub in_progress: usize,
    pub completed: usize,
    pub failed: usize,
    pub total: usize,
}

impl StatusCounts {
    pub fn from_runs(runs: &[FlowRun]) -> Self {
        runs.iter().fold(Self::default(), |mut acc, run| {
                        match run.status {
                            RunStatus::InProgress => acc.in_progress += 1,
                            RunStatus::Completed => acc.completed += 1,
                            RunStatus::Failed => acc.failed += 1,
                        }
                        acc.total += 1;
                        acc
                    })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub counts: StatusCounts,
    pub recent: Vec<FlowRun>,
}

impl DashboardSummary {
    /// Conteos y las `RECENT_RUNS_LIMIT` ejecuciones más recientes.
    pub fn from_runs(runs: &[FlowRun]) -> Self {
        let mut recent = runs.to_vec();
        recent.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        recent.truncate(RECENT_RUNS_LIMIT);
        Self { counts: StatusCounts::from_runs(runs),
               recent }
    }
}

/// Ejecuciones de un flujo, en el orden recibido, hasta `limit`.
pub fn flow_history(runs: &[FlowRun], flow_id: &str, limit: usize) -> Vec<FlowRun> {
    runs.iter()
        .filter(|r| r.flow_id == flow_id)
        .take(limit)
        .cloned()
        .collect()
}

/// Inicio de la ejecución más reciente del flujo.
pub fn last_run_time(runs: &[FlowRun], flow_id: &str) -> Option<DateTime<Utc>> {
    runs.iter()
        .filter(|r| r.flow_id == flow_id)
        .map(|r| r.start_time)
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use extract_domain::ParameterValues;

    fn run(id: &str, flow: &str, status: RunStatus, minutes_ago: i64) -> FlowRun {
        let mut r = FlowRun::start(id.into(), flow, ParameterValues::new(), Utc::now() - Duration::minutes(minutes_ago));
        r.status = status;
        r
    }

    #[test]
    fn counts_every_status() {
        let runs = vec![run("a", "flow-1", RunStatus::InProgress, 1),
                        run("b", "flow-1", RunStatus::Completed, 2),
                        run("c", "flow-2", RunStatus::Failed, 3),
                        run("d", "flow-2", RunStatus::Completed, 4)];
        assert_eq!(StatusCounts::from_runs(&runs),
                   StatusCounts { in_progress: 1,
                                  completed: 2,
                                  failed: 1,
                                  total: 4 });
    }

    #[test]
    fn recent_keeps_five_newest() {
        let runs: Vec<FlowRun> = (0..8).map(|i| run(&format!("r{i}"), "flow-1", RunStatus::Completed, i)).collect();
        let summary = DashboardSummary::from_runs(&runs);
        let ids: Vec<String> = summary.recent.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["r0", "r1", "r2", "r3", "r4"]);
    }

    #[test]
    fn history_is_per_flow() {
        let runs = vec![run("a", "flow-1", RunStatus::Completed, 1),
                        run("b", "flow-2", RunStatus::Completed, 2),
                        run("c", "flow-1", RunStatus::Failed, 3)];
        assert_eq!(flow_history(&runs, "flow-1", RECENT_RUNS_LIMIT).len(), 2);
        assert_eq!(last_run_time(&runs, "flow-1"), Some(runs[0].start_time));
        assert_eq!(last_run_time(&runs, "flow-3"), None);
    }
}
