//! Ciclo de vida completo de ejecuciones sobre el catálogo de demostración.
use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use extract_adapters::StaticFlowCatalog;
use extract_core::{CoreEngineError, ManualClock, RandomProgress, RunEngine, RunEventKind, RunStatus,
                   ScriptedProgress, TickOutcome};
use extract_domain::{ParamValue, ParameterValues};

fn catalog() -> Arc<StaticFlowCatalog> {
    Arc::new(StaticFlowCatalog::new())
}

#[test]
fn scripted_run_completes_with_single_terminal_event() {
    let engine = RunEngine::builder(catalog()).progress(ScriptedProgress::new([15; 7], [true]))
                                              .build();
    let mut params = ParameterValues::new();
    params.insert("param-2".into(), ParamValue::from("Premium"));
    let run = engine.trigger("flow-1", params.clone()).unwrap();
    assert_eq!(run.parameters, params);

    let done = engine.run_to_completion(&run.id).unwrap();
    assert_eq!(done.status, RunStatus::Completed);
    assert_eq!(done.progress, Some(100));
    assert!(done.end_time.is_some());
    assert!(done.error.is_none());

    let events = engine.events_for(&run.id);
    assert!(matches!(events[0].kind, RunEventKind::RunTriggered { ref flow_id } if flow_id == "flow-1"));
    assert_eq!(events.iter().filter(|e| e.kind.is_terminal()).count(), 1);
    assert!(events.last().unwrap().kind.is_terminal());
    // 6 ticks intermedios + 1 terminal + disparo
    assert_eq!(events.len(), 8);

    let progress: Vec<u8> = events.iter()
                                  .filter_map(|e| match e.kind {
                                      RunEventKind::ProgressAdvanced { progress } => Some(progress),
                                      _ => None,
                                  })
                                  .collect();
    assert!(progress.windows(2).all(|w| w[0] <= w[1]), "progress must be monotonic: {progress:?}");
}

#[test]
fn failed_run_carries_error_message() {
    let engine = RunEngine::builder(catalog()).progress(ScriptedProgress::new([60, 60], [false]))
                                              .build();
    let run = engine.trigger("flow-3", ParameterValues::new()).unwrap();
    let done = engine.run_to_completion(&run.id).unwrap();
    assert_eq!(done.status, RunStatus::Failed);
    assert_eq!(done.error.as_deref(), Some("Simulated random failure"));
    assert_eq!(engine.tick(&run.id), TickOutcome::Stopped);
}

#[test]
fn unknown_flow_is_rejected() {
    let engine = RunEngine::new(catalog());
    assert_eq!(engine.trigger("flow-404", ParameterValues::new()).unwrap_err(),
               CoreEngineError::FlowNotFound("flow-404".into()));
}

#[test]
fn ids_stay_distinct_within_one_millisecond() {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()));
    let engine = RunEngine::builder(catalog()).clock(clock.clone()).build();
    let ids: HashSet<String> = (0..200).map(|_| engine.trigger("flow-2", ParameterValues::new()).unwrap().id.to_string())
                                       .collect();
    assert_eq!(ids.len(), 200);
    assert_eq!(engine.list_runs().len(), 200);
}

#[test]
fn list_is_newest_first() {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()));
    let engine = RunEngine::builder(catalog()).clock(clock.clone()).build();
    let first = engine.trigger("flow-1", ParameterValues::new()).unwrap();
    clock.advance(Duration::seconds(5));
    let second = engine.trigger("flow-2", ParameterValues::new()).unwrap();
    let listed: Vec<_> = engine.list_runs().into_iter().map(|r| r.id).collect();
    assert_eq!(listed, vec![second.id, first.id]);
}

#[test]
fn removed_run_stops_without_terminal_event() {
    let engine = RunEngine::builder(catalog()).progress(ScriptedProgress::new([10, 10], [true]))
                                              .build();
    let run = engine.trigger("flow-1", ParameterValues::new()).unwrap();
    assert!(matches!(engine.tick(&run.id), TickOutcome::Advanced(_)));
    engine.repository().remove(&run.id);
    assert_eq!(engine.tick(&run.id), TickOutcome::Stopped);
    assert!(!engine.events_for(&run.id).iter().any(|e| e.kind.is_terminal()));
}

#[test]
fn random_progress_completes_about_ninety_percent() {
    let engine = RunEngine::builder(catalog()).progress(RandomProgress::seeded(2024)).build();
    let total = 1000;
    let mut completed = 0;
    for _ in 0..total {
        let run = engine.trigger("flow-1", ParameterValues::new()).unwrap();
        let done = engine.run_to_completion(&run.id).unwrap();
        let ticks = engine.events_for(&run.id).len() - 1;
        // incrementos en [5,15]: entre 7 y 20 ticks
        assert!((7..=20).contains(&ticks), "unexpected tick count {ticks}");
        if done.status == RunStatus::Completed {
            completed += 1;
        }
    }
    let ratio = completed as f64 / total as f64;
    assert!((0.85..=0.95).contains(&ratio), "completion ratio {ratio}");
}
