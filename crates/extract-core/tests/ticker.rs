//! Ticker en segundo plano con tiempo de tokio pausado.
use std::sync::Arc;
use std::time::Duration;

use extract_adapters::StaticFlowCatalog;
use extract_core::{RunEngine, RunEventKind, RunStatus, ScriptedProgress};
use extract_domain::ParameterValues;

fn engine(progress: ScriptedProgress) -> Arc<RunEngine> {
    Arc::new(RunEngine::builder(Arc::new(StaticFlowCatalog::new())).progress(progress)
                                                                   .tick_interval(Duration::from_millis(1500))
                                                                   .build())
}

#[tokio::test(start_paused = true)]
async fn first_tick_waits_one_interval() {
    let engine = engine(ScriptedProgress::new([25, 25, 25, 25], [true]));
    let run = engine.launch("flow-1", ParameterValues::new()).unwrap();

    tokio::time::sleep(Duration::from_millis(1400)).await;
    assert_eq!(engine.get_run(&run.id).unwrap().progress, Some(0));

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(engine.get_run(&run.id).unwrap().progress, Some(25));
}

#[tokio::test(start_paused = true)]
async fn ticker_finishes_and_stops() {
    let engine = engine(ScriptedProgress::new([50, 50], [false]));
    let mut rx = engine.subscribe();
    let run = engine.trigger("flow-2", ParameterValues::new()).unwrap();
    let handle = engine.spawn_ticker(run.id.clone());

    tokio::time::sleep(Duration::from_millis(3100)).await;
    handle.await.unwrap();

    let done = engine.get_run(&run.id).unwrap();
    assert_eq!(done.status, RunStatus::Failed);

    let mut kinds = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        kinds.push(ev.kind);
    }
    assert!(matches!(kinds.last(), Some(RunEventKind::RunFailed { .. })));
    assert_eq!(kinds.iter().filter(|k| k.is_terminal()).count(), 1);
}

#[tokio::test(start_paused = true)]
async fn ticker_ends_when_run_is_removed() {
    let engine = engine(ScriptedProgress::new([10; 10], [true]));
    let run = engine.trigger("flow-3", ParameterValues::new()).unwrap();
    let handle = engine.spawn_ticker(run.id.clone());

    tokio::time::sleep(Duration::from_millis(1600)).await;
    engine.repository().remove(&run.id);
    tokio::time::sleep(Duration::from_millis(1600)).await;

    assert!(handle.is_finished());
    assert!(engine.get_run(&run.id).is_none());
}
