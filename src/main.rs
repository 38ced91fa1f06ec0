//! Demo de consola: dispara flujos, sigue su progreso por polling, explora
//! datos y conversa con el asistente.
//!
//! `--fast` elimina latencias y acelera los ticks.
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use extract_adapters::standard_category_tree;
use extract_domain::{DataFilter, ParameterForm};
use extractflow_rust::chat::{backend_from_config, ChatSession, CHAT_FAILURE_MESSAGE};
use extractflow_rust::config::{LatencyProfile, SimulationConfig, CONFIG};
use extractflow_rust::notifications::{spawn_notifier, LogSink};
use extractflow_rust::status::{DashboardSummary, PollState, RunQuery, StatusPoller};
use extractflow_rust::viewer::{CategorySelector, DataViewer};
use extractflow_rust::{CoreError, SimulatedApi};

fn simulation_settings(fast: bool) -> SimulationConfig {
    if fast {
        SimulationConfig { tick_interval: Duration::from_millis(100),
                           poll_interval: Duration::from_millis(200),
                           latency: LatencyProfile::instant() }
    } else {
        CONFIG.simulation
    }
}

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    tracing_subscriber::registry().with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
                                  .with(tracing_subscriber::fmt::layer())
                                  .init();

    let fast = std::env::args().any(|a| a == "--fast");
    let sim = simulation_settings(fast);
    let api = Arc::new(SimulatedApi::demo(&sim));
    let notifier = spawn_notifier(Arc::clone(api.engine()), Arc::new(LogSink));

    // Catálogo y disparos
    let flows = api.get_flows().await;
    for flow in &flows {
        tracing::info!("flow {}: {} ({} parameters)", flow.id, flow.name, flow.parameters.len());
    }

    let customer = api.get_flow("flow-1")
                      .await
                      .ok_or_else(|| CoreError::Internal("flow-1 missing from catalog".into()))?;
    let mut form = ParameterForm::new(&customer);
    form.set("param-2", "Premium")?;
    let first = api.trigger_flow(&customer.id, form.submit()?).await?;

    let sales = api.get_flow("flow-2")
                   .await
                   .ok_or_else(|| CoreError::Internal("flow-2 missing from catalog".into()))?;
    let mut form = ParameterForm::new(&sales);
    if let Err(e) = form.submit() {
        tracing::warn!("sales form rejected: {e}");
    }
    form.set_input("param-1", "2023-05-01")?;
    form.set_input("param-2", "2023-06-30")?;
    let second = api.trigger_flow(&sales.id, form.submit()?).await?;

    // Seguimiento por polling hasta que ambas terminen
    let poller = StatusPoller::new(api.clone()).with_interval(sim.poll_interval);
    let mut handle = poller.watch(RunQuery::from_ids(vec![first.id.clone(), second.id.clone()]));
    while handle.changed().await {
        match handle.state() {
            PollState::Loading => {}
            PollState::Error(message) => tracing::warn!("{message}"),
            PollState::Data(runs) => {
                for run in &runs {
                    tracing::info!("{} {} {}%", run.id, run.status, run.progress.unwrap_or(0));
                }
                if runs.iter().all(|r| r.is_terminal()) {
                    break;
                }
            }
        }
    }
    handle.stop();

    let summary = DashboardSummary::from_runs(&api.get_flow_runs().await);
    tracing::info!("summary: {}", serde_json::to_string(&summary.counts).unwrap_or_default());

    // Vista de datos
    let mut viewer = DataViewer::load(Arc::clone(&api)).await;
    viewer.select_flow("flow-2").await?;
    viewer.apply_filters(vec![DataFilter::between("revenue", "4000,6000")]).await;
    viewer.toggle_sort("revenue");
    viewer.toggle_sort("revenue");
    let header: Vec<&str> = viewer.columns().iter().map(|c| c.label.as_str()).collect();
    tracing::info!("{}", header.join(" | "));
    for row in viewer.render() {
        tracing::info!("{}", row.join(" | "));
    }

    let mut selector = CategorySelector::new(standard_category_tree());
    let mut selections = selector.subscribe();
    selector.toggle_level1("customers");
    selector.select_level2("customers", "feedback");
    if viewer.follow_category(&mut selections).await {
        tracing::info!("category {:?}: {} rows", viewer.category(), viewer.records().len());
    }

    // Asistente
    let mut chat = ChatSession::new(Arc::from(backend_from_config(&CONFIG.chat)));
    match chat.send("How do filters work?").await {
        Ok(Some(reply)) => tracing::info!("assistant: {}", reply.answer),
        Ok(None) => {}
        Err(e) => tracing::warn!("{CHAT_FAILURE_MESSAGE} ({e})"),
    }

    notifier.abort();
    Ok(())
}
