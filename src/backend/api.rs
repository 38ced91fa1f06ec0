//! Fachada async que emula la API remota del dashboard.
//!
//! Cada operación espera su latencia simulada y delega en el catálogo, el
//! motor de ejecuciones o la fuente de datos. `trigger_flow` no bloquea:
//! lanza el ticker de la ejecución y devuelve el registro inicial.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};

use extract_adapters::{MockDatasets, StaticFlowCatalog};
use extract_core::{DatasetSource, FlowRun, RunEngine, RunId};
use extract_domain::{apply_filters, CategorySelection, DataFilter, Flow, ParameterValues, Record};

use crate::config::{LatencyProfile, SimulationConfig};
use crate::errors::Result;
use crate::status::RunsSource;

pub struct SimulatedApi {
    engine: Arc<RunEngine>,
    datasets: Arc<dyn DatasetSource>,
    latency: LatencyProfile,
}

impl SimulatedApi {
    pub fn new(engine: Arc<RunEngine>, datasets: Arc<dyn DatasetSource>) -> Self {
        Self { engine,
               datasets,
               latency: LatencyProfile::default() }
    }

    /// Catálogo y datos de demostración con los tiempos de `sim`.
    pub fn demo(sim: &SimulationConfig) -> Self {
        let engine = RunEngine::builder(Arc::new(StaticFlowCatalog::new())).tick_interval(sim.tick_interval)
                                                                           .build();
        Self::new(Arc::new(engine), Arc::new(MockDatasets::new())).with_latency(sim.latency)
    }

    pub fn with_latency(mut self, latency: LatencyProfile) -> Self {
        self.latency = latency;
        self
    }

    pub fn engine(&self) -> &Arc<RunEngine> {
        &self.engine
    }

    pub async fn get_flows(&self) -> Vec<Flow> {
        pause(self.latency.get_flows).await;
        self.engine.catalog().flows()
    }

    pub async fn get_flow(&self, id: &str) -> Option<Flow> {
        pause(self.latency.get_flow).await;
        self.engine.catalog().get_flow(id)
    }

    /// Dispara el flujo y arranca su progreso en segundo plano.
    pub async fn trigger_flow(&self, flow_id: &str, parameters: ParameterValues) -> Result<FlowRun> {
        pause(self.latency.trigger).await;
        let run = self.engine.launch(flow_id, parameters)?;
        info!("triggered flow {flow_id} with parameters {}", serde_json::to_string(&run.parameters).unwrap_or_default());
        Ok(run)
    }

    /// Todas las ejecuciones, la más reciente primero.
    pub async fn get_flow_runs(&self) -> Vec<FlowRun> {
        pause(self.latency.list_runs).await;
        self.engine.list_runs()
    }

    pub async fn get_flow_run(&self, run_id: &RunId) -> Option<FlowRun> {
        pause(self.latency.get_run).await;
        self.engine.get_run(run_id)
    }

    /// Datos extraídos de un flujo.
    ///
    /// Si los filtros traen una selección de categoría completa, se ignora el
    /// flujo y se devuelven las filas de esa hoja (vacío si no existe). Si
    /// no, se filtran las filas del flujo; un flujo desconocido no tiene
    /// filas.
    pub async fn get_extracted_data(&self, flow_id: &str, filters: &[DataFilter]) -> Vec<Record> {
        pause(self.latency.extracted_data).await;
        if let Some(selection) = CategorySelection::from_filters(filters) {
            debug!("category query {} / {}", selection.level1, selection.level2);
            return self.datasets.category(&selection).unwrap_or_default();
        }
        let rows = self.datasets.extracted(flow_id);
        if filters.is_empty() {
            rows
        } else {
            apply_filters(&rows, filters)
        }
    }
}

async fn pause(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[async_trait]
impl RunsSource for SimulatedApi {
    async fn fetch_runs(&self) -> Result<Vec<FlowRun>> {
        Ok(self.get_flow_runs().await)
    }

    async fn fetch_run(&self, run_id: &RunId) -> Result<Option<FlowRun>> {
        Ok(self.get_flow_run(run_id).await)
    }
}
