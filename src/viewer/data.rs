//! Vista de datos extraídos.
//!
//! Al cargarse elige el primer flujo del catálogo y trae sus filas. Cada
//! consulta recalcula las columnas desde el primer registro; el orden se
//! aplica sobre una copia al leer `rows`. Una selección de categoría
//! reemplaza los filtros genéricos vigentes y viceversa.
use std::sync::Arc;

use log::debug;
use serde::Serialize;
use tokio::sync::watch;

use extract_domain::{infer_columns, CategorySelection, Column, DataFilter, DomainError, Flow, Record, SortState};

use crate::backend::SimulatedApi;
use crate::errors::Result;

/// Campo ofrecido en la barra de filtros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterField {
    pub id: String,
    pub label: String,
}

pub struct DataViewer {
    api: Arc<SimulatedApi>,
    flows: Vec<Flow>,
    selected_flow: Option<String>,
    records: Vec<Record>,
    columns: Vec<Column>,
    filters: Vec<DataFilter>,
    category: Option<CategorySelection>,
    sort: SortState,
}

impl DataViewer {
    /// Carga el catálogo y, si hay flujos, los datos del primero.
    pub async fn load(api: Arc<SimulatedApi>) -> Self {
        let flows = api.get_flows().await;
        let mut viewer = Self { api,
                                selected_flow: flows.first().map(|f| f.id.clone()),
                                flows,
                                records: Vec::new(),
                                columns: Vec::new(),
                                filters: Vec::new(),
                                category: None,
                                sort: SortState::new() };
        viewer.refresh().await;
        viewer
    }

    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    pub fn selected_flow(&self) -> Option<&str> {
        self.selected_flow.as_deref()
    }

    /// Cambia de flujo y trae sus filas sin filtros.
    pub async fn select_flow(&mut self, flow_id: &str) -> Result<()> {
        if !self.flows.iter().any(|f| f.id == flow_id) {
            return Err(DomainError::NotFound(format!("flow {flow_id}")).into());
        }
        self.selected_flow = Some(flow_id.to_string());
        self.filters.clear();
        self.category = None;
        self.refresh().await;
        Ok(())
    }

    /// Aplica filtros genéricos; descarta la selección de categoría.
    pub async fn apply_filters(&mut self, filters: Vec<DataFilter>) {
        self.category = None;
        self.filters = filters;
        self.refresh().await;
    }

    /// Alcance por categoría; descarta los filtros genéricos.
    pub async fn select_category(&mut self, selection: CategorySelection) {
        self.filters = selection.to_filters();
        self.category = Some(selection);
        self.refresh().await;
    }

    /// Espera la próxima selección publicada y la aplica. `false` si el
    /// selector dejó de existir.
    pub async fn follow_category(&mut self, selections: &mut watch::Receiver<Option<CategorySelection>>) -> bool {
        if selections.changed().await.is_err() {
            return false;
        }
        let next = selections.borrow_and_update().clone();
        if let Some(selection) = next {
            self.select_category(selection).await;
        }
        true
    }

    pub fn toggle_sort(&mut self, column: &str) {
        if self.columns.iter().any(|c| c.id == column && c.sortable) {
            self.sort.toggle(column);
        }
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn category(&self) -> Option<&CategorySelection> {
        self.category.as_ref()
    }

    pub fn filters(&self) -> &[DataFilter] {
        &self.filters
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn filter_fields(&self) -> Vec<FilterField> {
        self.columns
            .iter()
            .map(|c| FilterField { id: c.id.clone(),
                                   label: c.label.clone() })
            .collect()
    }

    /// Filas tal como llegaron.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Filas en el orden vigente.
    pub fn rows(&self) -> Vec<Record> {
        self.sort.apply(&self.records)
    }

    /// Celdas de texto en el orden vigente.
    pub fn render(&self) -> Vec<Vec<String>> {
        self.rows()
            .iter()
            .map(|r| self.columns.iter().map(|c| c.render(r)).collect())
            .collect()
    }

    async fn refresh(&mut self) {
        let Some(flow_id) = self.selected_flow.clone() else {
            return;
        };
        self.records = self.api.get_extracted_data(&flow_id, &self.filters).await;
        self.columns = infer_columns(&self.records);
        debug!("viewer loaded {} rows, {} columns for {flow_id}", self.records.len(), self.columns.len());
    }
}
