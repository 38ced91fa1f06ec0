//! Puertos hacia las fuentes de datos estáticas: catálogo de flujos y
//! conjuntos de datos extraídos. Las implementaciones viven en
//! `extract-adapters`.
use extract_domain::{CategorySelection, Flow, Record};

pub trait FlowCatalog: Send + Sync {
    /// Flujos en orden de catálogo.
    fn flows(&self) -> Vec<Flow>;

    fn get_flow(&self, id: &str) -> Option<Flow> {
        self.flows().into_iter().find(|f| f.id == id)
    }
}

pub trait DatasetSource: Send + Sync {
    /// Registros extraídos de un flujo (vacío si el flujo no tiene datos).
    fn extracted(&self, flow_id: &str) -> Vec<Record>;
    /// Registros del nodo hoja de una selección, si existe.
    fn category(&self, selection: &CategorySelection) -> Option<Vec<Record>>;
}
