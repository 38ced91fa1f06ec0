//! Catálogo fijo de flujos de extracción.
use extract_core::FlowCatalog;
use extract_domain::{Flow, FlowParameter, ParameterType};
use once_cell::sync::Lazy;

static FLOWS: Lazy<Vec<Flow>> = Lazy::new(|| {
    vec![Flow { id: "flow-1".into(),
                name: "Customer Data Extraction".into(),
                description: "Extract customer data from the CRM system".into(),
                parameters: vec![FlowParameter::new("param-1", "Date Range", ParameterType::Select)
                                     .required()
                                     .with_options(["Last 7 days", "Last 30 days", "Last 90 days", "Custom"])
                                     .with_default("Last 30 days"),
                                 FlowParameter::new("param-2", "Customer Segment", ParameterType::Select)
                                     .required()
                                     .with_options(["All", "Premium", "Standard", "Basic"])
                                     .with_default("All"),
                                 FlowParameter::new("param-3", "Include Deleted", ParameterType::Select)
                                     .with_options(["Yes", "No"])
                                     .with_default("No")] },
         Flow { id: "flow-2".into(),
                name: "Sales Analytics Extraction".into(),
                description: "Extract sales data for analytics".into(),
                parameters: vec![FlowParameter::new("param-1", "Start Date", ParameterType::Date).required(),
                                 FlowParameter::new("param-2", "End Date", ParameterType::Date).required(),
                                 FlowParameter::new("param-3", "Region", ParameterType::Select)
                                     .required()
                                     .with_options(["Global", "North America", "Europe", "Asia", "Other"])
                                     .with_default("Global")] },
         Flow { id: "flow-3".into(),
                name: "Inventory Analysis".into(),
                description: "Extract and analyze inventory data".into(),
                parameters: vec![FlowParameter::new("param-1", "Warehouse", ParameterType::Select)
                                     .required()
                                     .with_options(["All", "North", "South", "East", "West"])
                                     .with_default("All"),
                                 FlowParameter::new("param-2", "Product Category", ParameterType::Text),
                                 FlowParameter::new("param-3", "Min Stock Level", ParameterType::Number)] }]
});

/// Catálogo en memoria. Por defecto contiene los flujos de demostración;
/// `with_flows` permite catálogos propios (tests, otros despliegues).
#[derive(Debug, Clone)]
pub struct StaticFlowCatalog {
    flows: Vec<Flow>,
}

impl StaticFlowCatalog {
    pub fn new() -> Self {
        Self { flows: FLOWS.clone() }
    }

    pub fn with_flows(flows: Vec<Flow>) -> Self {
        Self { flows }
    }
}

impl Default for StaticFlowCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowCatalog for StaticFlowCatalog {
    fn flows(&self) -> Vec<Flow> {
        self.flows.clone()
    }

    fn get_flow(&self, id: &str) -> Option<Flow> {
        self.flows.iter().find(|f| f.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_has_three_flows_in_order() {
        let c = StaticFlowCatalog::new();
        let ids: Vec<String> = c.flows().into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["flow-1", "flow-2", "flow-3"]);
        assert!(c.get_flow("flow-9").is_none());
    }

    #[test]
    fn sales_flow_requires_dates_without_defaults() {
        let flow = StaticFlowCatalog::new().get_flow("flow-2").unwrap();
        let start = flow.parameter("param-1").unwrap();
        assert!(start.required);
        assert_eq!(start.kind, ParameterType::Date);
        assert!(start.default.is_none());
        assert_eq!(flow.default_values().len(), 1);
    }
}
