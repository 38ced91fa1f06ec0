//! Conjuntos de datos de demostración.
//!
//! Dos fuentes: filas por flujo (`extracted`) y filas por hoja del árbol de
//! categorías (`category`), indexadas por etiquetas `level1` / `level2`.
use extract_core::DatasetSource;
use extract_domain::{record, CategorySelection, Record};
use indexmap::IndexMap;

type CategoryData = IndexMap<String, IndexMap<String, Vec<Record>>>;

#[derive(Debug, Clone)]
pub struct MockDatasets {
    by_flow: IndexMap<String, Vec<Record>>,
    by_category: CategoryData,
}

impl MockDatasets {
    pub fn new() -> Self {
        Self { by_flow: flow_rows(),
               by_category: category_rows() }
    }

    /// Fuente vacía a la que se le cargan filas a mano.
    pub fn empty() -> Self {
        Self { by_flow: IndexMap::new(),
               by_category: IndexMap::new() }
    }

    pub fn with_flow_rows(mut self, flow_id: impl Into<String>, rows: Vec<Record>) -> Self {
        self.by_flow.insert(flow_id.into(), rows);
        self
    }

    pub fn with_category_rows(mut self, level1: impl Into<String>, level2: impl Into<String>, rows: Vec<Record>) -> Self {
        self.by_category
            .entry(level1.into())
            .or_default()
            .insert(level2.into(), rows);
        self
    }
}

impl Default for MockDatasets {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetSource for MockDatasets {
    fn extracted(&self, flow_id: &str) -> Vec<Record> {
        self.by_flow.get(flow_id).cloned().unwrap_or_default()
    }

    fn category(&self, selection: &CategorySelection) -> Option<Vec<Record>> {
        self.by_category
            .get(&selection.level1)
            .and_then(|l2| l2.get(&selection.level2))
            .cloned()
    }
}

fn flow_rows() -> IndexMap<String, Vec<Record>> {
    let mut m = IndexMap::new();
    m.insert("flow-1".to_string(),
             vec![record! { "id" => 1, "name" => "John Doe", "email" => "john@example.com", "segment" => "Premium", "lastPurchase" => "2023-05-15", "totalSpent" => 1250 },
                  record! { "id" => 2, "name" => "Jane Smith", "email" => "jane@example.com", "segment" => "Standard", "lastPurchase" => "2023-06-20", "totalSpent" => 450 },
                  record! { "id" => 3, "name" => "Robert Johnson", "email" => "robert@example.com", "segment" => "Premium", "lastPurchase" => "2023-04-10", "totalSpent" => 2800 }]);
    m.insert("flow-2".to_string(),
             vec![record! { "id" => 1, "date" => "2023-05-01", "product" => "Product A", "quantity" => 120, "revenue" => 5400, "region" => "North America" },
                  record! { "id" => 2, "date" => "2023-05-15", "product" => "Product B", "quantity" => 85, "revenue" => 4250, "region" => "Europe" },
                  record! { "id" => 3, "date" => "2023-06-01", "product" => "Product C", "quantity" => 200, "revenue" => 8000, "region" => "Asia" }]);
    m.insert("flow-3".to_string(),
             vec![record! { "id" => 1, "product" => "Widget X", "category" => "Electronics", "warehouse" => "North", "quantity" => 532, "reorderPoint" => 100 },
                  record! { "id" => 2, "product" => "Widget Y", "category" => "Home Goods", "warehouse" => "South", "quantity" => 350, "reorderPoint" => 75 },
                  record! { "id" => 3, "product" => "Widget Z", "category" => "Office Supplies", "warehouse" => "East", "quantity" => 125, "reorderPoint" => 50 }]);
    m
}

fn category_rows() -> CategoryData {
    let mut sales = IndexMap::new();
    sales.insert("Quarterly Reports".to_string(),
                 vec![record! { "id" => 1, "reportName" => "Q1 2023", "revenue" => 125000, "growth" => "5.2%", "topProduct" => "Product A" },
                      record! { "id" => 2, "reportName" => "Q2 2023", "revenue" => 142000, "growth" => "13.6%", "topProduct" => "Product B" },
                      record! { "id" => 3, "reportName" => "Q3 2023", "revenue" => 138000, "growth" => "-2.8%", "topProduct" => "Product A" }]);
    sales.insert("Annual Reports".to_string(),
                 vec![record! { "id" => 1, "reportName" => "Annual 2022", "revenue" => 510000, "growth" => "12.1%", "departments" => 5, "highlights" => "Regional expansion" },
                      record! { "id" => 2, "reportName" => "Annual 2021", "revenue" => 455000, "growth" => "8.3%", "departments" => 4, "highlights" => "New product line" }]);
    sales.insert("Sales Forecasts".to_string(),
                 vec![record! { "id" => 1, "quarter" => "Q4 2023", "projectedRevenue" => 150000, "confidence" => "85%", "keyFactors" => "Holiday season" },
                      record! { "id" => 2, "quarter" => "Q1 2024", "projectedRevenue" => 130000, "confidence" => "72%", "keyFactors" => "New product launch" }]);

    let mut customers = IndexMap::new();
    customers.insert("Customer Profiles".to_string(),
                     vec![record! { "id" => 1, "segment" => "Enterprise", "avgSpend" => 75000, "retention" => "92%", "growthOpportunity" => "Upselling" },
                          record! { "id" => 2, "segment" => "SMB", "avgSpend" => 12000, "retention" => "78%", "growthOpportunity" => "Service packages" },
                          record! { "id" => 3, "segment" => "Startup", "avgSpend" => 3000, "retention" => "65%", "growthOpportunity" => "Education" }]);
    customers.insert("Demographics".to_string(),
                     vec![record! { "id" => 1, "region" => "North America", "customers" => 1200, "avgAge" => 42, "topIndustry" => "Technology" },
                          record! { "id" => 2, "region" => "Europe", "customers" => 850, "avgAge" => 39, "topIndustry" => "Finance" },
                          record! { "id" => 3, "region" => "Asia", "customers" => 650, "avgAge" => 35, "topIndustry" => "Manufacturing" }]);
    customers.insert("Customer Feedback".to_string(),
                     vec![record! { "id" => 1, "source" => "Survey", "sentiment" => "Positive", "score" => 4.2, "topRequest" => "Mobile features" },
                          record! { "id" => 2, "source" => "Support tickets", "sentiment" => "Neutral", "score" => 3.1, "topRequest" => "Documentation" },
                          record! { "id" => 3, "source" => "Social media", "sentiment" => "Mixed", "score" => 3.8, "topRequest" => "Integrations" }]);

    let mut products = IndexMap::new();
    products.insert("Inventory Status".to_string(),
                    vec![record! { "id" => 1, "product" => "Product A", "stock" => 521, "reorderPoint" => 100, "supplier" => "Supplier X" },
                         record! { "id" => 2, "product" => "Product B", "stock" => 283, "reorderPoint" => 75, "supplier" => "Supplier Y" },
                         record! { "id" => 3, "product" => "Product C", "stock" => 56, "reorderPoint" => 50, "supplier" => "Supplier Z" }]);
    products.insert("Product Performance".to_string(),
                    vec![record! { "id" => 1, "product" => "Product A", "monthlySales" => 320, "returns" => "2.1%", "satisfaction" => "94%" },
                         record! { "id" => 2, "product" => "Product B", "monthlySales" => 150, "returns" => "4.5%", "satisfaction" => "87%" },
                         record! { "id" => 3, "product" => "Product C", "monthlySales" => 90, "returns" => "1.2%", "satisfaction" => "96%" }]);
    products.insert("Product Lifecycle".to_string(),
                    vec![record! { "id" => 1, "product" => "Product A", "stage" => "Maturity", "monthsActive" => 18, "nextAction" => "Feature enhancement" },
                         record! { "id" => 2, "product" => "Product B", "stage" => "Growth", "monthsActive" => 8, "nextAction" => "Market expansion" },
                         record! { "id" => 3, "product" => "Product D", "stage" => "Introduction", "monthsActive" => 2, "nextAction" => "User feedback" }]);

    let mut all = IndexMap::new();
    all.insert("Sales Data".to_string(), sales);
    all.insert("Customer Data".to_string(), customers);
    all.insert("Product Data".to_string(), products);
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_flow_has_three_rows() {
        let ds = MockDatasets::new();
        for id in ["flow-1", "flow-2", "flow-3"] {
            assert_eq!(ds.extracted(id).len(), 3, "flow {id}");
        }
        assert!(ds.extracted("flow-9").is_empty());
    }

    #[test]
    fn category_lookup_is_by_labels() {
        let ds = MockDatasets::new();
        let rows = ds.category(&CategorySelection::new("Sales Data", "Annual Reports")).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(ds.category(&CategorySelection::new("Sales Data", "Nope")).is_none());
    }
}
