//! Vista de datos sobre la API simulada sin latencias.
use std::sync::Arc;

use extract_adapters::{standard_category_tree, MockDatasets, StaticFlowCatalog};
use extract_core::RunEngine;
use extract_domain::{CategorySelection, DataFilter, FieldValue, SortDirection};
use extractflow_rust::config::LatencyProfile;
use extractflow_rust::viewer::{CategorySelector, DataViewer};
use extractflow_rust::{CoreError, SimulatedApi};

fn api() -> Arc<SimulatedApi> {
    let engine = RunEngine::new(Arc::new(StaticFlowCatalog::new()));
    Arc::new(SimulatedApi::new(Arc::new(engine), Arc::new(MockDatasets::new())).with_latency(LatencyProfile::instant()))
}

fn column_text(viewer: &DataViewer, column: &str) -> Vec<String> {
    let idx = viewer.columns().iter().position(|c| c.id == column).unwrap();
    viewer.render().into_iter().map(|row| row[idx].clone()).collect()
}

#[tokio::test]
async fn loads_first_flow_with_inferred_columns() {
    let viewer = DataViewer::load(api()).await;
    assert_eq!(viewer.selected_flow(), Some("flow-1"));
    assert_eq!(viewer.records().len(), 3);
    let labels: Vec<&str> = viewer.columns().iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Id", "Name", "Email", "Segment", "Last Purchase", "Total Spent"]);
    assert_eq!(viewer.filter_fields()[4].id, "lastPurchase");
}

#[tokio::test]
async fn sort_cycles_and_restores_fetch_order() {
    let mut viewer = DataViewer::load(api()).await;
    let original = column_text(&viewer, "totalSpent");
    viewer.toggle_sort("totalSpent");
    assert_eq!(column_text(&viewer, "totalSpent"), vec!["450", "1250", "2800"]);
    viewer.toggle_sort("totalSpent");
    assert_eq!(viewer.sort_state().direction_of("totalSpent"), Some(SortDirection::Descending));
    assert_eq!(column_text(&viewer, "totalSpent"), vec!["2800", "1250", "450"]);
    viewer.toggle_sort("totalSpent");
    assert_eq!(column_text(&viewer, "totalSpent"), original);
}

#[tokio::test]
async fn filters_and_categories_replace_each_other() {
    let mut viewer = DataViewer::load(api()).await;
    viewer.select_flow("flow-3").await.unwrap();
    viewer.apply_filters(vec![DataFilter::contains("category", "GOODS")]).await;
    assert_eq!(viewer.records().len(), 1);
    assert_eq!(viewer.records()[0].get("product"), Some(&FieldValue::from("Widget Y")));

    viewer.select_category(CategorySelection::new("Sales Data", "Sales Forecasts")).await;
    assert_eq!(viewer.records().len(), 2);
    assert_eq!(viewer.columns()[2].label, "Projected Revenue");
    assert_eq!(viewer.filters().len(), 2);

    viewer.apply_filters(vec![DataFilter::between("quantity", "100,400")]).await;
    assert!(viewer.category().is_none());
    assert_eq!(viewer.records().len(), 2);
}

#[tokio::test]
async fn selector_drives_the_viewer() {
    let mut viewer = DataViewer::load(api()).await;
    let mut selector = CategorySelector::new(standard_category_tree());
    let mut rx = selector.subscribe();

    selector.toggle_level1("sales");
    selector.select_level2("sales", "quarterly");
    assert!(viewer.follow_category(&mut rx).await);
    assert_eq!(viewer.category(), Some(&CategorySelection::new("Sales Data", "Quarterly Reports")));
    assert_eq!(viewer.records().len(), 3);

    drop(selector);
    assert!(!viewer.follow_category(&mut rx).await);
}

#[tokio::test]
async fn unknown_flow_selection_is_rejected() {
    let mut viewer = DataViewer::load(api()).await;
    let err = viewer.select_flow("flow-404").await.unwrap_err();
    assert!(matches!(err, CoreError::Domain(_)));
    assert_eq!(viewer.selected_flow(), Some("flow-1"));
}
