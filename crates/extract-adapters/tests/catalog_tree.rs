use extract_adapters::{standard_category_tree, MockDatasets};
use extract_core::DatasetSource;

#[test]
fn every_tree_leaf_has_a_dataset() {
    let tree = standard_category_tree();
    let ds = MockDatasets::new();
    assert_eq!(tree.roots.len(), 3);
    for l1 in &tree.roots {
        assert_eq!(l1.children.len(), 3);
        for l2 in &l1.children {
            let sel = tree.resolve(&l1.id, &l2.id);
            let rows = ds.category(&sel);
            assert!(rows.map(|r| !r.is_empty()).unwrap_or(false),
                    "leaf {}/{} has no rows", sel.level1, sel.level2);
        }
    }
}

#[test]
fn custom_rows_override_demo_data() {
    let ds = MockDatasets::empty().with_flow_rows("flow-x", vec![extract_domain::record! { "id" => 1 }]);
    assert_eq!(ds.extracted("flow-x").len(), 1);
    assert!(ds.extracted("flow-1").is_empty());
}
