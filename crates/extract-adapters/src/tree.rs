use extract_domain::{CategoryNode, CategoryTree};

/// Taxonomía de la vista: tres dominios con tres subdominios cada uno. Las
/// etiquetas coinciden con las claves de `MockDatasets`.
pub fn standard_category_tree() -> CategoryTree {
    CategoryTree::new(vec![CategoryNode::branch("sales",
                                                "Sales Data",
                                                vec![CategoryNode::leaf("quarterly", "Quarterly Reports"),
                                                     CategoryNode::leaf("annual", "Annual Reports"),
                                                     CategoryNode::leaf("forecasts", "Sales Forecasts")]),
                           CategoryNode::branch("customers",
                                                "Customer Data",
                                                vec![CategoryNode::leaf("profiles", "Customer Profiles"),
                                                     CategoryNode::leaf("demographics", "Demographics"),
                                                     CategoryNode::leaf("feedback", "Customer Feedback")]),
                           CategoryNode::branch("products",
                                                "Product Data",
                                                vec![CategoryNode::leaf("inventory", "Inventory Status"),
                                                     CategoryNode::leaf("performance", "Product Performance"),
                                                     CategoryNode::leaf("lifecycle", "Product Lifecycle")])])
}
