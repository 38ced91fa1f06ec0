//! extract-adapters: implementaciones estáticas de los puertos del core.
//!
//! - `StaticFlowCatalog`: los tres flujos de demostración.
//! - `MockDatasets`: filas extraídas por flujo y por categoría.
//! - `standard_category_tree`: taxonomía de dos niveles de la vista.
pub mod catalog;
pub mod datasets;
pub mod tree;

pub use catalog::StaticFlowCatalog;
pub use datasets::MockDatasets;
pub use tree::standard_category_tree;
