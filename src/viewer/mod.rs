//! Estado de la vista de datos: selección de flujo, filtros, orden, columnas
//! y selector de categorías.
mod category;
mod data;

pub use category::CategorySelector;
pub use data::{DataViewer, FilterField};
