//! extract-domain: modelo de datos del dashboard de extracción.
//!
//! Contiene los tipos que viajan entre el catálogo, el motor de ejecuciones y
//! la vista de datos:
//! - `Flow` / `FlowParameter` y el formulario de parámetros.
//! - `Record` + `FieldValue`: filas sin esquema con valores escalares tipados.
//! - Motores puros de la grilla: filtros, orden y columnas inferidas.
//! - Árbol de categorías de dos niveles y su selección.
pub mod category;
pub mod columns;
pub mod error;
pub mod filter;
pub mod flow;
pub mod record;
pub mod sort;
pub mod value;

pub use category::{CategoryNode, CategorySelection, CategoryTree, LEVEL1_FIELD, LEVEL2_FIELD};
pub use columns::{humanize_key, infer_columns, CellFormatter, Column, MISSING_CELL};
pub use error::DomainError;
pub use filter::{apply_filters, DataFilter, FilterOperator};
pub use flow::{Flow, FlowParameter, ParamValue, ParameterForm, ParameterType, ParameterValues};
pub use record::Record;
pub use sort::{compare_field_values, SortDirection, SortState};
pub use value::FieldValue;
