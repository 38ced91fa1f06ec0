//! Motor de filtros de la grilla.
//!
//! `apply_filters` devuelve los registros que cumplen TODOS los filtros
//! (conjunción). Es una función pura: mismo input, mismo output, y el orden de
//! los filtros no altera el resultado.
//!
//! Tolerancia: un `between` con rango mal formado y un operador desconocido
//! se evalúan como "pasa". Es la conducta heredada de la vista; una
//! validación más estricta debería hacerse al construir el filtro, no aquí.
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::is_scope_field;
use crate::record::Record;
use crate::value::FieldValue;

/// Operadores soportados por la barra de filtros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Equals,
    Contains,
    Gt,
    Lt,
    Between,
    /// Cualquier nombre no reconocido. Siempre coincide.
    #[serde(other)]
    Unknown,
}

impl FilterOperator {
    /// Operadores ofrecidos en la barra de filtros, en orden de menú.
    pub const ALL: [FilterOperator; 5] = [FilterOperator::Equals,
                                          FilterOperator::Contains,
                                          FilterOperator::Gt,
                                          FilterOperator::Lt,
                                          FilterOperator::Between];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::Contains => "contains",
            FilterOperator::Gt => "gt",
            FilterOperator::Lt => "lt",
            FilterOperator::Between => "between",
            FilterOperator::Unknown => "unknown",
        }
    }

    /// Etiqueta legible para el menú.
    pub fn label(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "Equals",
            FilterOperator::Contains => "Contains",
            FilterOperator::Gt => "Greater Than",
            FilterOperator::Lt => "Less Than",
            FilterOperator::Between => "Between",
            FilterOperator::Unknown => "Unknown",
        }
    }
}

impl FromStr for FilterOperator {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "equals" => FilterOperator::Equals,
            "contains" => FilterOperator::Contains,
            "gt" => FilterOperator::Gt,
            "lt" => FilterOperator::Lt,
            "between" => FilterOperator::Between,
            _ => FilterOperator::Unknown,
        })
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicado campo/operador/valor. Efímero: se construye por consulta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFilter {
    pub field: String,
    pub operator: FilterOperator,
    pub value: FieldValue,
}

impl DataFilter {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<FieldValue>) -> Self {
        Self { field: field.into(),
               operator,
               value: value.into() }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, FilterOperator::Equals, value)
    }

    pub fn contains(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, FilterOperator::Contains, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, FilterOperator::Gt, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, FilterOperator::Lt, value)
    }

    pub fn between(field: impl Into<String>, range: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Between, FieldValue::Text(range.into()))
    }

    /// Evalúa el filtro contra un registro.
    ///
    /// Los campos de alcance jerárquico (`level1`/`level2`) se ignoran: la
    /// capa de consulta los consume antes de llegar aquí.
    pub fn matches(&self, record: &Record) -> bool {
        if is_scope_field(&self.field) {
            return true;
        }
        let field = record.get(&self.field);
        match self.operator {
            FilterOperator::Equals => field.is_some_and(|v| v.loosely_equals(&self.value)),
            FilterOperator::Contains => {
                let needle = self.value.to_string().to_lowercase();
                field.map(|v| v.to_string().to_lowercase().contains(&needle))
                     .unwrap_or(false)
            }
            FilterOperator::Gt => field.and_then(|v| v.compare(&self.value)) == Some(Ordering::Greater),
            FilterOperator::Lt => field.and_then(|v| v.compare(&self.value)) == Some(Ordering::Less),
            FilterOperator::Between => match parse_range(&self.value) {
                None => true,
                Some((min, max)) => field.and_then(FieldValue::as_number)
                                         .map(|n| min <= n && n <= max)
                                         .unwrap_or(false),
            },
            FilterOperator::Unknown => true,
        }
    }
}

/// Parsea un rango `"min,max"`. Componentes extra se ignoran.
fn parse_range(value: &FieldValue) -> Option<(f64, f64)> {
    let text = value.as_text()?;
    let mut parts = text.split(',');
    let min = parse_bound(parts.next()?)?;
    let max = parse_bound(parts.next()?)?;
    Some((min, max))
}

fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Devuelve (copiados) los registros que cumplen todos los filtros.
pub fn apply_filters(records: &[Record], filters: &[DataFilter]) -> Vec<Record> {
    records.iter()
           .filter(|r| filters.iter().all(|f| f.matches(r)))
           .cloned()
           .collect()
}
