//! Orden tri-estado por columna.
//!
//! Sólo hay una columna activa. Repetir la misma columna cicla
//! `sin orden -> ascendente -> descendente -> sin orden`; otra columna arranca
//! siempre en ascendente y descarta el estado anterior.
//!
//! Comparación:
//! - texto contra texto: orden tipo locale (sin distinguir mayúsculas, y a
//!   igualdad la minúscula primero);
//! - el resto: resta numérica sobre el valor coercionado (número, booleano
//!   0/1, fecha en días).
//!
//! Caso borde (equivalente al NaN de la resta): los registros sin el campo
//! no son ordenables y quedan al final, en su orden original, en ambas
//! direcciones. En columnas mixtas los textos van después de los números en
//! ascendente (antes en descendente), así el orden sigue siendo total. Un
//! texto numérico como `"10"` se ordena como texto, sin coerción. El orden
//! es estable.
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::value::FieldValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

/// Estado de orden de la grilla: a lo sumo una columna activa.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(String, SortDirection)>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aplica un "click" sobre la cabecera `column`.
    pub fn toggle(&mut self, column: &str) {
        self.active = match self.active.take() {
            Some((current, SortDirection::Ascending)) if current == column => {
                Some((current, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == column => None,
            _ => Some((column.to_string(), SortDirection::Ascending)),
        };
    }

    pub fn column(&self) -> Option<&str> {
        self.active.as_ref().map(|(c, _)| c.as_str())
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.active.as_ref().map(|(_, d)| *d)
    }

    /// Dirección vigente para `column` (para el icono de cabecera).
    pub fn direction_of(&self, column: &str) -> Option<SortDirection> {
        match &self.active {
            Some((c, d)) if c == column => Some(*d),
            _ => None,
        }
    }

    /// Devuelve una copia ordenada; el slice de entrada no se modifica.
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        let mut sorted = records.to_vec();
        if let Some((column, direction)) = &self.active {
            sorted.sort_by(|a, b| compare_records(a, b, column, *direction));
        }
        sorted
    }
}

fn compare_records(a: &Record, b: &Record, column: &str, direction: SortDirection) -> Ordering {
    let (va, vb) = (a.get(column), b.get(column));
    match (va, vb) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => match direction {
            SortDirection::Ascending => compare_field_values(x, y),
            SortDirection::Descending => compare_field_values(y, x),
        },
    }
}

/// Clave de orden total derivada de un valor presente.
enum SortKey<'a> {
    Number(f64),
    Text(&'a str),
}

fn sort_key(v: &FieldValue) -> SortKey<'_> {
    match v {
        FieldValue::Text(s) => SortKey::Text(s),
        // as_number sólo falla para textos, ya cubiertos arriba
        other => SortKey::Number(other.as_number().unwrap_or(0.0)),
    }
}

/// Comparación ascendente de dos valores presentes.
pub fn compare_field_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (sort_key(a), sort_key(b)) {
        (SortKey::Text(x), SortKey::Text(y)) => locale_compare(x, y),
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(&y),
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
    }
}

fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
     .cmp(&b.to_lowercase())
     .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    fn column(records: &[Record], field: &str) -> Vec<String> {
        records.iter()
               .map(|r| r.get(field).map(|v| v.to_string()).unwrap_or_else(|| "-".into()))
               .collect()
    }

    #[test]
    fn toggle_cycles_through_three_states() {
        let mut s = SortState::new();
        s.toggle("name");
        assert_eq!(s.direction_of("name"), Some(SortDirection::Ascending));
        s.toggle("name");
        assert_eq!(s.direction_of("name"), Some(SortDirection::Descending));
        s.toggle("name");
        assert_eq!(s.column(), None);
    }

    #[test]
    fn other_column_restarts_ascending() {
        let mut s = SortState::new();
        s.toggle("name");
        s.toggle("name");
        s.toggle("revenue");
        assert_eq!(s.column(), Some("revenue"));
        assert_eq!(s.direction(), Some(SortDirection::Ascending));
        assert_eq!(s.direction_of("name"), None);
    }

    #[test]
    fn text_uses_case_insensitive_order() {
        let rows = vec![record! { "p" => "banana" }, record! { "p" => "Apple" }, record! { "p" => "cherry" }];
        let mut s = SortState::new();
        s.toggle("p");
        assert_eq!(column(&s.apply(&rows), "p"), vec!["Apple", "banana", "cherry"]);
        s.toggle("p");
        assert_eq!(column(&s.apply(&rows), "p"), vec!["cherry", "banana", "Apple"]);
    }

    #[test]
    fn numbers_sort_numerically_and_input_is_untouched() {
        let rows = vec![record! { "q" => 120 }, record! { "q" => 85 }, record! { "q" => 200 }];
        let mut s = SortState::new();
        s.toggle("q");
        let sorted = s.apply(&rows);
        assert_eq!(column(&sorted, "q"), vec!["85", "120", "200"]);
        assert_eq!(column(&rows, "q"), vec!["120", "85", "200"]);
    }

    #[test]
    fn mixed_columns_put_numbers_before_text_ascending() {
        let rows = vec![record! { "id" => 1, "v" => "beta" },
                        record! { "id" => 2, "v" => 30 },
                        record! { "id" => 3, "v" => "10" },
                        record! { "id" => 4, "v" => 5 },
                        record! { "id" => 5 }];
        let mut s = SortState::new();
        s.toggle("v");
        assert_eq!(column(&s.apply(&rows), "id"), vec!["4", "2", "3", "1", "5"]);
        s.toggle("v");
        assert_eq!(column(&s.apply(&rows), "id"), vec!["1", "3", "2", "4", "5"]);
    }

    #[test]
    fn missing_values_stay_last_in_input_order() {
        let rows = vec![record! { "id" => 1 },
                        record! { "id" => 2, "q" => 5 },
                        record! { "id" => 3 },
                        record! { "id" => 4, "q" => 1 }];
        let mut s = SortState::new();
        s.toggle("q");
        assert_eq!(column(&s.apply(&rows), "id"), vec!["4", "2", "1", "3"]);
        s.toggle("q");
        assert_eq!(column(&s.apply(&rows), "id"), vec!["2", "4", "1", "3"]);
    }
}
