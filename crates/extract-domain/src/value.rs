//! Valores escalares de un campo de registro.
//!
//! Los registros extraídos no tienen esquema: cada campo guarda un
//! `FieldValue` etiquetado (texto, número, fecha o booleano). Las reglas de
//! coerción usadas por filtros y orden viven aquí para que ambos motores
//! compartan la misma semántica.
use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Formato canónico de fechas (`2023-05-15`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Valor escalar tipado.
///
/// En JSON se (de)serializa sin etiqueta; el orden de variantes importa: un
/// string con forma de fecha se lee como `Date`, cualquier otro como `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerción numérica: números tal cual, booleanos 0/1, fechas como días
    /// desde la era común y textos numéricos parseados.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            FieldValue::Date(d) => Some(d.num_days_from_ce() as f64),
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
            }
        }
    }

    /// Igualdad usada por `equals`.
    ///
    /// Estricta entre variantes (el texto `"450"` no iguala al número 450),
    /// salvo fecha contra texto con forma de fecha: JSON produce `Date` y los
    /// constructores `Text` para el mismo string.
    pub fn loosely_equals(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Date(a), FieldValue::Text(t)) | (FieldValue::Text(t), FieldValue::Date(a)) => {
                parse_date(t).is_some_and(|b| *a == b)
            }
            (a, b) => a == b,
        }
    }

    /// Comparación relajada usada por `gt` / `lt`.
    ///
    /// Mismo tipo compara de forma nativa; fecha contra texto parsea el
    /// texto como fecha; número contra texto numérico compara como números.
    /// Cualquier otra mezcla no es comparable (`None`).
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        use FieldValue::*;
        match (self, other) {
            (Number(a), Number(b)) => a.partial_cmp(b),
            (Text(a), Text(b)) => Some(a.cmp(b)),
            (Date(a), Date(b)) => Some(a.cmp(b)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Date(a), Text(t)) => parse_date(t).map(|b| a.cmp(&b)),
            (Text(t), Date(b)) => parse_date(t).map(|a| a.cmp(b)),
            (Date(_), _) | (_, Date(_)) => None,
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x.partial_cmp(&y),
                _ => None,
            },
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Boolean(b) => write!(f, "{b}"),
            FieldValue::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            // enteros sin ".0", como los muestra la vista
            FieldValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            FieldValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Number(v as f64)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Number(v as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Number(v as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Boolean(v)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        FieldValue::Date(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_display_without_trailing_zero() {
        assert_eq!(FieldValue::from(1250).to_string(), "1250");
        assert_eq!(FieldValue::from(4.2).to_string(), "4.2");
    }

    #[test]
    fn json_strings_shaped_like_dates_become_dates() {
        let v: FieldValue = serde_json::from_str("\"2023-05-15\"").unwrap();
        assert!(matches!(v, FieldValue::Date(_)));
        let t: FieldValue = serde_json::from_str("\"Premium\"").unwrap();
        assert_eq!(t, FieldValue::from("Premium"));
        let n: FieldValue = serde_json::from_str("120").unwrap();
        assert_eq!(n, FieldValue::Number(120.0));
    }

    #[test]
    fn compare_coerces_numeric_text_against_numbers() {
        let field = FieldValue::from(1250);
        assert_eq!(field.compare(&FieldValue::from("1000")), Some(Ordering::Greater));
        assert_eq!(field.compare(&FieldValue::from("abc")), None);
    }

    #[test]
    fn dates_equal_their_date_shaped_text() {
        let decoded: FieldValue = serde_json::from_str("\"2023-05-15\"").unwrap();
        let built = FieldValue::from("2023-05-15");
        assert!(decoded.loosely_equals(&built));
        assert!(built.loosely_equals(&decoded));
        assert!(!decoded.loosely_equals(&FieldValue::from("2023-05-16")));
        assert!(!decoded.loosely_equals(&FieldValue::from("mayo")));
        assert!(!FieldValue::from("450").loosely_equals(&FieldValue::from(450)));
    }

    #[test]
    fn compare_dates_against_date_text() {
        let d = FieldValue::Date(NaiveDate::from_ymd_opt(2023, 5, 15).unwrap());
        assert_eq!(d.compare(&FieldValue::from("2023-06-01")), Some(Ordering::Less));
        assert_eq!(d.compare(&FieldValue::from(3)), None);
    }

    #[test]
    fn as_number_rejects_blank_and_nan_text() {
        assert_eq!(FieldValue::from("  ").as_number(), None);
        assert_eq!(FieldValue::from("NaN").as_number(), None);
        assert_eq!(FieldValue::from(" 15 ").as_number(), Some(15.0));
        assert_eq!(FieldValue::from(true).as_number(), Some(1.0));
    }
}
