//! Registro extraído: mapa ordenado campo → `FieldValue`.
//!
//! El orden de inserción se conserva porque la inferencia de columnas toma
//! las claves del primer registro tal como llegan.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, FieldValue>);

impl Record {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Inserta (o reemplaza) un campo conservando su posición original.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Variante encadenable de `insert`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Construye un `Record` a partir de pares `campo => valor`.
///
/// ```
/// use extract_domain::record;
/// let r = record! { "id" => 1, "name" => "John Doe" };
/// assert_eq!(r.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    ($($field:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut r = $crate::Record::new();
        $( r.insert($field, $value); )*
        r
    }};
}
