//! Inferencia de columnas a partir del primer registro.
//!
//! Es una heurística, no un esquema: sólo se miran las claves del primer
//! registro. Registros con otra forma muestran `-` en los campos que no
//! tengan.
use crate::record::Record;
use crate::value::FieldValue;

/// Texto de celda para campos ausentes o vacíos.
pub const MISSING_CELL: &str = "-";

/// Formateador opcional de celda.
pub type CellFormatter = fn(Option<&FieldValue>) -> String;

#[derive(Debug, Clone)]
pub struct Column {
    pub id: String,
    pub label: String,
    pub sortable: bool,
    pub formatter: Option<CellFormatter>,
}

impl Column {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(),
               label: label.into(),
               sortable: true,
               formatter: None }
    }

    pub fn with_formatter(mut self, formatter: CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Texto de la celda de este registro.
    pub fn render(&self, record: &Record) -> String {
        let value = record.get(&self.id);
        if let Some(format) = self.formatter {
            return format(value);
        }
        match value.map(|v| v.to_string()) {
            Some(text) if !text.is_empty() => text,
            _ => MISSING_CELL.to_string(),
        }
    }
}

/// Deriva columnas de las claves del primer registro (todas ordenables).
pub fn infer_columns(records: &[Record]) -> Vec<Column> {
    match records.first() {
        Some(first) => first.keys().map(|k| Column::new(k, humanize_key(k))).collect(),
        None => Vec::new(),
    }
}

/// `lastPurchase` -> `Last Purchase`.
///
/// Primera letra a mayúscula y un espacio antes de cada mayúscula interna.
pub fn humanize_key(key: &str) -> String {
    let mut chars = key.chars();
    let mut label = String::with_capacity(key.len() + 4);
    if let Some(first) = chars.next() {
        label.extend(first.to_uppercase());
    }
    for c in chars {
        if c.is_uppercase() {
            label.push(' ');
        }
        label.push(c);
    }
    label
}
