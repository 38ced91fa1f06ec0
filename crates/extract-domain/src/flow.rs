//! Definición de flujos de extracción y su formulario de parámetros.
//!
//! Un `Flow` es una plantilla inmutable del catálogo. Cada disparo construye
//! un `ParameterValues` nuevo, pre-cargado con los valores por defecto.
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value::DATE_FORMAT;

/// Mensaje de validación para parámetros requeridos sin valor.
pub const REQUIRED_MESSAGE: &str = "This field is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Text,
    Number,
    Date,
    Select,
}

/// Valor escalar de un parámetro (texto o número).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl ParamValue {
    fn is_blank(&self) -> bool {
        matches!(self, ParamValue::Text(s) if s.trim().is_empty())
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Number(v as f64)
    }
}

/// Mapa id de parámetro → valor, en orden de declaración.
pub type ParameterValues = IndexMap<String, ParamValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowParameter {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParameterType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ParamValue>,
}

impl FlowParameter {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ParameterType) -> Self {
        Self { id: id.into(),
               name: name.into(),
               kind,
               options: None,
               required: false,
               default: None }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_default(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Plantilla de extracción del catálogo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub parameters: Vec<FlowParameter>,
}

impl Flow {
    pub fn parameter(&self, id: &str) -> Option<&FlowParameter> {
        self.parameters.iter().find(|p| p.id == id)
    }

    /// Valores por defecto declarados (sólo los parámetros que tienen uno).
    pub fn default_values(&self) -> ParameterValues {
        self.parameters
            .iter()
            .filter_map(|p| p.default.clone().map(|d| (p.id.clone(), d)))
            .collect()
    }
}

/// Estado del formulario de disparo de un flujo.
///
/// Arranca con los defaults del flujo; `submit` valida los requeridos y, si
/// todo está completo, devuelve el mapa listo para disparar.
#[derive(Debug, Clone)]
pub struct ParameterForm<'a> {
    flow: &'a Flow,
    values: ParameterValues,
    errors: IndexMap<String, String>,
}

impl<'a> ParameterForm<'a> {
    pub fn new(flow: &'a Flow) -> Self {
        Self { flow,
               values: flow.default_values(),
               errors: IndexMap::new() }
    }

    pub fn flow(&self) -> &Flow {
        self.flow
    }

    pub fn values(&self) -> &ParameterValues {
        &self.values
    }

    pub fn errors(&self) -> &IndexMap<String, String> {
        &self.errors
    }

    /// Fija un valor. Un valor no vacío limpia el error del campo.
    pub fn set(&mut self, id: &str, value: impl Into<ParamValue>) -> Result<(), DomainError> {
        if self.flow.parameter(id).is_none() {
            return Err(DomainError::NotFound(format!("parameter {id}")));
        }
        let value = value.into();
        if !value.is_blank() {
            self.errors.shift_remove(id);
        }
        self.values.insert(id.to_string(), value);
        Ok(())
    }

    /// Fija un valor desde texto crudo del input, según el tipo declarado.
    ///
    /// Números se parsean; texto vacío borra el valor.
    pub fn set_input(&mut self, id: &str, raw: &str) -> Result<(), DomainError> {
        let param = self.flow
                        .parameter(id)
                        .ok_or_else(|| DomainError::NotFound(format!("parameter {id}")))?;
        if raw.trim().is_empty() {
            self.values.shift_remove(id);
            return Ok(());
        }
        let value = match param.kind {
            ParameterType::Number => {
                let n = raw.trim()
                           .parse::<f64>()
                           .map_err(|e| DomainError::InvalidValue { field: id.to_string(),
                                                                    reason: e.to_string() })?;
                ParamValue::Number(n)
            }
            ParameterType::Date => {
                let d = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
                    .map_err(|e| DomainError::InvalidValue { field: id.to_string(),
                                                             reason: e.to_string() })?;
                ParamValue::Text(d.format(DATE_FORMAT).to_string())
            }
            ParameterType::Text | ParameterType::Select => ParamValue::Text(raw.to_string()),
        };
        self.set(id, value)
    }

    pub fn set_date(&mut self, id: &str, date: NaiveDate) -> Result<(), DomainError> {
        self.set(id, date.format(DATE_FORMAT).to_string())
    }

    /// Valida requeridos. El número 0 cuenta como valor presente.
    pub fn submit(&mut self) -> Result<ParameterValues, DomainError> {
        self.errors = self.flow
                          .parameters
                          .iter()
                          .filter(|p| p.required)
                          .filter(|p| self.values.get(&p.id).map(ParamValue::is_blank).unwrap_or(true))
                          .map(|p| (p.id.clone(), REQUIRED_MESSAGE.to_string()))
                          .collect();
        if self.errors.is_empty() {
            Ok(self.values.clone())
        } else {
            let missing: Vec<&str> = self.errors.keys().map(String::as_str).collect();
            Err(DomainError::Validation(format!("parámetros requeridos sin valor: {}", missing.join(", "))))
        }
    }
}
