use thiserror::Error;

/// Errores del dominio (catálogo, formularios y valores).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Entidad no encontrada: {0}")]
    NotFound(String),
    #[error("Validación fallida: {0}")]
    Validation(String),
    #[error("Valor inválido para '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_variant_format() {
        let err = DomainError::NotFound("flow-9".into());
        assert_eq!(err.to_string(), "Entidad no encontrada: flow-9");
    }

    #[test]
    fn test_invalid_value_variant_format() {
        let err = DomainError::InvalidValue { field: "param-3".into(),
                                              reason: "not a number".into() };
        assert_eq!(err.to_string(), "Valor inválido para 'param-3': not a number");
    }
}
