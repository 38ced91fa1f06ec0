use extract_core::CoreEngineError;
use extract_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error interno: {0}")]
    Internal(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error del motor de ejecuciones: {0}")]
    Engine(#[from] CoreEngineError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_variant_format() {
        let err = CoreError::Internal("algo malo".into());
        assert_eq!(err.to_string(), "Error interno: algo malo");
    }

    #[test]
    fn test_io_variant_from() {
        let io_err = std::io::Error::other("falló IO");
        let err: CoreError = io_err.into();
        assert_eq!(err.to_string(), "Error en IO: falló IO");
    }

    #[test]
    fn test_config_variant_format() {
        let err = CoreError::Config("CHAT_ENDPOINT vacío".into());
        assert_eq!(err.to_string(), "Error de configuración: CHAT_ENDPOINT vacío");
    }

    #[test]
    fn test_engine_variant_from() {
        let err: CoreError = CoreEngineError::FlowNotFound("flow-9".into()).into();
        assert_eq!(err.to_string(), "Error del motor de ejecuciones: flow not found: flow-9");
    }
}
