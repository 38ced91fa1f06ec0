//! ExtractFlow Rust Library
//!
//! Capa de aplicación del dashboard de extracción:
//! - `config`: configuración desde entorno (.env) y tiempos de simulación.
//! - `errors`: errores de núcleo y dominio.
//! - `backend`: API simulada (catálogo, disparo, ejecuciones, datos).
//! - `status`: polling de ejecuciones y resúmenes del dashboard.
//! - `chat`: asistente (HTTP o respuestas locales).
//! - `notifications`: avisos de disparo y cierre de ejecuciones.
//! - `viewer`: estado de la vista de datos y selector de categorías.

pub mod backend;
pub mod chat;
pub mod config;
pub mod errors;
pub mod notifications;
pub mod status;
pub mod viewer;

pub use backend::SimulatedApi;
pub use config::{AppConfig, CONFIG};
pub use errors::{CoreError, DomainError};

#[cfg(test)]
mod tests {
	use super::errors::{core_error::CoreError, domain_error::DomainError};

	#[test]
	fn core_error_tests() {
		let i = CoreError::Internal("fallo".into()).to_string();
		assert_eq!(i, "Error interno: fallo");
	}

	#[test]
	fn domain_error_tests() {
		let d = DomainError::Validation("x".into()).to_string();
		assert_eq!(d, "Validación fallida: x");
	}
}
