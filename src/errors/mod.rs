//! Errores de la aplicación.
pub mod core_error;
pub mod domain_error;

pub use core_error::{CoreError, Result};
pub use domain_error::DomainError;
