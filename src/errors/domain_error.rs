//! Los errores de dominio viven en `extract-domain`; se re-exportan aquí
//! para que la aplicación los importe desde un solo lugar.
pub use extract_domain::DomainError;
