//! Constantes de la simulación de ejecuciones.
//!
//! Agrupa los valores que fijan el ritmo y el resultado de las ejecuciones
//! simuladas. Los tests deterministas las usan para calcular cuántos ticks
//! necesita una ejecución.

/// Intervalo entre ticks de progreso.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_500;

/// Incremento mínimo por tick (inclusive).
pub const PROGRESS_INCREMENT_MIN: u8 = 5;

/// Incremento máximo por tick (inclusive).
pub const PROGRESS_INCREMENT_MAX: u8 = 15;

/// Progreso terminal.
pub const PROGRESS_COMPLETE: u8 = 100;

/// Probabilidad de terminar en `completed` al llegar a 100.
pub const SUCCESS_PROBABILITY: f64 = 0.9;

/// Texto de error de una falla simulada.
pub const SIMULATED_FAILURE_MESSAGE: &str = "Simulated random failure";

/// Capacidad del canal de eventos en vivo.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;
