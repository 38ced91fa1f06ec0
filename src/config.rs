//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
//!
//! Sólo el endpoint del chat sale del entorno (`CHAT_ENDPOINT`). Los tiempos
//! de la simulación (tick, polling, latencias) son ajustes programáticos con
//! defaults; los tests los reemplazan construyendo su propio `AppConfig`.
use std::env;
use std::time::Duration;

use log::warn;
use once_cell::sync::Lazy;
use reqwest::Url;

use crate::errors::{CoreError, Result};
use extract_core::constants::DEFAULT_TICK_INTERVAL_MS;

pub const CHAT_ENDPOINT_VAR: &str = "CHAT_ENDPOINT";
pub const DEFAULT_CHAT_ENDPOINT: &str = "http://localhost:9999/query";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3_000;

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub chat: ChatConfig,
    pub simulation: SimulationConfig,
}

/// Backend de respuestas del asistente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatBackendKind {
    /// POST JSON al endpoint configurado.
    #[default]
    Http,
    /// Respuestas locales por palabra clave.
    Canned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub endpoint: String,
    pub backend: ChatBackendKind,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
               backend: ChatBackendKind::default() }
    }
}

/// Latencias simuladas de cada operación de la API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub get_flows: Duration,
    pub get_flow: Duration,
    pub trigger: Duration,
    pub list_runs: Duration,
    pub get_run: Duration,
    pub extracted_data: Duration,
}

impl LatencyProfile {
    /// Sin esperas (tests y demo rápida).
    pub const fn instant() -> Self {
        Self { get_flows: Duration::ZERO,
               get_flow: Duration::ZERO,
               trigger: Duration::ZERO,
               list_runs: Duration::ZERO,
               get_run: Duration::ZERO,
               extracted_data: Duration::ZERO }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self { get_flows: Duration::from_millis(500),
               get_flow: Duration::from_millis(300),
               trigger: Duration::from_millis(1_000),
               list_runs: Duration::from_millis(500),
               get_run: Duration::from_millis(300),
               extracted_data: Duration::from_millis(800) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub tick_interval: Duration,
    pub poll_interval: Duration,
    pub latency: LatencyProfile,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
               poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
               latency: LatencyProfile::default() }
    }
}

impl AppConfig {
    /// Lee la configuración del entorno del proceso.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
        where F: Fn(&str) -> Option<String>
    {
        let endpoint = match lookup(CHAT_ENDPOINT_VAR) {
            Some(raw) => validate_endpoint(raw.trim())?,
            None => DEFAULT_CHAT_ENDPOINT.to_string(),
        };
        Ok(Self { chat: ChatConfig { endpoint,
                                     ..ChatConfig::default() },
                  simulation: SimulationConfig::default() })
    }
}

fn validate_endpoint(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(CoreError::Config(format!("{CHAT_ENDPOINT_VAR} está vacío")));
    }
    let url = Url::parse(raw).map_err(|e| CoreError::Config(format!("{CHAT_ENDPOINT_VAR} inválido ({raw}): {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        other => Err(CoreError::Config(format!("{CHAT_ENDPOINT_VAR} con esquema no soportado: {other}"))),
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
/// Un `.env` inválido no tumba el proceso: se registra y se usan defaults.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    dotenvy::dotenv().ok();
    AppConfig::from_env().unwrap_or_else(|e| {
                             warn!("configuración inválida, usando valores por defecto: {e}");
                             AppConfig::default()
                         })
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_variable_is_absent() {
        let cfg = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.chat.endpoint, DEFAULT_CHAT_ENDPOINT);
        assert_eq!(cfg.simulation.tick_interval, Duration::from_millis(1_500));
        assert_eq!(cfg.simulation.poll_interval, Duration::from_millis(3_000));
        assert_eq!(cfg.simulation.latency.trigger, Duration::from_millis(1_000));
    }

    #[test]
    fn endpoint_is_read_and_validated() {
        let cfg = AppConfig::from_lookup(|k| (k == CHAT_ENDPOINT_VAR).then(|| "https://chat.internal/ask".to_string()))
            .unwrap();
        assert_eq!(cfg.chat.endpoint, "https://chat.internal/ask");

        let bad = AppConfig::from_lookup(|_| Some("not a url".into()));
        assert!(matches!(bad, Err(CoreError::Config(_))));
        let ftp = AppConfig::from_lookup(|_| Some("ftp://host/q".into()));
        assert!(matches!(ftp, Err(CoreError::Config(_))));
    }
}
