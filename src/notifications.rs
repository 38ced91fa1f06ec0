//! Avisos únicos derivados de los eventos de ejecución.
//!
//! `spawn_notifier` escucha el canal en vivo del engine y entrega a un
//! `NotificationSink` un aviso por disparo y uno por cierre de cada
//! ejecución. El progreso intermedio no genera avisos.
use std::sync::{Arc, Mutex};

use log::{error, info, warn};
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use extract_core::{RunEngine, RunEvent, RunEventKind, RunId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub run_id: RunId,
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Envía los avisos al log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, n: Notification) {
        match n.level {
            NotificationLevel::Success => info!("{}", n.message),
            NotificationLevel::Error => error!("{}", n.message),
        }
    }
}

/// Acumula los avisos en memoria.
#[derive(Debug, Default)]
pub struct CollectingSink {
    received: Mutex<Vec<Notification>>,
}

impl CollectingSink {
    pub fn snapshot(&self) -> Vec<Notification> {
        self.received.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl NotificationSink for CollectingSink {
    fn notify(&self, n: Notification) {
        self.received.lock().unwrap_or_else(|e| e.into_inner()).push(n);
    }
}

/// Aviso para un evento, si corresponde.
pub fn notification_for(engine: &RunEngine, event: &RunEvent) -> Option<Notification> {
    let (level, message) = match &event.kind {
        RunEventKind::RunTriggered { flow_id } => {
            (NotificationLevel::Success, format!("Started \"{}\" extraction", flow_name(engine, flow_id)))
        }
        RunEventKind::ProgressAdvanced { .. } => return None,
        RunEventKind::RunCompleted { .. } => {
            let name = run_flow_name(engine, &event.run_id);
            (NotificationLevel::Success, format!("\"{name}\" extraction completed"))
        }
        RunEventKind::RunFailed { error } => {
            let name = run_flow_name(engine, &event.run_id);
            (NotificationLevel::Error, format!("\"{name}\" extraction failed: {error}"))
        }
    };
    Some(Notification { level,
                        message,
                        run_id: event.run_id.clone() })
}

fn flow_name(engine: &RunEngine, flow_id: &str) -> String {
    engine.catalog()
          .get_flow(flow_id)
          .map(|f| f.name)
          .unwrap_or_else(|| flow_id.to_string())
}

fn run_flow_name(engine: &RunEngine, run_id: &RunId) -> String {
    engine.get_run(run_id)
          .map(|r| flow_name(engine, &r.flow_id))
          .unwrap_or_else(|| run_id.to_string())
}

/// Tarea que reenvía avisos mientras el engine viva. Hay que abortarla (o
/// soltar el runtime) para detenerla.
pub fn spawn_notifier(engine: Arc<RunEngine>, sink: Arc<dyn NotificationSink>) -> JoinHandle<()> {
    let mut rx = engine.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Some(n) = notification_for(&engine, &event) {
                        sink.notify(n);
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!("notifier lagged, {skipped} events skipped"),
                Err(RecvError::Closed) => break,
            }
        }
    })
}
