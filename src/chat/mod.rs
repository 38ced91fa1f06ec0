//! Asistente de chat: una forma de respuesta, dos backends.
//!
//! - `HttpChatBackend`: POST `{question}` al endpoint configurado.
//! - `CannedChatBackend`: respuestas locales por palabra clave.
mod canned;
mod http;
mod session;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ChatBackendKind, ChatConfig};

pub use canned::CannedChatBackend;
pub use http::{answer_from_payload, HttpChatBackend, NO_CONTENT_ANSWER};
pub use session::{ChatMessage, ChatRole, ChatSession, CHAT_FAILURE_MESSAGE, GREETING};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("chat transport error: {0}")]
    Transport(String),
    #[error("API request failed with status {0}")]
    Status(u16),
    #[error("chat response could not be decoded: {0}")]
    Decode(String),
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn ask(&self, question: &str) -> Result<ChatResponse, ChatError>;
}

/// Backend según la configuración.
pub fn backend_from_config(config: &ChatConfig) -> Box<dyn ChatBackend> {
    match config.backend {
        ChatBackendKind::Http => Box::new(HttpChatBackend::new(config.endpoint.clone())),
        ChatBackendKind::Canned => Box::new(CannedChatBackend::new()),
    }
}
