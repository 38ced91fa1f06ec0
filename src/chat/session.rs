//! Historial de conversación.
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;

use super::{ChatBackend, ChatError, ChatResponse};

pub const GREETING: &str = "Hello! I'm your Data Extraction Assistant. How can I help you today?";

/// Texto para el usuario cuando una pregunta no obtuvo respuesta.
pub const CHAT_FAILURE_MESSAGE: &str = "Failed to get a response. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub content: String,
    pub role: ChatRole,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(content: impl Into<String>, role: ChatRole) -> Self {
        Self { content: content.into(),
               role,
               timestamp: Utc::now() }
    }
}

/// Conversación con un backend. Arranca con el saludo del asistente.
///
/// `send` toma `&mut self`, así que no puede haber dos preguntas en vuelo
/// sobre la misma sesión.
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend,
               messages: vec![ChatMessage::new(GREETING, ChatRole::Bot)] }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Envía una pregunta. Texto vacío se ignora (`Ok(None)`).
    ///
    /// Si el backend falla, la pregunta se retira del historial y se
    /// devuelve el error.
    pub async fn send(&mut self, input: &str) -> Result<Option<ChatResponse>, ChatError> {
        let question = input.trim();
        if question.is_empty() {
            return Ok(None);
        }
        self.messages.push(ChatMessage::new(question, ChatRole::User));
        match self.backend.ask(question).await {
            Ok(response) => {
                self.messages.push(ChatMessage::new(response.answer.clone(), ChatRole::Bot));
                Ok(Some(response))
            }
            Err(e) => {
                warn!("chat question dropped: {e}");
                self.messages.pop();
                Err(e)
            }
        }
    }
}
