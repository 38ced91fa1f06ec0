use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde_json::Value;

use super::{ChatBackend, ChatError, ChatRequest, ChatResponse};

/// Respuesta cuando el payload no trae ningún campo de texto reconocido.
pub const NO_CONTENT_ANSWER: &str = "No response content found";

/// Campos candidatos para el texto de la respuesta, en orden de preferencia.
const ANSWER_FIELDS: [&str; 4] = ["answer", "response", "content", "text"];

#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    endpoint: String,
    client: Client,
}

impl HttpChatBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(),
               client: Client::new() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn ask(&self, question: &str) -> Result<ChatResponse, ChatError> {
        let body = ChatRequest { question: question.to_string() };
        let response = self.client
                           .post(&self.endpoint)
                           .json(&body)
                           .send()
                           .await
                           .map_err(|e| {
                               error!("Error calling chat API: {e}");
                               ChatError::Transport(e.to_string())
                           })?;
        let status = response.status();
        if !status.is_success() {
            error!("chat API answered {status}");
            return Err(ChatError::Status(status.as_u16()));
        }
        let payload: Value = response.json()
                                     .await
                                     .map_err(|e| ChatError::Decode(e.to_string()))?;
        Ok(answer_from_payload(&payload))
    }
}

/// Normaliza el JSON del servicio: el primer campo de texto no vacío entre
/// `answer`, `response`, `content` y `text`; `sources` si es una lista.
pub fn answer_from_payload(payload: &Value) -> ChatResponse {
    let answer = ANSWER_FIELDS.iter()
                              .filter_map(|k| payload.get(*k).and_then(Value::as_str))
                              .find(|s| !s.is_empty())
                              .unwrap_or(NO_CONTENT_ANSWER)
                              .to_string();
    let sources = payload.get("sources")
                         .and_then(Value::as_array)
                         .map(|items| {
                             items.iter()
                                  .filter_map(|v| v.as_str().map(str::to_string))
                                  .collect()
                         })
                         .unwrap_or_default();
    ChatResponse { answer, sources }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_non_empty_field_wins() {
        let r = answer_from_payload(&json!({ "answer": "", "response": "from response", "text": "from text" }));
        assert_eq!(r.answer, "from response");
        assert!(r.sources.is_empty());
    }

    #[test]
    fn fallback_and_sources() {
        let r = answer_from_payload(&json!({ "sources": ["doc-1", "doc-2"] }));
        assert_eq!(r.answer, NO_CONTENT_ANSWER);
        assert_eq!(r.sources, vec!["doc-1", "doc-2"]);
    }
}
