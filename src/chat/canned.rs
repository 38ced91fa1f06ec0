//! Respuestas locales: la primera entrada cuya palabra clave aparece en la
//! pregunta (sin distinguir mayúsculas) gana; si ninguna aparece se usa una
//! respuesta genérica.
use async_trait::async_trait;

use super::{ChatBackend, ChatError, ChatResponse};

const CANNED_ANSWERS: &[(&[&str], &str)] = &[
    (&["trigger", "run", "start"],
     "Open the Flows page, pick a flow, fill in its parameters and press Run. Progress is refreshed every few seconds."),
    (&["fail", "error"],
     "Failed runs keep their error message in the run history. Trigger the flow again to retry."),
    (&["filter"],
     "In the Data Viewer you can filter any column with equals, contains, greater than, less than or between (min,max)."),
    (&["sort"],
     "Click a column header to sort ascending, again for descending, and a third time to clear the sort."),
    (&["category", "categories", "tree"],
     "Use the category tree to browse Sales, Customer and Product datasets by subdomain."),
    (&["flow", "flows"],
     "There are three extraction flows: Customer Data Extraction, Sales Analytics Extraction and Inventory Analysis."),
];

const FALLBACK_ANSWER: &str =
    "I can help with triggering extraction flows, monitoring runs and exploring extracted data. What would you like to know?";

#[derive(Debug, Clone, Copy, Default)]
pub struct CannedChatBackend;

impl CannedChatBackend {
    pub fn new() -> Self {
        Self
    }

    pub fn answer(&self, question: &str) -> &'static str {
        let q = question.to_lowercase();
        CANNED_ANSWERS.iter()
                      .find(|(keywords, _)| keywords.iter().any(|k| q.contains(k)))
                      .map(|(_, answer)| *answer)
                      .unwrap_or(FALLBACK_ANSWER)
    }
}

#[async_trait]
impl ChatBackend for CannedChatBackend {
    async fn ask(&self, question: &str) -> Result<ChatResponse, ChatError> {
        Ok(ChatResponse { answer: self.answer(question).to_string(),
                          sources: Vec::new() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_is_case_insensitive() {
        let bot = CannedChatBackend::new();
        assert!(bot.answer("How do I SORT columns?").contains("third time"));
        assert_eq!(bot.answer("hello there"), FALLBACK_ANSWER);
    }

    #[test]
    fn ask_never_fails() {
        let r = tokio_test::block_on(CannedChatBackend::new().ask("which flows exist?")).unwrap();
        assert!(r.answer.contains("Inventory Analysis"));
        assert!(r.sources.is_empty());
    }
}
