//! Backend HTTP del chat contra un servidor local mínimo.
use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use extractflow_rust::chat::{ChatBackend, ChatError, ChatSession, HttpChatBackend, NO_CONTENT_ANSWER};

/// Atiende una sola petición: devuelve el cuerpo recibido y responde con
/// `status` y `body`.
async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let task = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let request = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(split) = text.find("\r\n\r\n") {
                let length = text[..split].lines()
                                          .find_map(|l| {
                                              let (k, v) = l.split_once(':')?;
                                              k.eq_ignore_ascii_case("content-length").then(|| v.trim().parse::<usize>().ok())?
                                          })
                                          .unwrap_or(0);
                if buf.len() >= split + 4 + length {
                    break text[split + 4..].to_string();
                }
            }
            if n == 0 {
                break String::new();
            }
        };
        let response = format!("HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                               body.len());
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });
    (format!("http://{addr}/query"), task)
}

#[tokio::test]
async fn posts_question_and_reads_alternate_field() {
    let (url, server) = serve_once("200 OK", r#"{"response":"Three flows are available.","sources":["catalog"]}"#).await;
    let reply = HttpChatBackend::new(url).ask("which flows?").await.unwrap();
    assert_eq!(reply.answer, "Three flows are available.");
    assert_eq!(reply.sources, vec!["catalog"]);

    let sent: Value = serde_json::from_str(&server.await.unwrap()).unwrap();
    assert_eq!(sent, serde_json::json!({ "question": "which flows?" }));
}

#[tokio::test]
async fn empty_payload_uses_placeholder_answer() {
    let (url, _server) = serve_once("200 OK", "{}").await;
    let reply = HttpChatBackend::new(url).ask("hello").await.unwrap();
    assert_eq!(reply.answer, NO_CONTENT_ANSWER);
    assert!(reply.sources.is_empty());
}

#[tokio::test]
async fn non_success_status_fails_and_session_drops_question() {
    let (url, _server) = serve_once("500 Internal Server Error", "{}").await;
    let mut session = ChatSession::new(Arc::new(HttpChatBackend::new(url)));
    let err = session.send("are you there?").await.unwrap_err();
    assert_eq!(err, ChatError::Status(500));
    assert_eq!(session.messages().len(), 1);
}
