//! HTTP client for OpenAI-compatible chat and embedding endpoints.

use super::error::{OpenAiError, Result};
use super::protocol::{
    ApiErrorBody, ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse,
    EmbeddingRequest, EmbeddingResponse,
};
use super::sse::{SseEvent, SseParser};
use crate::config::FileLlmConfig;
use crate::credentials::ApiKey;
use crate::engine::PromptMessage;
use docchat_application::StreamHandle;
use docchat_domain::{StreamEvent, StreamFailure};
use futures::{Stream, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const STREAM_BUFFER: usize = 64;

/// Client for `/v1/embeddings` and `/v1/chat/completions`.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
    model: String,
    embedding_model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(config: &FileLlmConfig, api_key: ApiKey) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| OpenAiError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            embedding_model: config.embedding_model.clone(),
            temperature: config.temperature,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        if self.base_url.ends_with("/v1") {
            format!("{}/{}", self.base_url, path)
        } else {
            format!("{}/v1/{}", self.base_url, path)
        }
    }

    async fn post<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        let response = self
            .http
            .post(self.endpoint(path))
            .bearer_auth(self.api_key.expose())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(OpenAiError::Api {
            status: status.as_u16(),
            message: ApiErrorBody::message_from(&body),
        })
    }

    /// Embed a batch of texts, returning vectors in input order.
    pub async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Embedding {} texts with {}", inputs.len(), self.embedding_model);

        let request = EmbeddingRequest {
            model: &self.embedding_model,
            input: inputs,
        };
        let response: EmbeddingResponse = self.post("embeddings", &request).await?.json().await?;

        let mut data = response.data;
        if data.len() != inputs.len() {
            return Err(OpenAiError::UnexpectedResponse(format!(
                "expected {} embeddings, got {}",
                inputs.len(),
                data.len()
            )));
        }
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }

    /// Single non-streaming completion.
    pub async fn complete(&self, messages: &[PromptMessage]) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            stream: false,
        };
        let response: ChatCompletionResponse =
            self.post("chat/completions", &request).await?.json().await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| OpenAiError::UnexpectedResponse("completion without content".into()))
    }

    /// Streaming completion.
    ///
    /// Request and status errors are returned directly; anything that goes
    /// wrong after the first byte arrives is delivered as a terminal
    /// [`StreamEvent::Error`] on the handle.
    pub async fn stream_chat(&self, messages: &[PromptMessage]) -> Result<StreamHandle> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            stream: true,
        };
        let response = self.post("chat/completions", &request).await?;

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(pump_stream(response.bytes_stream(), tx));
        Ok(StreamHandle::new(rx))
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("embedding_model", &self.embedding_model)
            .finish()
    }
}

/// Turns SSE payloads of a chat completion into stream events.
#[derive(Debug, Default)]
struct CompletionAssembler {
    answer: String,
    saw_finish_reason: bool,
    finished: bool,
}

impl CompletionAssembler {
    fn on_sse(&mut self, event: SseEvent) -> Option<StreamEvent> {
        if self.finished {
            return None;
        }
        match event {
            SseEvent::Done => Some(self.complete()),
            SseEvent::Data(data) => match serde_json::from_str::<ChatCompletionChunk>(&data) {
                Ok(chunk) => {
                    let mut delta = String::new();
                    for choice in chunk.choices {
                        if let Some(content) = choice.delta.content {
                            delta.push_str(&content);
                        }
                        self.saw_finish_reason |= choice.finish_reason.is_some();
                    }
                    if delta.is_empty() {
                        return None;
                    }
                    self.answer.push_str(&delta);
                    Some(StreamEvent::Delta(delta))
                }
                Err(e) => {
                    self.finished = true;
                    let message = match serde_json::from_str::<ApiErrorBody>(&data) {
                        Ok(body) => body.error.message,
                        Err(_) => format!("malformed stream chunk: {}", e),
                    };
                    Some(StreamEvent::Error(StreamFailure::ModelApi(message)))
                }
            },
        }
    }

    /// Called when the body ends.
    fn on_end(&mut self) -> Option<StreamEvent> {
        if self.finished {
            None
        } else if self.saw_finish_reason {
            Some(self.complete())
        } else {
            self.finished = true;
            Some(StreamEvent::Error(StreamFailure::Transport(
                "stream ended before completion".to_string(),
            )))
        }
    }

    fn complete(&mut self) -> StreamEvent {
        self.finished = true;
        StreamEvent::Completed(std::mem::take(&mut self.answer))
    }
}

/// Forward SSE chunks from the response body to the stream handle.
async fn pump_stream<S, B>(body: S, tx: mpsc::Sender<StreamEvent>)
where
    S: Stream<Item = std::result::Result<B, reqwest::Error>>,
    B: AsRef<[u8]>,
{
    let mut body = std::pin::pin!(body);
    let mut parser = SseParser::new();
    let mut assembler = CompletionAssembler::default();

    while let Some(item) = body.next().await {
        let events = match item {
            Ok(bytes) => parser.push(bytes.as_ref()),
            Err(e) => {
                warn!("Stream interrupted: {}", e);
                let _ = tx
                    .send(StreamEvent::Error(StreamFailure::Transport(e.to_string())))
                    .await;
                return;
            }
        };
        if !forward(events, &mut assembler, &tx).await {
            return;
        }
    }

    if !forward(parser.finish(), &mut assembler, &tx).await {
        return;
    }
    if let Some(event) = assembler.on_end() {
        let _ = tx.send(event).await;
    }
}

/// Returns `false` once a terminal event was sent or the receiver is gone.
async fn forward(
    events: Vec<SseEvent>,
    assembler: &mut CompletionAssembler,
    tx: &mpsc::Sender<StreamEvent>,
) -> bool {
    for sse in events {
        if let Some(event) = assembler.on_sse(sse) {
            let terminal = event.is_terminal();
            if tx.send(event).await.is_err() || terminal {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> OpenAiClient {
        let config = FileLlmConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        OpenAiClient::new(&config, ApiKey::new("mockapikey")).unwrap()
    }

    fn sse_body(deltas: &[&str]) -> String {
        let mut body = String::new();
        for delta in deltas {
            body.push_str(&format!(
                "data: {{\"choices\":[{{\"index\":0,\"delta\":{{\"content\":{}}}}}]}}\n\n",
                serde_json::to_string(delta).unwrap()
            ));
        }
        body.push_str("data: [DONE]\n\n");
        body
    }

    async fn drain(mut handle: StreamHandle) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        while let Some(event) = handle.next_event().await {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_endpoint_accepts_base_with_or_without_v1() {
        assert_eq!(
            client("https://api.openai.com/").endpoint("embeddings"),
            "https://api.openai.com/v1/embeddings"
        );
        assert_eq!(
            client("http://localhost:8080/v1").endpoint("chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_embed_returns_vectors_in_input_order() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/embeddings")
            .match_header("authorization", "Bearer mockapikey")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"object":"list","data":[
                    {"object":"embedding","index":1,"embedding":[0.0,1.0]},
                    {"object":"embedding","index":0,"embedding":[1.0,0.0]}
                ]}"#,
            )
            .create_async()
            .await;

        let vectors = client(&server.url())
            .embed(&["first".to_string(), "second".to_string()])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[tokio::test]
    async fn test_complete_returns_message_content() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"id":"chatcmpl-123","object":"chat.completion","choices":[{
                    "index":0,
                    "message":{"role":"assistant","content":"How do I add hyperlinks in LaTeX?"},
                    "finish_reason":"stop"}]}"#,
            )
            .create_async()
            .await;

        let text = client(&server.url())
            .complete(&[PromptMessage::user("rewrite this")])
            .await
            .unwrap();
        assert_eq!(text, "How do I add hyperlinks in LaTeX?");
    }

    #[tokio::test]
    async fn test_error_status_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .with_body(
                r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
            )
            .create_async()
            .await;

        let err = client(&server.url())
            .stream_chat(&[PromptMessage::user("hi")])
            .await
            .err()
            .unwrap();
        assert_eq!(
            err,
            OpenAiError::Api {
                status: 401,
                message: "Incorrect API key provided".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_stream_chat_yields_deltas_then_completed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body(sse_body(&["Use ", "\\usepackage{hyperref}", "."]))
            .create_async()
            .await;

        let handle = client(&server.url())
            .stream_chat(&[PromptMessage::user("links?")])
            .await
            .unwrap();

        assert_eq!(
            drain(handle).await,
            vec![
                StreamEvent::Delta("Use ".to_string()),
                StreamEvent::Delta("\\usepackage{hyperref}".to_string()),
                StreamEvent::Delta(".".to_string()),
                StreamEvent::Completed("Use \\usepackage{hyperref}.".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_truncated_stream_is_transport_failure() {
        let chunks: Vec<std::result::Result<Vec<u8>, reqwest::Error>> = vec![Ok(
            b"data: {\"choices\":[{\"delta\":{\"content\":\"partial\"}}]}\n\n".to_vec(),
        )];
        let (tx, rx) = mpsc::channel(8);
        pump_stream(futures::stream::iter(chunks), tx).await;

        assert_eq!(
            drain(StreamHandle::new(rx)).await,
            vec![
                StreamEvent::Delta("partial".to_string()),
                StreamEvent::Error(StreamFailure::Transport(
                    "stream ended before completion".to_string()
                )),
            ]
        );
    }

    #[tokio::test]
    async fn test_finish_reason_without_done_completes() {
        let chunks: Vec<std::result::Result<&[u8], reqwest::Error>> = vec![
            Ok(&b"data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n\n"[..]),
            Ok(&b"data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n"[..]),
        ];
        let (tx, rx) = mpsc::channel(8);
        pump_stream(futures::stream::iter(chunks), tx).await;

        let events = drain(StreamHandle::new(rx)).await;
        assert_eq!(events.last(), Some(&StreamEvent::Completed("ok".to_string())));
    }

    #[test]
    fn test_error_payload_mid_stream_is_model_failure() {
        let mut assembler = CompletionAssembler::default();
        let event = assembler.on_sse(SseEvent::Data(
            r#"{"error":{"message":"The server had an error"}}"#.to_string(),
        ));
        assert_eq!(
            event,
            Some(StreamEvent::Error(StreamFailure::ModelApi(
                "The server had an error".to_string()
            )))
        );
        assert_eq!(assembler.on_end(), None);
    }
}
