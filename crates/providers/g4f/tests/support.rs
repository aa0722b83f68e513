use crate::ai_sdk_core::error::TransportError;
use crate::ai_sdk_core::transport::{without_null_fields, ByteStream, HttpTransport, TransportConfig};
use crate::ai_sdk_providers_g4f::{G4FProvider, G4FProviderSettings};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream;
use std::sync::{Arc, Mutex};

/// In-memory transport: records the last request and replays canned responses.
#[derive(Clone, Default)]
pub(crate) struct TestTransport {
    response_json: Arc<Mutex<serde_json::Value>>,
    replies: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
    response_headers: Arc<Mutex<Vec<(String, String)>>>,
    stream_chunks: Arc<Mutex<Vec<Result<Bytes, TransportError>>>>,
    error: Arc<Mutex<Option<TransportError>>>,
    pending: Arc<Mutex<bool>>,
    last_url: Arc<Mutex<Option<String>>>,
    last_body: Arc<Mutex<Option<serde_json::Value>>>,
    last_headers: Arc<Mutex<Option<Vec<(String, String)>>>>,
    calls: Arc<Mutex<usize>>,
}

impl TestTransport {
    pub(crate) fn new(response_json: serde_json::Value) -> Self {
        Self {
            response_json: Arc::new(Mutex::new(response_json)),
            ..Default::default()
        }
    }

    pub(crate) fn streaming(chunks: Vec<Result<Bytes, TransportError>>) -> Self {
        let t = Self::default();
        *t.stream_chunks.lock().unwrap() = chunks;
        t
    }

    pub(crate) fn failing(error: TransportError) -> Self {
        let t = Self::default();
        *t.error.lock().unwrap() = Some(error);
        t
    }

    /// Requests never complete; used to exercise cancellation.
    pub(crate) fn pending() -> Self {
        let t = Self::default();
        *t.pending.lock().unwrap() = true;
        t
    }

    /// Serve `response_json` to requests whose body contains `needle`.
    pub(crate) fn with_reply_for(self, needle: &str, response_json: serde_json::Value) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push((needle.to_string(), response_json));
        self
    }

    pub(crate) fn with_response_headers(self, headers: Vec<(String, String)>) -> Self {
        *self.response_headers.lock().unwrap() = headers;
        self
    }

    pub(crate) fn last_url(&self) -> Option<String> {
        self.last_url.lock().unwrap().clone()
    }

    pub(crate) fn last_body(&self) -> Option<serde_json::Value> {
        self.last_body.lock().unwrap().clone()
    }

    pub(crate) fn last_headers(&self) -> Option<Vec<(String, String)>> {
        self.last_headers.lock().unwrap().clone()
    }

    pub(crate) fn header(&self, name: &str) -> Option<String> {
        self.last_headers()?
            .into_iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    pub(crate) fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    async fn record(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &serde_json::Value,
        cfg: &TransportConfig,
    ) -> Result<(), TransportError> {
        let cleaned = if cfg.strip_null_fields {
            without_null_fields(body)
        } else {
            body.clone()
        };
        *self.calls.lock().unwrap() += 1;
        *self.last_url.lock().unwrap() = Some(url.to_string());
        *self.last_body.lock().unwrap() = Some(cleaned);
        *self.last_headers.lock().unwrap() = Some(headers.to_vec());
        let pending = *self.pending.lock().unwrap();
        if pending {
            std::future::pending::<()>().await;
        }
        match self.error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub(crate) struct TestStreamResponse {
    headers: Vec<(String, String)>,
    chunks: Vec<Result<Bytes, TransportError>>,
}

#[async_trait]
impl HttpTransport for TestTransport {
    type StreamResponse = TestStreamResponse;

    fn into_stream(resp: Self::StreamResponse) -> (ByteStream, Vec<(String, String)>) {
        (Box::pin(stream::iter(resp.chunks)), resp.headers)
    }

    async fn post_json_stream(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &serde_json::Value,
        cfg: &TransportConfig,
    ) -> Result<Self::StreamResponse, TransportError> {
        self.record(url, headers, body, cfg).await?;
        let chunks = std::mem::take(&mut *self.stream_chunks.lock().unwrap());
        Ok(TestStreamResponse {
            headers: self.response_headers.lock().unwrap().clone(),
            chunks,
        })
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &serde_json::Value,
        cfg: &TransportConfig,
    ) -> Result<(serde_json::Value, Vec<(String, String)>), TransportError> {
        self.record(url, headers, body, cfg).await?;
        let raw = body.to_string();
        let routed = self
            .replies
            .lock()
            .unwrap()
            .iter()
            .find(|(needle, _)| raw.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone());
        Ok((
            routed.unwrap_or_else(|| self.response_json.lock().unwrap().clone()),
            self.response_headers.lock().unwrap().clone(),
        ))
    }
}

pub(crate) fn sse(val: &serde_json::Value) -> Result<Bytes, TransportError> {
    Ok(Bytes::from(format!("data: {val}\n\n")))
}

pub(crate) fn sse_done() -> Result<Bytes, TransportError> {
    Ok(Bytes::from_static(b"data: [DONE]\n\n"))
}

pub(crate) fn text_chunk(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chunk-1",
        "object": "chat.completion.chunk",
        "created": 1_711_113_008,
        "model": "G4F-small-latest",
        "choices": [{"index": 0, "delta": {"role": "assistant", "content": content}, "finish_reason": null}]
    })
}

pub(crate) fn provider_with(transport: TestTransport) -> G4FProvider<TestTransport> {
    let settings = G4FProviderSettings::default()
        .with_base_url("https://g4f.test/v1")
        .with_api_key("test-api-key");
    match G4FProvider::with_transport(settings, transport) {
        Ok(provider) => provider,
        Err(err) => panic!("provider construction failed: {err}"),
    }
}
