use async_stream::try_stream;
use futures_util::StreamExt;
use serde_json::json;

use crate::ai_sdk_core::transport::ByteStream;
use crate::ai_sdk_core::PartStream;
use crate::ai_sdk_streaming_sse::sse_events;
use crate::ai_sdk_types::v1;

use crate::provider_g4f::chat::response::{response_metadata, G4FChatChunk};
use crate::provider_g4f::finish_reason::map_g4f_finish_reason;

/// Per-stream accumulator. Owned by a single stream; nothing is shared
/// between calls.
#[derive(Debug)]
pub(crate) struct StreamState {
    /// Content of a trailing assistant message the backend may echo back.
    continuation_seed: Option<String>,
    chunk_number: usize,
    finish_reason: v1::FinishReason,
    usage: v1::Usage,
    trim_leading_space: bool,
}

impl StreamState {
    pub(crate) fn new(continuation_seed: Option<String>) -> Self {
        Self {
            continuation_seed: continuation_seed.filter(|seed| !seed.trim().is_empty()),
            chunk_number: 0,
            finish_reason: v1::FinishReason::Unknown,
            usage: v1::Usage::default(),
            trim_leading_space: false,
        }
    }

    /// Handle one `data:` payload and return the parts it produces.
    pub(crate) fn on_data(&mut self, data: &str) -> Vec<v1::StreamPart> {
        let chunk: G4FChatChunk = match serde_json::from_str(data) {
            Ok(chunk) => chunk,
            Err(err) => {
                tracing::debug!(target: "ai_sdk::providers::g4f", %err, "invalid stream chunk");
                self.finish_reason = v1::FinishReason::Error;
                return vec![v1::StreamPart::Error {
                    error: json!({
                        "message": format!("invalid chunk: {err}"),
                        "data": data,
                    }),
                }];
            }
        };

        let mut parts = Vec::new();
        self.chunk_number += 1;
        if self.chunk_number == 1 {
            parts.push(v1::StreamPart::ResponseMetadata {
                meta: response_metadata(chunk.id, chunk.created, chunk.model),
            });
        }
        if let Some(usage) = chunk.usage {
            self.usage = usage.into();
        }

        let Some(choice) = chunk.choices.into_iter().next() else {
            return parts;
        };
        if let Some(reason) = choice.finish_reason.as_deref() {
            self.finish_reason = map_g4f_finish_reason(Some(reason));
        }
        let Some(delta) = choice.delta else {
            return parts;
        };

        if self.chunk_number <= 2 && self.is_echo(delta.content.as_deref()) {
            return parts;
        }

        if let Some(content) = delta.content {
            let text_delta = if self.trim_leading_space {
                content.trim_start().to_string()
            } else {
                content
            };
            self.trim_leading_space = false;
            parts.push(v1::StreamPart::TextDelta { text_delta });
        }
        for tool_call in delta.tool_calls.into_iter().flatten() {
            parts.push(v1::StreamPart::ToolCall(tool_call.into_tool_call()));
        }
        parts
    }

    /// The backend repeats a trailing assistant message before continuing it.
    /// A dropped echo arms a one-shot trim of the continuation's leading
    /// whitespace.
    fn is_echo(&mut self, content: Option<&str>) -> bool {
        let (Some(seed), Some(content)) = (self.continuation_seed.as_deref(), content) else {
            return false;
        };
        if content != seed.trim_end() {
            return false;
        }
        self.trim_leading_space = true;
        true
    }

    pub(crate) fn on_transport_error(&mut self, message: String) -> v1::StreamPart {
        self.finish_reason = v1::FinishReason::Error;
        v1::StreamPart::Error {
            error: json!({ "message": message }),
        }
    }

    pub(crate) fn finish(&self) -> v1::StreamPart {
        v1::StreamPart::Finish {
            finish_reason: self.finish_reason,
            usage: self.usage,
        }
    }
}

/// Turn an SSE response body into stream parts.
///
/// Reading stops at `[DONE]`, at end of body, or at the first transport
/// error; in every case exactly one `finish` part closes the stream.
pub fn build_stream(bytes: ByteStream, continuation_seed: Option<String>) -> PartStream {
    Box::pin(try_stream! {
        let mut state = StreamState::new(continuation_seed);
        let events = sse_events(bytes);
        futures_util::pin_mut!(events);
        while let Some(event) = events.next().await {
            match event {
                Ok(ev) if ev.is_done() => break,
                Ok(ev) => {
                    for part in state.on_data(&ev.data) {
                        yield part;
                    }
                }
                Err(te) => {
                    tracing::warn!(target: "ai_sdk::providers::g4f", error = %te, "stream read failed");
                    yield state.on_transport_error(te.to_string());
                    break;
                }
            }
        }
        tracing::debug!(
            target: "ai_sdk::providers::g4f",
            chunks = state.chunk_number,
            finish_reason = ?state.finish_reason,
            "stream finished"
        );
        yield state.finish();
    })
}
