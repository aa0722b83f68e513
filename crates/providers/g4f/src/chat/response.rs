//! Response schemas, limited to the fields the adapter reads.

use serde::Deserialize;

use crate::ai_sdk_types::v1;
use crate::provider_g4f::chat::prompt::G4FFunctionCall;

#[derive(Debug, Deserialize)]
pub(crate) struct G4FChatResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<G4FChoice>,
    pub usage: G4FUsage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct G4FChoice {
    #[allow(dead_code)]
    pub index: u32,
    pub message: G4FResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Only assistant messages are valid in a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum G4FResponseRole {
    Assistant,
}

#[derive(Debug, Deserialize)]
pub(crate) struct G4FResponseMessage {
    #[allow(dead_code)]
    pub role: G4FResponseRole,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<G4FResponseToolCall>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct G4FResponseToolCall {
    pub id: String,
    pub function: G4FFunctionCall,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct G4FUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

impl From<G4FUsage> for v1::Usage {
    fn from(u: G4FUsage) -> Self {
        v1::Usage::new(u.prompt_tokens, u.completion_tokens)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct G4FChatChunk {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<G4FChunkChoice>,
    #[serde(default)]
    pub usage: Option<G4FUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct G4FChunkChoice {
    #[serde(default)]
    pub delta: Option<G4FDelta>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct G4FDelta {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<G4FResponseToolCall>>,
}

impl G4FResponseToolCall {
    pub(crate) fn into_tool_call(self) -> v1::ToolCall {
        v1::ToolCall::function(self.id, self.function.name, self.function.arguments)
    }
}

/// `created` is in seconds.
pub(crate) fn response_metadata(
    id: Option<String>,
    created: Option<i64>,
    model: Option<String>,
) -> v1::ResponseMetadata {
    v1::ResponseMetadata {
        id,
        timestamp_ms: created.map(|secs| secs.saturating_mul(1000)),
        model_id: model,
    }
}
