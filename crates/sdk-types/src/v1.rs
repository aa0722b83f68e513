//! LanguageModel V1 types: the neutral shapes exchanged between the host SDK
//! and a provider adapter.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// HTTP headers map for request/response metadata.
pub type Headers = HashMap<String, String>;

pub(crate) fn headers_is_empty(map: &Headers) -> bool {
    map.is_empty()
}

// ---------- Prompt ----------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum PromptMessage {
    System { content: String },
    User { content: Vec<UserPart> },
    Assistant { content: Vec<AssistantPart> },
    Tool { content: Vec<ToolResultPart> },
}

impl PromptMessage {
    pub fn system(text: impl Into<String>) -> Self {
        PromptMessage::System {
            content: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        PromptMessage::User {
            content: vec![UserPart::Text { text: text.into() }],
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        PromptMessage::Assistant {
            content: vec![AssistantPart::Text { text: text.into() }],
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            PromptMessage::System { .. } => "system",
            PromptMessage::User { .. } => "user",
            PromptMessage::Assistant { .. } => "assistant",
            PromptMessage::Tool { .. } => "tool",
        }
    }
}

pub type Prompt = Vec<PromptMessage>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UserPart {
    Text {
        text: String,
    },
    Image {
        image: DataContent,
        #[serde(default, skip_serializing_if = "Option::is_none", rename = "mimeType")]
        mime_type: Option<String>,
    },
    File {
        data: DataContent,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AssistantPart {
    Text { text: String },
    ToolCall(ToolCallPart),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DataContent {
    /// Base64-encoded data string
    Base64 { base64: String },
    /// Raw bytes
    Bytes {
        #[serde(with = "serde_bytes")]
        bytes: Vec<u8>,
    },
    /// URL string
    Url { url: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallPart {
    #[serde(rename = "toolCallId")]
    pub tool_call_id: String,
    #[serde(rename = "toolName")]
    pub tool_name: String,
    /// Stringified JSON arguments
    pub args: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResultPart {
    #[serde(rename = "toolCallId")]
    pub tool_call_id: String,
    #[serde(rename = "toolName")]
    pub tool_name: String,
    pub result: JsonValue,
    #[serde(default, rename = "isError")]
    pub is_error: bool,
}

// ---------- Call options ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionTool {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: JsonValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderDefinedTool {
    /// Tool id, formatted as "<provider>.<tool>".
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub args: JsonValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Tool {
    Function(FunctionTool),
    ProviderDefined(ProviderDefinedTool),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ToolChoice {
    Auto,
    None,
    Required,
    Tool {
        #[serde(rename = "toolName")]
        tool_name: String,
    },
}

/// Call mode. Only the response-shaping fields of a request depend on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CallMode {
    Regular {
        #[serde(default)]
        tools: Vec<Tool>,
        #[serde(default, rename = "toolChoice")]
        tool_choice: Option<ToolChoice>,
    },
    ObjectJson {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<JsonValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    ObjectTool {
        tool: FunctionTool,
    },
}

impl Default for CallMode {
    fn default() -> Self {
        CallMode::Regular {
            tools: Vec::new(),
            tool_choice: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResponseFormat {
    Text,
    Json {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<JsonValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CallOptions {
    #[serde(default)]
    pub mode: CallMode,
    pub prompt: Prompt,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub top_k: Option<u32>,
    #[serde(default)]
    pub presence_penalty: Option<f32>,
    #[serde(default)]
    pub frequency_penalty: Option<f32>,
    #[serde(default)]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub response_format: Option<ResponseFormat>,
    #[serde(default, skip_serializing_if = "headers_is_empty")]
    pub headers: Headers,
    /// Caller-owned abort signal; cancelling it aborts the in-flight call.
    #[serde(skip)]
    pub abort_signal: Option<CancellationToken>,
}

impl CallOptions {
    pub fn new(prompt: Prompt) -> Self {
        Self {
            prompt,
            ..Default::default()
        }
    }
    pub fn with_mode(mut self, mode: CallMode) -> Self {
        self.mode = mode;
        self
    }
    pub fn with_temperature(mut self, t: f32) -> Self {
        self.temperature = Some(t);
        self
    }
    pub fn with_max_tokens(mut self, n: u32) -> Self {
        self.max_tokens = Some(n);
        self
    }
    pub fn with_abort_signal(mut self, token: CancellationToken) -> Self {
        self.abort_signal = Some(token);
        self
    }
}

/// Default strategy for object generation advertised by a model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ObjectGenerationMode {
    Json,
    Tool,
}

// ---------- Warnings / finish / usage ----------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CallWarning {
    UnsupportedSetting {
        setting: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    UnsupportedTool {
        #[serde(rename = "toolName")]
        tool_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    Other {
        message: String,
    },
}

impl CallWarning {
    pub fn unsupported_setting(setting: &str) -> Self {
        CallWarning::UnsupportedSetting {
            setting: setting.to_string(),
            details: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    Error,
    Other,
    #[default]
    Unknown,
}

/// Token counts reported by the backend; `None` when the backend did not report them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Usage {
    #[serde(rename = "promptTokens")]
    pub prompt_tokens: Option<u64>,
    #[serde(rename = "completionTokens")]
    pub completion_tokens: Option<u64>,
}

impl Usage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens: Some(prompt_tokens),
            completion_tokens: Some(completion_tokens),
        }
    }

    pub fn total_tokens(&self) -> Option<u64> {
        Some(self.prompt_tokens? + self.completion_tokens?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ResponseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

/// Prompt and settings exactly as they were sent to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RawCall {
    #[serde(rename = "rawPrompt")]
    pub raw_prompt: JsonValue,
    #[serde(rename = "rawSettings")]
    pub raw_settings: JsonValue,
}

// ---------- Model outputs ----------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    #[serde(rename = "toolCallType")]
    pub tool_call_type: ToolCallType,
    #[serde(rename = "toolCallId")]
    pub tool_call_id: String,
    #[serde(rename = "toolName")]
    pub tool_name: String,
    /// Stringified JSON arguments (a fragment when streamed).
    pub args: String,
}

impl ToolCall {
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        args: impl Into<String>,
    ) -> Self {
        Self {
            tool_call_type: ToolCallType::Function,
            tool_call_id: id.into(),
            tool_name: name.into(),
            args: args.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToolCallType {
    Function,
}

// ---------- Streaming ----------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamPart {
    ResponseMetadata {
        #[serde(flatten)]
        meta: ResponseMetadata,
    },
    TextDelta {
        #[serde(rename = "textDelta")]
        text_delta: String,
    },
    ToolCall(ToolCall),
    Error {
        error: JsonValue,
    },
    Finish {
        #[serde(rename = "finishReason")]
        finish_reason: FinishReason,
        usage: Usage,
    },
}
