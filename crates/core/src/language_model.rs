//! LanguageModel V1 interface.

use crate::ai_sdk_types::v1;
use crate::core::SdkError;
use futures_core::Stream;
use std::pin::Pin;

/// Stream of structured parts from the model.
pub type PartStream = Pin<Box<dyn Stream<Item = Result<v1::StreamPart, SdkError>> + Send>>;

/// Generate response payload.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub text: Option<String>,
    pub tool_calls: Vec<v1::ToolCall>,
    pub finish_reason: v1::FinishReason,
    pub usage: v1::Usage,
    pub raw_call: v1::RawCall,
    pub request_body: Option<serde_json::Value>,
    pub response_headers: Option<v1::Headers>,
    pub response: Option<v1::ResponseMetadata>,
    pub warnings: Vec<v1::CallWarning>,
}

/// Stream response envelope.
pub struct StreamResponse {
    pub stream: PartStream,
    pub raw_call: v1::RawCall,
    pub request_body: Option<serde_json::Value>,
    pub response_headers: Option<v1::Headers>,
    pub warnings: Vec<v1::CallWarning>,
}

#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    /// Implemented interface version; constant "v1".
    fn specification_version(&self) -> &'static str {
        "v1"
    }
    /// Provider name for logging/telemetry, e.g. `G4F.chat`.
    fn provider_name(&self) -> &str;
    /// Provider-specific model identifier.
    fn model_id(&self) -> &str;
    /// Preferred object generation strategy when the caller does not pick one.
    fn default_object_generation_mode(&self) -> Option<v1::ObjectGenerationMode> {
        None
    }
    /// Whether image URLs can be passed through without downloading them first.
    fn supports_image_urls(&self) -> bool {
        true
    }

    async fn do_generate(&self, options: v1::CallOptions) -> Result<GenerateResponse, SdkError>;
    async fn do_stream(&self, options: v1::CallOptions) -> Result<StreamResponse, SdkError>;
}
