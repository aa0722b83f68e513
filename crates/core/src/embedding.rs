use crate::ai_sdk_types::embedding as embt;
use crate::ai_sdk_types::v1;

use crate::core::SdkError;

/// Response from an embedding model call.
#[derive(Debug, Clone)]
pub struct EmbedResponse {
    pub embeddings: Vec<embt::Embedding>,
    pub usage: Option<embt::EmbedUsage>,
    pub response_headers: Option<v1::Headers>,
    pub request_body: Option<serde_json::Value>,
}

/// Embedding model interface (EmbeddingModelV1).
#[async_trait::async_trait]
pub trait EmbeddingModel: Send + Sync {
    fn specification_version(&self) -> &'static str {
        "v1"
    }
    /// Provider name for logging/telemetry.
    fn provider_name(&self) -> &str;
    /// Provider-specific model identifier.
    fn model_id(&self) -> &str;
    /// Limit of embeddings per call, if enforced by the provider.
    fn max_embeddings_per_call(&self) -> Option<usize> {
        None
    }
    /// Whether multiple embedding calls may be executed in parallel.
    fn supports_parallel_calls(&self) -> bool {
        true
    }

    async fn do_embed(&self, options: embt::EmbedOptions) -> Result<EmbedResponse, SdkError>;
}
