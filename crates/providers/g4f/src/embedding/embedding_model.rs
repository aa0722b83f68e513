use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use crate::ai_sdk_core::cancel::run_cancellable;
use crate::ai_sdk_core::embedding::{EmbedResponse, EmbeddingModel};
use crate::ai_sdk_core::error::SdkError;
use crate::ai_sdk_core::headers::response_headers_map;
use crate::ai_sdk_core::transport::HttpTransport;
use crate::ai_sdk_types::embedding::{EmbedOptions, EmbedUsage, Embedding};

use crate::provider_g4f::config::G4FConfig;
use crate::provider_g4f::embedding::settings::{
    G4FEmbeddingSettings, DEFAULT_MAX_EMBEDDINGS_PER_CALL,
};
use crate::provider_g4f::error::map_transport_error_to_sdk_error;

pub struct G4FEmbeddingModel<T: HttpTransport = crate::reqwest_transport::ReqwestTransport> {
    model_id: String,
    settings: G4FEmbeddingSettings,
    cfg: G4FConfig<T>,
}

impl<T: HttpTransport> G4FEmbeddingModel<T> {
    pub fn new(model_id: impl Into<String>, settings: G4FEmbeddingSettings, cfg: G4FConfig<T>) -> Self {
        Self {
            model_id: model_id.into(),
            settings,
            cfg,
        }
    }

    fn build_request_body(&self, options: &EmbedOptions) -> JsonValue {
        json!({
            "model": self.model_id,
            "input": options.values,
            "encoding_format": "float",
        })
    }
}

#[async_trait::async_trait]
impl<T: HttpTransport + Send + Sync> EmbeddingModel for G4FEmbeddingModel<T> {
    fn provider_name(&self) -> &str {
        &self.cfg.provider
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn max_embeddings_per_call(&self) -> Option<usize> {
        Some(
            self.settings
                .max_embeddings_per_call
                .unwrap_or(DEFAULT_MAX_EMBEDDINGS_PER_CALL),
        )
    }

    fn supports_parallel_calls(&self) -> bool {
        self.settings.supports_parallel_calls.unwrap_or(false)
    }

    async fn do_embed(&self, options: EmbedOptions) -> Result<EmbedResponse, SdkError> {
        if let Some(max) = self.max_embeddings_per_call() {
            if options.values.len() > max {
                return Err(SdkError::TooManyEmbeddingValues {
                    provider: self.cfg.provider.clone(),
                    model_id: self.model_id.clone(),
                    max,
                    actual: options.values.len(),
                });
            }
        }

        let body = self.build_request_body(&options);
        let headers = self.cfg.request_headers(&options.headers)?;
        let url = self.cfg.url("/embeddings");
        tracing::debug!(
            target: "ai_sdk::providers::g4f",
            model = %self.model_id,
            values = options.values.len(),
            "embedding request"
        );

        let (json, res_headers) = run_cancellable(options.abort_signal.as_ref(), async {
            self.cfg
                .http
                .post_json(&url, &headers, &body, &self.cfg.transport_cfg)
                .await
                .map_err(map_transport_error_to_sdk_error)
        })
        .await?;

        let parsed = EmbeddingResponse::deserialize(&json).map_err(|err| {
            SdkError::InvalidResponse {
                message: format!("unexpected embedding response shape: {err}"),
                body: Some(json.clone()),
            }
        })?;

        Ok(EmbedResponse {
            embeddings: parsed.data.into_iter().map(|item| item.embedding).collect(),
            usage: parsed.usage.map(|u| EmbedUsage {
                tokens: Some(u.prompt_tokens),
            }),
            response_headers: response_headers_map(res_headers),
            request_body: Some(body),
        })
    }
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
    #[serde(default)]
    usage: Option<EmbeddingUsage>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Embedding,
}

#[derive(Debug, Deserialize)]
struct EmbeddingUsage {
    prompt_tokens: u64,
}
