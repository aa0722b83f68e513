use std::sync::Arc;

use crate::ai_sdk_core::transport::{HttpTransport, TransportConfig};
use crate::ai_sdk_core::{EmbeddingModel, LanguageModel, SdkError};
use crate::ai_sdk_provider::{load_api_key, normalize_base_url, Provider};
use crate::reqwest_transport::ReqwestTransport;

use crate::provider_g4f::chat::language_model::G4FChatLanguageModel;
use crate::provider_g4f::chat::settings::G4FChatSettings;
use crate::provider_g4f::config::{G4FConfig, HeadersFn};
use crate::provider_g4f::embedding::embedding_model::G4FEmbeddingModel;
use crate::provider_g4f::embedding::settings::G4FEmbeddingSettings;

pub const DEFAULT_BASE_URL: &str = "https://api.g4f.ai/v1";
pub const API_KEY_ENV_VAR: &str = "G4F_API_KEY";
const PROVIDER_DESCRIPTION: &str = "G4F";

pub const CHAT_PROVIDER_NAME: &str = "G4F.chat";
pub const EMBEDDING_PROVIDER_NAME: &str = "G4F.embedding";

#[derive(Debug, Clone, Default)]
pub struct G4FProviderSettings {
    /// Defaults to [`DEFAULT_BASE_URL`]; trailing slashes are removed.
    pub base_url: Option<String>,
    /// Falls back to the `G4F_API_KEY` environment variable at call time.
    pub api_key: Option<String>,
    /// Sent with every request, after the authorization header.
    pub headers: Vec<(String, String)>,
    pub transport_cfg: TransportConfig,
}

impl G4FProviderSettings {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Factory for G4F chat and embedding models sharing one configuration.
pub struct G4FProvider<T: HttpTransport = ReqwestTransport> {
    base_url: String,
    headers: HeadersFn,
    http: Arc<T>,
    transport_cfg: TransportConfig,
}

impl G4FProvider<ReqwestTransport> {
    pub fn new(settings: G4FProviderSettings) -> Result<Self, SdkError> {
        let http = ReqwestTransport::try_new(&settings.transport_cfg).map_err(|err| {
            SdkError::Configuration {
                message: format!("failed to build http client: {err}"),
            }
        })?;
        Self::with_transport(settings, http)
    }
}

impl<T: HttpTransport> G4FProvider<T> {
    pub fn with_transport(settings: G4FProviderSettings, http: T) -> Result<Self, SdkError> {
        let base_url = normalize_base_url(settings.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        tracing::info!(
            target: "ai_sdk::providers::g4f",
            base_url = %base_url,
            explicit_api_key = settings.api_key.is_some(),
            custom_headers = settings.headers.len(),
            "g4f provider configured"
        );

        let api_key = settings.api_key;
        let custom_headers = settings.headers;
        let headers: HeadersFn = Arc::new(move || {
            let key = load_api_key(api_key.as_deref(), API_KEY_ENV_VAR, PROVIDER_DESCRIPTION)?;
            let mut headers = vec![("authorization".to_string(), format!("Bearer {key}"))];
            headers.extend(custom_headers.iter().cloned());
            Ok(headers)
        });

        Ok(Self {
            base_url,
            headers,
            http: Arc::new(http),
            transport_cfg: settings.transport_cfg,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn config(&self, provider: &str) -> G4FConfig<T> {
        G4FConfig {
            provider: provider.to_string(),
            base_url: self.base_url.clone(),
            headers: Arc::clone(&self.headers),
            http: Arc::clone(&self.http),
            transport_cfg: self.transport_cfg.clone(),
        }
    }

    pub fn chat(&self, model_id: impl Into<String>) -> G4FChatLanguageModel<T> {
        self.chat_with_settings(model_id, G4FChatSettings::default())
    }

    pub fn chat_with_settings(
        &self,
        model_id: impl Into<String>,
        settings: G4FChatSettings,
    ) -> G4FChatLanguageModel<T> {
        G4FChatLanguageModel::new(model_id, settings, self.config(CHAT_PROVIDER_NAME))
    }

    pub fn embedding(&self, model_id: impl Into<String>) -> G4FEmbeddingModel<T> {
        self.embedding_with_settings(model_id, G4FEmbeddingSettings::default())
    }

    pub fn embedding_with_settings(
        &self,
        model_id: impl Into<String>,
        settings: G4FEmbeddingSettings,
    ) -> G4FEmbeddingModel<T> {
        G4FEmbeddingModel::new(model_id, settings, self.config(EMBEDDING_PROVIDER_NAME))
    }
}

impl<T: HttpTransport + 'static> Provider for G4FProvider<T> {
    fn language_model(&self, model_id: &str) -> Arc<dyn LanguageModel> {
        Arc::new(self.chat(model_id))
    }

    fn text_embedding_model(&self, model_id: &str) -> Arc<dyn EmbeddingModel> {
        Arc::new(self.embedding(model_id))
    }
}
