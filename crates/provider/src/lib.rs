//! Shared provider plumbing: API key loading, base URL handling and the
//! `Provider` trait used for dynamic model construction.

use crate::ai_sdk_core::{EmbeddingModel, LanguageModel, SdkError};
use std::sync::Arc;
use url::Url;

/// A provider that can hand out models by id.
pub trait Provider: Send + Sync {
    fn language_model(&self, model_id: &str) -> Arc<dyn LanguageModel>;
    fn text_embedding_model(&self, model_id: &str) -> Arc<dyn EmbeddingModel>;
}

/// Resolve an API key from an explicit value, falling back to `env_var`.
///
/// `description` names the provider in the error message.
pub fn load_api_key(
    api_key: Option<&str>,
    env_var: &str,
    description: &str,
) -> Result<String, SdkError> {
    if let Some(key) = api_key {
        return Ok(key.to_string());
    }
    match std::env::var(env_var) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        Ok(_) | Err(std::env::VarError::NotPresent) => Err(SdkError::Configuration {
            message: format!(
                "{description} API key is missing. Pass it using the 'api_key' setting or the {env_var} environment variable."
            ),
        }),
        Err(std::env::VarError::NotUnicode(_)) => Err(SdkError::Configuration {
            message: format!("{description} API key in {env_var} is not valid unicode."),
        }),
    }
}

pub fn without_trailing_slash(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Normalize and validate a provider base URL (http or https, no trailing slash).
pub fn normalize_base_url(raw: &str) -> Result<String, SdkError> {
    let trimmed = without_trailing_slash(raw.trim());
    let parsed = Url::parse(trimmed).map_err(|err| SdkError::Configuration {
        message: format!("invalid base url '{raw}': {err}"),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SdkError::Configuration {
            message: format!("invalid base url '{raw}': unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(trimmed.to_string())
}
