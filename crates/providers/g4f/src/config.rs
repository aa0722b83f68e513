use std::sync::Arc;

use crate::ai_sdk_core::headers::combine_headers;
use crate::ai_sdk_core::transport::{HttpTransport, TransportConfig};
use crate::ai_sdk_core::SdkError;
use crate::ai_sdk_types::v1;

/// Produces the provider-level request headers. Invoked once per call so
/// credentials are resolved lazily.
pub type HeadersFn = Arc<dyn Fn() -> Result<Vec<(String, String)>, SdkError> + Send + Sync>;

/// Configuration shared by every model handed out by one provider.
pub struct G4FConfig<T: HttpTransport> {
    /// e.g. `G4F.chat` or `G4F.embedding`
    pub provider: String,
    pub base_url: String,
    pub headers: HeadersFn,
    pub http: Arc<T>,
    pub transport_cfg: TransportConfig,
}

impl<T: HttpTransport> Clone for G4FConfig<T> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            base_url: self.base_url.clone(),
            headers: Arc::clone(&self.headers),
            http: Arc::clone(&self.http),
            transport_cfg: self.transport_cfg.clone(),
        }
    }
}

impl<T: HttpTransport> G4FConfig<T> {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Provider headers merged with per-call headers; per-call values win.
    pub(crate) fn request_headers(
        &self,
        extra: &v1::Headers,
    ) -> Result<Vec<(String, String)>, SdkError> {
        let base = (self.headers)()?;
        Ok(combine_headers(&base, extra))
    }
}
