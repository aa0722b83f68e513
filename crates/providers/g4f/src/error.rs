use serde::Deserialize;

use crate::ai_sdk_core::error::{http_status_fallback_message, SdkError, TransportError, UpstreamErrorData};

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct G4FErrorData {
    #[serde(default)]
    pub object: Option<String>,
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub param: Option<String>,
    pub code: Option<String>,
}

/// Map a failed response to an `Upstream` error.
///
/// A body matching the error schema supplies the message and structured
/// fields; anything else uses the raw body as the message.
pub fn map_failed_response(
    status: u16,
    body: String,
    retry_after_ms: Option<u64>,
    headers: Vec<(String, String)>,
) -> SdkError {
    let (message, data) = match serde_json::from_str::<G4FErrorData>(&body) {
        Ok(err) => (
            err.message,
            Some(UpstreamErrorData {
                error_type: err.error_type,
                param: err.param,
                code: err.code,
            }),
        ),
        Err(_) => (body.clone(), None),
    };
    tracing::debug!(
        target: "ai_sdk::providers::g4f",
        status,
        parsed = data.is_some(),
        "mapped failed response"
    );
    SdkError::Upstream {
        status,
        message,
        data,
        source: Some(Box::new(TransportError::HttpStatus {
            status,
            body,
            retry_after_ms,
            sanitized: http_status_fallback_message(status),
            headers,
        })),
    }
}

pub fn map_transport_error_to_sdk_error(te: TransportError) -> SdkError {
    match te {
        TransportError::HttpStatus {
            status,
            body,
            retry_after_ms,
            headers,
            ..
        } => map_failed_response(status, body, retry_after_ms, headers),
        TransportError::InvalidJson { body } => SdkError::InvalidResponse {
            message: "response body is not valid json".into(),
            body: Some(serde_json::Value::String(body)),
        },
        other => SdkError::Transport(other),
    }
}
