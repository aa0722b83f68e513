use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Structured fields of a backend error body, when the body could be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamErrorData {
    pub error_type: String,
    pub param: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("configuration error: {message}")]
    Configuration { message: String },
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
    #[error("too many values for a single embedding call: {actual} (max {max} per call)")]
    TooManyEmbeddingValues {
        provider: String,
        model_id: String,
        max: usize,
        actual: usize,
    },
    #[error("unsupported functionality: {functionality}")]
    UnsupportedFunctionality { functionality: String },
    #[error("upstream error (status {status}): {message}")]
    Upstream {
        status: u16,
        message: String,
        /// Parsed error body; `None` when the body did not match the error schema
        data: Option<UpstreamErrorData>,
        #[source]
        source: Option<Box<TransportError>>,
    },
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("invalid response: {message}")]
    InvalidResponse {
        message: String,
        /// Offending payload, kept for diagnostics
        body: Option<Value>,
    },
    #[error("cancelled")]
    Cancelled,
}

impl SdkError {
    /// Format error details for better debugging visibility
    pub fn format_details(&self) -> String {
        match self {
            SdkError::Upstream {
                status,
                message,
                data,
                source,
            } => {
                let mut msg = format!("http status {}: {}", status, message);
                if let Some(data) = data {
                    msg.push_str(&format!(" (type: {}", data.error_type));
                    if let Some(param) = &data.param {
                        msg.push_str(&format!(", param: {param}"));
                    }
                    if let Some(code) = &data.code {
                        msg.push_str(&format!(", code: {code}"));
                    }
                    msg.push(')');
                }
                if let Some(src) = source {
                    if let TransportError::HttpStatus { body, .. } = src.as_ref() {
                        if !message.contains(body.as_str()) && !body.is_empty() {
                            msg.push_str(&format!(" [body: {}]", display_body_for_error(body)));
                        }
                    }
                }
                msg
            }
            SdkError::TooManyEmbeddingValues {
                provider,
                model_id,
                max,
                actual,
            } => format!(
                "{provider} model {model_id} accepts at most {max} values per call, got {actual}"
            ),
            SdkError::InvalidResponse {
                message,
                body: Some(body),
            } => format!("invalid response: {message} [body: {body}]"),
            other => other.to_string(),
        }
    }

    /// Whether repeating the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            SdkError::Upstream { status, .. } => {
                matches!(*status, 408 | 409 | 429) || *status >= 500
            }
            SdkError::Transport(te) => matches!(
                te,
                TransportError::Network(_)
                    | TransportError::ConnectTimeout(_)
                    | TransportError::IdleReadTimeout(_)
            ),
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http status {status}: {sanitized}")]
    HttpStatus {
        status: u16,
        /// upstream body (should be treated as sensitive; only log sanitized)
        body: String,
        /// Retry-After header (ms) if available
        retry_after_ms: Option<u64>,
        /// Sanitized message for display
        sanitized: String,
        /// Upstream response headers
        headers: Vec<(String, String)>,
    },
    #[error("network: {0}")]
    Network(String),
    #[error("connect timeout after {0:?}")]
    ConnectTimeout(Duration),
    #[error("idle read timeout after {0:?}")]
    IdleReadTimeout(Duration),
    #[error("body read error: {0}")]
    BodyRead(String),
    #[error("response body is not valid json ({} bytes)", .body.len())]
    InvalidJson { body: String },
    #[error("other: {0}")]
    Other(String),
}

impl TransportError {
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            TransportError::HttpStatus { retry_after_ms, .. } => *retry_after_ms,
            _ => None,
        }
    }
}

pub fn http_status_fallback_message(status: u16) -> String {
    format!("http status {status}")
}

/// Short, log-safe rendering of an upstream body: minified JSON or a byte count.
pub fn display_body_for_error(body: &str) -> String {
    let trimmed = body.trim();
    let looks_like_json = trimmed.starts_with('{') || trimmed.starts_with('[');
    if looks_like_json {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(v) => v.to_string(),
            Err(_) => format!("{} bytes", body.len()),
        }
    } else {
        format!("{} bytes", body.len())
    }
}
