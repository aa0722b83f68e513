use crate::core::error::TransportError;
use async_trait::async_trait;
use bytes::Bytes;
use futures_core::Stream;
use serde_json::Value;
use std::pin::Pin;
use std::time::Duration;

/// Boxed response body stream handed out by transports.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

#[derive(Clone, Debug)]
pub struct TransportConfig {
    /// Overall request timeout (optional; if None, rely on connect + idle)
    pub request_timeout: Option<Duration>,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Per-chunk idle read timeout
    pub idle_read_timeout: Duration,
    /// Whether to strip object fields with null values from JSON bodies before sending
    pub strip_null_fields: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: None,
            connect_timeout: Duration::from_secs(10),
            idle_read_timeout: Duration::from_secs(45),
            strip_null_fields: true,
        }
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Response for a successful streaming HTTP request.
    type StreamResponse: Send;

    /// Split a streaming response into its byte stream and response headers.
    fn into_stream(resp: Self::StreamResponse) -> (ByteStream, Vec<(String, String)>);

    async fn post_json_stream(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
        cfg: &TransportConfig,
    ) -> Result<Self::StreamResponse, TransportError>;

    /// Perform a JSON POST request and return the parsed JSON body along with response headers.
    async fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
        cfg: &TransportConfig,
    ) -> Result<(Value, Vec<(String, String)>), TransportError>;
}

/// Copy of `value` without object entries whose value is `null`.
///
/// Array elements are kept as-is so indices do not shift.
pub fn without_null_fields(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), without_null_fields(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(without_null_fields).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::without_null_fields;
    use serde_json::json;

    #[test]
    fn strips_nested_nulls_but_keeps_array_slots() {
        let body = json!({
            "model": "m",
            "temperature": null,
            "response_format": {"type": "json_object", "schema": null},
            "stop": [null, "x"]
        });
        assert_eq!(
            without_null_fields(&body),
            json!({
                "model": "m",
                "response_format": {"type": "json_object"},
                "stop": [null, "x"]
            })
        );
    }
}
