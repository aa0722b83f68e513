use crate::ai_sdk_core::error::{display_body_for_error, TransportError};
use crate::ai_sdk_core::transport::{without_null_fields, ByteStream, HttpTransport, TransportConfig};
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::Value;
use std::error::Error as StdError;
use std::time::{Duration, Instant};
use tracing::debug;

/// `HttpTransport` backed by a pooled `reqwest::Client`. Cloning shares the pool.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    fn configure_builder(
        mut builder: reqwest::ClientBuilder,
        cfg: &TransportConfig,
    ) -> reqwest::ClientBuilder {
        builder = builder
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .pool_idle_timeout(Duration::from_secs(90));
        if let Some(req_timeout) = cfg.request_timeout {
            builder = builder.timeout(req_timeout);
        }
        builder.connect_timeout(cfg.connect_timeout)
    }

    fn try_new_with_builder(
        cfg: &TransportConfig,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, TransportError> {
        let client = Self::configure_builder(builder, cfg)
            .build()
            .map_err(|err| {
                TransportError::Other(format!(
                    "reqwest client build failed: {}",
                    format_reqwest_error_chain(&err)
                ))
            })?;
        Ok(Self { client })
    }

    pub fn try_new(cfg: &TransportConfig) -> Result<Self, TransportError> {
        Self::try_new_with_builder(cfg, Client::builder())
    }

    /// Wrap an existing client (proxies, custom TLS, shared pools).
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn send(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
        cfg: &TransportConfig,
    ) -> Result<reqwest::Response, TransportError> {
        let cleaned_body = if cfg.strip_null_fields {
            without_null_fields(body)
        } else {
            body.clone()
        };
        let mut req = self.client.post(url).json(&cleaned_body);
        for (k, v) in headers {
            // .json() already sets it
            if !k.eq_ignore_ascii_case("content-type") {
                req = req.header(k, v);
            }
        }

        let started = Instant::now();
        let resp = req.send().await.map_err(|e| {
            let detail = format_reqwest_error_chain(&e);
            debug!(target: "ai_sdk::transport::reqwest", %url, %detail, "reqwest send failed");
            if e.is_connect() {
                TransportError::Network(format!("connect: {detail}"))
            } else if e.is_timeout() {
                TransportError::ConnectTimeout(cfg.connect_timeout)
            } else {
                TransportError::Network(detail)
            }
        })?;

        let status = resp.status();
        debug!(
            target: "ai_sdk::transport::reqwest",
            %url,
            status = status.as_u16(),
            latency_ms = started.elapsed().as_millis() as u64,
            "response headers received"
        );
        if status.is_success() {
            return Ok(resp);
        }

        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|h| h.to_str().ok())
            .and_then(parse_retry_after_ms);
        let res_headers = header_pairs(resp.headers());
        let body_text = resp.text().await.unwrap_or_default();
        let sanitized = display_body_for_error(&body_text);
        debug!(
            target: "ai_sdk::transport::reqwest",
            %url,
            status = status.as_u16(),
            %sanitized,
            "upstream returned error status"
        );
        Err(TransportError::HttpStatus {
            status: status.as_u16(),
            body: body_text,
            retry_after_ms,
            sanitized,
            headers: res_headers,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    type StreamResponse = (ByteStream, Vec<(String, String)>);

    fn into_stream(resp: Self::StreamResponse) -> (ByteStream, Vec<(String, String)>) {
        resp
    }

    async fn post_json_stream(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
        cfg: &TransportConfig,
    ) -> Result<Self::StreamResponse, TransportError> {
        let resp = self.send(url, headers, body, cfg).await?;
        let res_headers = header_pairs(resp.headers());

        // Success: stream the bytes with idle timeout enforcement
        let idle = cfg.idle_read_timeout;
        let mut inner = resp.bytes_stream();
        let s = async_stream::try_stream! {
            loop {
                let next = tokio::time::timeout(idle, inner.next()).await;
                match next {
                    Err(_) => Err(TransportError::IdleReadTimeout(idle))?,
                    Ok(None) => break,
                    Ok(Some(Err(e))) => {
                        if e.is_timeout() { Err(TransportError::IdleReadTimeout(idle))?; }
                        else { Err(TransportError::BodyRead(e.to_string()))?; }
                    }
                    Ok(Some(Ok(bytes))) => { yield bytes; }
                }
            }
        };
        Ok((Box::pin(s), res_headers))
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
        cfg: &TransportConfig,
    ) -> Result<(Value, Vec<(String, String)>), TransportError> {
        let resp = self.send(url, headers, body, cfg).await?;
        let res_headers = header_pairs(resp.headers());
        let text = resp
            .text()
            .await
            .map_err(|e| TransportError::BodyRead(e.to_string()))?;
        let json: Value =
            serde_json::from_str(&text).map_err(|_| TransportError::InvalidJson { body: text })?;
        Ok((json, res_headers))
    }
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
        .collect()
}

fn parse_retry_after_ms(s: &str) -> Option<u64> {
    // RFC 7231: either delta-seconds or HTTP date; support simple delta only
    s.trim().parse::<u64>().ok().and_then(|secs| secs.checked_mul(1000))
}

fn format_reqwest_error_chain(err: &reqwest::Error) -> String {
    let mut out = err.to_string();
    let mut current = err.source();
    while let Some(src) = current {
        out.push_str(": ");
        out.push_str(&src.to_string());
        current = src.source();
    }
    out
}
