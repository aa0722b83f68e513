use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::types::v1::{headers_is_empty, Headers};

/// Single embedding vector.
pub type Embedding = Vec<f32>;

/// Input options for embedding calls.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmbedOptions {
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "headers_is_empty")]
    pub headers: Headers,
    #[serde(skip)]
    pub abort_signal: Option<CancellationToken>,
}

impl EmbedOptions {
    pub fn new(values: Vec<String>) -> Self {
        Self {
            values,
            ..Default::default()
        }
    }
}

/// Token usage for an embedding call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct EmbedUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u64>,
}
