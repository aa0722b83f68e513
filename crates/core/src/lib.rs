pub mod cancel;
pub mod embedding;
pub mod error;
pub mod headers;
pub mod language_model;
pub mod transport;

pub use crate::core::embedding::{EmbedResponse, EmbeddingModel};
pub use crate::core::error::{SdkError, TransportError, UpstreamErrorData};
pub use crate::core::language_model::{GenerateResponse, LanguageModel, PartStream, StreamResponse};
// Convenience re-exports of common types
pub use crate::ai_sdk_types::embedding::{EmbedOptions, EmbedUsage, Embedding};
pub use crate::ai_sdk_types::v1 as types;

#[cfg(test)]
#[path = "../tests/cancel_tests.rs"]
mod cancel_tests;
#[cfg(test)]
#[path = "../tests/headers_tests.rs"]
mod headers_tests;
