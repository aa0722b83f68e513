//! G4F provider: chat completions (plain and streaming) and text embeddings
//! over the backend's OpenAI-style HTTP API.

pub mod config;
pub mod error;
pub mod finish_reason;
pub mod provider;
mod stream;
pub mod chat {
    pub mod convert;
    pub mod language_model;
    pub mod prepare_tools;
    pub mod prompt;
    pub(crate) mod response;
    pub mod settings;
}
pub mod embedding {
    pub mod embedding_model;
    pub mod settings;
}

pub use chat::language_model::{build_args, ChatArgs, G4FChatLanguageModel};
pub use chat::settings::{model_ids, G4FChatSettings};
pub use embedding::embedding_model::G4FEmbeddingModel;
pub use embedding::settings::G4FEmbeddingSettings;
pub use provider::{G4FProvider, G4FProviderSettings, API_KEY_ENV_VAR, DEFAULT_BASE_URL};
pub use stream::build_stream;

#[cfg(test)]
#[path = "../tests/support.rs"]
mod test_support;
#[cfg(test)]
#[path = "../tests/convert_tests.rs"]
mod convert_tests;
#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "../tests/language_model_tests.rs"]
mod language_model_tests;
#[cfg(test)]
#[path = "../tests/stream_tests.rs"]
mod stream_tests;
#[cfg(test)]
#[path = "../tests/error_tests.rs"]
mod error_tests;
#[cfg(test)]
#[path = "../tests/embedding_model_tests.rs"]
mod embedding_model_tests;
#[cfg(test)]
#[path = "../tests/provider_tests.rs"]
mod provider_tests;
