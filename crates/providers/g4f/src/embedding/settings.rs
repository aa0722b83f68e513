pub mod model_ids {
    pub const G4F_EMBED: &str = "G4F-embed";
}

pub const DEFAULT_MAX_EMBEDDINGS_PER_CALL: usize = 32;

/// Per-model embedding settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct G4FEmbeddingSettings {
    /// Upper bound on values per call, checked before any request is sent.
    pub max_embeddings_per_call: Option<usize>,
    pub supports_parallel_calls: Option<bool>,
}

impl Default for G4FEmbeddingSettings {
    fn default() -> Self {
        Self {
            max_embeddings_per_call: Some(DEFAULT_MAX_EMBEDDINGS_PER_CALL),
            supports_parallel_calls: Some(false),
        }
    }
}
