/// Known chat model ids. Any other id string is passed through unchanged.
pub mod model_ids {
    pub const MINISTRAL_3B_LATEST: &str = "ministral-3b-latest";
    pub const MINISTRAL_8B_LATEST: &str = "ministral-8b-latest";
    pub const G4F_LARGE_LATEST: &str = "G4F-large-latest";
    pub const G4F_SMALL_LATEST: &str = "G4F-small-latest";
    pub const PIXTRAL_12B_2409: &str = "pixtral-12b-2409";
    pub const OPEN_G4F_7B: &str = "open-G4F-7b";
    pub const OPEN_MIXTRAL_8X7B: &str = "open-mixtral-8x7b";
    pub const OPEN_MIXTRAL_8X22B: &str = "open-mixtral-8x22b";
}

/// Per-model chat settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct G4FChatSettings {
    /// Inject a safety prompt before all conversations. Sent as `safe_prompt`.
    pub safe_prompt: Option<bool>,
}
