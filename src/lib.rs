#[path = "../crates/sdk-types/src/lib.rs"]
pub mod types;
#[path = "../crates/core/src/lib.rs"]
pub mod core;
#[path = "../crates/streaming-sse/src/lib.rs"]
pub mod streaming_sse;
#[path = "../crates/provider/src/lib.rs"]
pub mod provider;
#[path = "../crates/transports/reqwest/src/lib.rs"]
pub mod transport_reqwest;

#[path = "../crates/providers/g4f/src/lib.rs"]
pub mod provider_g4f;

pub mod transports {
    pub use crate::transport_reqwest as reqwest;
}

pub mod providers {
    pub use crate::provider_g4f as g4f;
}

pub(crate) use crate::core as ai_sdk_core;
pub(crate) use crate::provider as ai_sdk_provider;
#[allow(unused_imports)]
pub(crate) use crate::provider_g4f as ai_sdk_providers_g4f;
pub(crate) use crate::streaming_sse as ai_sdk_streaming_sse;
pub(crate) use crate::transport_reqwest as reqwest_transport;
pub(crate) use crate::types as ai_sdk_types;
