//! Provider-neutral type definitions for the G4F adapter.
//!
//! `v1` holds the language model surface (prompt, call options, results and
//! stream parts); `embedding` holds the embedding call surface.

pub mod embedding;
pub mod v1;

#[cfg(test)]
#[path = "../tests/serde_tests.rs"]
mod serde_tests;
