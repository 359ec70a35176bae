//! AI generation core: client with retry/mock fallback, and the per-session
//! orchestrator coordinating the four content kinds.

pub mod client;
pub mod orchestrator;

pub use client::{GenerationClient, ProviderMode, RetryPolicy};
pub use orchestrator::{failed_kinds, Orchestrator};
