//! LLM transport adapters
//!
//! Implementations of the ChatCompletionPort trait. Currently GLM only;
//! the port keeps the provider swappable.

pub mod glm;

pub use glm::GlmService;
