//! External service adapters
//!
//! Adapters for external APIs, currently the LLM provider.

pub mod llm;
