/// Domain layer - core business models
///
/// These models are platform-agnostic and represent core business entities.
pub mod models;
pub mod prompts;

pub use models::{
    GeneratedContent, GenerationKind, GenerationRecord, GenerationResult, Meeting,
    MeetingDescription, MeetingStatus, TokenUsage,
};
pub use prompts::PromptTemplates;
