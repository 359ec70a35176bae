/// LLM transport port trait
///
/// Defines the chat-completion wire types and the interface one provider
/// transport must implement. Implementation: GLM adapter.
use crate::error::Result;
use crate::domain::models::TokenUsage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One entry in the ordered message list sent to the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user" or "assistant"
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completion request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

/// Chat-completion response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub id: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Option<TokenUsage>,
}

impl ChatResponse {
    /// Text of the first returned choice, empty when the provider returned
    /// no choices
    pub fn first_content(&self) -> &str {
        self.choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or("")
    }
}

/// Port trait for one chat-completion round trip against an LLM provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletionPort: Send + Sync {
    /// Perform a single chat-completion request. One outbound network call,
    /// no retries at this layer.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}
