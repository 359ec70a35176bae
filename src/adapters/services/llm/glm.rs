//! GLM chat-completion transport adapter
//!
//! Implements ChatCompletionPort against Zhipu's GLM chat-completions API
//! (OpenAI-compatible request/response shape, bearer-token auth).

use crate::error::{AppError, Result};
use crate::ports::llm::{ChatCompletionPort, ChatRequest, ChatResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const GLM_API_BASE: &str = "https://open.bigmodel.cn/api/paas/v4/chat/completions";

/// Per-request timeout; slow generations past this point are abandoned and
/// reported as a provider failure
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Error payload shape returned by the provider on non-2xx responses
#[derive(Debug, Deserialize)]
struct GlmErrorBody {
    error: Option<GlmErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GlmErrorDetail {
    message: Option<String>,
}

/// GLM transport implementation
pub struct GlmService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GlmService {
    /// Create a new GLM transport with the given API key
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, GLM_API_BASE.to_string())
    }

    /// Create a transport pointed at an alternate endpoint (used in tests)
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(AppError::Http)?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }
}

#[async_trait]
impl ChatCompletionPort for GlmService {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        log::info!("Calling GLM chat completion with model: {}", request.model);

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Provider {
                status: None,
                message: format!("Chat completion request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the provider's own error message over the status line
            let message = response
                .json::<GlmErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|detail| detail.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
            return Err(AppError::Provider {
                status: Some(status.as_u16()),
                message: format!("GLM API error: {message}"),
            });
        }

        let completion: ChatResponse = response.json().await.map_err(|e| AppError::Provider {
            status: None,
            message: format!("Failed to parse completion response: {e}"),
        })?;

        log::info!(
            "GLM completion successful, generated {} characters",
            completion.first_content().len()
        );

        Ok(completion)
    }

    fn provider_name(&self) -> &str {
        "glm"
    }
}
