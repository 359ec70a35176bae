//! Generation client
//!
//! Turns one (kind, meeting description) pair into a GenerationResult by
//! calling the LLM transport with bounded exponential-backoff retries, or by
//! returning canned demonstration content when no credential is configured.
//! Provider failures are captured as data, never returned as errors.

use crate::domain::models::{GenerationKind, GenerationResult, MeetingDescription};
use crate::domain::prompts::PromptTemplates;
use crate::error::AppError;
use crate::ports::llm::{ChatCompletionPort, ChatMessage, ChatRequest};
use std::sync::Arc;
use std::time::Duration;

/// Sampling temperature for all generation kinds
const TEMPERATURE: f32 = 0.7;
/// Nucleus sampling parameter
const TOP_P: f32 = 0.9;
/// Generation length cap
const MAX_TOKENS: u32 = 2000;

/// Whether the client talks to the real provider or serves canned content
///
/// Mock mode is the designed degraded state when no API key is configured,
/// modeled explicitly so tests can force either mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderMode {
    Live { model: String },
    Mock,
}

impl ProviderMode {
    pub fn live(model: impl Into<String>) -> Self {
        ProviderMode::Live {
            model: model.into(),
        }
    }

    /// Live when an API key is present, Mock otherwise
    pub fn from_credential(api_key: &str, model: impl Into<String>) -> Self {
        if api_key.is_empty() {
            log::warn!("No GLM API key configured, serving mock content");
            ProviderMode::Mock
        } else {
            ProviderMode::live(model)
        }
    }
}

/// Bounded exponential-backoff retry policy, shared by every call path that
/// talks to the provider
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before the attempt after `attempt` (1-based): base * 2^attempt,
    /// i.e. 2s then 4s with the default policy
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Client for one-shot content generation against the LLM provider
pub struct GenerationClient {
    transport: Arc<dyn ChatCompletionPort>,
    mode: ProviderMode,
    retry: RetryPolicy,
}

impl GenerationClient {
    pub fn new(
        transport: Arc<dyn ChatCompletionPort>,
        mode: ProviderMode,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            mode,
            retry,
        }
    }

    /// The configured model name, or the demo placeholder in mock mode
    pub fn model(&self) -> &str {
        match &self.mode {
            ProviderMode::Live { model } => model,
            ProviderMode::Mock => "mock",
        }
    }

    /// Generate content of one kind for the given meeting
    ///
    /// In mock mode this returns immediately with canned content and zero
    /// usage; no network call and no retry. In live mode the transport is
    /// tried up to `max_attempts` times with exponential backoff, and the
    /// last error is surfaced in the failed result.
    pub async fn generate(
        &self,
        kind: GenerationKind,
        data: &MeetingDescription,
    ) -> GenerationResult {
        let model = match &self.mode {
            ProviderMode::Mock => {
                return GenerationResult::mocked(mock_content(kind).to_string());
            }
            ProviderMode::Live { model } => model.clone(),
        };

        let request = ChatRequest {
            model,
            messages: vec![
                ChatMessage::system(PromptTemplates::system_instruction(kind)),
                ChatMessage::user(PromptTemplates::build_prompt(kind, data)),
            ],
            temperature: Some(TEMPERATURE),
            top_p: Some(TOP_P),
            max_tokens: Some(MAX_TOKENS),
        };

        let mut last_error: Option<AppError> = None;
        for attempt in 1..=self.retry.max_attempts {
            match self.transport.chat(&request).await {
                Ok(response) => {
                    let content = response.first_content().to_string();
                    let usage = response.usage.unwrap_or_default();
                    return GenerationResult::success(content, usage);
                }
                Err(e) => {
                    log::warn!(
                        "{kind} generation attempt {attempt}/{} failed: {e}",
                        self.retry.max_attempts
                    );
                    last_error = Some(e);
                    if attempt < self.retry.max_attempts {
                        tokio::time::sleep(self.retry.backoff(attempt)).await;
                    }
                }
            }
        }

        match last_error {
            Some(e) => {
                let status = e.provider_status();
                GenerationResult::failure(e.to_string(), status)
            }
            // max_attempts == 0; nothing was ever tried
            None => GenerationResult::failure("generation was not attempted".to_string(), None),
        }
    }
}

/// Canned demonstration content served in mock mode
pub fn mock_content(kind: GenerationKind) -> &'static str {
    match kind {
        GenerationKind::Agenda => {
            "📋 会议议程（演示内容）\n\n1. 【开幕 - 30分钟】\n   - 主持人开场\n   - 领导致辞\n\n\
             2. 【主题分享 - 60分钟】\n   - 核心内容\n   - 案例分析\n\n\
             3. 【互动讨论 - 45分钟】\n   - 分组讨论\n   - Q&A\n\n\
             4. 【总结 - 15分钟】\n   - 会议总结\n   - 行动计划\n\n\
             ⚠️ 请配置 GLM_API_KEY 获取 AI 真实生成内容"
        }
        GenerationKind::Speech => {
            "🎤 开场致辞（演示内容）\n\n尊敬的各位来宾：\n\n\
             非常荣幸主持本次会议。今天我们汇聚一堂，共同探讨重要议题。\n\n\
             本次会议的核心目标是推动交流与合作，共同迎接新的发展机遇。\n\n\
             预祝会议圆满成功！\n\n⚠️ 请配置 GLM_API_KEY 获取 AI 真实生成内容"
        }
        GenerationKind::Poster => {
            "🎨 海报设计方案（演示内容）\n\n设计风格：现代商务\n主色调：蓝色渐变\n\n\
             核心元素：\n- 会议主题标题\n- 时间地点信息\n- 主办方 Logo\n- 二维码\n\n\
             ⚠️ 请配置 GLM_API_KEY 获取 AI 真实生成内容"
        }
        GenerationKind::Gifts => {
            "🎁 伴手礼推荐（演示内容）\n\n方案一：商务礼品套装 - ¥38/份\n\
             方案二：保温杯礼盒 - ¥45/份\n方案三：充电宝套装 - ¥52/份\n\n\
             ⚠️ 请配置 GLM_API_KEY 获取 AI 真实生成内容"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TokenUsage;
    use crate::ports::llm::{ChatChoice, ChatResponse, MockChatCompletionPort};
    use crate::ports::mocks::CannedChatPort;
    use mockall::Sequence;

    fn launch_event() -> MeetingDescription {
        MeetingDescription {
            title: "产品发布会".to_string(),
            duration_hours: Some("8".to_string()),
            ..Default::default()
        }
    }

    fn ok_response(content: &str) -> ChatResponse {
        ChatResponse {
            id: "chatcmpl-1".to_string(),
            created: 0,
            model: "glm-4-flash".to_string(),
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage {
                    role: "assistant".to_string(),
                    content: content.to_string(),
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: Some(TokenUsage {
                prompt_tokens: 100,
                completion_tokens: 200,
                total_tokens: 300,
            }),
        }
    }

    #[tokio::test]
    async fn test_mock_mode_never_calls_transport() {
        let transport = Arc::new(CannedChatPort::new());
        let client = GenerationClient::new(
            transport.clone(),
            ProviderMode::Mock,
            RetryPolicy::default(),
        );

        for kind in GenerationKind::ALL {
            let result = client.generate(kind, &launch_event()).await;
            assert!(result.success);
            assert!(result.mock);
            assert!(!result.content.is_empty());
            assert_eq!(result.usage, Some(TokenUsage::default()));
        }
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mode_from_credential() {
        assert_eq!(
            ProviderMode::from_credential("", "glm-4-flash"),
            ProviderMode::Mock
        );
        assert_eq!(
            ProviderMode::from_credential("sk-123", "glm-4-flash"),
            ProviderMode::live("glm-4-flash")
        );
    }

    #[tokio::test]
    async fn test_live_success_parses_content_and_usage() {
        let mut transport = MockChatCompletionPort::new();
        transport
            .expect_chat()
            .times(1)
            .returning(|_| Ok(ok_response("完整议程")));

        let client = GenerationClient::new(
            Arc::new(transport),
            ProviderMode::live("glm-4-flash"),
            RetryPolicy::default(),
        );
        let result = client
            .generate(GenerationKind::Agenda, &launch_event())
            .await;
        assert!(result.success);
        assert!(!result.mock);
        assert_eq!(result.content, "完整议程");
        assert_eq!(result.usage.map(|u| u.total_tokens), Some(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_succeeds_on_third_attempt_with_backoff() {
        let mut transport = MockChatCompletionPort::new();
        let mut seq = Sequence::new();
        for _ in 0..2 {
            transport
                .expect_chat()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Err(AppError::provider("temporarily overloaded")));
        }
        transport
            .expect_chat()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ok_response("third time lucky")));

        let client = GenerationClient::new(
            Arc::new(transport),
            ProviderMode::live("glm-4-flash"),
            RetryPolicy::default(),
        );

        let started = tokio::time::Instant::now();
        let result = client
            .generate(GenerationKind::Speech, &launch_event())
            .await;
        let elapsed = started.elapsed();

        assert!(result.success);
        assert_eq!(result.content, "third time lucky");
        // 2s after the first failure, 4s after the second
        assert_eq!(elapsed, Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_exhaustion_preserves_last_error() {
        let mut transport = MockChatCompletionPort::new();
        let mut seq = Sequence::new();
        for attempt in 1..=3u32 {
            transport
                .expect_chat()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_| {
                    Err(AppError::Provider {
                        status: Some(500),
                        message: format!("failure on attempt {attempt}"),
                    })
                });
        }

        let client = GenerationClient::new(
            Arc::new(transport),
            ProviderMode::live("glm-4-flash"),
            RetryPolicy::default(),
        );
        let result = client
            .generate(GenerationKind::Poster, &launch_event())
            .await;

        assert!(!result.success);
        assert!(result.content.is_empty());
        assert!(result
            .error
            .as_deref()
            .unwrap()
            .contains("failure on attempt 3"));
        assert_eq!(result.error_status, Some(500));
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(2));
        assert_eq!(policy.backoff(2), Duration::from_secs(4));
    }

    #[test]
    fn test_mock_content_is_distinct_per_kind() {
        let mut seen = std::collections::HashSet::new();
        for kind in GenerationKind::ALL {
            assert!(seen.insert(mock_content(kind)));
        }
    }
}
