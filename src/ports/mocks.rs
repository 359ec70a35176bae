//! Mock implementations for testing

use crate::domain::models::{GeneratedContent, GenerationKind, GenerationRecord, Meeting};
use crate::error::{AppError, Result};
use crate::ports::llm::{ChatChoice, ChatCompletionPort, ChatMessage, ChatRequest, ChatResponse};
use crate::ports::storage::StoragePort;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock storage implementation for testing
#[derive(Clone, Default)]
pub struct MockStorage {
    meetings: Arc<Mutex<HashMap<i64, Meeting>>>,
    records: Arc<Mutex<Vec<GenerationRecord>>>,
    content_updates: Arc<Mutex<Vec<(i64, GeneratedContent)>>>,
    fail_content_updates: Arc<Mutex<bool>>,
    next_id: Arc<Mutex<i64>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i64 {
        let mut id = self.next_id.lock().unwrap();
        *id += 1;
        *id
    }

    /// Make every subsequent content update fail, to simulate a backend
    /// persistence failure
    pub fn fail_content_updates(&self) {
        *self.fail_content_updates.lock().unwrap() = true;
    }

    /// Every bundle passed to `update_meeting_content`, in call order
    pub fn content_updates(&self) -> Vec<(i64, GeneratedContent)> {
        self.content_updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoragePort for MockStorage {
    async fn create_meeting(&self, meeting: &Meeting) -> Result<i64> {
        let id = self.next_id();
        let mut m = meeting.clone();
        m.id = Some(id);
        self.meetings.lock().unwrap().insert(id, m);
        Ok(id)
    }

    async fn get_meeting(&self, id: i64) -> Result<Option<Meeting>> {
        Ok(self.meetings.lock().unwrap().get(&id).cloned())
    }

    async fn list_meetings(&self, limit: Option<i32>, offset: Option<i32>) -> Result<Vec<Meeting>> {
        let meetings = self.meetings.lock().unwrap();
        let mut list: Vec<_> = meetings.values().cloned().collect();
        list.sort_by_key(|m| -m.created_at);

        let offset = offset.unwrap_or(0) as usize;
        let limit = limit.map(|l| l as usize);

        let result = list.into_iter().skip(offset);
        if let Some(limit) = limit {
            Ok(result.take(limit).collect())
        } else {
            Ok(result.collect())
        }
    }

    async fn update_meeting(&self, meeting: &Meeting) -> Result<()> {
        if let Some(id) = meeting.id {
            self.meetings.lock().unwrap().insert(id, meeting.clone());
        }
        Ok(())
    }

    async fn update_meeting_content(&self, id: i64, content: &GeneratedContent) -> Result<()> {
        if *self.fail_content_updates.lock().unwrap() {
            return Err(AppError::Database(rusqlite::Error::InvalidQuery));
        }
        self.content_updates
            .lock()
            .unwrap()
            .push((id, content.clone()));
        let mut meetings = self.meetings.lock().unwrap();
        if let Some(meeting) = meetings.get_mut(&id) {
            meeting.generated_content = Some(content.clone());
            meeting.status = crate::domain::models::MeetingStatus::Completed;
        }
        Ok(())
    }

    async fn delete_meeting(&self, id: i64) -> Result<()> {
        self.meetings.lock().unwrap().remove(&id);
        self.records
            .lock()
            .unwrap()
            .retain(|r| r.meeting_id != id);
        Ok(())
    }

    async fn create_generation_record(&self, record: &GenerationRecord) -> Result<i64> {
        let id = self.next_id();
        let mut r = record.clone();
        r.id = Some(id);
        self.records.lock().unwrap().push(r);
        Ok(id)
    }

    async fn get_generation_records(&self, meeting_id: i64) -> Result<Vec<GenerationRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.meeting_id == meeting_id)
            .cloned()
            .collect())
    }
}

/// Which generation kind a prompt belongs to, keyed off the template wording
pub fn kind_of_prompt(request: &ChatRequest) -> GenerationKind {
    let user_prompt = request
        .messages
        .iter()
        .rev()
        .find(|m| m.role == "user")
        .map(|m| m.content.as_str())
        .unwrap_or("");

    if user_prompt.contains("议程") {
        GenerationKind::Agenda
    } else if user_prompt.contains("演讲") {
        GenerationKind::Speech
    } else if user_prompt.contains("海报") {
        GenerationKind::Poster
    } else {
        GenerationKind::Gifts
    }
}

fn canned_response(model: &str, content: String) -> ChatResponse {
    ChatResponse {
        id: "chatcmpl-test".to_string(),
        created: 0,
        model: model.to_string(),
        choices: vec![ChatChoice {
            index: 0,
            message: ChatMessage {
                role: "assistant".to_string(),
                content,
            },
            finish_reason: Some("stop".to_string()),
        }],
        usage: Some(crate::domain::models::TokenUsage {
            prompt_tokens: 100,
            completion_tokens: 200,
            total_tokens: 300,
        }),
    }
}

/// Chat transport that answers per kind and can be told to fail some kinds
#[derive(Default)]
pub struct CannedChatPort {
    fail_kinds: HashSet<GenerationKind>,
    calls: AtomicUsize,
}

impl CannedChatPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(kinds: impl IntoIterator<Item = GenerationKind>) -> Self {
        Self {
            fail_kinds: kinds.into_iter().collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatCompletionPort for CannedChatPort {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let kind = kind_of_prompt(request);
        if self.fail_kinds.contains(&kind) {
            return Err(AppError::Provider {
                status: Some(503),
                message: format!("{kind} generation unavailable"),
            });
        }
        Ok(canned_response(
            &request.model,
            format!("generated {kind} content"),
        ))
    }

    fn provider_name(&self) -> &str {
        "canned"
    }
}

/// Chat transport that holds its first call open until released, so tests
/// can observe in-flight state and overlapping attempts
pub struct GatedChatPort {
    gate: Arc<tokio::sync::Semaphore>,
    calls: AtomicUsize,
}

impl GatedChatPort {
    /// Created with the first call blocked; `release()` lets it finish
    pub fn new() -> Self {
        Self {
            gate: Arc::new(tokio::sync::Semaphore::new(0)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatCompletionPort for GatedChatPort {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == 1 {
            let _permit = self.gate.acquire().await.expect("gate closed");
        }
        Ok(canned_response(&request.model, format!("response-{call}")))
    }

    fn provider_name(&self) -> &str {
        "gated"
    }
}
