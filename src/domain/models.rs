/// Domain models for the meeting planner
///
/// These models represent core business entities and are transport-agnostic.
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a meeting record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Draft,
    Completed,
    Published,
}

impl std::fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeetingStatus::Draft => write!(f, "draft"),
            MeetingStatus::Completed => write!(f, "completed"),
            MeetingStatus::Published => write!(f, "published"),
        }
    }
}

impl FromStr for MeetingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(MeetingStatus::Draft),
            "completed" => Ok(MeetingStatus::Completed),
            "published" => Ok(MeetingStatus::Published),
            other => Err(AppError::InvalidInput(format!(
                "unknown meeting status: {other}"
            ))),
        }
    }
}

/// The four AI content categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    Agenda,
    Speech,
    Poster,
    Gifts,
}

impl GenerationKind {
    /// All kinds, in canonical order
    pub const ALL: [GenerationKind; 4] = [
        GenerationKind::Agenda,
        GenerationKind::Speech,
        GenerationKind::Poster,
        GenerationKind::Gifts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationKind::Agenda => "agenda",
            GenerationKind::Speech => "speech",
            GenerationKind::Poster => "poster",
            GenerationKind::Gifts => "gifts",
        }
    }
}

impl std::fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GenerationKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "agenda" => Ok(GenerationKind::Agenda),
            "speech" => Ok(GenerationKind::Speech),
            "poster" => Ok(GenerationKind::Poster),
            "gifts" => Ok(GenerationKind::Gifts),
            other => Err(AppError::InvalidKind(other.to_string())),
        }
    }
}

/// Meeting attributes collected on the planning form
///
/// Input to prompt building and generation. Optional fields fall back to
/// "待定"-style defaults inside the prompt templates. Wire names follow the
/// browser client's form payload.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MeetingDescription {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Attendee count as entered, e.g. "100"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub meeting_type: Option<String>,
    /// Meeting length in hours as entered, e.g. "0.5" or "8"
    #[serde(rename = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<String>,
}

impl MeetingDescription {
    /// Validate preconditions for generation: title must be non-empty
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "meeting title is required for generation".to_string(),
            ));
        }
        Ok(())
    }
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Outcome of one generation attempt for one kind
///
/// Provider failures are always captured here as data, never surfaced as
/// errors, so batch generation can settle every kind independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub success: bool,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// True when canned demonstration content was returned because no
    /// provider credential is configured
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub mock: bool,
    /// Upstream HTTP status on provider failure; internal, used by the
    /// server boundary to propagate status codes
    #[serde(skip)]
    pub error_status: Option<u16>,
}

impl GenerationResult {
    /// Successful result from a live provider response
    pub fn success(content: String, usage: TokenUsage) -> Self {
        Self {
            success: true,
            content,
            error: None,
            usage: Some(usage),
            mock: false,
            error_status: None,
        }
    }

    /// Successful mock-mode result with placeholder usage
    pub fn mocked(content: String) -> Self {
        Self {
            success: true,
            content,
            error: None,
            usage: Some(TokenUsage::default()),
            mock: true,
            error_status: None,
        }
    }

    /// Failed result; content is always empty on failure
    pub fn failure(error: String, status: Option<u16>) -> Self {
        Self {
            success: false,
            content: String::new(),
            error: Some(error),
            usage: None,
            mock: false,
            error_status: status,
        }
    }
}

/// The bundle of successfully generated content, keyed by kind
///
/// This is the unit persisted on the meeting record and handed to exporters.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GeneratedContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gifts: Option<String>,
}

impl GeneratedContent {
    pub fn is_empty(&self) -> bool {
        self.agenda.is_none()
            && self.speech.is_none()
            && self.poster.is_none()
            && self.gifts.is_none()
    }

    pub fn get(&self, kind: GenerationKind) -> Option<&String> {
        match kind {
            GenerationKind::Agenda => self.agenda.as_ref(),
            GenerationKind::Speech => self.speech.as_ref(),
            GenerationKind::Poster => self.poster.as_ref(),
            GenerationKind::Gifts => self.gifts.as_ref(),
        }
    }

    pub fn set(&mut self, kind: GenerationKind, content: String) {
        match kind {
            GenerationKind::Agenda => self.agenda = Some(content),
            GenerationKind::Speech => self.speech = Some(content),
            GenerationKind::Poster => self.poster = Some(content),
            GenerationKind::Gifts => self.gifts = Some(content),
        }
    }
}

/// Represents a planned meeting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: Option<i64>,
    pub title: String,
    pub date: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub attendees: Option<String>,
    pub budget: Option<String>,
    #[serde(rename = "type")]
    pub meeting_type: Option<String>,
    #[serde(rename = "duration")]
    pub duration_hours: Option<String>,
    pub status: MeetingStatus,
    pub generated_content: Option<GeneratedContent>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Meeting {
    /// Creates a new draft meeting from a planning-form description
    pub fn from_description(data: &MeetingDescription) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id: None,
            title: data.title.clone(),
            date: data.date.clone(),
            location: data.location.clone(),
            description: data.description.clone(),
            attendees: data.attendees.clone(),
            budget: data.budget.clone(),
            meeting_type: data.meeting_type.clone(),
            duration_hours: data.duration_hours.clone(),
            status: MeetingStatus::Draft,
            generated_content: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Audit row for one successful live generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub id: Option<i64>,
    pub meeting_id: i64,
    pub kind: GenerationKind,
    pub content: String,
    pub prompt: String,
    pub model: String,
    pub usage: TokenUsage,
    pub created_at: i64,
}

impl GenerationRecord {
    pub fn new(
        meeting_id: i64,
        kind: GenerationKind,
        content: String,
        prompt: String,
        model: String,
        usage: TokenUsage,
    ) -> Self {
        Self {
            id: None,
            meeting_id,
            kind,
            content,
            prompt,
            model,
            usage,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}
