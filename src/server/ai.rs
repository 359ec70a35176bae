//! AI generation route handlers
//!
//! The server-side proxy for the GLM provider: validates the request, runs
//! the generation core, and optionally persists a batch's successful bundle
//! onto an existing meeting.

use crate::domain::models::{
    GenerationKind, GenerationRecord, GenerationResult, MeetingDescription,
};
use crate::domain::prompts::PromptTemplates;
use crate::error::{AppError, Result};
use crate::generation::{failed_kinds, Orchestrator};
use crate::server::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Request body for single-kind generation
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Generation kind as a raw string so invalid values get a clean 400
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(rename = "meetingData")]
    pub meeting_data: Option<MeetingDescription>,
}

/// Request body for batch generation
#[derive(Debug, Deserialize)]
pub struct GenerateAllRequest {
    #[serde(rename = "meetingData")]
    pub meeting_data: Option<MeetingDescription>,
    /// When present, the successful bundle is persisted onto this meeting
    #[serde(rename = "meetingId")]
    pub meeting_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct GenerateAllResponse {
    pub results: HashMap<GenerationKind, GenerationResult>,
    /// Kinds that failed, named explicitly for the client's error summary
    pub failed: Vec<GenerationKind>,
    /// Present only when persistence was requested; false means generation
    /// succeeded but saving did not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persisted: Option<bool>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| AppError::InvalidInput(format!("missing required field: {field}")))
}

/// POST /api/ai/generate
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Response> {
    let kind: GenerationKind = required(request.kind, "type")?.parse()?;
    let data = required(request.meeting_data, "meetingData")?;
    data.validate()?;

    let result = state.client.generate(kind, &data).await;

    let status = if result.success {
        StatusCode::OK
    } else {
        result
            .error_status
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    };
    Ok((status, Json(result)).into_response())
}

/// POST /api/ai/generate-all
///
/// Runs all four kinds through a request-scoped orchestrator. Persistence is
/// best-effort: a storage failure is reported through `persisted: false` and
/// never discards the generation results.
pub async fn generate_all(
    State(state): State<AppState>,
    Json(request): Json<GenerateAllRequest>,
) -> Result<Json<GenerateAllResponse>> {
    let data = required(request.meeting_data, "meetingData")?;

    let orchestrator = Orchestrator::new(Arc::clone(&state.client));
    let results = orchestrator.generate_all(&data).await?;
    let failed = failed_kinds(&results);

    let persisted = match request.meeting_id {
        Some(meeting_id) => {
            let bundle = orchestrator.bundle();
            Some(persist_bundle(&state, meeting_id, &data, &results, &bundle).await)
        }
        None => None,
    };

    Ok(Json(GenerateAllResponse {
        results,
        failed,
        persisted,
    }))
}

/// Save the successful bundle and audit records; returns false on any
/// storage failure
async fn persist_bundle(
    state: &AppState,
    meeting_id: i64,
    data: &MeetingDescription,
    results: &HashMap<GenerationKind, GenerationResult>,
    bundle: &crate::domain::models::GeneratedContent,
) -> bool {
    if bundle.is_empty() {
        return false;
    }

    if let Err(e) = state.storage.update_meeting_content(meeting_id, bundle).await {
        log::warn!("failed to persist generated content for meeting {meeting_id}: {e}");
        return false;
    }

    for kind in GenerationKind::ALL {
        let Some(result) = results.get(&kind) else {
            continue;
        };
        if !result.success || result.mock {
            continue;
        }
        let record = GenerationRecord::new(
            meeting_id,
            kind,
            result.content.clone(),
            PromptTemplates::build_prompt(kind, data),
            state.client.model().to_string(),
            result.usage.unwrap_or_default(),
        );
        if let Err(e) = state.storage.create_generation_record(&record).await {
            log::warn!("failed to record {kind} generation for meeting {meeting_id}: {e}");
        }
    }
    true
}
