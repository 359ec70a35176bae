//! Meeting CRUD route handlers

use crate::domain::models::{GeneratedContent, Meeting, MeetingDescription};
use crate::error::{AppError, Result};
use crate::server::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

/// POST /api/meetings
pub async fn create_meeting(
    State(state): State<AppState>,
    Json(data): Json<MeetingDescription>,
) -> Result<(StatusCode, Json<Meeting>)> {
    data.validate()?;

    let mut meeting = Meeting::from_description(&data);
    let id = state.storage.create_meeting(&meeting).await?;
    meeting.id = Some(id);
    Ok((StatusCode::CREATED, Json(meeting)))
}

/// GET /api/meetings
pub async fn list_meetings(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Meeting>>> {
    let meetings = state
        .storage
        .list_meetings(params.limit, params.offset)
        .await?;
    Ok(Json(meetings))
}

/// GET /api/meetings/:id
pub async fn get_meeting(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Meeting>> {
    let meeting = state
        .storage
        .get_meeting(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("meeting {id}")))?;
    Ok(Json(meeting))
}

/// PUT /api/meetings/:id
pub async fn update_meeting(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<MeetingDescription>,
) -> Result<Json<Meeting>> {
    data.validate()?;

    let mut meeting = state
        .storage
        .get_meeting(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("meeting {id}")))?;

    meeting.title = data.title;
    meeting.date = data.date;
    meeting.location = data.location;
    meeting.description = data.description;
    meeting.attendees = data.attendees;
    meeting.budget = data.budget;
    meeting.meeting_type = data.meeting_type;
    meeting.duration_hours = data.duration_hours;
    meeting.updated_at = chrono::Utc::now().timestamp();

    state.storage.update_meeting(&meeting).await?;
    Ok(Json(meeting))
}

/// PUT /api/meetings/:id/content
pub async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(content): Json<GeneratedContent>,
) -> Result<StatusCode> {
    state.storage.update_meeting_content(id, &content).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/meetings/:id
pub async fn delete_meeting(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.storage.delete_meeting(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
