/// SQLite storage adapter
///
/// Implements StoragePort for SQLite database operations.
use crate::domain::models::{
    GeneratedContent, GenerationKind, GenerationRecord, Meeting, MeetingStatus, TokenUsage,
};
use crate::error::{AppError, Result};
use crate::ports::storage::StoragePort;
use async_trait::async_trait;
use rusqlite::{params, Connection, Row};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// SQLite storage implementation
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Create a new SQLite storage with the given database path
    pub fn new(db_path: PathBuf) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        // Enable foreign keys
        conn.execute("PRAGMA foreign_keys = ON", [])?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run database migrations
    pub fn run_migrations(&self) -> Result<()> {
        use rusqlite_migration::{Migrations, M};

        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../../migrations/001_initial.sql"
        ))]);

        let mut conn = self.conn.lock().unwrap();
        migrations
            .to_latest(&mut conn)
            .map_err(|e| AppError::Database(rusqlite::Error::ToSqlConversionFailure(Box::new(e))))?;

        Ok(())
    }

    fn meeting_from_row(row: &Row<'_>) -> rusqlite::Result<Meeting> {
        let status_str: String = row.get(9)?;
        let status = MeetingStatus::from_str(&status_str).unwrap_or(MeetingStatus::Draft);

        let content_json: Option<String> = row.get(10)?;
        let generated_content =
            content_json.and_then(|json| serde_json::from_str::<GeneratedContent>(&json).ok());

        Ok(Meeting {
            id: Some(row.get(0)?),
            title: row.get(1)?,
            date: row.get(2)?,
            location: row.get(3)?,
            description: row.get(4)?,
            attendees: row.get(5)?,
            budget: row.get(6)?,
            meeting_type: row.get(7)?,
            duration_hours: row.get(8)?,
            status,
            generated_content,
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
        })
    }
}

const MEETING_COLUMNS: &str = "id, title, date, location, description, attendees, budget, \
     meeting_type, duration_hours, status, generated_content, created_at, updated_at";

#[async_trait]
impl StoragePort for SqliteStorage {
    async fn create_meeting(&self, meeting: &Meeting) -> Result<i64> {
        let content_json = meeting
            .generated_content
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO meetings (title, date, location, description, attendees, budget,
             meeting_type, duration_hours, status, generated_content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                meeting.title,
                meeting.date,
                meeting.location,
                meeting.description,
                meeting.attendees,
                meeting.budget,
                meeting.meeting_type,
                meeting.duration_hours,
                meeting.status.to_string(),
                content_json,
                meeting.created_at,
                meeting.updated_at,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn get_meeting(&self, id: i64) -> Result<Option<Meeting>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {MEETING_COLUMNS} FROM meetings WHERE id = ?1"
        ))?;

        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(Self::meeting_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    async fn list_meetings(&self, limit: Option<i32>, offset: Option<i32>) -> Result<Vec<Meeting>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {MEETING_COLUMNS} FROM meetings ORDER BY created_at DESC LIMIT ?1 OFFSET ?2"
        ))?;

        let rows = stmt.query_map(
            params![limit.unwrap_or(100), offset.unwrap_or(0)],
            Self::meeting_from_row,
        )?;

        let mut meetings = Vec::new();
        for meeting_result in rows {
            meetings.push(meeting_result?);
        }

        Ok(meetings)
    }

    async fn update_meeting(&self, meeting: &Meeting) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE meetings SET title = ?1, date = ?2, location = ?3, description = ?4,
             attendees = ?5, budget = ?6, meeting_type = ?7, duration_hours = ?8,
             status = ?9, updated_at = ?10 WHERE id = ?11",
            params![
                meeting.title,
                meeting.date,
                meeting.location,
                meeting.description,
                meeting.attendees,
                meeting.budget,
                meeting.meeting_type,
                meeting.duration_hours,
                meeting.status.to_string(),
                chrono::Utc::now().timestamp(),
                meeting.id,
            ],
        )?;
        Ok(())
    }

    async fn update_meeting_content(&self, id: i64, content: &GeneratedContent) -> Result<()> {
        let content_json = serde_json::to_string(content)?;

        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE meetings SET generated_content = ?1, status = ?2, updated_at = ?3
             WHERE id = ?4",
            params![
                content_json,
                MeetingStatus::Completed.to_string(),
                chrono::Utc::now().timestamp(),
                id,
            ],
        )?;

        if updated == 0 {
            return Err(AppError::NotFound(format!("meeting {id}")));
        }
        Ok(())
    }

    async fn delete_meeting(&self, id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM meetings WHERE id = ?1", params![id])?;
        Ok(())
    }

    async fn create_generation_record(&self, record: &GenerationRecord) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO generation_records (meeting_id, kind, content, prompt, model,
             prompt_tokens, completion_tokens, total_tokens, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                record.meeting_id,
                record.kind.to_string(),
                record.content,
                record.prompt,
                record.model,
                record.usage.prompt_tokens,
                record.usage.completion_tokens,
                record.usage.total_tokens,
                record.created_at,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn get_generation_records(&self, meeting_id: i64) -> Result<Vec<GenerationRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, meeting_id, kind, content, prompt, model,
             prompt_tokens, completion_tokens, total_tokens, created_at
             FROM generation_records WHERE meeting_id = ?1 ORDER BY created_at",
        )?;

        let rows = stmt.query_map(params![meeting_id], |row| {
            let kind_str: String = row.get(2)?;
            let kind = GenerationKind::from_str(&kind_str).unwrap_or(GenerationKind::Agenda);

            Ok(GenerationRecord {
                id: Some(row.get(0)?),
                meeting_id: row.get(1)?,
                kind,
                content: row.get(3)?,
                prompt: row.get(4)?,
                model: row.get(5)?,
                usage: TokenUsage {
                    prompt_tokens: row.get(6)?,
                    completion_tokens: row.get(7)?,
                    total_tokens: row.get(8)?,
                },
                created_at: row.get(9)?,
            })
        })?;

        let mut records = Vec::new();
        for record_result in rows {
            records.push(record_result?);
        }

        Ok(records)
    }
}
