/// Storage port trait
///
/// Defines the interface for database operations.
/// Implementation: SQLite adapter
use crate::domain::models::{GeneratedContent, GenerationRecord, Meeting};
use crate::error::Result;
use async_trait::async_trait;

/// Port trait for storage operations
#[async_trait]
pub trait StoragePort: Send + Sync {
    // Meeting operations
    /// Create a new meeting
    async fn create_meeting(&self, meeting: &Meeting) -> Result<i64>;

    /// Get a meeting by ID
    async fn get_meeting(&self, id: i64) -> Result<Option<Meeting>>;

    /// List meetings, most recent first
    async fn list_meetings(&self, limit: Option<i32>, offset: Option<i32>) -> Result<Vec<Meeting>>;

    /// Update a meeting's editable attributes
    async fn update_meeting(&self, meeting: &Meeting) -> Result<()>;

    /// Store the generated-content bundle on a meeting and mark it completed
    async fn update_meeting_content(&self, id: i64, content: &GeneratedContent) -> Result<()>;

    /// Delete a meeting and all related data
    async fn delete_meeting(&self, id: i64) -> Result<()>;

    // Generation record operations
    /// Record one successful live generation
    async fn create_generation_record(&self, record: &GenerationRecord) -> Result<i64>;

    /// Get generation records for a meeting
    async fn get_generation_records(&self, meeting_id: i64) -> Result<Vec<GenerationRecord>>;
}
