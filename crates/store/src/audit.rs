//! Append-only activity audit trail.
//!
//! Every mutating component writes an entry here; nothing that mutates ever
//! reads one back. Writes are best-effort from the caller's point of view:
//! the service layer downgrades sink failures to a warning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gearshed_core::{ActivityId, MemberId};

use crate::error::StorageError;

/// One audit record: who did what to which entity.
///
/// `action` carries a dotted tag (`loan.created`, `report.retired`,
/// `food.used`, ...) and `metadata` whatever structured context the caller
/// wants exported alongside the human description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: ActivityId,
    pub actor: MemberId,
    pub actor_name: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub description: String,
    pub metadata: serde_json::Value,
    pub occurred_at: DateTime<Utc>,
}

impl ActivityLogEntry {
    pub fn new(
        actor: MemberId,
        actor_name: impl Into<String>,
        action: impl Into<String>,
        entity_type: impl Into<String>,
        entity_id: impl Into<Uuid>,
        description: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            actor,
            actor_name: actor_name.into(),
            action: action.into(),
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            description: description.into(),
            metadata: serde_json::Value::Null,
            occurred_at,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Append-only audit sink.
pub trait AuditSink: Send + Sync {
    fn append_activity(&self, entry: ActivityLogEntry) -> Result<(), StorageError>;

    /// Newest-first window for export; mutation logic never calls this.
    fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityLogEntry>, StorageError>;
}
