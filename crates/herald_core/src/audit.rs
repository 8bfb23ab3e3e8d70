//! Audit trail entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One append-only record of a state-changing action.
///
/// Entries are never mutated, correlated, or deduplicated by the writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// What happened, e.g. `content_approved`
    pub action: String,
    /// Who did it
    pub performed_by: String,
    /// Kind of entity acted on, e.g. `content`, `brand`, `system`
    pub entity_type: String,
    /// Identifier of the entity acted on
    pub entity_id: String,
    /// Free-form structured detail
    pub details: serde_json::Value,
    /// When the action happened
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    /// Create an entry stamped with the current time.
    pub fn new(
        action: impl Into<String>,
        performed_by: impl Into<String>,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            action: action.into(),
            performed_by: performed_by.into(),
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            details,
            timestamp: Utc::now(),
        }
    }
}
