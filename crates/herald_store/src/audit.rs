//! Audit trail storage.

use async_trait::async_trait;
use herald_core::AuditEntry;
use herald_error::HeraldResult;
use parking_lot::RwLock;
use tracing::debug;

/// Append-only audit sink.
///
/// One entry per state-changing action, written after the mutation commits.
/// Entries are never mutated, correlated, or deduplicated by the writer.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Append an entry.
    async fn record(&self, entry: AuditEntry) -> HeraldResult<()>;

    /// Most recent entries, newest first.
    async fn recent(&self, limit: usize) -> HeraldResult<Vec<AuditEntry>>;
}

/// Vec backed audit sink.
#[derive(Debug, Default)]
pub struct InMemoryAuditSink {
    entries: RwLock<Vec<AuditEntry>>,
}

impl InMemoryAuditSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditSink {
    async fn record(&self, entry: AuditEntry) -> HeraldResult<()> {
        debug!(action = %entry.action, entity = %entry.entity_id, "audit");
        self.entries.write().push(entry);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> HeraldResult<Vec<AuditEntry>> {
        let entries = self.entries.read();
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn entries_append_and_read_newest_first() {
        let sink = InMemoryAuditSink::new();
        for n in 0..3 {
            sink.record(AuditEntry::new(
                format!("action_{}", n),
                "admin",
                "content",
                "id",
                json!({ "n": n }),
            ))
            .await
            .unwrap();
        }
        let recent = sink.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].action, "action_2");
    }
}
