//! System control state storage.

use async_trait::async_trait;
use chrono::Utc;
use herald_core::ControlState;
use herald_error::HeraldResult;
use parking_lot::RwLock;

/// Append-only store of control state records.
///
/// The current state is the most recently appended record, so reads are
/// always consistent with some past write, never torn.
#[async_trait]
pub trait ControlStore: Send + Sync {
    /// Append a new control record.
    async fn append(&self, state: ControlState) -> HeraldResult<()>;

    /// The most recently appended record, or the initial active state when
    /// no operator has touched the system yet.
    async fn current(&self) -> HeraldResult<ControlState>;

    /// Most recent records, newest first.
    async fn history(&self, limit: usize) -> HeraldResult<Vec<ControlState>>;
}

/// Vec backed control store.
#[derive(Debug, Default)]
pub struct InMemoryControlStore {
    records: RwLock<Vec<ControlState>>,
}

impl InMemoryControlStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ControlStore for InMemoryControlStore {
    async fn append(&self, state: ControlState) -> HeraldResult<()> {
        self.records.write().push(state);
        Ok(())
    }

    async fn current(&self) -> HeraldResult<ControlState> {
        Ok(self
            .records
            .read()
            .last()
            .cloned()
            .unwrap_or_else(|| ControlState::initial(Utc::now())))
    }

    async fn history(&self, limit: usize) -> HeraldResult<Vec<ControlState>> {
        let records = self.records.read();
        Ok(records.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{SystemMode, SystemSettings};

    #[tokio::test]
    async fn current_defaults_to_active() {
        let store = InMemoryControlStore::new();
        let state = store.current().await.unwrap();
        assert_eq!(state.mode, SystemMode::Active);
    }

    #[tokio::test]
    async fn most_recent_record_wins() {
        let store = InMemoryControlStore::new();
        for mode in [SystemMode::Paused, SystemMode::Crisis, SystemMode::Active] {
            store
                .append(ControlState {
                    mode,
                    settings: SystemSettings::default(),
                    reason: None,
                    changed_by: "ops".into(),
                    changed_at: Utc::now(),
                })
                .await
                .unwrap();
        }
        assert_eq!(store.current().await.unwrap().mode, SystemMode::Active);
        assert_eq!(store.history(10).await.unwrap().len(), 3);
        assert_eq!(store.history(2).await.unwrap()[0].mode, SystemMode::Active);
    }
}
