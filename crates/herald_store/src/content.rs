//! Content item storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use herald_core::{BrandId, ContentId, ContentItem, ContentStatus, Platform};
use herald_error::{ContentError, ContentErrorKind, HeraldResult};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Store for content items.
///
/// Writes replace the whole document (last-write-wins); no
/// optimistic-concurrency token is maintained.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Insert a freshly created item.
    async fn insert(&self, item: ContentItem) -> HeraldResult<()>;

    /// Fetch an item by id.
    async fn get(&self, id: ContentId) -> HeraldResult<Option<ContentItem>>;

    /// Replace a stored item.
    async fn update(&self, item: ContentItem) -> HeraldResult<()>;

    /// Most recent items for a brand, newest first, excluding `exclude`.
    ///
    /// Used to gather negative examples for the drafting step.
    async fn recent_for_brand(
        &self,
        brand: BrandId,
        exclude: Option<ContentId>,
        limit: usize,
    ) -> HeraldResult<Vec<ContentItem>>;

    /// Items the posting scheduler should publish now: approved or scheduled
    /// with `scheduled_for <= now`, ordered by `scheduled_for` ascending.
    async fn due_for_posting(&self, now: DateTime<Utc>) -> HeraldResult<Vec<ContentItem>>;

    /// Filtered listing, newest first.
    async fn list(
        &self,
        status: Option<ContentStatus>,
        platform: Option<Platform>,
    ) -> HeraldResult<Vec<ContentItem>>;

    /// Number of items posted at or after `since`.
    async fn posted_since(&self, since: DateTime<Utc>) -> HeraldResult<u64>;
}

/// Hash-map backed content store.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    items: RwLock<HashMap<ContentId, ContentItem>>,
}

impl InMemoryContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn insert(&self, item: ContentItem) -> HeraldResult<()> {
        self.items.write().insert(item.id, item);
        Ok(())
    }

    async fn get(&self, id: ContentId) -> HeraldResult<Option<ContentItem>> {
        Ok(self.items.read().get(&id).cloned())
    }

    async fn update(&self, item: ContentItem) -> HeraldResult<()> {
        let mut items = self.items.write();
        if !items.contains_key(&item.id) {
            return Err(ContentError::new(ContentErrorKind::NotFound(item.id.to_string())).into());
        }
        items.insert(item.id, item);
        Ok(())
    }

    async fn recent_for_brand(
        &self,
        brand: BrandId,
        exclude: Option<ContentId>,
        limit: usize,
    ) -> HeraldResult<Vec<ContentItem>> {
        let items = self.items.read();
        let mut recent: Vec<ContentItem> = items
            .values()
            .filter(|item| item.brand_id == brand && Some(item.id) != exclude)
            .cloned()
            .collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        Ok(recent)
    }

    async fn due_for_posting(&self, now: DateTime<Utc>) -> HeraldResult<Vec<ContentItem>> {
        let items = self.items.read();
        let mut due: Vec<ContentItem> = items
            .values()
            .filter(|item| {
                matches!(
                    item.status,
                    ContentStatus::Approved | ContentStatus::Scheduled
                ) && item.scheduled_for.is_some_and(|at| at <= now)
            })
            .cloned()
            .collect();
        due.sort_by_key(|item| item.scheduled_for);
        Ok(due)
    }

    async fn list(
        &self,
        status: Option<ContentStatus>,
        platform: Option<Platform>,
    ) -> HeraldResult<Vec<ContentItem>> {
        let items = self.items.read();
        let mut listed: Vec<ContentItem> = items
            .values()
            .filter(|item| status.is_none_or(|s| item.status == s))
            .filter(|item| platform.is_none_or(|p| item.platform == p))
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn posted_since(&self, since: DateTime<Utc>) -> HeraldResult<u64> {
        let items = self.items.read();
        Ok(items
            .values()
            .filter(|item| item.posted_at.is_some_and(|at| at >= since))
            .count() as u64)
    }
}
