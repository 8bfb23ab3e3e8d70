//! Brand profile storage.

use async_trait::async_trait;
use herald_core::{BrandId, BrandProfile, BrandSchedule};
use herald_error::{ContentError, ContentErrorKind, HeraldResult};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Store for brand profiles.
#[async_trait]
pub trait BrandStore: Send + Sync {
    /// Insert a brand profile.
    async fn insert(&self, brand: BrandProfile) -> HeraldResult<()>;

    /// Fetch a brand by id.
    async fn get(&self, id: BrandId) -> HeraldResult<Option<BrandProfile>>;

    /// Replace a brand's generation schedule.
    async fn update_schedule(
        &self,
        id: BrandId,
        schedule: Option<BrandSchedule>,
    ) -> HeraldResult<BrandProfile>;

    /// All brands whose schedule is present and enabled.
    async fn with_enabled_schedules(&self) -> HeraldResult<Vec<BrandProfile>>;
}

/// Hash-map backed brand store.
#[derive(Debug, Default)]
pub struct InMemoryBrandStore {
    brands: RwLock<HashMap<BrandId, BrandProfile>>,
}

impl InMemoryBrandStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BrandStore for InMemoryBrandStore {
    async fn insert(&self, brand: BrandProfile) -> HeraldResult<()> {
        self.brands.write().insert(brand.id, brand);
        Ok(())
    }

    async fn get(&self, id: BrandId) -> HeraldResult<Option<BrandProfile>> {
        Ok(self.brands.read().get(&id).cloned())
    }

    async fn update_schedule(
        &self,
        id: BrandId,
        schedule: Option<BrandSchedule>,
    ) -> HeraldResult<BrandProfile> {
        let mut brands = self.brands.write();
        let brand = brands
            .get_mut(&id)
            .ok_or_else(|| ContentError::new(ContentErrorKind::BrandNotFound(id.to_string())))?;
        brand.schedule = schedule;
        Ok(brand.clone())
    }

    async fn with_enabled_schedules(&self) -> HeraldResult<Vec<BrandProfile>> {
        let brands = self.brands.read();
        Ok(brands
            .values()
            .filter(|brand| brand.schedule.as_ref().is_some_and(|s| s.enabled))
            .cloned()
            .collect())
    }
}
