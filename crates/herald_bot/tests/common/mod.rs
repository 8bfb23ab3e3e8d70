//! Shared fakes and wiring for orchestrator integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use herald_bot::Orchestrator;
use herald_core::{
    BrandId, BrandProfile, BrandSchedule, ContentId, ContentItem, Frequency, GenerationStatus,
    Platform,
};
use herald_error::{GenerationError, GenerationErrorKind, HeraldResult};
use herald_interface::{
    ApprovalNotice, ContentGenerator, Draft, DraftRequest, Notifier, Publisher, PublishOutcome,
};
use herald_social::PublisherRegistry;
use herald_store::{
    ContentStore, InMemoryAuditSink, InMemoryBrandStore, InMemoryContentStore,
    InMemoryControlStore,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Deterministic generator: drafts echo the brand and platform.
pub struct FakeGenerator {
    fail: bool,
}

impl FakeGenerator {
    pub fn ok() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl ContentGenerator for FakeGenerator {
    async fn generate(&self, req: &DraftRequest) -> HeraldResult<Draft> {
        if self.fail {
            return Err(GenerationError::new(GenerationErrorKind::Collaborator(
                "model unavailable".into(),
            ))
            .into());
        }
        Ok(Draft {
            text: format!("A {} update from {}", req.platform, req.brand.name),
            hashtags: vec!["brand".into()],
            ..Default::default()
        })
    }

    async fn regenerate(
        &self,
        previous_text: &str,
        feedback: &str,
        _req: &DraftRequest,
    ) -> HeraldResult<Draft> {
        if self.fail {
            return Err(GenerationError::new(GenerationErrorKind::Collaborator(
                "model unavailable".into(),
            ))
            .into());
        }
        Ok(Draft {
            text: format!("{} [rev: {}]", previous_text, feedback),
            hashtags: vec!["brand".into()],
            ..Default::default()
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

/// Publisher that counts calls and either succeeds with a deterministic URL
/// or always fails.
pub struct FakePublisher {
    platform: Platform,
    fail: bool,
    calls: AtomicU64,
}

impl FakePublisher {
    pub fn ok(platform: Platform) -> Self {
        Self {
            platform,
            fail: false,
            calls: AtomicU64::new(0),
        }
    }

    pub fn failing(platform: Platform) -> Self {
        Self {
            platform,
            fail: true,
            calls: AtomicU64::new(0),
        }
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Publisher for FakePublisher {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn publish(&self, _item: &ContentItem) -> PublishOutcome {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            PublishOutcome::Failed {
                error: "platform API unavailable".into(),
            }
        } else {
            PublishOutcome::Posted {
                post_url: format!("https://posts.example.com/{}/{}", self.platform, n),
            }
        }
    }
}

/// Notifier that drops everything on the floor.
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn approval_needed(
        &self,
        _recipients: &[String],
        _notice: &ApprovalNotice,
    ) -> HeraldResult<()> {
        Ok(())
    }
}

/// Orchestrator plus handles to its concrete stores for inspection.
pub struct Harness {
    pub orchestrator: Orchestrator,
    pub content: Arc<InMemoryContentStore>,
    pub brands: Arc<InMemoryBrandStore>,
    pub control: Arc<InMemoryControlStore>,
    pub audit: Arc<InMemoryAuditSink>,
}

pub fn registry(fail: bool) -> PublisherRegistry {
    let mut registry = PublisherRegistry::new();
    for platform in [
        Platform::LinkedIn,
        Platform::Instagram,
        Platform::Twitter,
        Platform::Facebook,
    ] {
        let publisher = if fail {
            FakePublisher::failing(platform)
        } else {
            FakePublisher::ok(platform)
        };
        registry = registry.with_publisher(Arc::new(publisher));
    }
    registry
}

pub fn harness_with(
    generator: Arc<dyn ContentGenerator>,
    publishers: PublisherRegistry,
) -> Harness {
    let content = Arc::new(InMemoryContentStore::new());
    let brands = Arc::new(InMemoryBrandStore::new());
    let control = Arc::new(InMemoryControlStore::new());
    let audit = Arc::new(InMemoryAuditSink::new());
    let orchestrator = Orchestrator::new(
        content.clone(),
        brands.clone(),
        control.clone(),
        audit.clone(),
        generator,
        publishers,
        Arc::new(NullNotifier),
    );
    Harness {
        orchestrator,
        content,
        brands,
        control,
        audit,
    }
}

pub fn harness() -> Harness {
    harness_with(Arc::new(FakeGenerator::ok()), registry(false))
}

pub fn schedule(
    frequency: Frequency,
    days: Vec<u8>,
    times: &[&str],
    platforms: Vec<Platform>,
) -> BrandSchedule {
    BrandSchedule {
        enabled: true,
        frequency,
        days_of_week: days,
        times_of_day: times.iter().map(|t| t.to_string()).collect(),
        platforms,
        auto_generate_image: false,
        prompt_template: None,
    }
}

pub async fn seed_brand(harness: &Harness, brand_schedule: Option<BrandSchedule>) -> BrandProfile {
    use herald_store::BrandStore;

    let brand = BrandProfile {
        id: BrandId::new(),
        name: "Acme Robotics".into(),
        industry: "robotics".into(),
        voice_tone: vec!["confident".into(), "warm".into()],
        target_audience: "plant operators".into(),
        key_messages: vec!["reliability".into()],
        do_not_mention: vec!["layoffs".into()],
        approver_emails: vec![],
        schedule: brand_schedule,
        created_at: Utc::now(),
    };
    harness.brands.insert(brand.clone()).await.unwrap();
    brand
}

/// Poll the store until the item's drafting step leaves `generating`.
pub async fn wait_for_draft(content: &Arc<InMemoryContentStore>, id: ContentId) -> ContentItem {
    for _ in 0..200 {
        if let Some(item) = content.get(id).await.unwrap()
            && !matches!(item.generation_status, Some(GenerationStatus::Generating))
        {
            return item;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("draft for {} did not complete in time", id);
}
