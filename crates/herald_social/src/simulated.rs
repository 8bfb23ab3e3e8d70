//! Simulated publishers for platforms without a live integration.

use async_trait::async_trait;
use herald_core::{ContentItem, Platform};
use herald_interface::{Publisher, PublishOutcome};
use rand::Rng;
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// Publisher that validates preconditions and fabricates a platform-shaped
/// post URL instead of calling a remote API.
///
/// Serves Twitter and Facebook until real integrations land, and any
/// platform in dry-run deployments. The registry makes swapping in a real
/// adapter a one-line change.
pub struct SimulatedPublisher {
    platform: Platform,
}

impl SimulatedPublisher {
    /// Create a simulated publisher for the platform.
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    fn post_url(&self) -> String {
        let id = Uuid::new_v4().simple();
        match self.platform {
            Platform::LinkedIn => format!("https://linkedin.com/posts/sim-{}", id),
            Platform::Instagram => format!("https://instagram.com/p/sim-{}", id),
            Platform::Twitter => format!("https://twitter.com/status/sim-{}", id),
            Platform::Facebook => format!("https://facebook.com/posts/sim-{}", id),
        }
    }
}

#[async_trait]
impl Publisher for SimulatedPublisher {
    fn platform(&self) -> Platform {
        self.platform
    }

    #[instrument(skip(self, item), fields(item = %item.id, platform = %self.platform))]
    async fn publish(&self, item: &ContentItem) -> PublishOutcome {
        if self.platform.requires_media() && item.body.media_refs.is_empty() {
            return PublishOutcome::Failed {
                error: format!("{} posts require media", self.platform),
            };
        }
        if item.body.media_refs.len() > self.platform.media_limit() {
            return PublishOutcome::Failed {
                error: format!(
                    "{} posts allow a maximum of {} media items",
                    self.platform,
                    self.platform.media_limit()
                ),
            };
        }

        // Simulated API latency
        let delay = rand::thread_rng().gen_range(20..80);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        let post_url = self.post_url();
        info!(post_url = %post_url, "Simulated publish");
        PublishOutcome::Posted { post_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{BrandId, ContentOrigin, MediaRef};

    fn item(platform: Platform, media: Vec<MediaRef>) -> ContentItem {
        let mut item = ContentItem::new(
            BrandId::new(),
            platform,
            media,
            ContentOrigin::Manual,
            None,
            false,
            chrono::Utc::now(),
        );
        item.complete_generation("text".into(), vec![], None);
        item
    }

    #[tokio::test]
    async fn produces_platform_shaped_urls() {
        let outcome = SimulatedPublisher::new(Platform::Twitter)
            .publish(&item(Platform::Twitter, vec![]))
            .await;
        assert!(outcome.post_url().unwrap().starts_with("https://twitter.com/status/"));

        let outcome = SimulatedPublisher::new(Platform::Facebook)
            .publish(&item(Platform::Facebook, vec![]))
            .await;
        assert!(outcome.post_url().unwrap().starts_with("https://facebook.com/posts/"));
    }

    #[tokio::test]
    async fn enforces_media_preconditions() {
        let outcome = SimulatedPublisher::new(Platform::Instagram)
            .publish(&item(Platform::Instagram, vec![]))
            .await;
        assert!(!outcome.success());

        let refs = (0..5).map(|n| MediaRef::new(format!("m{}", n))).collect();
        let outcome = SimulatedPublisher::new(Platform::Twitter)
            .publish(&item(Platform::Twitter, refs))
            .await;
        assert!(!outcome.success());
        assert!(outcome.error().unwrap().contains("maximum of 4"));
    }
}
