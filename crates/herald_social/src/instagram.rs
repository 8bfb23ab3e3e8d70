//! Instagram publishing through the Graph API media-container flow.

use crate::compose_caption;
use async_trait::async_trait;
use herald_core::{ContentItem, Platform};
use herald_error::{PublishError, PublishErrorKind};
use herald_interface::{AssetStore, AuthStore, PlatformCredentials, Publisher, PublishOutcome};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com/v18.0";
const DEFAULT_POLL_ATTEMPTS: u32 = 10;
const DEFAULT_POLL_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Deserialize)]
struct ContainerCreated {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ContainerStatus {
    status_code: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MediaPublished {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MediaPermalink {
    permalink: Option<String>,
}

/// Publisher for Instagram business accounts.
///
/// Publishing is a three-step sequence against the Graph API: create a media
/// container, poll the container until the platform finishes processing it,
/// then publish and fetch the permalink. The container poll is bounded —
/// a terminal `ERROR` status and an exhausted retry budget are both hard
/// failures, never treated as success.
pub struct InstagramPublisher {
    client: reqwest::Client,
    base_url: String,
    auth: Arc<dyn AuthStore>,
    assets: Arc<dyn AssetStore>,
    poll_attempts: u32,
    poll_delay: Duration,
}

impl InstagramPublisher {
    /// Create a publisher against the production Graph API.
    pub fn new(auth: Arc<dyn AuthStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_GRAPH_URL.to_string(),
            auth,
            assets,
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            poll_delay: DEFAULT_POLL_DELAY,
        }
    }

    /// Override the Graph API base URL (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the container readiness retry budget.
    pub fn with_polling(mut self, attempts: u32, delay: Duration) -> Self {
        self.poll_attempts = attempts;
        self.poll_delay = delay;
        self
    }

    /// Resolve the item's first media ref to a public URL, or fail the
    /// precondition without contacting the remote API.
    async fn image_url(&self, item: &ContentItem) -> Result<String, PublishError> {
        let media = item
            .body
            .media_refs
            .first()
            .ok_or_else(|| {
                PublishError::new(PublishErrorKind::MediaRequired(
                    Platform::Instagram.to_string(),
                ))
            })?;

        let url = self
            .assets
            .public_url(media)
            .await
            .map_err(|e| PublishError::new(PublishErrorKind::Request(e.to_string())))?;

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PublishError::new(PublishErrorKind::MediaNotPublic(url)));
        }
        Ok(url)
    }

    /// Step 1: create the media container.
    async fn create_container(
        &self,
        creds: &PlatformCredentials,
        image_url: &str,
        caption: &str,
    ) -> Result<String, PublishError> {
        debug!("Creating Instagram media container");
        let response = self
            .client
            .post(format!("{}/{}/media", self.base_url, creds.account_id))
            .query(&[
                ("image_url", image_url),
                ("caption", caption),
                ("access_token", creds.access_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PublishError::new(PublishErrorKind::Request(e.to_string())))?;

        let created: ContainerCreated = Self::read_json(response).await?;
        debug!(container = %created.id, "Media container created");
        Ok(created.id)
    }

    /// Step 2: poll the container until the platform reports `FINISHED`.
    async fn wait_for_container(
        &self,
        creds: &PlatformCredentials,
        container_id: &str,
    ) -> Result<(), PublishError> {
        for attempt in 1..=self.poll_attempts {
            let response = self
                .client
                .get(format!("{}/{}", self.base_url, container_id))
                .query(&[
                    ("fields", "status_code,status"),
                    ("access_token", creds.access_token.as_str()),
                ])
                .send()
                .await
                .map_err(|e| PublishError::new(PublishErrorKind::Request(e.to_string())))?;

            let status: ContainerStatus = Self::read_json(response).await?;
            let code = status.status_code.as_deref().unwrap_or("UNKNOWN");
            debug!(attempt, max = self.poll_attempts, code, "Container status");

            match code {
                "FINISHED" => return Ok(()),
                "ERROR" => {
                    return Err(PublishError::new(PublishErrorKind::ContainerFailed(
                        status.status.unwrap_or_else(|| "Unknown error".into()),
                    )));
                }
                _ => {
                    if attempt < self.poll_attempts {
                        tokio::time::sleep(self.poll_delay).await;
                    }
                }
            }
        }

        Err(PublishError::new(PublishErrorKind::ContainerTimedOut(
            self.poll_attempts,
        )))
    }

    /// Step 3: publish the container and fetch the permalink.
    async fn publish_container(
        &self,
        creds: &PlatformCredentials,
        container_id: &str,
    ) -> Result<String, PublishError> {
        let response = self
            .client
            .post(format!(
                "{}/{}/media_publish",
                self.base_url, creds.account_id
            ))
            .query(&[
                ("creation_id", container_id),
                ("access_token", creds.access_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PublishError::new(PublishErrorKind::Request(e.to_string())))?;

        let published: MediaPublished = Self::read_json(response).await?;

        let response = self
            .client
            .get(format!("{}/{}", self.base_url, published.id))
            .query(&[
                ("fields", "permalink"),
                ("access_token", creds.access_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PublishError::new(PublishErrorKind::Request(e.to_string())))?;

        let details: MediaPermalink = Self::read_json(response).await?;
        Ok(details
            .permalink
            .unwrap_or_else(|| format!("https://instagram.com/p/{}", published.id)))
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PublishError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            error!(status, body = %message, "Instagram API returned error");
            return Err(PublishError::new(PublishErrorKind::Api { status, message }));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| PublishError::new(PublishErrorKind::Request(e.to_string())))
    }

    async fn try_publish(&self, item: &ContentItem) -> Result<String, PublishError> {
        let creds = self.auth.credentials(Platform::Instagram).ok_or_else(|| {
            PublishError::new(PublishErrorKind::MissingCredentials(
                Platform::Instagram.to_string(),
            ))
        })?;

        let image_url = self.image_url(item).await?;
        let caption = compose_caption(&item.body);

        let container_id = self.create_container(&creds, &image_url, &caption).await?;
        self.wait_for_container(&creds, &container_id).await?;
        let permalink = self.publish_container(&creds, &container_id).await?;

        info!(item = %item.id, permalink = %permalink, "Published to Instagram");
        Ok(permalink)
    }
}

#[async_trait]
impl Publisher for InstagramPublisher {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    #[instrument(skip(self, item), fields(item = %item.id))]
    async fn publish(&self, item: &ContentItem) -> PublishOutcome {
        match self.try_publish(item).await {
            Ok(post_url) => PublishOutcome::Posted { post_url },
            Err(e) => {
                error!(error = %e, "Instagram publish failed");
                PublishOutcome::Failed {
                    error: e.kind.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{BrandId, ContentOrigin, MediaRef};
    use herald_error::HeraldResult;

    struct NoAuth;
    impl AuthStore for NoAuth {
        fn credentials(&self, _platform: Platform) -> Option<PlatformCredentials> {
            None
        }
    }

    struct StaticAuth;
    impl AuthStore for StaticAuth {
        fn credentials(&self, _platform: Platform) -> Option<PlatformCredentials> {
            Some(PlatformCredentials {
                access_token: "token".into(),
                account_id: "acct".into(),
            })
        }
    }

    struct PassthroughAssets;
    #[async_trait]
    impl AssetStore for PassthroughAssets {
        async fn public_url(&self, media: &MediaRef) -> HeraldResult<String> {
            Ok(media.0.clone())
        }
    }

    fn item(media: Vec<MediaRef>) -> ContentItem {
        let mut item = ContentItem::new(
            BrandId::new(),
            Platform::Instagram,
            media,
            ContentOrigin::Manual,
            None,
            false,
            chrono::Utc::now(),
        );
        item.complete_generation("caption".into(), vec![], None);
        item
    }

    #[tokio::test]
    async fn missing_credentials_fails_without_remote_call() {
        let publisher = InstagramPublisher::new(Arc::new(NoAuth), Arc::new(PassthroughAssets));
        let outcome = publisher
            .publish(&item(vec![MediaRef::new("https://cdn.example.com/a.png")]))
            .await;
        assert!(!outcome.success());
        assert!(outcome.error().unwrap().contains("credentials"));
    }

    #[tokio::test]
    async fn missing_media_fails_without_remote_call() {
        let publisher = InstagramPublisher::new(Arc::new(StaticAuth), Arc::new(PassthroughAssets));
        let outcome = publisher.publish(&item(vec![])).await;
        assert!(!outcome.success());
        assert!(outcome.error().unwrap().contains("require media"));
    }

    #[tokio::test]
    async fn local_path_media_fails_precondition() {
        let publisher = InstagramPublisher::new(Arc::new(StaticAuth), Arc::new(PassthroughAssets));
        let outcome = publisher
            .publish(&item(vec![MediaRef::new("/var/uploads/a.png")]))
            .await;
        assert!(!outcome.success());
        assert!(outcome.error().unwrap().contains("public URL"));
    }
}
