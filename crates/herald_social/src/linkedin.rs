//! LinkedIn publishing through the UGC Post API.

use crate::compose_caption;
use async_trait::async_trait;
use herald_core::{ContentItem, Platform};
use herald_error::{PublishError, PublishErrorKind};
use herald_interface::{AuthStore, Publisher, PublishOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};

const DEFAULT_API_URL: &str = "https://api.linkedin.com";
const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

#[derive(Debug, Serialize)]
struct UgcPost {
    author: String,
    #[serde(rename = "lifecycleState")]
    lifecycle_state: &'static str,
    #[serde(rename = "specificContent")]
    specific_content: SpecificContent,
    visibility: Visibility,
}

#[derive(Debug, Serialize)]
struct SpecificContent {
    #[serde(rename = "com.linkedin.ugc.ShareContent")]
    share_content: ShareContent,
}

#[derive(Debug, Serialize)]
struct ShareContent {
    #[serde(rename = "shareCommentary")]
    share_commentary: Commentary,
    #[serde(rename = "shareMediaCategory")]
    share_media_category: &'static str,
}

#[derive(Debug, Serialize)]
struct Commentary {
    text: String,
}

#[derive(Debug, Serialize)]
struct Visibility {
    #[serde(rename = "com.linkedin.ugc.MemberNetworkVisibility")]
    member_network_visibility: &'static str,
}

#[derive(Debug, Deserialize)]
struct UgcPostCreated {
    id: String,
}

/// Publisher for LinkedIn member posts.
///
/// A single synchronous UGC Post call; the live post URL is derived from
/// the returned post id.
pub struct LinkedInPublisher {
    client: reqwest::Client,
    base_url: String,
    auth: Arc<dyn AuthStore>,
}

impl LinkedInPublisher {
    /// Create a publisher against the production API.
    pub fn new(auth: Arc<dyn AuthStore>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_API_URL.to_string(),
            auth,
        }
    }

    /// Override the API base URL (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn try_publish(&self, item: &ContentItem) -> Result<String, PublishError> {
        let creds = self.auth.credentials(Platform::LinkedIn).ok_or_else(|| {
            PublishError::new(PublishErrorKind::MissingCredentials(
                Platform::LinkedIn.to_string(),
            ))
        })?;

        let post = UgcPost {
            author: format!("urn:li:person:{}", creds.account_id),
            lifecycle_state: "PUBLISHED",
            specific_content: SpecificContent {
                share_content: ShareContent {
                    share_commentary: Commentary {
                        text: compose_caption(&item.body),
                    },
                    share_media_category: "NONE",
                },
            },
            visibility: Visibility {
                member_network_visibility: "PUBLIC",
            },
        };

        let response = self
            .client
            .post(format!("{}/v2/ugcPosts", self.base_url))
            .bearer_auth(&creds.access_token)
            .header("X-Restli-Protocol-Version", RESTLI_PROTOCOL_VERSION)
            .json(&post)
            .send()
            .await
            .map_err(|e| PublishError::new(PublishErrorKind::Request(e.to_string())))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            error!(status, body = %message, "LinkedIn API returned error");
            return Err(PublishError::new(PublishErrorKind::Api { status, message }));
        }

        let created: UgcPostCreated = response
            .json()
            .await
            .map_err(|e| PublishError::new(PublishErrorKind::Request(e.to_string())))?;

        let post_url = format!("https://www.linkedin.com/feed/update/{}", created.id);
        info!(item = %item.id, post_url = %post_url, "Published to LinkedIn");
        Ok(post_url)
    }
}

#[async_trait]
impl Publisher for LinkedInPublisher {
    fn platform(&self) -> Platform {
        Platform::LinkedIn
    }

    #[instrument(skip(self, item), fields(item = %item.id))]
    async fn publish(&self, item: &ContentItem) -> PublishOutcome {
        match self.try_publish(item).await {
            Ok(post_url) => PublishOutcome::Posted { post_url },
            Err(e) => {
                error!(error = %e, "LinkedIn publish failed");
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
    use herald_core::{BrandId, ContentOrigin};
    use herald_interface::PlatformCredentials;

    struct NoAuth;
    impl AuthStore for NoAuth {
        fn credentials(&self, _platform: Platform) -> Option<PlatformCredentials> {
            None
        }
    }

    #[tokio::test]
    async fn missing_credentials_fails_without_remote_call() {
        let publisher = LinkedInPublisher::new(Arc::new(NoAuth));
        let mut item = ContentItem::new(
            BrandId::new(),
            Platform::LinkedIn,
            vec![],
            ContentOrigin::Manual,
            None,
            false,
            chrono::Utc::now(),
        );
        item.complete_generation("text".into(), vec![], None);

        let outcome = publisher.publish(&item).await;
        assert!(!outcome.success());
        assert!(outcome.error().unwrap().contains("credentials"));
    }
}
