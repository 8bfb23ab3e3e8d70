//! Environment-backed collaborators for single-process deployments.

use async_trait::async_trait;
use herald_core::{MediaRef, Platform};
use herald_error::{HeraldResult, HttpError};
use herald_interface::{ApprovalNotice, AssetStore, AuthStore, Notifier, PlatformCredentials};
use tracing::info;

/// Credential lookup from environment variables.
///
/// Reads `HERALD_<PLATFORM>_ACCESS_TOKEN` and `HERALD_<PLATFORM>_ACCOUNT_ID`
/// (e.g. `HERALD_INSTAGRAM_ACCESS_TOKEN`). Absent variables mean no
/// credentials, which publish adapters report as a precondition failure.
#[derive(Debug, Clone, Default)]
pub struct EnvAuthStore;

impl EnvAuthStore {
    /// Create an env-backed auth store.
    pub fn new() -> Self {
        Self
    }
}

impl AuthStore for EnvAuthStore {
    fn credentials(&self, platform: Platform) -> Option<PlatformCredentials> {
        let upper = platform.to_string().to_uppercase();
        let access_token = std::env::var(format!("HERALD_{}_ACCESS_TOKEN", upper)).ok()?;
        let account_id = std::env::var(format!("HERALD_{}_ACCOUNT_ID", upper)).ok()?;
        Some(PlatformCredentials {
            access_token,
            account_id,
        })
    }
}

/// Asset store for deployments whose media refs already are durable public
/// URLs (CDN uploads, AI-generated image URLs).
#[derive(Debug, Clone, Default)]
pub struct UrlAssetStore;

impl UrlAssetStore {
    /// Create a passthrough asset store.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AssetStore for UrlAssetStore {
    async fn public_url(&self, media: &MediaRef) -> HeraldResult<String> {
        if media.0.is_empty() {
            return Err(HttpError::new("Empty media reference").into());
        }
        Ok(media.0.clone())
    }
}

/// Notifier that writes approval requests to the log instead of sending
/// mail. Stands in until a delivery integration is wired.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl LogNotifier {
    /// Create a log-only notifier.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn approval_needed(
        &self,
        recipients: &[String],
        notice: &ApprovalNotice,
    ) -> HeraldResult<()> {
        info!(
            recipients = recipients.len(),
            brand = %notice.brand_name,
            platform = %notice.platform,
            content = %notice.content_id,
            "Approval needed"
        );
        Ok(())
    }
}
