//! Trait definitions for external collaborators.

use crate::{ApprovalNotice, Draft, DraftRequest, PlatformCredentials, PublishOutcome};
use async_trait::async_trait;
use herald_core::{ContentItem, MediaRef, Platform};
use herald_error::HeraldResult;

/// AI drafting collaborator.
///
/// Implementations must tolerate `want_image = true` failing independently
/// of text generation: an image failure is reported in the returned
/// [`Draft`], never as an `Err`.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Draft a new post for the request.
    async fn generate(&self, req: &DraftRequest) -> HeraldResult<Draft>;

    /// Rewrite an existing draft according to reviewer feedback.
    async fn regenerate(
        &self,
        previous_text: &str,
        feedback: &str,
        req: &DraftRequest,
    ) -> HeraldResult<Draft>;

    /// Provider name (e.g. "anthropic", "echo").
    fn provider_name(&self) -> &'static str;
}

/// Per-platform credential lookup.
///
/// Absence of credentials is a publish precondition failure, not a crash.
pub trait AuthStore: Send + Sync {
    /// Stored credentials for the platform, if configured.
    fn credentials(&self, platform: Platform) -> Option<PlatformCredentials>;
}

/// Asset storage and delivery collaborator.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Resolve a media reference to a durable public URL.
    ///
    /// Publish adapters require an http(s) URL; a local path is a
    /// precondition failure on their side.
    async fn public_url(&self, media: &MediaRef) -> HeraldResult<String>;
}

/// Fire-and-forget notification delivery.
///
/// Failure is logged by callers and never propagates into the primary
/// operation.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tell a brand's reviewers that a draft awaits approval.
    async fn approval_needed(
        &self,
        recipients: &[String],
        notice: &ApprovalNotice,
    ) -> HeraldResult<()>;
}

/// One publishing adapter per target platform.
///
/// The contract is uniform: convert an approved item into a platform API
/// call sequence (including any asynchronous readiness polling) and return
/// a [`PublishOutcome`]. Never panics or errors past this boundary.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// The platform this adapter serves.
    fn platform(&self) -> Platform;

    /// Publish the item and report the outcome.
    async fn publish(&self, item: &ContentItem) -> PublishOutcome;
}
