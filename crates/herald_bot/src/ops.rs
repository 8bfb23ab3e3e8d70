//! The orchestration facade: every operation exposed to the outside world.
//!
//! Each operation checks the gate, drives the content state machine, and
//! writes one audit entry after the mutation commits. Collaborator failures
//! are recorded on the item and never escape as panics.

use crate::gate::Gate;
use crate::metrics::HeraldMetrics;
use crate::server::SchedulerSwitch;
use chrono::{DateTime, Utc};
use herald_core::{
    AuditEntry, BrandId, BrandProfile, ContentId, ContentItem, ContentOrigin, ContentStatus,
    ControlState, GeneratedImage, MediaRef, Platform, SystemMode, SystemSettings,
};
use herald_error::{ContentError, ContentErrorKind, HeraldResult, PublishError, PublishErrorKind};
use herald_interface::{ApprovalNotice, ContentGenerator, Draft, DraftRequest, Notifier,
    PublishOutcome};
use herald_social::PublisherRegistry;
use herald_store::{AuditSink, BrandStore, ContentStore, ControlStore};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Inputs for a new draft request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Brand to draft for
    pub brand_id: BrandId,
    /// Target platform
    pub platform: Platform,
    /// Pre-attached media references
    pub media_refs: Vec<MediaRef>,
    /// Operator- or template-supplied prompt
    pub prompt: Option<String>,
    /// Whether to also request an AI image
    pub want_image: bool,
}

/// Result of an approval, including the inline auto-publish attempt when
/// the gate allowed one.
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalOutcome {
    /// The item after approval (and publish, when attempted)
    pub item: ContentItem,
    /// Whether an inline publish succeeded
    pub posted: bool,
    /// Live post URL, when posted
    pub post_url: Option<String>,
    /// Adapter failure, when the inline publish failed; the item remains
    /// approved and retryable
    pub posting_error: Option<String>,
}

/// Result of a publish attempt through the facade.
#[derive(Debug, Clone, Serialize)]
pub struct PostReport {
    /// Whether the post went live
    pub success: bool,
    /// Live post URL, when posted
    pub post_url: Option<String>,
    /// Failure description, when the attempt failed
    pub error: Option<String>,
}

/// Counts over a trailing window for dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct PostingStats {
    /// Items created in the window, grouped by status
    pub by_status: BTreeMap<String, u64>,
    /// Items posted in the window, grouped by platform
    pub by_platform: BTreeMap<String, u64>,
    /// Window length in days
    pub days: i64,
}

/// The set of operations exposed to the outside world.
///
/// Cheap to clone; all state lives behind `Arc`s so spawned generation
/// tasks can carry a handle.
#[derive(Clone)]
pub struct Orchestrator {
    content: Arc<dyn ContentStore>,
    brands: Arc<dyn BrandStore>,
    control: Arc<dyn ControlStore>,
    audit: Arc<dyn AuditSink>,
    gate: Gate,
    generator: Arc<dyn ContentGenerator>,
    publishers: PublisherRegistry,
    notifier: Arc<dyn Notifier>,
    metrics: HeraldMetrics,
    switch: SchedulerSwitch,
}

impl Orchestrator {
    /// Wire the facade over its stores and collaborators.
    pub fn new(
        content: Arc<dyn ContentStore>,
        brands: Arc<dyn BrandStore>,
        control: Arc<dyn ControlStore>,
        audit: Arc<dyn AuditSink>,
        generator: Arc<dyn ContentGenerator>,
        publishers: PublisherRegistry,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let gate = Gate::new(Arc::clone(&control));
        Self {
            content,
            brands,
            control,
            audit,
            gate,
            generator,
            publishers,
            notifier,
            metrics: HeraldMetrics::new(),
            switch: SchedulerSwitch::new(),
        }
    }

    /// The gate over the current operational mode.
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// The metrics collector.
    pub fn metrics(&self) -> &HeraldMetrics {
        &self.metrics
    }

    /// The run/stop switch shared with the scheduler loops.
    pub fn switch(&self) -> &SchedulerSwitch {
        &self.switch
    }

    /// The content store.
    pub fn content_store(&self) -> &Arc<dyn ContentStore> {
        &self.content
    }

    /// The brand store.
    pub fn brand_store(&self) -> &Arc<dyn BrandStore> {
        &self.brands
    }

    // ---- generation -----------------------------------------------------

    /// Create a draft item and kick off AI generation out-of-band.
    ///
    /// Returns immediately with the `pending`/`generating` item; callers
    /// poll `generation_status` to observe completion.
    #[instrument(skip(self, req), fields(brand = %req.brand_id, platform = %req.platform))]
    pub async fn request_generation(&self, req: GenerationRequest) -> HeraldResult<ContentItem> {
        self.gate.check_generation().await?;
        validate_media(req.platform, &req.media_refs, req.want_image)?;
        let item = self.create_draft_item(req, ContentOrigin::Manual).await?;

        let this = self.clone();
        let id = item.id;
        tokio::spawn(async move {
            this.run_generation(id).await;
        });

        Ok(item)
    }

    /// Insert the `pending`/`generating` item. Media preconditions are the
    /// facade's concern; the scheduler path creates items unchecked and lets
    /// publish-time preconditions catch misconfiguration.
    pub(crate) async fn create_draft_item(
        &self,
        req: GenerationRequest,
        origin: ContentOrigin,
    ) -> HeraldResult<ContentItem> {
        if self.brands.get(req.brand_id).await?.is_none() {
            return Err(ContentError::new(ContentErrorKind::BrandNotFound(
                req.brand_id.to_string(),
            ))
            .into());
        }

        let item = ContentItem::new(
            req.brand_id,
            req.platform,
            req.media_refs,
            origin,
            req.prompt,
            req.want_image,
            Utc::now(),
        );
        self.content.insert(item.clone()).await?;
        info!(item = %item.id, "Draft item created");
        Ok(item)
    }

    /// Complete the AI drafting step for an item: gather context, invoke the
    /// generator, and record the outcome. Never escapes an error; failures
    /// land on the item as `generation_error`.
    #[instrument(skip(self), fields(item = %id))]
    pub(crate) async fn run_generation(&self, id: ContentId) {
        if let Err(e) = self.try_run_generation(id).await {
            error!(error = %e, "Could not record draft outcome");
        }
    }

    async fn try_run_generation(&self, id: ContentId) -> HeraldResult<()> {
        let Some(item) = self.content.get(id).await? else {
            warn!("Item vanished before generation started");
            return Ok(());
        };
        let Some(brand) = self.brands.get(item.brand_id).await? else {
            let mut item = item;
            item.fail_generation("Brand configuration not found");
            self.content.update(item).await?;
            self.metrics.record_draft_failed();
            return Ok(());
        };

        // Up to 5 recent posts as negative examples so drafts don't repeat
        // openings or stats.
        let recent = self
            .content
            .recent_for_brand(item.brand_id, Some(id), 5)
            .await?;
        let previous_samples: Vec<String> = recent
            .iter()
            .map(|c| c.body.text.clone())
            .filter(|text| !text.is_empty())
            .collect();

        let media_context = if item.body.media_refs.is_empty() {
            None
        } else {
            Some(
                item.body
                    .media_refs
                    .iter()
                    .map(|media| format!("Media: {}", media))
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        };

        let req = DraftRequest {
            brand: brand.clone(),
            platform: item.platform,
            media_context,
            prompt: item.prompt.clone(),
            previous_samples,
            want_image: item.want_image,
        };

        match self.generator.generate(&req).await {
            Ok(draft) => self.record_draft(id, &brand, draft).await,
            Err(e) => {
                if let Some(mut item) = self.content.get(id).await? {
                    item.fail_generation(e.to_string());
                    self.content.update(item).await?;
                }
                self.metrics.record_draft_failed();
                self.audit
                    .record(AuditEntry::new(
                        "content_generation_failed",
                        "ai_agent",
                        "content",
                        id.to_string(),
                        json!({ "error": e.to_string() }),
                    ))
                    .await?;
                Ok(())
            }
        }
    }

    async fn record_draft(
        &self,
        id: ContentId,
        brand: &BrandProfile,
        draft: Draft,
    ) -> HeraldResult<()> {
        let Some(mut item) = self.content.get(id).await? else {
            warn!(item = %id, "Item vanished before draft landed");
            return Ok(());
        };

        let image = if draft.image_url.is_some() || draft.image_error.is_some() {
            Some(GeneratedImage {
                url: draft.image_url.clone(),
                prompt: draft.image_prompt.clone(),
                error: draft.image_error.clone(),
            })
        } else {
            None
        };
        item.complete_generation(draft.text.clone(), draft.hashtags.clone(), image);
        let platform = item.platform;
        self.content.update(item).await?;
        self.metrics.record_draft_completed();
        self.audit
            .record(AuditEntry::new(
                "content_generated",
                "ai_agent",
                "content",
                id.to_string(),
                json!({ "platform": platform.to_string() }),
            ))
            .await?;

        // Best-effort approval notification, isolated from the primary path.
        if !brand.approver_emails.is_empty() {
            let notifier = Arc::clone(&self.notifier);
            let recipients = brand.approver_emails.clone();
            let notice = ApprovalNotice {
                brand_name: brand.name.clone(),
                platform,
                content_preview: draft.text.chars().take(140).collect(),
                content_id: id,
                hashtags: draft.hashtags,
            };
            tokio::spawn(async move {
                if let Err(e) = notifier.approval_needed(&recipients, &notice).await {
                    warn!(error = %e, "Failed to send approval notification");
                }
            });
        }

        info!(item = %id, "Draft generation completed");
        Ok(())
    }

    /// Rewrite an existing draft from reviewer feedback: snapshot the old
    /// body into history, bump the version, optionally switch platform, and
    /// reset the item to `pending`.
    #[instrument(skip(self, feedback), fields(item = %id))]
    pub async fn regenerate(
        &self,
        id: ContentId,
        feedback: &str,
        new_platform: Option<Platform>,
        by: &str,
    ) -> HeraldResult<ContentItem> {
        self.gate.check_regeneration().await?;
        let mut item = self.get_required(id).await?;
        let brand = self.brands.get(item.brand_id).await?.ok_or_else(|| {
            ContentError::new(ContentErrorKind::BrandNotFound(item.brand_id.to_string()))
        })?;

        let platform = new_platform.unwrap_or(item.platform);
        let req = DraftRequest {
            brand,
            platform,
            media_context: None,
            prompt: item.prompt.clone(),
            previous_samples: Vec::new(),
            want_image: false,
        };
        let draft = self
            .generator
            .regenerate(&item.body.text, feedback, &req)
            .await?;

        item.apply_regeneration(draft.text, draft.hashtags, new_platform, Utc::now())?;
        self.content.update(item.clone()).await?;
        self.audit
            .record(AuditEntry::new(
                "content_regenerated",
                by,
                "content",
                id.to_string(),
                json!({ "feedback": feedback, "version": item.version }),
            ))
            .await?;
        Ok(item)
    }

    // ---- review ---------------------------------------------------------

    /// Manually edit body text and hashtags.
    #[instrument(skip(self, text, hashtags), fields(item = %id))]
    pub async fn edit(
        &self,
        id: ContentId,
        text: Option<String>,
        hashtags: Option<Vec<String>>,
        by: &str,
    ) -> HeraldResult<ContentItem> {
        let mut item = self.get_required(id).await?;
        item.edit_body(text, hashtags)?;
        self.content.update(item.clone()).await?;
        self.audit
            .record(AuditEntry::new(
                "content_edited",
                by,
                "content",
                id.to_string(),
                json!({
                    "platform": item.platform.to_string(),
                    "text_length": item.body.text.len(),
                    "hashtag_count": item.body.hashtags.len(),
                }),
            ))
            .await?;
        Ok(item)
    }

    /// Approve an item. With no `scheduled_for` and the gate allowing
    /// auto-posting, the publish happens inline and the outcome reports the
    /// adapter result; a failed publish leaves the item approved.
    #[instrument(skip(self), fields(item = %id))]
    pub async fn approve(
        &self,
        id: ContentId,
        by: &str,
        scheduled_for: Option<DateTime<Utc>>,
    ) -> HeraldResult<ApprovalOutcome> {
        self.gate.check_approval().await?;
        let mut item = self.get_required(id).await?;
        item.approve(by, Utc::now(), scheduled_for)?;
        self.content.update(item.clone()).await?;
        self.audit
            .record(AuditEntry::new(
                "content_approved",
                by,
                "content",
                id.to_string(),
                json!({
                    "platform": item.platform.to_string(),
                    "scheduled_for": item.scheduled_for,
                }),
            ))
            .await?;

        if scheduled_for.is_none() && self.gate.auto_post_on_approval().await? {
            let report = self.publish_content(id, "system").await?;
            let item = self.get_required(id).await?;
            return Ok(ApprovalOutcome {
                posted: report.success,
                post_url: report.post_url,
                posting_error: report.error,
                item,
            });
        }

        Ok(ApprovalOutcome {
            item,
            posted: false,
            post_url: None,
            posting_error: None,
        })
    }

    /// Reject an item. Allowed in every mode — rejection only removes
    /// content from the pipeline.
    #[instrument(skip(self, reason), fields(item = %id))]
    pub async fn reject(
        &self,
        id: ContentId,
        by: &str,
        reason: Option<String>,
    ) -> HeraldResult<ContentItem> {
        let mut item = self.get_required(id).await?;
        item.reject(by, Utc::now(), reason.clone())?;
        self.content.update(item.clone()).await?;
        self.audit
            .record(AuditEntry::new(
                "content_rejected",
                by,
                "content",
                id.to_string(),
                json!({ "reason": reason }),
            ))
            .await?;
        Ok(item)
    }

    /// Park an approved item until its scheduled time.
    #[instrument(skip(self), fields(item = %id))]
    pub async fn schedule(
        &self,
        id: ContentId,
        at: DateTime<Utc>,
        by: &str,
    ) -> HeraldResult<ContentItem> {
        let mut item = self.get_required(id).await?;
        item.schedule(at)?;
        self.content.update(item.clone()).await?;
        self.audit
            .record(AuditEntry::new(
                "content_scheduled",
                by,
                "content",
                id.to_string(),
                json!({ "scheduled_for": at }),
            ))
            .await?;
        Ok(item)
    }

    // ---- posting --------------------------------------------------------

    /// Publish an item through its platform adapter.
    ///
    /// Shared by the posting scheduler and manual post-now. On success the
    /// item becomes `posted`; on failure it stays `approved` and the next
    /// scheduler tick naturally re-selects it if still due.
    #[instrument(skip(self), fields(item = %id))]
    pub async fn publish_content(
        &self,
        id: ContentId,
        performed_by: &str,
    ) -> HeraldResult<PostReport> {
        let item = self.get_required(id).await?;
        if !item.is_publishable() {
            return Err(ContentError::new(ContentErrorKind::NotApproved(
                item.status.to_string(),
            ))
            .into());
        }
        self.gate.check_posting().await?;

        let publisher = self.publishers.get(item.platform).ok_or_else(|| {
            PublishError::new(PublishErrorKind::AdapterNotConfigured(
                item.platform.to_string(),
            ))
        })?;

        info!(platform = %item.platform, "Publishing");
        match publisher.publish(&item).await {
            PublishOutcome::Posted { post_url } => {
                let mut item = self.get_required(id).await?;
                item.mark_posted(post_url.clone(), Utc::now())?;
                self.content.update(item.clone()).await?;
                self.metrics.record_post_published();
                self.audit
                    .record(AuditEntry::new(
                        "content_posted",
                        performed_by,
                        "content",
                        id.to_string(),
                        json!({
                            "platform": item.platform.to_string(),
                            "post_url": post_url,
                            "scheduled_for": item.scheduled_for,
                            "posted_at": item.posted_at,
                        }),
                    ))
                    .await?;
                info!(post_url = %post_url, "Posted");
                Ok(PostReport {
                    success: true,
                    post_url: Some(post_url),
                    error: None,
                })
            }
            PublishOutcome::Failed { error } => {
                self.metrics.record_post_failed();
                error!(error = %error, "Publish failed; item stays approved");
                Ok(PostReport {
                    success: false,
                    post_url: None,
                    error: Some(error),
                })
            }
        }
    }

    /// Manual immediate post. Bypasses the paused/manual-only automation
    /// suppression but still honors crisis.
    #[instrument(skip(self), fields(item = %id))]
    pub async fn post_now(&self, id: ContentId, by: &str) -> HeraldResult<PostReport> {
        self.gate.check_posting().await?;
        let item = self.get_required(id).await?;
        let report = self.publish_content(id, by).await?;
        self.audit
            .record(AuditEntry::new(
                "manual_post",
                by,
                "content",
                id.to_string(),
                json!({
                    "platform": item.platform.to_string(),
                    "override_schedule": true,
                    "success": report.success,
                }),
            ))
            .await?;
        Ok(report)
    }

    // ---- system control -------------------------------------------------

    /// Append a new control state and start or stop the scheduler loops
    /// accordingly. Settings not supplied carry forward from the current
    /// state.
    #[instrument(skip(self, reason, settings))]
    pub async fn set_mode(
        &self,
        mode: SystemMode,
        by: &str,
        reason: Option<String>,
        settings: Option<SystemSettings>,
    ) -> HeraldResult<ControlState> {
        let current = self.control.current().await?;
        let state = ControlState {
            mode,
            settings: settings.unwrap_or(current.settings),
            reason: reason.clone(),
            changed_by: by.to_string(),
            changed_at: Utc::now(),
        };
        self.control.append(state.clone()).await?;
        self.audit
            .record(AuditEntry::new(
                "system_control_changed",
                by,
                "system",
                mode.to_string(),
                json!({ "mode": mode.to_string(), "reason": reason }),
            ))
            .await?;
        self.switch.apply_mode(mode);
        info!(mode = %mode, by, "System mode changed");
        Ok(state)
    }

    /// The current control state.
    pub async fn current_control(&self) -> HeraldResult<ControlState> {
        self.control.current().await
    }

    // ---- queries --------------------------------------------------------

    /// Fetch an item.
    pub async fn get_content(&self, id: ContentId) -> HeraldResult<Option<ContentItem>> {
        self.content.get(id).await
    }

    /// Filtered listing, newest first.
    pub async fn list_content(
        &self,
        status: Option<ContentStatus>,
        platform: Option<Platform>,
    ) -> HeraldResult<Vec<ContentItem>> {
        self.content.list(status, platform).await
    }

    /// Most recent audit entries, newest first.
    pub async fn recent_audit(&self, limit: usize) -> HeraldResult<Vec<AuditEntry>> {
        self.audit.recent(limit).await
    }

    /// Status and platform counts over a trailing window.
    pub async fn posting_stats(&self, days: i64) -> HeraldResult<PostingStats> {
        let start = Utc::now() - chrono::Duration::days(days);
        let all = self.content.list(None, None).await?;

        let mut by_status: BTreeMap<String, u64> = BTreeMap::new();
        let mut by_platform: BTreeMap<String, u64> = BTreeMap::new();
        for item in all.iter().filter(|item| item.created_at >= start) {
            *by_status.entry(item.status.to_string()).or_default() += 1;
            if item.status == ContentStatus::Posted {
                *by_platform.entry(item.platform.to_string()).or_default() += 1;
            }
        }

        Ok(PostingStats {
            by_status,
            by_platform,
            days,
        })
    }

    pub(crate) async fn record_audit(&self, entry: AuditEntry) -> HeraldResult<()> {
        self.audit.record(entry).await
    }

    async fn get_required(&self, id: ContentId) -> HeraldResult<ContentItem> {
        self.content
            .get(id)
            .await?
            .ok_or_else(|| ContentError::new(ContentErrorKind::NotFound(id.to_string())).into())
    }
}

/// Platform media-count and media-required preconditions, checked before
/// any item is created.
fn validate_media(
    platform: Platform,
    media_refs: &[MediaRef],
    want_image: bool,
) -> HeraldResult<()> {
    let limit = platform.media_limit();
    if media_refs.len() > limit {
        return Err(ContentError::new(ContentErrorKind::MediaLimitExceeded {
            platform: platform.to_string(),
            limit,
            count: media_refs.len(),
        })
        .into());
    }
    if platform.requires_media() && media_refs.is_empty() && !want_image {
        return Err(
            ContentError::new(ContentErrorKind::MediaRequired(platform.to_string())).into(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_limits_are_enforced() {
        let five: Vec<MediaRef> = (0..5).map(|n| MediaRef::new(format!("m{}", n))).collect();
        assert!(validate_media(Platform::Twitter, &five, false).is_err());
        assert!(validate_media(Platform::LinkedIn, &five, false).is_ok());
    }

    #[test]
    fn instagram_requires_media_unless_image_requested() {
        assert!(validate_media(Platform::Instagram, &[], false).is_err());
        assert!(validate_media(Platform::Instagram, &[], true).is_ok());
        assert!(
            validate_media(Platform::Instagram, &[MediaRef::new("asset-1")], false).is_ok()
        );
    }
}
