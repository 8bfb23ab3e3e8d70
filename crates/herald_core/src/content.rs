//! Content items and their lifecycle state machine.

use crate::{BodyRevision, BrandId, ContentBody, ContentStatus, GenerationStatus, Platform};
use chrono::{DateTime, Utc};
use herald_error::{ContentError, ContentErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque content item identifier, assigned at creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct ContentId(pub Uuid);

impl ContentId {
    /// Generate a fresh identifier.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Who caused the item to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentOrigin {
    /// Created by a manual generation request
    Manual,
    /// Created by the generation scheduler
    Scheduled,
}

/// Approval record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    /// Reviewer who approved
    pub by: String,
    /// When the approval happened
    pub at: DateTime<Utc>,
}

/// Rejection record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Reviewer who rejected
    pub by: String,
    /// When the rejection happened
    pub at: DateTime<Utc>,
    /// Reviewer-supplied reason
    pub reason: Option<String>,
}

/// Outcome of the optional AI image step, recorded on the item.
///
/// Image failure is independent of text success: a draft can complete with
/// text while `error` explains why no image arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Public URL of the generated image, when one was produced
    pub url: Option<String>,
    /// Prompt the image model received
    pub prompt: Option<String>,
    /// Why image generation failed, when it did
    pub error: Option<String>,
}

/// One platform-specific post draft moving through the lifecycle.
///
/// All `status` / `generation_status` changes go through the transition
/// methods below; they are the state machine.
///
/// # Examples
///
/// ```
/// use herald_core::{BrandId, ContentItem, ContentOrigin, ContentStatus, Platform};
/// use chrono::Utc;
///
/// let mut item = ContentItem::new(
///     BrandId::new(),
///     Platform::LinkedIn,
///     vec![],
///     ContentOrigin::Manual,
///     None,
///     false,
///     Utc::now(),
/// );
/// assert_eq!(item.status, ContentStatus::Pending);
/// item.approve("admin", Utc::now(), None).unwrap();
/// assert_eq!(item.status, ContentStatus::Approved);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Immutable identifier
    pub id: ContentId,
    /// Brand the item belongs to
    pub brand_id: BrandId,
    /// Target platform; changes only through regeneration
    pub platform: Platform,
    /// Post payload
    pub body: ContentBody,
    /// Outer lifecycle status
    pub status: ContentStatus,
    /// Drafting sub-status, absent for items that never ran generation
    pub generation_status: Option<GenerationStatus>,
    /// Present only when generation failed
    pub generation_error: Option<String>,
    /// Monotonically increasing body version
    pub version: u32,
    /// Prior body snapshots, appended on every regeneration
    pub history: Vec<BodyRevision>,
    /// Approval record, when approved
    pub approval: Option<Approval>,
    /// Rejection record, when rejected
    pub rejection: Option<Rejection>,
    /// When the posting scheduler becomes eligible to publish the item
    pub scheduled_for: Option<DateTime<Utc>>,
    /// Set only after a successful publish
    pub posted_at: Option<DateTime<Utc>>,
    /// Set only after a successful publish
    pub post_url: Option<String>,
    /// Provenance of the item
    pub origin: ContentOrigin,
    /// Operator prompt carried into the drafting step
    pub prompt: Option<String>,
    /// Whether the drafting step should also produce an image
    pub want_image: bool,
    /// AI image outcome, when an image was requested
    pub image: Option<GeneratedImage>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl ContentItem {
    /// Create a new item in `pending` status with the drafting step marked
    /// `generating`, so it is visible in queues while text is drafted.
    pub fn new(
        brand_id: BrandId,
        platform: Platform,
        media_refs: Vec<crate::MediaRef>,
        origin: ContentOrigin,
        prompt: Option<String>,
        want_image: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ContentId::new(),
            brand_id,
            platform,
            body: ContentBody {
                text: String::new(),
                hashtags: Vec::new(),
                media_refs,
            },
            status: ContentStatus::Pending,
            generation_status: Some(GenerationStatus::Generating),
            generation_error: None,
            version: 1,
            history: Vec::new(),
            approval: None,
            rejection: None,
            scheduled_for: None,
            posted_at: None,
            post_url: None,
            origin,
            prompt,
            want_image,
            image: None,
            created_at: now,
        }
    }

    /// Land a completed draft in the body.
    ///
    /// A generated image with no prior attachment becomes the item's first
    /// media ref, mirroring how operators expect the draft to arrive ready
    /// to review.
    pub fn complete_generation(
        &mut self,
        text: String,
        hashtags: Vec<String>,
        image: Option<GeneratedImage>,
    ) {
        self.body.text = text;
        self.body.hashtags = hashtags;
        if let Some(ref img) = image
            && let Some(ref url) = img.url
            && self.body.media_refs.is_empty()
        {
            self.body.media_refs.push(crate::MediaRef::new(url.clone()));
        }
        self.image = image;
        self.generation_status = Some(GenerationStatus::Completed);
        self.generation_error = None;
    }

    /// Record a failed draft; the item stays `pending` with an empty body so
    /// an operator can retry (regenerate) or delete it.
    pub fn fail_generation(&mut self, error: impl Into<String>) {
        self.generation_status = Some(GenerationStatus::Failed);
        self.generation_error = Some(error.into());
    }

    /// `pending → approved`. Re-approving an `approved` item is allowed (it
    /// refreshes the reviewer and schedule); approving a `posted` item is an
    /// error, not a no-op.
    pub fn approve(
        &mut self,
        by: impl Into<String>,
        at: DateTime<Utc>,
        scheduled_for: Option<DateTime<Utc>>,
    ) -> Result<(), ContentError> {
        match self.status {
            ContentStatus::Posted => Err(ContentError::new(ContentErrorKind::AlreadyPosted)),
            ContentStatus::Pending | ContentStatus::Approved => {
                self.status = ContentStatus::Approved;
                self.approval = Some(Approval { by: by.into(), at });
                if scheduled_for.is_some() {
                    self.scheduled_for = scheduled_for;
                }
                Ok(())
            }
            from => Err(ContentError::new(ContentErrorKind::InvalidTransition {
                from: from.to_string(),
                to: ContentStatus::Approved.to_string(),
            })),
        }
    }

    /// `pending | approved | scheduled → rejected`.
    pub fn reject(
        &mut self,
        by: impl Into<String>,
        at: DateTime<Utc>,
        reason: Option<String>,
    ) -> Result<(), ContentError> {
        match self.status {
            ContentStatus::Posted => Err(ContentError::new(ContentErrorKind::AlreadyPosted)),
            ContentStatus::Rejected => {
                Err(ContentError::new(ContentErrorKind::InvalidTransition {
                    from: ContentStatus::Rejected.to_string(),
                    to: ContentStatus::Rejected.to_string(),
                }))
            }
            _ => {
                self.status = ContentStatus::Rejected;
                self.rejection = Some(Rejection {
                    by: by.into(),
                    at,
                    reason,
                });
                Ok(())
            }
        }
    }

    /// Edit body text and hashtags in place. Allowed only while the item is
    /// `pending` or `approved`.
    pub fn edit_body(
        &mut self,
        text: Option<String>,
        hashtags: Option<Vec<String>>,
    ) -> Result<(), ContentError> {
        if !matches!(
            self.status,
            ContentStatus::Pending | ContentStatus::Approved
        ) {
            return Err(ContentError::new(ContentErrorKind::NotEditable(
                self.status.to_string(),
            )));
        }
        if let Some(text) = text {
            self.body.text = text;
        }
        if let Some(hashtags) = hashtags {
            self.body.hashtags = hashtags;
        }
        Ok(())
    }

    /// Replace the body with a regenerated draft: snapshot the pre-change
    /// body into `history`, bump `version` by one, optionally switch
    /// platform, and reset the item to `pending`.
    ///
    /// Allowed from `pending`, `approved`, and `rejected` — regeneration is
    /// the one path that revives a rejected item.
    pub fn apply_regeneration(
        &mut self,
        text: String,
        hashtags: Vec<String>,
        new_platform: Option<Platform>,
        at: DateTime<Utc>,
    ) -> Result<(), ContentError> {
        if !matches!(
            self.status,
            ContentStatus::Pending | ContentStatus::Approved | ContentStatus::Rejected
        ) {
            return Err(ContentError::new(ContentErrorKind::NotRegenerable(
                self.status.to_string(),
            )));
        }
        self.history.push(BodyRevision {
            version: self.version,
            body: self.body.clone(),
            timestamp: at,
        });
        self.body.text = text;
        self.body.hashtags = hashtags;
        self.version += 1;
        if let Some(platform) = new_platform {
            self.platform = platform;
        }
        self.status = ContentStatus::Pending;
        self.generation_status = Some(GenerationStatus::Completed);
        self.generation_error = None;
        Ok(())
    }

    /// `approved → scheduled`: park the item until `at`.
    pub fn schedule(&mut self, at: DateTime<Utc>) -> Result<(), ContentError> {
        match self.status {
            ContentStatus::Approved => {
                self.status = ContentStatus::Scheduled;
                self.scheduled_for = Some(at);
                Ok(())
            }
            from => Err(ContentError::new(ContentErrorKind::InvalidTransition {
                from: from.to_string(),
                to: ContentStatus::Scheduled.to_string(),
            })),
        }
    }

    /// `approved | scheduled → posted`. One-way: the item is immutable after.
    pub fn mark_posted(
        &mut self,
        post_url: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), ContentError> {
        match self.status {
            ContentStatus::Approved | ContentStatus::Scheduled => {
                self.status = ContentStatus::Posted;
                self.posted_at = Some(at);
                self.post_url = Some(post_url.into());
                Ok(())
            }
            ContentStatus::Posted => Err(ContentError::new(ContentErrorKind::AlreadyPosted)),
            from => Err(ContentError::new(ContentErrorKind::NotApproved(
                from.to_string(),
            ))),
        }
    }

    /// Whether the publishing adapter may be invoked for this item.
    pub fn is_publishable(&self) -> bool {
        matches!(
            self.status,
            ContentStatus::Approved | ContentStatus::Scheduled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MediaRef;
    use chrono::Utc;

    fn item() -> ContentItem {
        ContentItem::new(
            BrandId::new(),
            Platform::LinkedIn,
            vec![],
            ContentOrigin::Manual,
            None,
            false,
            Utc::now(),
        )
    }

    #[test]
    fn new_item_is_pending_and_generating() {
        let item = item();
        assert_eq!(item.status, ContentStatus::Pending);
        assert_eq!(item.generation_status, Some(GenerationStatus::Generating));
        assert_eq!(item.version, 1);
        assert!(item.body.text.is_empty());
    }

    #[test]
    fn posted_items_are_immutable() {
        let mut item = item();
        item.approve("admin", Utc::now(), None).unwrap();
        item.mark_posted("https://linkedin.com/posts/1", Utc::now())
            .unwrap();

        assert!(item.posted_at.is_some());
        assert!(item.post_url.is_some());
        assert!(item.approve("admin", Utc::now(), None).is_err());
        assert!(item.reject("admin", Utc::now(), None).is_err());
        assert!(item.edit_body(Some("new".into()), None).is_err());
        assert!(
            item.apply_regeneration("new".into(), vec![], None, Utc::now())
                .is_err()
        );
        assert!(item.mark_posted("https://elsewhere", Utc::now()).is_err());
        assert_eq!(item.status, ContentStatus::Posted);
    }

    #[test]
    fn edit_rejected_content_fails() {
        let mut item = item();
        item.reject("admin", Utc::now(), Some("off brand".into()))
            .unwrap();
        let err = item.edit_body(Some("new".into()), None).unwrap_err();
        assert!(format!("{}", err).contains("rejected"));
    }

    #[test]
    fn regeneration_bumps_version_and_snapshots_history() {
        let mut item = item();
        item.complete_generation("first draft".into(), vec!["launch".into()], None);

        item.apply_regeneration("second draft".into(), vec!["rework".into()], None, Utc::now())
            .unwrap();

        assert_eq!(item.version, 2);
        assert_eq!(item.history.len(), 1);
        assert_eq!(item.history[0].version, 1);
        assert_eq!(item.history[0].body.text, "first draft");
        assert_eq!(item.body.text, "second draft");
        assert_eq!(item.status, ContentStatus::Pending);
    }

    #[test]
    fn regeneration_revives_rejected_content() {
        let mut item = item();
        item.complete_generation("draft".into(), vec![], None);
        item.reject("admin", Utc::now(), None).unwrap();

        item.apply_regeneration(
            "tightened".into(),
            vec![],
            Some(Platform::Twitter),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(item.status, ContentStatus::Pending);
        assert_eq!(item.platform, Platform::Twitter);
        assert_eq!(item.version, 2);
    }

    #[test]
    fn schedule_requires_approved() {
        let mut item = item();
        assert!(item.schedule(Utc::now()).is_err());
        item.approve("admin", Utc::now(), None).unwrap();
        item.schedule(Utc::now()).unwrap();
        assert_eq!(item.status, ContentStatus::Scheduled);
        assert!(item.scheduled_for.is_some());
        item.mark_posted("https://x", Utc::now()).unwrap();
        assert_eq!(item.status, ContentStatus::Posted);
    }

    #[test]
    fn failed_generation_leaves_pending_with_error() {
        let mut item = item();
        item.fail_generation("model unavailable");
        assert_eq!(item.status, ContentStatus::Pending);
        assert_eq!(item.generation_status, Some(GenerationStatus::Failed));
        assert_eq!(item.generation_error.as_deref(), Some("model unavailable"));
        assert!(item.body.text.is_empty());
    }

    #[test]
    fn generated_image_becomes_first_media_ref() {
        let mut item = item();
        item.complete_generation(
            "draft".into(),
            vec![],
            Some(GeneratedImage {
                url: Some("https://cdn.example.com/img.png".into()),
                prompt: Some("sunrise".into()),
                error: None,
            }),
        );
        assert_eq!(
            item.body.media_refs,
            vec![MediaRef::new("https://cdn.example.com/img.png")]
        );
    }
}
