//! Request and response types crossing collaborator boundaries.

use herald_core::{BrandProfile, ContentId, Platform};
use serde::{Deserialize, Serialize};

/// Everything the AI collaborator needs to draft one post.
#[derive(Debug, Clone)]
pub struct DraftRequest {
    /// Brand voice and constraints
    pub brand: BrandProfile,
    /// Target platform, which shapes length and register
    pub platform: Platform,
    /// Description of attached media, when any
    pub media_context: Option<String>,
    /// Operator- or template-supplied prompt
    pub prompt: Option<String>,
    /// Recent post texts to avoid repeating (openings, stats, themes)
    pub previous_samples: Vec<String>,
    /// Whether to also attempt an AI image
    pub want_image: bool,
}

/// A completed draft from the AI collaborator.
///
/// The image fields are independent of text success: `image_error` set with
/// `image_url` absent means the text draft is good but no image arrived.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    /// Post text
    pub text: String,
    /// Hashtags without the leading `#`
    pub hashtags: Vec<String>,
    /// Public URL of a generated image, when one was produced
    pub image_url: Option<String>,
    /// Prompt the image model received
    pub image_prompt: Option<String>,
    /// Why image generation failed, when it did
    pub image_error: Option<String>,
}

/// Stored credentials for one platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformCredentials {
    /// OAuth access token
    pub access_token: String,
    /// Platform account, page, or person identifier
    pub account_id: String,
}

/// Payload of an "approval needed" notification.
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalNotice {
    /// Brand display name
    pub brand_name: String,
    /// Target platform
    pub platform: Platform,
    /// Leading text of the draft
    pub content_preview: String,
    /// Item awaiting review
    pub content_id: ContentId,
    /// Draft hashtags
    pub hashtags: Vec<String>,
}

/// Uniform result of a publishing attempt.
///
/// Adapters never return `Err` or panic past this boundary; every failure
/// mode collapses into `Failed` with a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum PublishOutcome {
    /// The post is live
    Posted {
        /// URL of the live post
        post_url: String,
    },
    /// The attempt failed; the item remains publishable
    Failed {
        /// What went wrong
        error: String,
    },
}

impl PublishOutcome {
    /// Whether the attempt succeeded.
    pub fn success(&self) -> bool {
        matches!(self, PublishOutcome::Posted { .. })
    }

    /// The live post URL, when posted.
    pub fn post_url(&self) -> Option<&str> {
        match self {
            PublishOutcome::Posted { post_url } => Some(post_url),
            PublishOutcome::Failed { .. } => None,
        }
    }

    /// The failure description, when failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            PublishOutcome::Posted { .. } => None,
            PublishOutcome::Failed { error } => Some(error),
        }
    }
}
