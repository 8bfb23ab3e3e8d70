//! Content body and revision history types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque reference to a stored media asset.
///
/// Resolved to a durable public URL by the asset store collaborator at
/// publish time.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct MediaRef(pub String);

impl MediaRef {
    /// Create a media reference from an asset identifier or URL.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }
}

/// The mutable payload of a content item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBody {
    /// Post text
    pub text: String,
    /// Hashtags without the leading `#`
    pub hashtags: Vec<String>,
    /// Attached media references
    pub media_refs: Vec<MediaRef>,
}

/// A snapshot of a prior body, written on every regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyRevision {
    /// Version number the body carried before it was replaced
    pub version: u32,
    /// The replaced body
    pub body: ContentBody,
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
}
