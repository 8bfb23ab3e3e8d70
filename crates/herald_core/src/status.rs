//! Content lifecycle status types.

use serde::{Deserialize, Serialize};

/// Outer lifecycle status of a content item.
///
/// Legal transitions: `pending → {approved, rejected}`,
/// `approved → {scheduled, posted, rejected}`, `scheduled → {posted,
/// rejected}`. `posted` is immutable; `rejected` is terminal in place and
/// only regeneration (which resets to `pending`) revives the item.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentStatus {
    /// Awaiting review
    Pending,
    /// Approved for publishing
    Approved,
    /// Rejected by a reviewer
    Rejected,
    /// Approved and parked until its scheduled time
    Scheduled,
    /// Published to the platform
    Posted,
}

/// Sub-status of the asynchronous AI drafting step.
///
/// Runs independently of [`ContentStatus`]: an item is `pending` and visible
/// in queues while its draft is still `generating`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GenerationStatus {
    /// Draft request in flight
    Generating,
    /// Draft landed in the body
    Completed,
    /// Draft failed; `generation_error` holds the message
    Failed,
}
