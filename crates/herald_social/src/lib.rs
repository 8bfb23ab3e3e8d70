//! Platform publishing adapters for Herald.
//!
//! One [`Publisher`](herald_interface::Publisher) implementation per target
//! platform, behind a [`PublisherRegistry`]. Instagram goes through the
//! Graph API's asynchronous media-container flow (create, poll until ready,
//! publish); LinkedIn posts synchronously through the UGC API; Twitter and
//! Facebook ship with simulated adapters that fabricate platform-shaped
//! URLs, the swap-in point for real integrations.
//!
//! Adapters never error past the [`Publisher`](herald_interface::Publisher)
//! boundary: every failure mode collapses into
//! [`PublishOutcome::Failed`](herald_interface::PublishOutcome).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod instagram;
mod linkedin;
mod registry;
mod simulated;

pub use instagram::InstagramPublisher;
pub use linkedin::LinkedInPublisher;
pub use registry::PublisherRegistry;
pub use simulated::SimulatedPublisher;

use herald_core::ContentBody;

/// Flatten a body into the single caption string platform APIs take:
/// post text, then hashtags on their own line.
pub fn compose_caption(body: &ContentBody) -> String {
    if body.hashtags.is_empty() {
        return body.text.clone();
    }
    let tags = body
        .hashtags
        .iter()
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{}\n\n{}", body.text, tags)
}
