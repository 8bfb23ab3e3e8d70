//! Herald - automated social-media content production for brands.
//!
//! AI-drafted posts move through review and are published to external
//! platforms on a schedule or on demand. The workspace splits into focused
//! crates; this facade re-exports the pieces most deployments touch:
//!
//! - **Domain model**: content items and their lifecycle state machine,
//!   brand schedules, control state ([`herald_core`])
//! - **Collaborator traits**: AI generation, auth, assets, notification,
//!   publishing ([`herald_interface`])
//! - **Stores**: backing-store traits with in-memory implementations
//!   ([`herald_store`])
//! - **Adapters**: Instagram container flow, LinkedIn UGC posts, simulated
//!   platforms ([`herald_social`])
//! - **Orchestrator**: the gate, facade operations, and both schedulers
//!   ([`herald_bot`])
//!
//! The [`EchoGenerator`] and the env-backed collaborators in [`support`]
//! let the server run end-to-end without a live model or platform
//! credentials.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod echo;
pub mod support;

pub use echo::EchoGenerator;

pub use herald_bot::{
    ApprovalOutcome, GenerationRequest, GenerationScheduler, HeraldConfig, HeraldMetrics,
    HeraldServer, Orchestrator, PostReport, PostingScheduler, UpcomingGeneration,
};
pub use herald_core::{
    AuditEntry, BrandId, BrandProfile, BrandSchedule, ContentBody, ContentId, ContentItem,
    ContentStatus, ControlState, Frequency, GenerationStatus, MediaRef, Platform, SystemMode,
    SystemSettings,
};
pub use herald_error::{HeraldError, HeraldErrorKind, HeraldResult};
pub use herald_interface::{
    AssetStore, AuthStore, ContentGenerator, Draft, DraftRequest, Notifier, Publisher,
    PublishOutcome,
};
pub use herald_social::{
    InstagramPublisher, LinkedInPublisher, PublisherRegistry, SimulatedPublisher,
};
pub use herald_store::{
    AuditSink, BrandStore, ContentStore, ControlStore, InMemoryAuditSink, InMemoryBrandStore,
    InMemoryContentStore, InMemoryControlStore,
};
