//! Core data types for the Herald content automation platform.
//!
//! This crate provides the domain model shared across the Herald workspace:
//! content items and their lifecycle state machine, brand profiles with
//! generation schedules, the system control state, and audit entries.
//!
//! Status transitions live exclusively on [`ContentItem`] methods; no other
//! code path is allowed to change `status` or `generation_status`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audit;
mod body;
mod brand;
mod content;
mod control;
mod platform;
mod status;

pub use audit::AuditEntry;
pub use body::{BodyRevision, ContentBody, MediaRef};
pub use brand::{BrandId, BrandProfile, BrandSchedule, Frequency};
pub use content::{Approval, ContentId, ContentItem, ContentOrigin, GeneratedImage, Rejection};
pub use control::{ControlState, SystemMode, SystemSettings};
pub use platform::Platform;
pub use status::{ContentStatus, GenerationStatus};
