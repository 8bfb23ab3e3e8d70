//! Content lifecycle orchestrator for Herald.
//!
//! This crate wires the domain model, stores, and platform adapters into the
//! running system:
//! - **Gate**: consults the current operational mode before any generation
//!   or posting proceeds
//! - **Orchestrator**: the operations exposed to the outside world
//!   (generate now, regenerate, approve, reject, post now, set mode)
//! - **GenerationScheduler**: minute tick that fans out drafts for brands
//!   whose recurring schedule matches "now"
//! - **PostingScheduler**: minute tick that publishes approved items whose
//!   scheduled time has arrived
//! - **HeraldServer**: runs both tick loops and the metrics API

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod gate;
mod generation;
mod metrics;
mod ops;
mod posting;
mod server;

pub use api::{ApiState, create_router};
pub use config::{ApiConfig, HeraldConfig, InstagramConfig, SchedulerConfig};
pub use gate::Gate;
pub use generation::{GenerationScheduler, UpcomingGeneration};
pub use metrics::{HeraldMetrics, MetricsSnapshot, SchedulerMetricSnapshot};
pub use ops::{ApprovalOutcome, GenerationRequest, Orchestrator, PostReport, PostingStats};
pub use posting::PostingScheduler;
pub use server::{HeraldServer, SchedulerSwitch};
