//! Backing-store traits and in-memory implementations for Herald.
//!
//! The original system kept its entities in document collections; these
//! traits preserve that shape — the `ContentItem` document is the unit of
//! mutation and writes are last-write-wins. The in-memory implementations
//! back tests and single-process deployments; a database backend would slot
//! in behind the same traits.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audit;
mod brand;
mod content;
mod control;

pub use audit::{AuditSink, InMemoryAuditSink};
pub use brand::{BrandStore, InMemoryBrandStore};
pub use content::{ContentStore, InMemoryContentStore};
pub use control::{ControlStore, InMemoryControlStore};
