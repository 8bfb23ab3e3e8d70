//! Error types for the Herald content automation platform.
//!
//! This crate provides the foundation error types used throughout the Herald
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! The gate's "blocked" class ([`GateError`]) is deliberately separate from
//! validation classes ([`ContentError`], [`PublishError`]) so callers can
//! distinguish "system unavailable" from "fix your input".
//!
//! # Examples
//!
//! ```
//! use herald_error::{HeraldResult, HttpError};
//!
//! fn fetch_data() -> HeraldResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod content;
mod error;
mod gate;
mod generation;
mod http;
mod json;
mod publish;

pub use config::ConfigError;
pub use content::{ContentError, ContentErrorKind};
pub use error::{HeraldError, HeraldErrorKind, HeraldResult};
pub use gate::{GateError, GateErrorKind};
pub use generation::{GenerationError, GenerationErrorKind};
pub use http::HttpError;
pub use json::JsonError;
pub use publish::{PublishError, PublishErrorKind};
