//! # fieldgen-core
//!
//! Core types and errors shared across all fieldgen crates.
//!
//! This crate provides:
//! - `FieldGenError` enum for unified error handling
//! - Key names and document types for deployment configuration files
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Document alias, key constants and project slots
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{FieldGenError, FieldGenResult};
pub use types::{ConfigDocument, ProjectSlot};
