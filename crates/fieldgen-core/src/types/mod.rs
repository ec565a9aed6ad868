//! Core data types for deployment configuration documents.
//!
//! This module provides the fundamental vocabulary shared by the fieldgen crates:
//! - Key names recognised in a configuration document
//! - The order-preserving document tree alias
//! - Project slots, naming where a project is declared

pub mod keys;
pub mod slot;

/// A parsed configuration document.
///
/// `serde_yaml::Mapping` keeps keys in insertion order, so a document that is
/// loaded, edited and written back keeps its layout.
pub type ConfigDocument = serde_yaml::Mapping;

// Re-export all public types
pub use slot::ProjectSlot;
