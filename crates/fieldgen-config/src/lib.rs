//! Generated fields bookkeeping for deployment configs
//!
//! This crate loads and writes deployment configuration documents, gives safe
//! access to the generated fields recorded during deployment runs, and
//! migrates older configs that embedded those fields inside each project.

pub mod fields;
pub mod migrate;
pub mod tree;
pub mod yaml;

// Re-export main types
pub use fields::{
    create_and_get_ref, exists, get_copy, get_forseti_fields, get_ref, get_shared, is_deployed,
    project_ids, set_forseti_fields,
};
pub use migrate::{
    convert_old_to_new, move_generated_fields_out_of_projects, Confirm, FixedAnswer,
    MIGRATION_PROMPT,
};

use fieldgen_core::error::FieldGenError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, FieldGenError>;
