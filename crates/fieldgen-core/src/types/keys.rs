//! Key names recognised in a deployment configuration document.

/// Top-level key holding every generated field.
///
/// The legacy layout embedded a key with this same name inside each project,
/// so "already migrated" detection must look at the top level before any
/// legacy scan touches the document.
pub const GENERATED_FIELDS_NAME: &str = "generated_fields";

/// Key of the legacy per-project generated fields block.
pub const GENERATED_FIELDS_OLD_NAME: &str = "generated_fields";

/// Sub-key of `generated_fields` keyed by project id.
pub const PROJECTS_TAG: &str = "projects";

/// Sub-key of `generated_fields` holding forseti service fields.
pub const FORSETI_TAG: &str = "forseti";

/// Top-level sequence of data projects.
pub const PROJECTS_KEY: &str = "projects";

/// Top-level mapping for the audit logs project.
pub const AUDIT_LOGS_PROJECT_KEY: &str = "audit_logs_project";

/// Top-level mapping for the forseti service.
pub const FORSETI_KEY: &str = "forseti";

/// Key of the forseti project inside the `forseti` mapping.
pub const FORSETI_PROJECT_KEY: &str = "project";

/// Identifier key of every project mapping.
pub const PROJECT_ID_KEY: &str = "project_id";

/// Marker recorded when a deployment stopped partway.
pub const FAILED_STEP_KEY: &str = "failed_step";
