//! `fieldgen show` command implementation.
//!
//! Prints generated fields as YAML on stdout.

use camino::Utf8Path;
use fieldgen_config::tree::mapping_at_path;
use fieldgen_config::{get_copy, get_forseti_fields, yaml};
use fieldgen_core::error::FieldGenResult;
use fieldgen_core::types::keys::GENERATED_FIELDS_NAME;
use fieldgen_core::types::ConfigDocument;
use serde_yaml::Mapping;
use std::fmt;

use super::CommandContext;

/// Which generated fields to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowTarget {
    /// The whole top-level block
    All,
    Project(String),
    Forseti,
}

impl ShowTarget {
    /// Build the target from the `--project` and `--forseti` flags
    pub fn from_flags(project: Option<String>, forseti: bool) -> Self {
        match (project, forseti) {
            (Some(project_id), _) => ShowTarget::Project(project_id),
            (None, true) => ShowTarget::Forseti,
            (None, false) => ShowTarget::All,
        }
    }
}

impl fmt::Display for ShowTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShowTarget::All => f.write_str("all generated fields"),
            ShowTarget::Project(project_id) => write!(f, "generated fields of {}", project_id),
            ShowTarget::Forseti => f.write_str("forseti service generated fields"),
        }
    }
}

/// Execute the `fieldgen show` command
pub async fn execute(
    path: &Utf8Path,
    target: ShowTarget,
    ctx: &CommandContext,
) -> FieldGenResult<()> {
    let doc = yaml::load_from_file(path).await?;

    match select(&doc, &target) {
        Some(fields) => print!("{}", yaml::serialize_document(&fields)?),
        None => ctx.output.info(&format!("No {} in {}", target, path)),
    }

    Ok(())
}

/// Pick the requested fields; `None` when there are none to show
pub fn select(doc: &ConfigDocument, target: &ShowTarget) -> Option<Mapping> {
    let fields = match target {
        ShowTarget::All => mapping_at_path(doc, &[GENERATED_FIELDS_NAME]).cloned()?,
        ShowTarget::Project(project_id) => get_copy(project_id, doc),
        ShowTarget::Forseti => get_forseti_fields(doc),
    };

    if fields.is_empty() {
        None
    } else {
        Some(fields)
    }
}
