//! Generated fields accessors
//!
//! Generated fields are values computed during a deployment run (service
//! accounts, project numbers, failure markers). They are kept under a single
//! top-level key, apart from user-authored input:
//!
//! ```yaml
//! generated_fields:
//!   forseti: { service_account: ... }
//!   projects:
//!     <project_id>: { project_number: ..., failed_step: ... }
//! ```
//!
//! Read accessors treat any missing level as empty. Write accessors create
//! missing levels on demand.

use fieldgen_core::types::keys::{
    AUDIT_LOGS_PROJECT_KEY, FAILED_STEP_KEY, FORSETI_KEY, FORSETI_PROJECT_KEY, FORSETI_TAG,
    GENERATED_FIELDS_NAME, PROJECTS_KEY, PROJECTS_TAG, PROJECT_ID_KEY,
};
use fieldgen_core::types::{ConfigDocument, ProjectSlot};
use serde_yaml::{Mapping, Value};

use crate::tree::{ensure_mapping_path, key, mapping_at_path, mapping_at_path_mut};
use crate::ConfigResult;

const PROJECTS_PATH: [&str; 2] = [GENERATED_FIELDS_NAME, PROJECTS_TAG];
const FORSETI_PATH: [&str; 2] = [GENERATED_FIELDS_NAME, FORSETI_TAG];

fn project_path(project_id: &str) -> [&str; 3] {
    [GENERATED_FIELDS_NAME, PROJECTS_TAG, project_id]
}

/// Check if `generated_fields.projects` contains `project_id`
pub fn exists(project_id: &str, doc: &ConfigDocument) -> bool {
    mapping_at_path(doc, &PROJECTS_PATH)
        .map_or(false, |projects| projects.contains_key(project_id))
}

/// Borrow a project's generated fields for in-place modification.
///
/// Changes made through the returned mapping land in `doc`. Callers establish
/// presence first with [`exists`] or [`create_and_get_ref`]; `None` means that
/// contract was broken.
pub fn get_ref<'a>(project_id: &str, doc: &'a mut ConfigDocument) -> Option<&'a mut Mapping> {
    mapping_at_path_mut(doc, &project_path(project_id))
}

/// Shared borrow of a project's generated fields
pub fn get_shared<'a>(project_id: &str, doc: &'a ConfigDocument) -> Option<&'a Mapping> {
    mapping_at_path(doc, &project_path(project_id))
}

/// Independent copy of a project's generated fields, empty if there are none
pub fn get_copy(project_id: &str, doc: &ConfigDocument) -> Mapping {
    get_shared(project_id, doc).cloned().unwrap_or_default()
}

/// Borrow a project's generated fields, creating any missing level first.
///
/// Repeated calls for the same id return the same underlying mapping.
/// Fails only if a level on the way exists but is not a mapping.
pub fn create_and_get_ref<'a>(
    project_id: &str,
    doc: &'a mut ConfigDocument,
) -> ConfigResult<&'a mut Mapping> {
    ensure_mapping_path(doc, &project_path(project_id))
}

/// Determine whether the project has been deployed.
///
/// A project counts as deployed once it has generated fields and none of
/// them is the `failed_step` marker left by an interrupted run.
pub fn is_deployed(project_id: &str, doc: &ConfigDocument) -> bool {
    get_shared(project_id, doc)
        .map_or(false, |fields| !fields.is_empty() && !fields.contains_key(FAILED_STEP_KEY))
}

/// Copy of the forseti service generated fields, empty if there are none
pub fn get_forseti_fields(doc: &ConfigDocument) -> Mapping {
    mapping_at_path(doc, &FORSETI_PATH).cloned().unwrap_or_default()
}

/// Replace the forseti service generated fields wholesale
pub fn set_forseti_fields(fields: Mapping, doc: &mut ConfigDocument) -> ConfigResult<()> {
    ensure_mapping_path(doc, &[GENERATED_FIELDS_NAME])?
        .insert(key(FORSETI_TAG), Value::Mapping(fields));
    Ok(())
}

/// Every project id declared in the document with where it was found.
///
/// Order: the `projects` sequence, then the audit logs project, then the
/// forseti project. Entries without a string `project_id` are skipped.
pub fn project_ids(doc: &ConfigDocument) -> Vec<(ProjectSlot, String)> {
    let mut ids = Vec::new();

    if let Some(projects) = doc.get(PROJECTS_KEY).and_then(Value::as_sequence) {
        for (index, project) in projects.iter().enumerate() {
            if let Some(id) = declared_id(project) {
                ids.push((ProjectSlot::Data(index), id));
            }
        }
    }

    if let Some(id) = doc.get(AUDIT_LOGS_PROJECT_KEY).and_then(declared_id) {
        ids.push((ProjectSlot::AuditLogs, id));
    }

    if let Some(id) = mapping_at_path(doc, &[FORSETI_KEY])
        .and_then(|forseti| forseti.get(FORSETI_PROJECT_KEY))
        .and_then(declared_id)
    {
        ids.push((ProjectSlot::Forseti, id));
    }

    ids
}

fn declared_id(project: &Value) -> Option<String> {
    project
        .as_mapping()?
        .get(PROJECT_ID_KEY)?
        .as_str()
        .map(str::to_string)
}
