//! `fieldgen status` command implementation.
//!
//! Lists every project declared in a config with its deployment state.

use camino::Utf8Path;
use fieldgen_config::{convert_old_to_new, get_shared, is_deployed, project_ids, yaml};
use fieldgen_core::error::FieldGenResult;
use fieldgen_core::types::keys::{FAILED_STEP_KEY, GENERATED_FIELDS_NAME};
use fieldgen_core::types::{ConfigDocument, ProjectSlot};
use serde_yaml::Value;

use super::CommandContext;

/// Deployment state derived from a project's generated fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployState {
    Deployed,
    /// A run stopped at the recorded step
    Failed(String),
    NotDeployed,
}

/// One row of the status listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStatus {
    pub slot: ProjectSlot,
    pub project_id: String,
    pub state: DeployState,
}

/// Execute the `fieldgen status` command
pub async fn execute(path: &Utf8Path, ctx: &CommandContext) -> FieldGenResult<()> {
    let doc = yaml::load_from_file(path).await?;

    if has_legacy_fields(&doc) {
        ctx.output
            .warn("generated_fields are still embedded in projects; run 'fieldgen migrate' first");
    }

    let statuses = collect(&doc);
    if statuses.is_empty() {
        ctx.output.info("No projects declared");
        return Ok(());
    }

    for status in statuses {
        let line = format!("{:<10} {}", status.slot.label(), status.project_id);
        match status.state {
            DeployState::Deployed => ctx.output.success(&line),
            DeployState::Failed(step) => {
                ctx.output.error(&format!("{} (failed at step {})", line, step))
            },
            DeployState::NotDeployed => ctx.output.info(&format!("  {} (not deployed)", line)),
        }
    }

    Ok(())
}

/// Status of every declared project, in declaration order
pub fn collect(doc: &ConfigDocument) -> Vec<ProjectStatus> {
    project_ids(doc)
        .into_iter()
        .map(|(slot, project_id)| {
            let state = deploy_state(&project_id, doc);
            ProjectStatus {
                slot,
                project_id,
                state,
            }
        })
        .collect()
}

fn deploy_state(project_id: &str, doc: &ConfigDocument) -> DeployState {
    if is_deployed(project_id, doc) {
        return DeployState::Deployed;
    }

    match get_shared(project_id, doc).and_then(|fields| fields.get(FAILED_STEP_KEY)) {
        Some(step) => DeployState::Failed(scalar_text(step)),
        None => DeployState::NotDeployed,
    }
}

/// True when the document has no top-level key but a migration would create one
fn has_legacy_fields(doc: &ConfigDocument) -> bool {
    if doc.contains_key(GENERATED_FIELDS_NAME) {
        return false;
    }

    let mut probe = doc.clone();
    convert_old_to_new(&mut probe).is_ok() && probe.contains_key(GENERATED_FIELDS_NAME)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
