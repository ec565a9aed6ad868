//! `fieldgen migrate` command implementation.
//!
//! Moves embedded generated_fields blocks of an older config to the
//! top-level layout, asking before the file is rewritten.

use camino::Utf8Path;
use fieldgen_config::move_generated_fields_out_of_projects;
use fieldgen_core::error::FieldGenResult;

use super::CommandContext;

/// Execute the `fieldgen migrate` command
pub async fn execute(path: &Utf8Path, ctx: &CommandContext) -> FieldGenResult<()> {
    ctx.output.step("→", &format!("Checking {} for embedded generated_fields", path));

    if move_generated_fields_out_of_projects(path, ctx.confirm.as_ref()).await? {
        ctx.output.success("Found generated_fields in the legacy layout");
    } else {
        ctx.output.info("Nothing to migrate");
    }

    Ok(())
}
