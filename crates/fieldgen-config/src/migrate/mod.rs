//! Legacy generated fields migration
//!
//! Older configs embedded a `generated_fields` block inside each project
//! mapping, the audit logs project, the forseti project and the forseti
//! service. The current layout keeps all of them under one top-level
//! `generated_fields` key. Migration is one way: a document that already has
//! the top-level key is considered migrated.

pub mod confirm;

use camino::Utf8Path;
use fieldgen_core::error::FieldGenError;
use fieldgen_core::types::keys::{
    AUDIT_LOGS_PROJECT_KEY, FORSETI_KEY, FORSETI_PROJECT_KEY, FORSETI_TAG, GENERATED_FIELDS_NAME,
    GENERATED_FIELDS_OLD_NAME, PROJECTS_KEY, PROJECT_ID_KEY,
};
use fieldgen_core::types::{ConfigDocument, ProjectSlot};
use serde_yaml::{Mapping, Value};
use tracing::{debug, info, warn};

pub use confirm::{Confirm, FixedAnswer};

use crate::fields::{create_and_get_ref, set_forseti_fields};
use crate::tree::{describe, key};
use crate::{yaml, ConfigResult};

/// Prompt shown before a migrated document is written back
pub const MIGRATION_PROMPT: &str = "Move generated_fields out of projects [y/N]?";

/// Move legacy embedded generated fields into the top-level key.
///
/// The caller's document is only replaced once the whole migration has
/// succeeded. If legacy blocks are found while a top-level `generated_fields`
/// key already exists, an invalid-configuration error is returned and `doc`
/// is left exactly as it was. Without legacy blocks this is a no-op.
pub fn convert_old_to_new(doc: &mut ConfigDocument) -> ConfigResult<()> {
    let mut staged = doc.clone();
    let mut new_doc = ConfigDocument::new();
    let mut moved = Vec::new();

    if let Some(projects) = staged.get_mut(PROJECTS_KEY).and_then(Value::as_sequence_mut) {
        for (index, project) in projects.iter_mut().enumerate() {
            if let Some(project) = project.as_mapping_mut() {
                move_project_fields(project, ProjectSlot::Data(index), &mut new_doc, &mut moved)?;
            }
        }
    }

    if let Some(audit) = staged
        .get_mut(AUDIT_LOGS_PROJECT_KEY)
        .and_then(Value::as_mapping_mut)
    {
        move_project_fields(audit, ProjectSlot::AuditLogs, &mut new_doc, &mut moved)?;
    }

    if let Some(forseti) = staged.get_mut(FORSETI_KEY).and_then(Value::as_mapping_mut) {
        if let Some(project) = forseti
            .get_mut(FORSETI_PROJECT_KEY)
            .and_then(Value::as_mapping_mut)
        {
            move_project_fields(project, ProjectSlot::Forseti, &mut new_doc, &mut moved)?;
        }

        if let Some(legacy) = forseti.shift_remove(GENERATED_FIELDS_OLD_NAME) {
            let fields = legacy_block(legacy, FORSETI_KEY)?;
            debug!(fields = fields.len(), "Moving legacy forseti service generated_fields");
            set_forseti_fields(fields, &mut new_doc)?;
            moved.push(FORSETI_TAG.to_string());
        }
    }

    let Some(generated) = new_doc.shift_remove(GENERATED_FIELDS_NAME) else {
        debug!("No legacy generated_fields found");
        return Ok(());
    };

    if doc.contains_key(GENERATED_FIELDS_NAME) {
        return Err(FieldGenError::invalid_config(format!(
            "Generated fields should not appear both at the top level and inside \
             projects; embedded generated_fields found for: {}",
            moved.join(", ")
        )));
    }

    staged.insert(key(GENERATED_FIELDS_NAME), generated);
    *doc = staged;

    info!("Moved generated_fields out of {} location(s)", moved.len());
    Ok(())
}

/// Move a single project's legacy block into `new_doc`
fn move_project_fields(
    project: &mut Mapping,
    slot: ProjectSlot,
    new_doc: &mut ConfigDocument,
    moved: &mut Vec<String>,
) -> ConfigResult<()> {
    let Some(legacy) = project.shift_remove(GENERATED_FIELDS_OLD_NAME) else {
        return Ok(());
    };

    let project_id = project
        .get(PROJECT_ID_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            FieldGenError::invalid_config(format!(
                "{} has generated_fields but no project_id",
                slot
            ))
        })?
        .to_string();

    let fields = legacy_block(legacy, &project_id)?;
    debug!(
        project_id = %project_id,
        slot = %slot,
        fields = fields.len(),
        "Moving legacy generated_fields"
    );

    // Update rather than assign, so partial state already staged survives
    let target = create_and_get_ref(&project_id, new_doc)?;
    for (field, value) in fields {
        target.insert(field, value);
    }

    moved.push(project_id);
    Ok(())
}

/// Interpret a removed legacy block; an empty body counts as no fields
fn legacy_block(value: Value, owner: &str) -> ConfigResult<Mapping> {
    match value {
        Value::Mapping(fields) => Ok(fields),
        Value::Null => Ok(Mapping::new()),
        other => Err(FieldGenError::invalid_config(format!(
            "generated_fields of '{}' must be a mapping, found {}",
            owner,
            describe(&other)
        ))),
    }
}

/// Migrate the config file at `path` to the top-level layout.
///
/// Returns `false` when there is nothing to migrate: the file already has a
/// top-level `generated_fields` key, or no legacy block was found. Otherwise
/// the operator is asked through `confirm` before the file is rewritten, and
/// `true` is returned whether or not they agreed.
pub async fn move_generated_fields_out_of_projects(
    path: &Utf8Path,
    confirm: &dyn Confirm,
) -> ConfigResult<bool> {
    let mut doc = yaml::load_from_file(path).await?;

    // Must run before the legacy scan: both layouts share the key name
    if doc.contains_key(GENERATED_FIELDS_NAME) {
        info!("{} already has top-level generated_fields", path);
        return Ok(false);
    }

    convert_old_to_new(&mut doc)?;

    if !doc.contains_key(GENERATED_FIELDS_NAME) {
        info!("{} has no embedded generated_fields", path);
        return Ok(false);
    }

    if confirm.confirm(MIGRATION_PROMPT)? {
        yaml::write_to_file(&doc, path).await?;
        info!("Wrote migrated generated_fields to {}", path);
    } else {
        warn!("Migration declined, {} left unchanged", path);
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{exists, get_copy, get_forseti_fields};
    use crate::yaml::parse_document;
    use camino::Utf8PathBuf;
    use std::cell::RefCell;
    use tempfile::TempDir;

    const TEST_YAML_CONTENT: &str = r#"
overall:
  organization_id: '433637338589'
  folder_id: '396521612403'
  billing_account: 00F4CE-59D8D8-2298AC

audit_logs_project:
  project_id: audit-project

forseti:
  project:
    project_id: forseti-project

projects:
- project_id: data-project-01
- project_id: data-project-02
- project_id: data-project-03

generated_fields:
  forseti:
    service_account: forseti-server-gcp-6fcf0fc@forseti-project.iam.gserviceaccount.com
    server_bucket: gs://forseti-server-6fcf0fc/
  projects:
    audit-project:
      log_sink_service_account: p111111111111-999999@gcp-sa-logging.iam.gserviceaccount.com
      project_number: '111111111111'
    forseti-project:
      log_sink_service_account: p222222222222-999999@gcp-sa-logging.iam.gserviceaccount.com
      project_number: '222222222222'
    data-project-01:
      log_sink_service_account: p333333333333-999999@gcp-sa-logging.iam.gserviceaccount.com
      project_number: '333333333333'
    data-project-03:
      failed_step: 15
"#;

    const TEST_OLD_YAML_CONTENT: &str = r#"
overall:
  organization_id: '433637338589'
  folder_id: '396521612403'
  billing_account: 00F4CE-59D8D8-2298AC

audit_logs_project:
  project_id: audit-project
  generated_fields:
    log_sink_service_account: p111111111111-999999@gcp-sa-logging.iam.gserviceaccount.com
    project_number: '111111111111'

forseti:
  project:
    project_id: forseti-project
    generated_fields:
      log_sink_service_account: p222222222222-999999@gcp-sa-logging.iam.gserviceaccount.com
      project_number: '222222222222'
  generated_fields:
    service_account: forseti-server-gcp-6fcf0fc@forseti-project.iam.gserviceaccount.com
    server_bucket: gs://forseti-server-6fcf0fc/

projects:
- project_id: data-project-01
  generated_fields:
    log_sink_service_account: p333333333333-999999@gcp-sa-logging.iam.gserviceaccount.com
    project_number: '333333333333'
- project_id: data-project-02
- project_id: data-project-03
  generated_fields:
    failed_step: 15
"#;

    const PROJECT_IDS: [&str; 5] = [
        "audit-project",
        "forseti-project",
        "data-project-01",
        "data-project-02",
        "data-project-03",
    ];

    /// Records every prompt and answers with a fixed value
    struct ScriptedConfirm {
        answer: bool,
        prompts: RefCell<Vec<String>>,
    }

    impl ScriptedConfirm {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl Confirm for ScriptedConfirm {
        fn confirm(&self, prompt: &str) -> ConfigResult<bool> {
            self.prompts.borrow_mut().push(prompt.to_string());
            Ok(self.answer)
        }
    }

    fn load(content: &str) -> ConfigDocument {
        parse_document(content, "test.yaml").unwrap()
    }

    fn has_legacy_block(value: Option<&Value>) -> bool {
        value
            .and_then(Value::as_mapping)
            .map_or(false, |m| m.contains_key(GENERATED_FIELDS_OLD_NAME))
    }

    async fn write_temp(temp_dir: &TempDir, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(temp_dir.path().join("config.yaml")).unwrap();
        tokio::fs::write(&path, content).await.unwrap();
        path
    }

    #[test]
    fn test_convert_old_generated_fields_to_new() {
        let mut doc = load(TEST_OLD_YAML_CONTENT);
        convert_old_to_new(&mut doc).unwrap();
        let expected = load(TEST_YAML_CONTENT);

        for project_id in PROJECT_IDS {
            assert_eq!(
                get_copy(project_id, &doc),
                get_copy(project_id, &expected),
                "{}",
                project_id
            );
        }
        assert_eq!(get_forseti_fields(&doc), get_forseti_fields(&expected));
        // data-project-02 had no legacy block
        assert!(!exists("data-project-02", &doc));
    }

    #[test]
    fn test_convert_removes_legacy_blocks() {
        let mut doc = load(TEST_OLD_YAML_CONTENT);
        convert_old_to_new(&mut doc).unwrap();

        let projects = doc.get(PROJECTS_KEY).and_then(Value::as_sequence).unwrap();
        assert!(projects.iter().all(|p| !has_legacy_block(Some(p))));
        assert!(!has_legacy_block(doc.get(AUDIT_LOGS_PROJECT_KEY)));

        let forseti = doc.get(FORSETI_KEY).and_then(Value::as_mapping).unwrap();
        assert!(!forseti.contains_key(GENERATED_FIELDS_OLD_NAME));
        assert!(!has_legacy_block(forseti.get(FORSETI_PROJECT_KEY)));
    }

    #[test]
    fn test_convert_appends_top_level_key() {
        let mut doc = load(TEST_OLD_YAML_CONTENT);
        convert_old_to_new(&mut doc).unwrap();

        let keys: Vec<_> = doc.keys().filter_map(Value::as_str).collect();
        assert_eq!(
            keys,
            vec!["overall", "audit_logs_project", "forseti", "projects", "generated_fields"]
        );
    }

    #[test]
    fn test_convert_conflict_is_error() {
        let mut doc = load(TEST_OLD_YAML_CONTENT);
        doc.insert(key(GENERATED_FIELDS_NAME), Value::Mapping(Mapping::new()));
        let before = doc.clone();

        let err = convert_old_to_new(&mut doc).unwrap_err();

        assert!(matches!(err, FieldGenError::InvalidConfig { .. }));
        assert!(err.to_string().contains("data-project-01"));
        // Nothing was removed from the caller's document
        assert_eq!(doc, before);
    }

    #[test]
    fn test_convert_without_legacy_is_noop() {
        let content = "projects:\n- project_id: p1\naudit_logs_project:\n  project_id: audit\n";
        let mut doc = load(content);
        convert_old_to_new(&mut doc).unwrap();

        assert_eq!(doc, load(content));
        assert!(!doc.contains_key(GENERATED_FIELDS_NAME));
    }

    #[test]
    fn test_convert_already_migrated_is_noop() {
        let mut doc = load(TEST_YAML_CONTENT);
        convert_old_to_new(&mut doc).unwrap();
        assert_eq!(doc, load(TEST_YAML_CONTENT));
    }

    #[test]
    fn test_convert_empty_legacy_block() {
        let mut doc = load("projects:\n- project_id: p1\n  generated_fields:\n");
        convert_old_to_new(&mut doc).unwrap();

        assert!(exists("p1", &doc));
        assert!(get_copy("p1", &doc).is_empty());
    }

    #[test]
    fn test_convert_forseti_service_only() {
        let mut doc = load("forseti:\n  generated_fields:\n    server_bucket: gs://b/\n");
        convert_old_to_new(&mut doc).unwrap();

        let fields = get_forseti_fields(&doc);
        assert_eq!(fields.get("server_bucket"), Some(&key("gs://b/")));
    }

    #[test]
    fn test_convert_missing_project_id() {
        let mut doc = load("projects:\n- name: nameless\n  generated_fields:\n    a: b\n");
        let before = doc.clone();

        let err = convert_old_to_new(&mut doc).unwrap_err();
        assert!(err.to_string().contains("projects[0]"));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_convert_rejects_scalar_legacy_block() {
        let mut doc = load("audit_logs_project:\n  project_id: audit\n  generated_fields: 7\n");
        assert!(convert_old_to_new(&mut doc).is_err());
    }

    #[tokio::test]
    async fn test_move_out_of_projects_confirmed() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_temp(&temp_dir, TEST_OLD_YAML_CONTENT).await;
        let confirm = ScriptedConfirm::new(true);

        assert!(move_generated_fields_out_of_projects(&path, &confirm).await.unwrap());
        assert_eq!(*confirm.prompts.borrow(), vec![MIGRATION_PROMPT.to_string()]);

        let written = yaml::load_from_file(&path).await.unwrap();
        let expected = load(TEST_YAML_CONTENT);
        for project_id in PROJECT_IDS {
            assert_eq!(get_copy(project_id, &written), get_copy(project_id, &expected));
        }
        assert_eq!(get_forseti_fields(&written), get_forseti_fields(&expected));
    }

    #[tokio::test]
    async fn test_move_out_of_projects_declined() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_temp(&temp_dir, TEST_OLD_YAML_CONTENT).await;

        let migrated = move_generated_fields_out_of_projects(&path, &FixedAnswer(false))
            .await
            .unwrap();

        assert!(migrated);
        let on_disk = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(on_disk, TEST_OLD_YAML_CONTENT);
    }

    #[tokio::test]
    async fn test_move_out_of_projects_already_migrated() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_temp(&temp_dir, TEST_YAML_CONTENT).await;
        let confirm = ScriptedConfirm::new(true);

        assert!(!move_generated_fields_out_of_projects(&path, &confirm).await.unwrap());
        assert!(confirm.prompts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_move_out_of_projects_nothing_to_move() {
        let temp_dir = TempDir::new().unwrap();
        let content = "projects:\n- project_id: p1\n";
        let path = write_temp(&temp_dir, content).await;
        let confirm = ScriptedConfirm::new(true);

        assert!(!move_generated_fields_out_of_projects(&path, &confirm).await.unwrap());
        assert!(confirm.prompts.borrow().is_empty());
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), content);
    }

    #[tokio::test]
    async fn test_move_out_of_projects_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_temp(&temp_dir, "projects: [unclosed\n").await;

        let err = move_generated_fields_out_of_projects(&path, &FixedAnswer(true))
            .await
            .unwrap_err();
        assert!(matches!(err, FieldGenError::YamlParse { .. }));
    }
}
