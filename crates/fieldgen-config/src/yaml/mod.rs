//! Deployment config YAML loading and writing

use camino::Utf8Path;
use fieldgen_core::error::FieldGenError;
use fieldgen_core::types::ConfigDocument;
use serde_yaml::Value;
use tracing::debug;

use crate::ConfigResult;

/// Parse a YAML string into a configuration document.
///
/// `origin` names the source in error messages. An empty document parses to
/// an empty mapping.
pub fn parse_document(content: &str, origin: &str) -> ConfigResult<ConfigDocument> {
    if content.trim().is_empty() {
        return Ok(ConfigDocument::new());
    }

    let value: Value = serde_yaml::from_str(content).map_err(|e| parse_error(origin, e))?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(ConfigDocument::new()),
        _ => Err(FieldGenError::NotAMapping {
            path: origin.to_string(),
        }),
    }
}

/// Serialize a configuration document to a YAML string
pub fn serialize_document(doc: &ConfigDocument) -> ConfigResult<String> {
    serde_yaml::to_string(doc).map_err(|e| FieldGenError::YamlSerialize {
        message: e.to_string(),
    })
}

/// Load and parse a configuration document from file path
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<ConfigDocument> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FieldGenError::io(format!("Failed to read {}", path), e))?;

    let doc = parse_document(&content, path.as_str())?;
    debug!("Loaded {} top-level keys from {}", doc.len(), path);
    Ok(doc)
}

/// Serialize a configuration document and write it to `path`
pub async fn write_to_file(doc: &ConfigDocument, path: &Utf8Path) -> ConfigResult<()> {
    let content = serialize_document(doc)?;

    tokio::fs::write(path, content)
        .await
        .map_err(|e| FieldGenError::io(format!("Failed to write {}", path), e))?;

    debug!("Wrote {} top-level keys to {}", doc.len(), path);
    Ok(())
}

fn parse_error(origin: &str, error: serde_yaml::Error) -> FieldGenError {
    let (line, column) = error
        .location()
        .map(|location| (location.line(), location.column()))
        .unwrap_or((0, 0));

    FieldGenError::YamlParse {
        path: origin.to_string(),
        message: error.to_string(),
        line,
        column,
    }
}
