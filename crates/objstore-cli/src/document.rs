//! # Document Loading
//!
//! Schemas and payloads are read as JSON, or as YAML when the file
//! extension is `.yaml` or `.yml`. Both end up as a [`serde_json::Value`].

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Whether `path` should be parsed as YAML.
fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Read and parse a JSON or YAML document.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let value = if is_yaml(path) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML: {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON: {}", path.display()))?
    };
    tracing::debug!(path = %path.display(), "document loaded");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "s.json", r#"{"type": "object"}"#);
        assert_eq!(load_document(&path).unwrap(), json!({"type": "object"}));
    }

    #[test]
    fn loads_yaml_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "s.yml", "type: object\nrequired:\n  - title\n");
        assert_eq!(
            load_document(&path).unwrap(),
            json!({"type": "object", "required": ["title"]})
        );
    }

    #[test]
    fn unknown_extension_is_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "s.txt", "type: object");
        assert!(load_document(&path).is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_document(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/schema.json"));
    }
}
