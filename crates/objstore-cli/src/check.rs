//! # check-schema Subcommand
//!
//! Runs a document through [`JsonSchemaMapping`], the check applied to
//! every schema-valued field the server accepts.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use objstore_schema::JsonSchemaMapping;

use crate::document::load_document;

/// Arguments for `check-schema`.
#[derive(Args, Debug)]
pub struct CheckSchemaArgs {
    /// Path to the schema document (JSON, or YAML by extension).
    pub schema: PathBuf,
}

/// Execute `check-schema`.
pub fn run_check_schema(args: &CheckSchemaArgs) -> Result<u8> {
    let schema = load_document(&args.schema)?;
    let name = args.schema.display().to_string();
    match JsonSchemaMapping::deserialize_field(&name, Some(schema)) {
        Ok(Some(_)) => {
            println!("OK: {name}");
            Ok(0)
        }
        Ok(None) => {
            println!("INVALID: {name}: document is empty");
            Ok(1)
        }
        Err(e) => {
            println!("INVALID: {e}");
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(dir: &tempfile::TempDir, name: &str, content: &str) -> CheckSchemaArgs {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        CheckSchemaArgs { schema: path }
    }

    #[test]
    fn valid_schema_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(&dir, "ok.json", r#"{"type": "object", "required": ["title"]}"#);
        assert_eq!(run_check_schema(&args).unwrap(), 0);
    }

    #[test]
    fn invalid_schema_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(&dir, "bad.yaml", "type: not-a-type\n");
        assert_eq!(run_check_schema(&args).unwrap(), 1);
    }

    #[test]
    fn non_mapping_document_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(&dir, "list.json", "[1, 2]");
        assert_eq!(run_check_schema(&args).unwrap(), 1);
    }

    #[test]
    fn uncompilable_schema_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(&dir, "ref.json", r##"{"$ref": "#/definitions/missing"}"##);
        assert_eq!(run_check_schema(&args).unwrap(), 1);
    }

    #[test]
    fn null_document_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(&dir, "null.json", "null");
        assert_eq!(run_check_schema(&args).unwrap(), 1);
    }

    #[test]
    fn unparseable_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(&dir, "broken.json", "{");
        assert!(run_check_schema(&args).is_err());
    }
}
