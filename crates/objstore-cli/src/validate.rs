//! # validate Subcommand
//!
//! Validates a payload against a schema the way a write is validated
//! against its parent's schema: `--ignore` fields are removed from the
//! payload and from the schema's `required` list first.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use serde_json::Value;

use objstore_schema::{check_schema, validate_schema, SchemaValidationError};

use crate::document::load_document;

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the schema document.
    #[arg(long)]
    pub schema: PathBuf,

    /// Path to the payload document.
    #[arg(long)]
    pub data: PathBuf,

    /// Field to leave out of validation. May be repeated.
    #[arg(long = "ignore", value_name = "FIELD")]
    pub ignore: Vec<String>,
}

/// Execute `validate`.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let schema = load_document(&args.schema)?;
    if let Err(e) = check_schema(&schema) {
        println!("INVALID SCHEMA: {}: {e}", args.schema.display());
        return Ok(1);
    }

    let mut data = load_document(&args.data)?;
    let ignore: Vec<&str> = args.ignore.iter().map(String::as_str).collect();
    if let Value::Object(map) = &mut data {
        map.retain(|k, _| !ignore.contains(&k.as_str()));
    }

    match validate_schema(&data, &schema, &ignore) {
        Ok(()) => {
            println!("OK: {}", args.data.display());
            Ok(0)
        }
        Err(SchemaValidationError::Payload(e)) => {
            println!("INVALID: {}: {e}", args.data.display());
            Ok(1)
        }
        Err(SchemaValidationError::UnusableSchema(reason)) => {
            bail!("schema {} cannot be compiled: {reason}", args.schema.display())
        }
    }
}
