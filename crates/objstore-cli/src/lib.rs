//! # objstore-cli: Offline Schema Tooling
//!
//! Runs the same Draft-4 checks the server applies, against files on
//! disk, so schemas can be vetted before they are assigned to a bucket
//! or collection.
//!
//! ## Subcommands
//!
//! - `objstore check-schema`: Meta-validate a schema document.
//! - `objstore validate`: Validate a payload against a schema.
//!
//! ```bash
//! objstore check-schema schemas/article.yaml
//! objstore validate --schema schemas/article.yaml --data draft.json --ignore id
//! ```
//!
//! Handlers return a process exit code: `0` on success, `1` when the
//! document is rejected. Unreadable input is an error.

pub mod check;
pub mod document;
pub mod validate;
