//! # objstore-core: Foundational Types for objstore
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: the bucket → collection → record hierarchy, identifiers,
//! instance URIs, typed settings, the request-scoped context and the
//! storage contract that parent lookups go through.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `ObjectId` is validated at construction; no
//!    bare strings reach the storage layer.
//!
//! 2. **One `ResourceKind` enum.** Buckets, collections, groups and records
//!    are an exhaustive enum. The `"<resource>:schema"` metadata naming is
//!    derived from it and never spelled by hand.
//!
//! 3. **Request-scoped caches are owned, not ambient.** [`RequestContext`]
//!    owns its [`BoundData`] and is passed by `&mut` through the call chain.
//!
//! 4. **Typed settings.** [`Settings`] exposes the feature flags as fields
//!    with `false` defaults; string parsing happens once at the edge.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `objstore-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod request;
pub mod resource;
pub mod settings;
pub mod storage;

/// A JSON object as stored: field name → value, insertion ordered.
pub type ObjectMap = serde_json::Map<String, serde_json::Value>;

// Re-export primary types for ergonomic imports.
pub use error::{IdentifierError, StorageError};
pub use identity::ObjectId;
pub use request::{BoundData, RequestContext, RouteParams};
pub use resource::{instance_uri, ObjectUri, ResourceKind};
pub use settings::{as_bool, Settings};
pub use storage::{object_exists_or_404, MemoryStore, ObjectStore};
