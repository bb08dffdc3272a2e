//! # Resource Kinds and Instance URIs
//!
//! The store is a fixed hierarchy:
//!
//! ```text
//! bucket ─┬─ collection ── record
//!         └─ group
//! ```
//!
//! Every stored object has an instance URI built from its identifiers
//! (`/buckets/{bid}/collections/{cid}/records/{rid}`). URIs double as the
//! parent id of child objects in storage and as cache keys in
//! [`BoundData`](crate::request::BoundData). Because [`ObjectId`] forbids
//! `/`, distinct objects never share a URI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;
use crate::identity::ObjectId;
use crate::request::RouteParams;

/// Kind of object in the bucket hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Top-level tenant namespace.
    Bucket,
    /// Named group of records within a bucket.
    Collection,
    /// Named set of principals within a bucket.
    Group,
    /// Leaf data object within a collection.
    Record,
}

impl ResourceKind {
    /// All kinds, parents before children.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Bucket,
        ResourceKind::Collection,
        ResourceKind::Group,
        ResourceKind::Record,
    ];

    /// Singular lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bucket => "bucket",
            Self::Collection => "collection",
            Self::Group => "group",
            Self::Record => "record",
        }
    }

    /// Name of the bucket metadata field holding the schema that applies to
    /// every object of this kind in the bucket, e.g. `"record:schema"`.
    pub fn schema_field(self) -> String {
        format!("{}:schema", self.as_str())
    }

    /// The kind of the direct parent, `None` for buckets.
    pub fn parent_kind(self) -> Option<ResourceKind> {
        match self {
            Self::Bucket => None,
            Self::Collection | Self::Group => Some(Self::Bucket),
            Self::Record => Some(Self::Collection),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bucket" => Ok(Self::Bucket),
            "collection" => Ok(Self::Collection),
            "group" => Ok(Self::Group),
            "record" => Ok(Self::Record),
            other => Err(IdentifierError::UnknownResource(other.to_string())),
        }
    }
}

/// Instance URI of a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectUri(String);

impl ObjectUri {
    /// `/buckets/{bid}`
    pub fn bucket(bucket_id: &ObjectId) -> Self {
        Self(format!("/buckets/{bucket_id}"))
    }

    /// `/buckets/{bid}/collections/{cid}`
    pub fn collection(bucket_id: &ObjectId, collection_id: &ObjectId) -> Self {
        Self(format!("/buckets/{bucket_id}/collections/{collection_id}"))
    }

    /// `/buckets/{bid}/groups/{gid}`
    pub fn group(bucket_id: &ObjectId, group_id: &ObjectId) -> Self {
        Self(format!("/buckets/{bucket_id}/groups/{group_id}"))
    }

    /// `/buckets/{bid}/collections/{cid}/records/{rid}`
    pub fn record(bucket_id: &ObjectId, collection_id: &ObjectId, record_id: &ObjectId) -> Self {
        Self(format!(
            "/buckets/{bucket_id}/collections/{collection_id}/records/{record_id}"
        ))
    }

    /// Access the URI as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the instance URI of the object a route addresses.
///
/// `params.id` names the object itself; `bucket_id` and `collection_id`
/// name its ancestors. Missing parameters are reported by name.
pub fn instance_uri(kind: ResourceKind, params: &RouteParams) -> Result<ObjectUri, IdentifierError> {
    let id = params.require_id()?;
    match kind {
        ResourceKind::Bucket => Ok(ObjectUri::bucket(id)),
        ResourceKind::Collection => Ok(ObjectUri::collection(params.require_bucket_id()?, id)),
        ResourceKind::Group => Ok(ObjectUri::group(params.require_bucket_id()?, id)),
        ResourceKind::Record => Ok(ObjectUri::record(
            params.require_bucket_id()?,
            params.require_collection_id()?,
            id,
        )),
    }
}
