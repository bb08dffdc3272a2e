//! # Request Context
//!
//! Everything one write request needs to resolve its parents: the route
//! parameters, the backend settings, a handle to storage and a scratch
//! cache of parent objects already fetched during this request.
//!
//! The context is created per request and dropped with it. It is never
//! shared between requests, so the cache needs no locking.

use std::collections::HashMap;

use crate::error::IdentifierError;
use crate::identity::ObjectId;
use crate::resource::ObjectUri;
use crate::settings::Settings;
use crate::storage::ObjectStore;
use crate::ObjectMap;

/// Identifiers captured from the request path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    /// Enclosing bucket, for anything below a bucket.
    pub bucket_id: Option<ObjectId>,
    /// Enclosing collection, for records.
    pub collection_id: Option<ObjectId>,
    /// The addressed object itself, absent for POST on a plural endpoint.
    pub id: Option<ObjectId>,
}

impl RouteParams {
    /// Params addressing a bucket.
    pub fn bucket(bucket_id: ObjectId) -> Self {
        Self {
            id: Some(bucket_id),
            ..Self::default()
        }
    }

    /// Params addressing an object directly inside a bucket.
    pub fn in_bucket(bucket_id: ObjectId, id: Option<ObjectId>) -> Self {
        Self {
            bucket_id: Some(bucket_id),
            collection_id: None,
            id,
        }
    }

    /// Params addressing a record inside a collection.
    pub fn in_collection(bucket_id: ObjectId, collection_id: ObjectId, id: Option<ObjectId>) -> Self {
        Self {
            bucket_id: Some(bucket_id),
            collection_id: Some(collection_id),
            id,
        }
    }

    pub fn require_bucket_id(&self) -> Result<&ObjectId, IdentifierError> {
        self.bucket_id
            .as_ref()
            .ok_or(IdentifierError::MissingRouteParam("bucket_id"))
    }

    pub fn require_collection_id(&self) -> Result<&ObjectId, IdentifierError> {
        self.collection_id
            .as_ref()
            .ok_or(IdentifierError::MissingRouteParam("collection_id"))
    }

    pub fn require_id(&self) -> Result<&ObjectId, IdentifierError> {
        self.id.as_ref().ok_or(IdentifierError::MissingRouteParam("id"))
    }
}

/// Parent objects fetched during the current request, keyed by instance URI.
#[derive(Debug, Clone, Default)]
pub struct BoundData {
    pub collections: HashMap<ObjectUri, ObjectMap>,
    pub buckets: HashMap<ObjectUri, ObjectMap>,
}

/// Request-scoped state threaded through validation.
pub struct RequestContext<'a> {
    /// Identifiers from the request path.
    pub route: RouteParams,
    /// Per-request parent cache.
    pub bound_data: BoundData,
    settings: Settings,
    storage: &'a dyn ObjectStore,
}

impl<'a> RequestContext<'a> {
    /// Create a context with an empty cache.
    pub fn new(route: RouteParams, settings: Settings, storage: &'a dyn ObjectStore) -> Self {
        Self {
            route,
            bound_data: BoundData::default(),
            settings,
            storage,
        }
    }

    /// Backend settings in force for this request.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Storage collaborator used for parent lookups.
    pub fn storage(&self) -> &'a dyn ObjectStore {
        self.storage
    }
}

impl std::fmt::Debug for RequestContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("route", &self.route)
            .field("bound_data", &self.bound_data)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
