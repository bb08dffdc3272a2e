//! # Storage Contract
//!
//! Parent lookups go through the [`ObjectStore`] trait. Objects are scoped
//! by `(resource kind, parent id, object id)` where the parent id is the
//! parent's instance URI (empty for buckets).
//!
//! [`MemoryStore`] is the in-process backend used by the API host and the
//! tests. All operations are synchronous: the lock is `parking_lot`, never
//! held across an `.await`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::StorageError;
use crate::resource::ResourceKind;
use crate::ObjectMap;

/// Name of the identifier field stamped on stored objects.
pub const ID_FIELD: &str = "id";

/// Name of the modification timestamp field stamped on stored objects.
pub const MODIFIED_FIELD: &str = "last_modified";

/// Read access to stored objects.
pub trait ObjectStore: Send + Sync {
    /// Fetch one object, `Ok(None)` when it does not exist.
    fn get(
        &self,
        resource: ResourceKind,
        parent_id: &str,
        object_id: &str,
    ) -> Result<Option<ObjectMap>, StorageError>;
}

/// Fetch an object or fail with a 404-equivalent [`StorageError::NotFound`].
pub fn object_exists_or_404(
    store: &dyn ObjectStore,
    resource: ResourceKind,
    parent_id: &str,
    object_id: &str,
) -> Result<ObjectMap, StorageError> {
    store
        .get(resource, parent_id, object_id)?
        .ok_or_else(|| StorageError::NotFound {
            resource,
            parent_id: parent_id.to_string(),
            object_id: object_id.to_string(),
        })
}

type Key = (ResourceKind, String, String);

#[derive(Debug, Default)]
struct Inner {
    objects: HashMap<Key, ObjectMap>,
    /// Last timestamp handed out, in epoch milliseconds.
    clock: i64,
}

impl Inner {
    fn tick(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.clock = now.max(self.clock + 1);
        self.clock
    }
}

/// Thread-safe, cloneable in-memory object store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace an object.
    ///
    /// Stamps `id` and a strictly increasing `last_modified` on the stored
    /// copy and returns it.
    pub fn upsert(
        &self,
        resource: ResourceKind,
        parent_id: &str,
        object_id: &str,
        mut data: ObjectMap,
    ) -> ObjectMap {
        let mut guard = self.inner.write();
        let timestamp = guard.tick();
        data.insert(ID_FIELD.to_string(), Value::String(object_id.to_string()));
        data.insert(MODIFIED_FIELD.to_string(), Value::from(timestamp));
        guard.objects.insert(
            (resource, parent_id.to_string(), object_id.to_string()),
            data.clone(),
        );
        tracing::debug!(%resource, parent_id, object_id, timestamp, "object stored");
        data
    }

    /// List the objects of one kind under a parent, ordered by id.
    pub fn list(&self, resource: ResourceKind, parent_id: &str) -> Vec<ObjectMap> {
        let guard = self.inner.read();
        let mut found: Vec<(&String, &ObjectMap)> = guard
            .objects
            .iter()
            .filter(|((kind, parent, _), _)| *kind == resource && parent == parent_id)
            .map(|((_, _, id), obj)| (id, obj))
            .collect();
        found.sort_by(|a, b| a.0.cmp(b.0));
        found.into_iter().map(|(_, obj)| obj.clone()).collect()
    }

    /// Remove an object, returning it if it existed.
    pub fn delete(&self, resource: ResourceKind, parent_id: &str, object_id: &str) -> Option<ObjectMap> {
        self.inner
            .write()
            .objects
            .remove(&(resource, parent_id.to_string(), object_id.to_string()))
    }
}

impl ObjectStore for MemoryStore {
    fn get(
        &self,
        resource: ResourceKind,
        parent_id: &str,
        object_id: &str,
    ) -> Result<Option<ObjectMap>, StorageError> {
        Ok(self
            .inner
            .read()
            .objects
            .get(&(resource, parent_id.to_string(), object_id.to_string()))
            .cloned())
    }
}
