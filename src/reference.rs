//! Reference types: path-scoped handles into the store.
//!
//! References are stateless pointers: a collection name (plus a document
//! id, for [`DocumentRef`]) and a handle on the engine. They own no document
//! data and never cache reads; creating them is cheap, so make as many as
//! convenient.

use std::sync::Arc;

use docket_core::{fields_from_value, Error, Fields, Result, WriteMode};
use docket_engine::Store;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::snapshot::{DocumentSnapshot, QuerySnapshot};

/// A reference to one collection.
#[derive(Clone)]
pub struct CollectionRef {
    engine: Arc<Store>,
    name: String,
}

impl CollectionRef {
    pub(crate) fn new(engine: Arc<Store>, name: String) -> Self {
        Self { engine, name }
    }

    /// The collection name this reference points at.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A reference to the document `id` in this collection.
    ///
    /// Pure construction; the document does not need to exist.
    pub fn doc(&self, id: impl Into<String>) -> DocumentRef {
        DocumentRef::new(self.engine.clone(), self.name.clone(), id.into())
    }

    /// Create a document under a freshly generated id.
    ///
    /// `data` must serialize to a JSON object. The id is a v4 UUID, so two
    /// `add` calls with identical data produce two distinct documents.
    /// Returns the reference bound to the new id.
    pub fn add<D: Serialize>(&self, data: D) -> Result<DocumentRef> {
        let fields = to_fields(data)?;
        let id = Uuid::new_v4().to_string();
        self.engine
            .upsert(&self.name, &id, fields, WriteMode::Overwrite)?;
        Ok(self.doc(id))
    }

    /// A point-in-time snapshot of every document in this collection.
    ///
    /// Documents appear in the store's iteration order (ids sort
    /// lexicographically). The snapshot is a copy; later writes do not show
    /// through. An absent collection yields an empty snapshot.
    pub fn get(&self) -> QuerySnapshot {
        let docs = self.engine.collection(&self.name);
        QuerySnapshot::new(
            docs.into_iter()
                .map(|(id, fields)| DocumentSnapshot::new(id, Some(fields)))
                .collect(),
        )
    }
}

/// A reference to one document.
#[derive(Clone)]
pub struct DocumentRef {
    engine: Arc<Store>,
    collection: String,
    id: String,
}

impl std::fmt::Debug for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentRef")
            .field("collection", &self.collection)
            .field("id", &self.id)
            .finish()
    }
}

impl DocumentRef {
    pub(crate) fn new(engine: Arc<Store>, collection: String, id: String) -> Self {
        Self {
            engine,
            collection,
            id,
        }
    }

    /// The document id this reference points at.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The collection this reference points into.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Replace the document with exactly `data`, creating it if absent.
    ///
    /// Fields present before the call and missing from `data` are gone
    /// afterwards. `data` must serialize to a JSON object.
    pub fn set<D: Serialize>(&self, data: D) -> Result<()> {
        self.engine
            .upsert(&self.collection, &self.id, to_fields(data)?, WriteMode::Overwrite)
    }

    /// Shallow-merge `data`'s top-level fields into the document.
    ///
    /// Keys named in `data` are added or replaced (a nested object is
    /// replaced wholesale, not merged); keys not named are untouched.
    /// A missing document is created with exactly `data`.
    pub fn update<D: Serialize>(&self, data: D) -> Result<()> {
        self.engine
            .upsert(&self.collection, &self.id, to_fields(data)?, WriteMode::Merge)
    }

    /// A point-in-time snapshot of this document.
    ///
    /// The snapshot exists iff the document did at the instant of the read;
    /// it is a copy and does not follow later writes.
    pub fn get(&self) -> DocumentSnapshot {
        DocumentSnapshot::new(
            self.id.clone(),
            self.engine.document(&self.collection, &self.id),
        )
    }

    /// Delete the document.
    ///
    /// Deleting an absent document is a no-op, not an error. Deleting the
    /// last document of a collection removes the collection itself.
    pub fn delete(&self) -> Result<()> {
        self.engine.delete(&self.collection, &self.id).map(|_| ())
    }
}

/// Serialize `data` and reject anything that is not an object at the root.
fn to_fields<D: Serialize>(data: D) -> Result<Fields> {
    let value: Value =
        serde_json::to_value(data).map_err(|e| Error::Serialization(e.to_string()))?;
    fields_from_value(value)
}
