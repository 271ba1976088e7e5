//! The store engine: canonical mapping plus write-through persistence.

use std::path::{Path, PathBuf};

use docket_core::{merge_fields, Collections, Documents, Fields, Result, WriteMode};
use parking_lot::RwLock;

use crate::durability;

/// Default name of the backing file inside the store directory.
pub const STORE_FILE: &str = "docket.json";

/// The document store engine.
///
/// Owns the canonical collection → id → fields mapping and keeps the
/// backing file consistent with it: every successful mutation rewrites the
/// file before the call returns. The reference types in the public facade
/// delegate here and hold no data of their own.
///
/// # Thread safety
///
/// `Store` is `Send + Sync`. Reads clone under a read lock. Mutations run
/// read-modify-persist under a single write-lock hold, which serializes
/// every mutation against every other one: two concurrent upserts cannot
/// interleave their persists, so a slower write can never clobber a faster
/// one's bytes with a stale mapping.
///
/// # Persist failure
///
/// If the file rewrite fails, the in-memory change is rolled back before
/// the error propagates: a failed mutation is not silently retained in
/// memory, and memory stays consistent with disk.
pub struct Store {
    file_path: PathBuf,
    collections: RwLock<Collections>,
}

impl Store {
    /// Open a store backed by `<dir>/docket.json`.
    ///
    /// Loads the backing file if present, creates an empty one if not. An
    /// undecodable file is set aside as `docket.json.corrupt` and the call
    /// fails with [`docket_core::Error::Corrupted`]; opening again starts
    /// from an empty store.
    pub fn open(dir: impl AsRef<Path>) -> Result<Store> {
        Store::builder().dir(dir).open()
    }

    /// Create a builder for store configuration.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Fields of one document, or `None` if the collection or id is absent.
    ///
    /// The returned mapping is a copy; mutating it does not touch the
    /// canonical store.
    pub fn document(&self, collection: &str, id: &str) -> Option<Fields> {
        self.collections
            .read()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
    }

    /// The full id → fields mapping of one collection, empty if absent.
    pub fn collection(&self, collection: &str) -> Documents {
        self.collections
            .read()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Names of all collections currently holding at least one document.
    pub fn collection_names(&self) -> Vec<String> {
        self.collections.read().keys().cloned().collect()
    }

    /// Number of non-empty collections.
    pub fn len(&self) -> usize {
        self.collections.read().len()
    }

    /// Whether the store holds no documents at all.
    pub fn is_empty(&self) -> bool {
        self.collections.read().is_empty()
    }

    /// Create or update the document at (`collection`, `id`).
    ///
    /// [`WriteMode::Overwrite`] replaces the stored fields wholesale;
    /// [`WriteMode::Merge`] writes each top-level key of `fields` into the
    /// existing mapping and leaves other keys untouched (nested objects are
    /// replaced, not merged). Merge on a missing document creates it with
    /// exactly `fields`.
    pub fn upsert(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
        mode: WriteMode,
    ) -> Result<()> {
        let mut collections = self.collections.write();

        let docs = collections.entry(collection.to_string()).or_default();
        let prior = match mode {
            WriteMode::Overwrite => docs.insert(id.to_string(), fields),
            WriteMode::Merge => match docs.get_mut(id) {
                Some(existing) => {
                    let prior = existing.clone();
                    merge_fields(existing, fields);
                    Some(prior)
                }
                None => docs.insert(id.to_string(), fields),
            },
        };

        if let Err(err) = durability::persist(&self.file_path, &collections) {
            Self::restore(&mut collections, collection, id, prior);
            return Err(err);
        }
        Ok(())
    }

    /// Remove the document at (`collection`, `id`) if present.
    ///
    /// Returns `true` if the id existed. Removing the last document of a
    /// collection removes the collection entry itself. An absent id is a
    /// no-op, not an error, and leaves the backing file untouched.
    pub fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        let mut collections = self.collections.write();

        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let Some(prior) = docs.remove(id) else {
            return Ok(false);
        };
        if docs.is_empty() {
            collections.remove(collection);
        }

        if let Err(err) = durability::persist(&self.file_path, &collections) {
            Self::restore(&mut collections, collection, id, Some(prior));
            return Err(err);
        }
        Ok(true)
    }

    /// Rewrite the backing file from the current in-memory mapping.
    ///
    /// Every mutation already persists on its own; `flush` exists for
    /// callers that want to re-establish the file after external tampering.
    pub fn flush(&self) -> Result<()> {
        let collections = self.collections.read();
        durability::persist(&self.file_path, &collections)
    }

    /// Put (`collection`, `id`) back to its pre-mutation state.
    fn restore(collections: &mut Collections, collection: &str, id: &str, prior: Option<Fields>) {
        match prior {
            Some(fields) => {
                collections
                    .entry(collection.to_string())
                    .or_default()
                    .insert(id.to_string(), fields);
            }
            None => {
                if let Some(docs) = collections.get_mut(collection) {
                    docs.remove(id);
                    if docs.is_empty() {
                        collections.remove(collection);
                    }
                }
            }
        }
    }
}

/// Builder for store configuration.
///
/// # Example
///
/// ```ignore
/// let store = Store::builder()
///     .dir("./data")
///     .file_name("cache.json")
///     .open()?;
/// ```
pub struct StoreBuilder {
    dir: PathBuf,
    file_name: String,
}

impl StoreBuilder {
    /// Create a builder with default settings: the current directory and
    /// [`STORE_FILE`] as the backing file name.
    pub fn new() -> Self {
        Self {
            dir: PathBuf::from("."),
            file_name: STORE_FILE.to_string(),
        }
    }

    /// Set the directory the backing file lives in.
    ///
    /// The directory must exist and be writable; the builder does not
    /// create it.
    pub fn dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.dir = dir.as_ref().to_path_buf();
        self
    }

    /// Override the backing file name.
    ///
    /// For embedders that co-locate several stores in one directory.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Open the store, loading or creating the backing file.
    pub fn open(self) -> Result<Store> {
        let file_path = self.dir.join(self.file_name);
        let collections = durability::load(&file_path)?;
        Ok(Store {
            file_path,
            collections: RwLock::new(collections),
        })
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
