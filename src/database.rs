//! Main entry point for Docket.

use std::path::Path;
use std::sync::Arc;

use docket_core::Result;
use docket_engine::{Store, StoreBuilder};

use crate::reference::CollectionRef;

/// A handle on one document store.
///
/// Open a store with [`Docket::open`] or the [`builder`](Docket::builder),
/// derive [`CollectionRef`]s from it, and go. Cloning is cheap; clones share
/// the same underlying engine.
///
/// # Example
///
/// ```ignore
/// use docketdb::prelude::*;
///
/// let db = Docket::open("./data")?;
/// db.collection("users").doc("u1").set(json!({"name": "Alice"}))?;
/// ```
#[derive(Clone)]
pub struct Docket {
    engine: Arc<Store>,
}

impl std::fmt::Debug for Docket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Docket")
            .field("path", &self.engine.path())
            .finish()
    }
}

impl Docket {
    /// Open a store whose backing file lives in `dir`.
    ///
    /// Loads the file if present, creates an empty one if not. If the file
    /// exists but cannot be decoded it is set aside as a `.corrupt` sibling
    /// and the call fails; opening again starts from an empty store.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Self::builder().dir(dir).open()
    }

    /// Create a builder for store configuration.
    pub fn builder() -> DocketBuilder {
        DocketBuilder::new()
    }

    /// A reference to the named collection. Pure construction, no I/O.
    ///
    /// The collection does not need to exist; it comes into being when its
    /// first document is written.
    pub fn collection(&self, name: impl Into<String>) -> CollectionRef {
        CollectionRef::new(self.engine.clone(), name.into())
    }

    /// Names of all collections currently holding at least one document.
    pub fn collection_names(&self) -> Vec<String> {
        self.engine.collection_names()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        self.engine.path()
    }

    /// Rewrite the backing file from the current in-memory state.
    ///
    /// Every mutation already persists on its own; this exists for callers
    /// that want to re-establish the file after external tampering.
    pub fn flush(&self) -> Result<()> {
        self.engine.flush()
    }

    pub(crate) fn from_engine(engine: Arc<Store>) -> Self {
        Self { engine }
    }
}

/// Builder for store configuration.
///
/// # Example
///
/// ```ignore
/// let db = Docket::builder()
///     .dir("./data")
///     .file_name("cache.json")
///     .open()?;
/// ```
pub struct DocketBuilder {
    inner: StoreBuilder,
}

impl DocketBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            inner: Store::builder(),
        }
    }

    /// Set the directory the backing file lives in.
    ///
    /// The directory must exist and be writable; the builder does not
    /// create it.
    pub fn dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.inner = self.inner.dir(dir);
        self
    }

    /// Override the backing file name (default `docket.json`).
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.inner = self.inner.file_name(name);
        self
    }

    /// Open the store, loading or creating the backing file.
    pub fn open(self) -> Result<Docket> {
        Ok(Docket::from_engine(Arc::new(self.inner.open()?)))
    }
}

impl Default for DocketBuilder {
    fn default() -> Self {
        Self::new()
    }
}
