//! Process-wide shared store.
//!
//! Most embedders construct a [`Docket`] themselves and pass it around.
//! For applications that want one shared instance instead, this module
//! guards its one-time construction: concurrent first callers cannot
//! double-load or double-create the backing file.
//!
//! ```ignore
//! docketdb::default_store::init("./data")?;
//!
//! let db = docketdb::default_store::get().unwrap();
//! db.collection("users").doc("u1").set(json!({"name": "Alice"}))?;
//! ```

use std::path::Path;

use docket_core::Result;
use once_cell::sync::OnceCell;

use crate::database::Docket;

static DEFAULT: OnceCell<Docket> = OnceCell::new();

/// Initialize the shared store, or return the already-open instance.
///
/// The first caller to succeed wins; later calls get that instance back
/// regardless of `dir`. If construction fails (unwritable directory,
/// corrupt backing file) the error propagates and the cell stays unset, so
/// a later `init` can retry.
pub fn init(dir: impl AsRef<Path>) -> Result<&'static Docket> {
    DEFAULT.get_or_try_init(|| Docket::open(dir))
}

/// The shared store, if [`init`] has succeeded before.
pub fn get() -> Option<&'static Docket> {
    DEFAULT.get()
}
