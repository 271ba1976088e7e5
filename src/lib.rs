//! # Docket
//!
//! Embedded, file-backed JSON document store.
//!
//! Docket keeps named collections of documents, each a mapping of field
//! names to JSON values, in memory, mirrored to a single JSON file on
//! every write. It targets applications that need simple structured
//! persistence without a network service or an embedded database engine.
//!
//! ## Quick Start
//!
//! ```ignore
//! use docketdb::prelude::*;
//!
//! let db = Docket::open("./data")?;
//!
//! // Write and read a document
//! db.collection("users").doc("u1").set(json!({"name": "Alice"}))?;
//! let snap = db.collection("users").doc("u1").get();
//! assert!(snap.exists());
//!
//! // Auto-generated ids
//! let doc = db.collection("posts").add(json!({"title": "hello"}))?;
//! println!("created {}", doc.id());
//! ```
//!
//! ## Model
//!
//! - A [`Docket`] owns the store engine: one in-memory mapping, one backing
//!   file, loaded once at open.
//! - [`CollectionRef`] and [`DocumentRef`] are stateless path handles; every
//!   operation delegates to the engine, and nothing is cached in between.
//! - Reads return immutable point-in-time snapshots ([`DocumentSnapshot`],
//!   [`QuerySnapshot`]) that do not follow later writes.
//! - Writes are either whole-document overwrites (`set`) or shallow merges
//!   of top-level fields (`update`); there is no deep merge.
//!
//! Every successful mutation leaves the backing file consistent with memory;
//! a failed one is rolled back from memory before the error reaches you.

#![warn(missing_docs)]

mod database;
mod reference;
mod snapshot;

pub mod default_store;
pub mod prelude;

pub use database::{Docket, DocketBuilder};
pub use reference::{CollectionRef, DocumentRef};
pub use snapshot::{DocumentSnapshot, QuerySnapshot};

pub use docket_core::{Error, Fields, Result};
