//! Convenient imports for Docket.
//!
//! ```ignore
//! use docketdb::prelude::*;
//!
//! let db = Docket::open("./data")?;
//! db.collection("users").doc("u1").set(json!({"name": "Alice"}))?;
//! ```

// Main entry point
pub use crate::database::{Docket, DocketBuilder};

// Error handling
pub use docket_core::{Error, Result};

// References and snapshots
pub use crate::reference::{CollectionRef, DocumentRef};
pub use crate::snapshot::{DocumentSnapshot, QuerySnapshot};

// Document model
pub use docket_core::Fields;

// Re-export serde_json for convenience
pub use serde_json::json;
