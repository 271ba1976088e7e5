//! Document model for Docket.
//!
//! The store is a two-level mapping: collection name → document id →
//! document fields. Field values are `serde_json::Value`, so everything a
//! document can hold is JSON-representable by construction; no separate
//! validation pass runs before persistence, and none is needed.
//!
//! `BTreeMap` is used at both levels for deterministic iteration and a
//! stable key order in the backing file.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};

/// A single document's field mapping.
pub type Fields = serde_json::Map<String, Value>;

/// All documents of one collection, keyed by document id.
pub type Documents = BTreeMap<String, Fields>;

/// The full store mapping: collection name → documents.
///
/// A collection name is present only while it holds at least one document;
/// the engine prunes emptied collections on delete.
pub type Collections = BTreeMap<String, Documents>;

/// Write semantics for create-or-update operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace the stored field mapping wholesale, discarding prior fields
    /// not present in the incoming data.
    Overwrite,
    /// Write each incoming top-level key into the existing mapping, leaving
    /// keys not named untouched. Nested objects are replaced, not merged.
    /// On a missing document this is identical to [`WriteMode::Overwrite`].
    Merge,
}

/// Shallow-merge `incoming` into `existing`.
///
/// Each top-level key of `incoming` is inserted into `existing`, added if
/// new, replaced if present. A key whose value is itself an object replaces
/// the prior value wholesale; there is no recursive merge.
pub fn merge_fields(existing: &mut Fields, incoming: Fields) {
    for (key, value) in incoming {
        existing.insert(key, value);
    }
}

/// Convert an arbitrary JSON value into document fields.
///
/// Documents are objects at the root; anything else is rejected here, at
/// the write boundary, rather than surfacing later as a malformed store.
pub fn fields_from_value(value: Value) -> Result<Fields> {
    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(Error::InvalidDocument(format!(
            "expected a JSON object at the document root, got {}",
            value_type_name(&other)
        ))),
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
