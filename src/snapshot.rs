//! Snapshot types: immutable, point-in-time read results.

use docket_core::Fields;
use serde_json::Value;

/// A point-in-time copy of one document read.
///
/// Captured at the instant of the read; later writes to the store do not
/// show through, and the snapshot is never revalidated.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    id: String,
    fields: Option<Fields>,
}

impl DocumentSnapshot {
    pub(crate) fn new(id: String, fields: Option<Fields>) -> Self {
        Self { id, fields }
    }

    /// The document id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the document existed at read time.
    ///
    /// True exactly when fields were present; an existing document with an
    /// empty field mapping still exists.
    pub fn exists(&self) -> bool {
        self.fields.is_some()
    }

    /// The captured field mapping, if the document existed.
    pub fn data(&self) -> Option<&Fields> {
        self.fields.as_ref()
    }

    /// One field of the captured mapping.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.as_ref().and_then(|fields| fields.get(name))
    }

    /// Consume the snapshot, yielding the captured fields.
    pub fn into_data(self) -> Option<Fields> {
        self.fields
    }
}

/// A point-in-time copy of a whole-collection read.
///
/// Holds one [`DocumentSnapshot`] per document, in the store's iteration
/// order at the instant of the read.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySnapshot {
    docs: Vec<DocumentSnapshot>,
}

impl QuerySnapshot {
    pub(crate) fn new(docs: Vec<DocumentSnapshot>) -> Self {
        Self { docs }
    }

    /// The captured document snapshots.
    pub fn docs(&self) -> &[DocumentSnapshot] {
        &self.docs
    }

    /// Number of documents captured.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the collection was empty (or absent) at read time.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl IntoIterator for QuerySnapshot {
    type Item = DocumentSnapshot;
    type IntoIter = std::vec::IntoIter<DocumentSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.into_iter()
    }
}

impl<'a> IntoIterator for &'a QuerySnapshot {
    type Item = &'a DocumentSnapshot;
    type IntoIter = std::slice::Iter<'a, DocumentSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter()
    }
}
