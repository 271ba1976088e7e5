//! Core types for Docket.
//!
//! This crate defines the document model and the unified error type shared
//! by the engine and the public facade:
//!
//! - [`Fields`], [`Documents`], [`Collections`]: the two-level mapping the
//!   whole store is built on
//! - [`WriteMode`]: overwrite vs. shallow-merge write semantics
//! - [`Error`] / [`Result`]: the canonical error surface

#![warn(missing_docs)]

pub mod document;
pub mod error;

pub use document::{fields_from_value, merge_fields, Collections, Documents, Fields, WriteMode};
pub use error::{Error, Result};
