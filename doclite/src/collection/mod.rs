//! Collections and documents for schemaless data storage.
//!
//! This module provides the core document storage abstraction in DocLite.
//! Collections store unstructured documents and support flexible querying
//! and updates.
//!
//! # Documents
//!
//! A [Document] is an ordered key-value map where keys are strings and values
//! are [crate::common::Value]s. Nested values are addressed with dot paths and
//! bracket index segments.
//!
//! ```rust,ignore
//! let mut doc = Document::new();
//! doc.put("name", "Alice")?;
//! doc.put_path(&Path::parse("address.city")?, Value::from("Oslo"))?;
//! ```
//!
//! # Collections
//!
//! A [DocumentCollection] manages documents with the same logical type:
//!
//! ```rust,ignore
//! let users = db.collection("users")?;
//!
//! users.insert(doc! { "name": "Alice", "age": 30 })?;
//!
//! let cursor = users.find(query(&doc! { "age": { "$gt": 21 } })?)?;
//! ```
//!
//! # Document IDs
//!
//! Each stored document carries a unique `_id` field. When a document is
//! inserted without one, the storage layer assigns a UUID string.

mod collection_factory;
mod default_document_collection;
mod document;
mod document_collection;
mod find_options;
pub(crate) mod operation;
mod update_command;
mod update_options;

pub(crate) use collection_factory::*;
pub use document::*;
pub use document_collection::*;
pub use find_options::*;
pub use operation::WriteResult;
pub use update_command::*;
pub use update_options::*;
