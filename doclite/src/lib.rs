//! # DocLite - Embedded Document Database
//!
//! DocLite is a lightweight, embedded document database written in Rust. It
//! stores schemaless documents in named collections and supports rich
//! querying, partial updates, and projections over nested data.
//!
//! ## Key Features
//!
//! - **Embedded**: no separate server process required
//! - **Schemaless**: documents are ordered maps of string keys to values
//! - **Path language**: nested fields addressed with dot paths, array
//!   elements with bracket indexes, and wildcards for fan-out reads
//! - **Querying**: Mongo-style query documents with comparison and logical
//!   operators
//! - **Partial updates**: `$set`, `$inc`, `$unset` and `$push` operators
//! - **Projections**: shape query results with inclusion specs
//! - **Pluggable storage**: in-memory backend included, others via
//!   [store::StoreModule]
//! - **Clean API**: PIMPL pattern provides a stable, encapsulated interface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use doclite::DocLite;
//! use doclite::doc;
//! use doclite::filter::query;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create or open a database
//! let db = DocLite::builder().open_or_create()?;
//!
//! // Get or create a collection
//! let users = db.collection("users")?;
//!
//! // Insert documents
//! users.insert(doc! { "name": "Alice", "age": 30 })?;
//! users.insert(doc! { "name": "Bob", "age": 25 })?;
//!
//! // Query with a filter document
//! let cursor = users.find(query(&doc! { "age": { "$gt": 26 } })?)?;
//! for user in cursor {
//!     println!("{}", user?);
//! }
//!
//! // Close the database
//! db.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Document collections, documents, and write operations
//! - [`common`] - Paths, values, locks, and shared utilities
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Query filters and the query-document compiler
//! - [`doclite`] - Core database interface
//! - [`doclite_builder`] - Database builder for initialization
//! - [`doclite_config`] - Database configuration
//! - [`store`] - Storage backend abstractions

use crate::common::*;

pub mod collection;
pub mod common;
pub mod doclite;
pub mod doclite_builder;
pub mod doclite_config;
pub mod errors;
pub mod filter;
pub mod store;

pub use crate::doclite::DocLite;
pub use crate::doclite_builder::DocLiteBuilder;
pub use crate::doclite_config::DocLiteConfig;
