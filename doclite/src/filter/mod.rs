//! Query filters for selecting documents from collections.
//!
//! This module provides the query matcher: a query document compiles into a
//! [Filter] tree that is evaluated against each stored document. Filters can
//! also be constructed directly and combined with logical operators.
//!
//! # Creating Filters
//!
//! - `query(&doc! { "age": { "$gt": 30 } })` - compile a query document
//! - `all()` - match all documents
//! - `by_id(id)` - match by document id
//! - `filter.and(other)` / `filter.or(other)` / `filter.not()` - composition
//!
//! # Examples
//!
//! ```rust,ignore
//! use doclite::{doc, filter};
//!
//! // Compile a query document
//! let filter = filter::query(&doc! {
//!     "address.city": "Kolkata",
//!     "age": { "$gt": 30 },
//!     "tags[]": "admin"
//! })?;
//!
//! // Use filters with collections
//! let results = collection.find(filter)?;
//! ```
//!
//! # Supported Operators
//!
//! - **Equality**: a literal value; missing fields equal `null`
//! - **Comparison**: `$gt`, `$gte`, `$lt`, `$lte`
//! - **Negation/Membership**: `$ne`, `$in`, `$nin`, `$exists`
//! - **Logical** (top level): `$or`, `$and`

mod basic_filters;
mod filter;
mod logical_filters;
mod query;
mod range_filters;

pub(crate) use basic_filters::*;
pub use filter::*;
pub(crate) use logical_filters::*;
pub use query::query;
pub(crate) use range_filters::*;
