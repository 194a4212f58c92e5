//! Common types and utilities shared across the crate.
//!
//! This module holds the value model, the path language, named locks, and
//! the cursor/stream machinery that the rest of the crate builds on.
//!
//! # Values
//!
//! A `Value` is the tagged union stored in document fields. Numbers compare
//! by numeric value across representations, so `val!(3)` equals `val!(3i64)`
//! and `val!(3.0)`.
//!
//! # Paths
//!
//! A `Path` addresses a value inside nested documents and arrays:
//!
//! ```rust,ignore
//! use doclite::common::Path;
//!
//! let path = Path::parse("items[0].price")?;
//! let every = Path::parse("tags[]")?;
//! ```

pub mod constants;
mod lock;
mod path;
pub mod stream;
pub mod util;
mod value;

pub use lock::*;
pub use path::*;
pub use util::*;
pub use value::*;
