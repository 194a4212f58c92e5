//! Storage backends and abstractions.
//!
//! The storage layer is pluggable: a [StoreModule] builds a [DocStore],
//! which hands out named [DocMap]s ordered by key. Collections sit on top
//! of a single map each; a reserved catalog map records which collections
//! exist.
//!
//! The crate ships one backend, the in-memory store in [memory]. Other
//! backends plug in by implementing [DocStoreProvider], [DocMapProvider]
//! and [StoreModule].

mod catalog;
mod doc_map;
mod doc_store;
mod iters;
pub mod memory;
mod store_config;
mod store_module;

pub use catalog::*;
pub use doc_map::*;
pub use doc_store::*;
pub use iters::*;
pub use store_config::*;
pub use store_module::*;
