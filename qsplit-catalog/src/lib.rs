//! Schema collaborator for the splitter.
//!
//! The splitter only needs to know three things about a table: that it exists,
//! its primary-key columns in order, and which columns are covered by some
//! index. [`SchemaLookup`] is that narrow interface; [`MemCatalog`] is an
//! in-memory implementation that can be built in code or loaded from JSON.

#![forbid(unsafe_code)]

pub mod mem;
pub mod schema;
mod validation;

pub use mem::MemCatalog;
pub use schema::{IndexSchema, SchemaLookup, TableSchema};
