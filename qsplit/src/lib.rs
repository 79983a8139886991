//! qsplit: split one SQL SELECT into disjoint range queries
//!
//! This crate is the entrypoint for the qsplit toolkit. It re-exports the
//! split session, the schema collaborator and the value types from the
//! underlying `qsplit-*` crates.
//!
//! # Quick Start
//!
//! ```rust
//! use qsplit::{MemCatalog, MinMaxResult, QuerySplitter, ScalarType, SplitRequest, TableSchema};
//!
//! let catalog = MemCatalog::new()
//!     .with_table(TableSchema::new("t").with_primary_key(["id"]))
//!     .unwrap();
//! let splitter = QuerySplitter::new(SplitRequest::new("SELECT * FROM t", 4), &catalog).unwrap();
//! let splits = splitter
//!     .split(ScalarType::Int64, Some(&MinMaxResult::single(0, 100)))
//!     .unwrap();
//! assert_eq!(splits.len(), 4);
//! ```
//!
//! # Architecture
//!
//! - **Session** (`qsplit-sql`): validates once, then renders splits.
//! - **Planning** (`qsplit-plan`): statement validation, boundary
//!   computation, range-predicate rewriting.
//! - **Schema** (`qsplit-catalog`): the [`SchemaLookup`] trait and an
//!   in-memory catalog loadable from JSON.
//! - **Values** (`qsplit-types`): scalar types, bind values, min/max results.

pub mod render;

pub use qsplit_sql::{QuerySplit, QuerySplitter, SplitOptions, SplitRequest, assemble_splits};

pub use qsplit_catalog::{IndexSchema, MemCatalog, SchemaLookup, TableSchema};

pub use qsplit_plan::{
    BindVarNames, END_BIND_VAR, MAX_SPLIT_COUNT, START_BIND_VAR, SplitBoundaries, SqlDialect,
    compute_boundaries,
};

pub use qsplit_types::{BindValue, BindVariables, MinMaxResult, ScalarType, TypeFamily};

// Re-export result types for error handling
pub use qsplit_result::{Error, ErrorKind, Result};
