//! Planning stages of a split request.
//!
//! - [`validation`]: checks the statement shape, resolves the table against a
//!   [`SchemaLookup`](qsplit_catalog::SchemaLookup) and picks the split column.
//! - [`boundaries`]: divides the split column's `[min, max]` range into
//!   equal sub-ranges for each supported [`TypeFamily`](qsplit_types::TypeFamily).
//! - [`rewrite`]: builds the half-open range predicate for one split and
//!   renders the statement with it.
//!
//! None of these stages mutate the parsed statement they are given.

#![forbid(unsafe_code)]

pub mod boundaries;
pub mod dialect;
pub mod rewrite;
mod statement;
pub mod validation;

pub use boundaries::{MAX_SPLIT_COUNT, SplitBoundaries, SplitScalar, compute_boundaries};
pub use dialect::SqlDialect;
pub use rewrite::{BindVarNames, END_BIND_VAR, START_BIND_VAR, build_range_predicate};
pub use validation::{ResolvedTarget, validate};
