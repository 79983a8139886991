//! Error types and result definitions for the qsplit crates.
//!
//! Every crate in the workspace returns [`Result<T>`], whose error variant is
//! the single [`Error`] enum defined here. Using one enum lets errors cross
//! crate boundaries with `?` and lets callers match on a stable set of
//! variants.
//!
//! # Error Categories
//!
//! - **Syntax errors** ([`Error::Syntax`]): the SQL text does not parse
//! - **Shape errors** ([`Error::UnsupportedQuery`]): joins, grouping, ordering,
//!   limits, locks, DISTINCT, sub-queries
//! - **Schema errors** ([`Error::TableNotFound`], [`Error::NoPrimaryKey`],
//!   [`Error::SplitColumnNotIndexed`])
//! - **Value errors** ([`Error::NumericParse`]): malformed min/max cells
//! - **Granularity errors** ([`Error::RangeTooSmall`]): the data range cannot
//!   be divided into the requested number of splits
//! - **Caller errors** ([`Error::InvalidArgumentError`])

pub mod error;
pub mod result;

pub use error::{Error, ErrorKind};
pub use result::Result;
