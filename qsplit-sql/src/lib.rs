//! Split sessions.
//!
//! [`QuerySplitter`] validates a [`SplitRequest`] once, then turns the split
//! column's observed min/max into an ordered list of [`QuerySplit`]s whose
//! union returns the same rows as the original statement.

pub type SplitResult<T> = qsplit_result::Result<T>;

mod options;
mod request;
mod splitter;

pub use options::SplitOptions;
pub use request::{QuerySplit, SplitRequest};
pub use splitter::{QuerySplitter, assemble_splits};
