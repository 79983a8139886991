use crate::error::Error;

/// Result type alias used throughout qsplit.
pub type Result<T> = std::result::Result<T, Error>;
