use std::{fmt, io};
use thiserror::Error;

/// Unified error type for every qsplit operation.
///
/// Splitting either produces a complete, consistent list of splits or one of
/// these errors; no variant carries partial output. Each variant names the
/// construct that caused the failure (clause, table, column, or value) so the
/// caller does not need to re-inspect the SQL.
///
/// # Error Handling Strategy
///
/// Errors propagate upward with `?`. Nothing is retried internally; callers
/// that want to retry (for example with a smaller split count after
/// [`Error::RangeTooSmall`]) can branch on [`Error::kind`].
#[derive(Error, Debug)]
pub enum Error {
    /// The input text is not parseable SQL, or it does not hold exactly one
    /// statement.
    ///
    /// The message is the parser's own diagnostic, including the position of
    /// the offending token when the parser reports one.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// The statement parsed but has a shape that cannot be split.
    ///
    /// Raised for non-SELECT statements and for SELECTs carrying DISTINCT,
    /// GROUP BY, HAVING, ORDER BY, LIMIT, locking clauses, joins, sub-queries,
    /// or more than one table. The message names the clause.
    #[error("unsupported query: {0}")]
    UnsupportedQuery(String),

    /// The FROM table is unknown to the schema collaborator.
    #[error("table '{0}' not found in schema")]
    TableNotFound(String),

    /// The FROM table exists but declares no primary-key columns.
    #[error("table '{0}' has no primary key columns")]
    NoPrimaryKey(String),

    /// The requested split column is not covered by any index of the table.
    ///
    /// Splitting on an unindexed column would turn every split into a full
    /// table scan.
    #[error(
        "split column '{column}' is not indexed or does not exist in table '{table}'"
    )]
    SplitColumnNotIndexed { column: String, table: String },

    /// A min/max cell could not be interpreted as the declared column type.
    #[error("cannot parse {type_name} value '{value}': {reason}")]
    NumericParse {
        type_name: &'static str,
        value: String,
        reason: String,
    },

    /// The (min, max) range is too narrow for the requested split count.
    ///
    /// The computed interval between boundaries would be zero. This is a
    /// recoverable condition: the same query splits fine with fewer splits.
    #[error(
        "range [{min}, {max}] is too small to split into {split_count} parts"
    )]
    RangeTooSmall {
        min: String,
        max: String,
        split_count: u64,
    },

    /// Invalid caller input that is not a property of the SQL itself.
    ///
    /// Examples: an inverted min/max pair, or a synthetic bind-variable name
    /// that collides with a caller-supplied one.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// Malformed catalog document.
    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure while reading a catalog document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Internal error indicating a bug or unexpected state.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    Unsupported,
    Schema,
    NumericParse,
    RangeTooSmall,
    InvalidArgument,
    Io,
    Internal,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax(_) => ErrorKind::Syntax,
            Error::UnsupportedQuery(_) => ErrorKind::Unsupported,
            Error::TableNotFound(_)
            | Error::NoPrimaryKey(_)
            | Error::SplitColumnNotIndexed { .. } => ErrorKind::Schema,
            Error::NumericParse { .. } => ErrorKind::NumericParse,
            Error::RangeTooSmall { .. } => ErrorKind::RangeTooSmall,
            Error::InvalidArgumentError(_) => ErrorKind::InvalidArgument,
            Error::Json(_) | Error::Io(_) => ErrorKind::Io,
            Error::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Create an unsupported-query error naming the offending construct.
    #[inline]
    pub fn unsupported<S: Into<String>>(what: S) -> Self {
        Error::UnsupportedQuery(what.into())
    }

    /// Create a numeric parse error from any displayable parse failure.
    ///
    /// ```
    /// use qsplit_result::Error;
    ///
    /// let err = "abc".parse::<i64>().map_err(|e| Error::numeric_parse("signed integer", "abc", e));
    /// assert!(matches!(err, Err(Error::NumericParse { .. })));
    /// ```
    #[inline]
    pub fn numeric_parse<V, E>(type_name: &'static str, value: V, reason: E) -> Self
    where
        V: Into<String>,
        E: fmt::Display,
    {
        Error::NumericParse {
            type_name,
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a range-too-small error from the observed bounds.
    #[inline]
    pub fn range_too_small<T: fmt::Display>(min: T, max: T, split_count: u64) -> Self {
        Error::RangeTooSmall {
            min: min.to_string(),
            max: max.to_string(),
            split_count,
        }
    }
}

impl From<sqlparser::parser::ParserError> for Error {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        Error::Syntax(err.to_string())
    }
}
