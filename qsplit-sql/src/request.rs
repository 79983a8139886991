use qsplit_types::{BindValue, BindVariables};
use serde::{Deserialize, Serialize};

/// Input to a split session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRequest {
    pub sql: String,
    /// Variables already referenced by `sql`.
    #[serde(default)]
    pub bind_variables: BindVariables,
    /// Column to split on; defaults to the table's leading primary-key column.
    #[serde(default)]
    pub split_column: Option<String>,
    /// Desired number of splits, at least 1.
    pub split_count: u64,
}

impl SplitRequest {
    /// Create a request. Split counts below 1 are raised to 1.
    pub fn new<S: Into<String>>(sql: S, split_count: i64) -> Self {
        Self {
            sql: sql.into(),
            bind_variables: BindVariables::default(),
            split_column: None,
            split_count: split_count.max(1) as u64,
        }
    }

    pub fn with_split_column<S: Into<String>>(mut self, column: S) -> Self {
        self.split_column = Some(column.into());
        self
    }

    pub fn with_bind_variables(mut self, bind_variables: BindVariables) -> Self {
        self.bind_variables = bind_variables;
        self
    }

    pub fn with_bind_variable<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<BindValue>,
    {
        self.bind_variables.insert(name.into(), value.into());
        self
    }
}

/// One independently executable slice of the original statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySplit {
    pub sql: String,
    pub bind_variables: BindVariables,
    /// Estimated rows in this split; approximate, never used for correctness.
    pub row_count: u64,
}
