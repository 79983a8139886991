use qsplit_plan::{BindVarNames, SqlDialect};
use serde::{Deserialize, Serialize};

/// Session-level knobs for a [`QuerySplitter`](crate::QuerySplitter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitOptions {
    /// Grammar used to parse the statement and quote the split column.
    #[serde(default)]
    pub dialect: SqlDialect,
    /// Names of the synthetic range-bound bind variables.
    #[serde(default)]
    pub bind_names: BindVarNames,
}

impl SplitOptions {
    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_bind_names<S: Into<String>, E: Into<String>>(mut self, start: S, end: E) -> Self {
        self.bind_names = BindVarNames::new(start, end);
        self
    }
}
