use serde::{Deserialize, Serialize};

/// Result of the caller's `SELECT MIN(col), MAX(col) ...` aggregate query.
///
/// Cells hold the textual representation the store returned; `None` is SQL
/// NULL. A well-formed result has exactly one row with two cells. Anything
/// else is treated as "no data" by the boundary calculator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinMaxResult {
    pub rows: Vec<Vec<Option<String>>>,
}

impl MinMaxResult {
    /// A single-row result holding `min` and `max`.
    pub fn single<A: ToString, B: ToString>(min: A, max: B) -> Self {
        Self {
            rows: vec![vec![Some(min.to_string()), Some(max.to_string())]],
        }
    }

    /// A single row of NULLs, as returned for an empty table.
    pub fn nulls() -> Self {
        Self {
            rows: vec![vec![None, None]],
        }
    }

    /// A result with no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The `(min, max)` pair, if this is a single row of two non-NULL cells.
    pub fn bounds(&self) -> Option<(&str, &str)> {
        match self.rows.as_slice() {
            [row] => match row.as_slice() {
                [Some(min), Some(max)] => Some((min.as_str(), max.as_str())),
                _ => None,
            },
            _ => None,
        }
    }
}
