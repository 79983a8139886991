//! Range predicate synthesis.
//!
//! Each split restricts the split column to a half-open range `[start, end)`
//! expressed with bind variables, so the SQL text differs between splits only
//! by which bounds are present.

use qsplit_result::{Error, Result};
use qsplit_types::{BindValue, BindVariables};
use serde::{Deserialize, Serialize};
use sqlparser::ast::{BinaryOperator, Expr, Ident, Value, ValueWithSpan};
use sqlparser::tokenizer::Span;

/// Default bind-variable name for the inclusive lower bound.
pub const START_BIND_VAR: &str = "_splitquery_start";
/// Default bind-variable name for the exclusive upper bound.
pub const END_BIND_VAR: &str = "_splitquery_end";

/// Names of the two synthetic bind variables.
///
/// Every split reuses the same names; each split owns its own bind map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindVarNames {
    pub start: String,
    pub end: String,
}

impl Default for BindVarNames {
    fn default() -> Self {
        Self {
            start: START_BIND_VAR.to_string(),
            end: END_BIND_VAR.to_string(),
        }
    }
}

impl BindVarNames {
    pub fn new<S: Into<String>, E: Into<String>>(start: S, end: E) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Check the names are usable alongside the caller's own variables.
    pub fn validate(&self, existing: &BindVariables) -> Result<()> {
        for name in [&self.start, &self.end] {
            if !is_bind_name(name) {
                return Err(Error::InvalidArgumentError(format!(
                    "'{name}' is not a valid bind variable name"
                )));
            }
            if existing.contains_key(name.as_str()) {
                return Err(Error::InvalidArgumentError(format!(
                    "bind variable '{name}' is reserved for split bounds"
                )));
            }
        }
        if self.start == self.end {
            return Err(Error::InvalidArgumentError(format!(
                "start and end bind variables must differ, both are '{}'",
                self.start
            )));
        }
        Ok(())
    }
}

fn is_bind_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit())
}

/// Build the WHERE expression for one split.
///
/// `None` bounds (and NULL values) are open. The bound values are written to
/// `bind_vars` under `names`. The original expression is cloned, never
/// modified:
///
/// - no bounds: `original`
/// - lower only: `col >= :start`
/// - upper only: `col < :end`
/// - both: `col >= :start AND col < :end`
///
/// and with an original expression, `(original) AND (range)`.
pub fn build_range_predicate(
    original: Option<&Expr>,
    column: &Ident,
    start: Option<&BindValue>,
    end: Option<&BindValue>,
    names: &BindVarNames,
    bind_vars: &mut BindVariables,
) -> Option<Expr> {
    let start = start.filter(|v| !v.is_null());
    let end = end.filter(|v| !v.is_null());

    let lower = start.map(|value| {
        bind_vars.insert(names.start.clone(), value.clone());
        comparison(column, BinaryOperator::GtEq, &names.start)
    });
    let upper = end.map(|value| {
        bind_vars.insert(names.end.clone(), value.clone());
        comparison(column, BinaryOperator::Lt, &names.end)
    });

    let range = match (lower, upper) {
        (None, None) => return original.cloned(),
        (Some(lower), None) => lower,
        (None, Some(upper)) => upper,
        (Some(lower), Some(upper)) => and(lower, upper),
    };

    Some(match original {
        Some(original) => and(
            Expr::Nested(Box::new(original.clone())),
            Expr::Nested(Box::new(range)),
        ),
        None => range,
    })
}

fn comparison(column: &Ident, op: BinaryOperator, bind_name: &str) -> Expr {
    Expr::BinaryOp {
        left: Box::new(Expr::Identifier(column.clone())),
        op,
        right: Box::new(placeholder(bind_name)),
    }
}

fn and(left: Expr, right: Expr) -> Expr {
    Expr::BinaryOp {
        left: Box::new(left),
        op: BinaryOperator::And,
        right: Box::new(right),
    }
}

fn placeholder(bind_name: &str) -> Expr {
    Expr::Value(ValueWithSpan {
        value: Value::Placeholder(format!(":{bind_name}")),
        span: Span::empty(),
    })
}
