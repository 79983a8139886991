//! Statement validation and split-column resolution.
//!
//! A statement is splittable when adding `col >= a AND col < b` to its WHERE
//! clause partitions its result rows: a single-table SELECT with no clause
//! that aggregates, orders, truncates, de-duplicates, or locks rows.

use std::sync::Arc;

use qsplit_catalog::{SchemaLookup, TableSchema};
use qsplit_result::{Error, Result};
use sqlparser::ast::{
    Expr, GroupByExpr, Ident, ObjectName, ObjectNamePart, Query, Select, SetExpr, Statement,
    TableFactor, TableWithJoins,
};

use crate::dialect::SqlDialect;
use crate::statement::{select_body, select_body_mut};

/// Outcome of validating a split request against the catalog.
///
/// Owns the parsed statement. Rendering helpers work on clones, so the
/// statement held here is never modified after validation.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    statement: Statement,
    table: Arc<TableSchema>,
    split_column: Ident,
    dialect: SqlDialect,
}

impl ResolvedTarget {
    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub fn table_name(&self) -> &str {
        &self.table.name
    }

    /// Primary-key columns of the FROM table; never empty.
    pub fn primary_key(&self) -> &[String] {
        &self.table.primary_key
    }

    pub fn split_column(&self) -> &Ident {
        &self.split_column
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// The statement's WHERE expression, if any.
    pub fn selection(&self) -> Option<&Expr> {
        select_body(&self.statement).and_then(|select| select.selection.as_ref())
    }

    /// Render the statement with its WHERE clause replaced by `selection`.
    pub fn render_with_selection(&self, selection: Option<Expr>) -> Result<String> {
        let mut statement = self.statement.clone();
        let select = select_body_mut(&mut statement).ok_or_else(|| {
            Error::Internal("validated statement lost its SELECT body".into())
        })?;
        select.selection = selection;
        Ok(statement.to_string())
    }

    /// Render `SELECT MIN(col), MAX(col) FROM <table> [WHERE ...]` for the
    /// split column, keeping the original FROM and WHERE clauses. The caller
    /// runs it to obtain the range the boundary calculator divides.
    pub fn min_max_query(&self) -> Result<String> {
        let column = &self.split_column;
        let template = format!("SELECT MIN({column}), MAX({column})");
        let projection = self
            .dialect
            .parse(&template)?
            .into_iter()
            .next()
            .as_ref()
            .and_then(select_body)
            .map(|select| select.projection.clone())
            .ok_or_else(|| Error::Internal(format!("cannot build aggregate from '{template}'")))?;

        let mut statement = self.statement.clone();
        let select = select_body_mut(&mut statement).ok_or_else(|| {
            Error::Internal("validated statement lost its SELECT body".into())
        })?;
        select.projection = projection;
        Ok(statement.to_string())
    }
}

/// Validate `sql` for splitting and resolve its table and split column.
///
/// When `split_column` is `None` the table's first primary-key column is
/// used; otherwise the column must be covered by some index of the table.
pub fn validate<S>(
    sql: &str,
    schema: &S,
    split_column: Option<&str>,
    dialect: SqlDialect,
) -> Result<ResolvedTarget>
where
    S: SchemaLookup + ?Sized,
{
    let mut statements = dialect.parse(sql)?;
    if statements.len() != 1 {
        return Err(Error::Syntax(format!(
            "expected exactly one statement, found {}",
            statements.len()
        )));
    }
    let statement = statements.remove(0);

    let Statement::Query(query) = &statement else {
        return Err(Error::unsupported("not a select statement"));
    };
    validate_query_clauses(query)?;
    let select = match query.body.as_ref() {
        SetExpr::Select(select) => select.as_ref(),
        SetExpr::SetOperation { op, .. } => {
            return Err(Error::unsupported(format!("{op} set operation")));
        }
        SetExpr::Query(_) => return Err(Error::unsupported("parenthesized sub-query")),
        other => {
            return Err(Error::unsupported(format!(
                "non-SELECT query body: {other}"
            )));
        }
    };
    validate_select_clauses(select)?;

    let table_name = single_table_name(&select.from)?;
    let table = schema
        .lookup_table(&table_name)
        .ok_or_else(|| Error::TableNotFound(table_name.clone()))?;
    let Some(first_pk) = table.first_primary_key_column() else {
        return Err(Error::NoPrimaryKey(table.name.clone()));
    };

    let column_name = match split_column.map(str::trim).filter(|c| !c.is_empty()) {
        Some(requested) => table.indexed_column(requested).ok_or_else(|| {
            tracing::debug!(column = requested, table = %table.name, "split column is not indexed");
            Error::SplitColumnNotIndexed {
                column: requested.to_string(),
                table: table.name.clone(),
            }
        })?,
        None => first_pk,
    };
    let split_column = dialect.ident(column_name);

    tracing::debug!(
        table = %table.name,
        split_column = %split_column,
        %dialect,
        "validated split statement"
    );

    Ok(ResolvedTarget {
        statement,
        split_column,
        table,
        dialect,
    })
}

fn validate_query_clauses(query: &Query) -> Result<()> {
    let rejected = if query.with.is_some() {
        Some("WITH clause")
    } else if query.order_by.is_some() {
        Some("ORDER BY")
    } else if query.limit_clause.is_some() {
        Some("LIMIT")
    } else if query.fetch.is_some() {
        Some("FETCH")
    } else if !query.locks.is_empty() {
        Some("locking clause")
    } else if query.for_clause.is_some() {
        Some("FOR clause")
    } else if query.settings.is_some() {
        Some("SETTINGS")
    } else if query.format_clause.is_some() {
        Some("FORMAT")
    } else if !query.pipe_operators.is_empty() {
        Some("pipe operators")
    } else {
        None
    };
    reject_clause(rejected)
}

fn validate_select_clauses(select: &Select) -> Result<()> {
    let rejected = if select.distinct.is_some() {
        Some("DISTINCT")
    } else if select.top.is_some() {
        Some("TOP")
    } else if select.into.is_some() {
        Some("SELECT INTO")
    } else if !group_by_is_empty(&select.group_by) {
        Some("GROUP BY")
    } else if select.having.is_some() {
        Some("HAVING")
    } else if !select.named_window.is_empty() {
        Some("WINDOW")
    } else if select.qualify.is_some() {
        Some("QUALIFY")
    } else if !select.lateral_views.is_empty() {
        Some("LATERAL VIEW")
    } else if select.prewhere.is_some() {
        Some("PREWHERE")
    } else if !select.cluster_by.is_empty() {
        Some("CLUSTER BY")
    } else if !select.distribute_by.is_empty() {
        Some("DISTRIBUTE BY")
    } else if !select.sort_by.is_empty() {
        Some("SORT BY")
    } else if select.value_table_mode.is_some() {
        Some("SELECT AS VALUE")
    } else {
        None
    };
    reject_clause(rejected)
}

fn reject_clause(clause: Option<&str>) -> Result<()> {
    match clause {
        Some(clause) => {
            tracing::debug!(clause, "rejecting statement");
            Err(Error::unsupported(clause))
        }
        None => Ok(()),
    }
}

fn group_by_is_empty(expr: &GroupByExpr) -> bool {
    matches!(
        expr,
        GroupByExpr::Expressions(exprs, modifiers)
            if exprs.is_empty() && modifiers.is_empty()
    )
}

fn single_table_name(from: &[TableWithJoins]) -> Result<String> {
    let item = match from {
        [item] => item,
        [] => return Err(Error::unsupported("SELECT without FROM")),
        many => {
            return Err(Error::unsupported(format!(
                "{} table references in FROM",
                many.len()
            )));
        }
    };
    if !item.joins.is_empty() {
        return Err(Error::unsupported("JOIN"));
    }
    match &item.relation {
        TableFactor::Table {
            sample: Some(_), ..
        } => Err(Error::unsupported("TABLESAMPLE")),
        TableFactor::Table {
            version: Some(_), ..
        } => Err(Error::unsupported("table version qualifier")),
        TableFactor::Table {
            name, args: None, ..
        } => table_ident(name),
        TableFactor::Table { name, .. } => Err(Error::unsupported(format!(
            "table-valued function '{name}' in FROM"
        ))),
        TableFactor::Derived { .. } => Err(Error::unsupported("sub-query in FROM")),
        other => Err(Error::unsupported(format!(
            "non-table expression in FROM: {other}"
        ))),
    }
}

/// Last component of a possibly qualified table name.
fn table_ident(name: &ObjectName) -> Result<String> {
    match name.0.last() {
        Some(ObjectNamePart::Identifier(ident)) if !ident.value.is_empty() => {
            Ok(ident.value.clone())
        }
        _ => Err(Error::unsupported(format!(
            "not a simple table expression: {name}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsplit_catalog::MemCatalog;

    fn catalog() -> MemCatalog {
        MemCatalog::new()
            .with_table(
                TableSchema::new("t")
                    .with_primary_key(["id", "seq"])
                    .with_index("by_user", ["user_id"]),
            )
            .unwrap()
    }

    #[test]
    fn qualified_table_names_use_last_component() {
        let target = validate(
            "SELECT * FROM shard1.t WHERE user_id = 7",
            &catalog(),
            None,
            SqlDialect::Generic,
        )
        .unwrap();
        assert_eq!(target.table_name(), "t");
        assert_eq!(target.split_column().value, "id");
        assert_eq!(target.primary_key(), ["id", "seq"]);
    }

    #[test]
    fn render_with_selection_leaves_the_statement_alone() {
        let target = validate(
            "SELECT a FROM t WHERE a > 1",
            &catalog(),
            None,
            SqlDialect::Generic,
        )
        .unwrap();
        let before = target.statement().to_string();
        let rendered = target.render_with_selection(None).unwrap();
        assert_eq!(rendered, "SELECT a FROM t");
        assert_eq!(target.statement().to_string(), before);
        assert_eq!(target.selection().map(ToString::to_string).as_deref(), Some("a > 1"));
    }

    #[test]
    fn rejects_multiple_statements() {
        let err = validate("SELECT 1 FROM t; SELECT 2 FROM t", &catalog(), None, SqlDialect::Generic)
            .unwrap_err();
        assert!(matches!(err, Error::Syntax(_)), "{err}");
    }

    #[test]
    fn blank_split_column_defaults_to_primary_key() {
        let target = validate("SELECT * FROM t", &catalog(), Some("  "), SqlDialect::Generic).unwrap();
        assert_eq!(target.split_column().value, "id");
    }
}
