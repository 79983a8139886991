use std::fmt;
use std::str::FromStr;

use qsplit_result::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlparser::ast::{Ident, Statement};
use sqlparser::dialect::{Dialect, GenericDialect, MySqlDialect, PostgreSqlDialect};
use sqlparser::keywords::ALL_KEYWORDS;
use sqlparser::parser::Parser;

/// SQL grammar used to parse incoming statements and to quote synthesized
/// identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    #[default]
    Generic,
    MySql,
    PostgreSql,
}

impl SqlDialect {
    pub fn parse(self, sql: &str) -> Result<Vec<Statement>> {
        let dialect = self.dialect();
        Ok(Parser::parse_sql(dialect.as_ref(), sql)?)
    }

    pub const fn quote_char(self) -> char {
        match self {
            SqlDialect::MySql => '`',
            SqlDialect::Generic | SqlDialect::PostgreSql => '"',
        }
    }

    /// Build an identifier for a catalog column name.
    ///
    /// The name is quoted unless it is a plain `[A-Za-z_][A-Za-z0-9_]*` word
    /// that is not an SQL keyword. PostgreSQL folds unquoted names to lower
    /// case, so there any upper-case letter also forces quoting.
    pub fn ident(self, name: &str) -> Ident {
        if self.needs_quoting(name) {
            Ident::with_quote(self.quote_char(), name)
        } else {
            Ident::new(name)
        }
    }

    fn needs_quoting(self, name: &str) -> bool {
        if !is_plain_identifier(name) || is_keyword(name) {
            return true;
        }
        self == SqlDialect::PostgreSql && name.bytes().any(|b| b.is_ascii_uppercase())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SqlDialect::Generic => "generic",
            SqlDialect::MySql => "mysql",
            SqlDialect::PostgreSql => "postgresql",
        }
    }

    fn dialect(self) -> Box<dyn Dialect> {
        match self {
            SqlDialect::Generic => Box::new(GenericDialect {}),
            SqlDialect::MySql => Box::new(MySqlDialect {}),
            SqlDialect::PostgreSql => Box::new(PostgreSqlDialect {}),
        }
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_keyword(name: &str) -> bool {
    ALL_KEYWORDS
        .binary_search(&name.to_ascii_uppercase().as_str())
        .is_ok()
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SqlDialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" | "ansi" => Ok(SqlDialect::Generic),
            "mysql" => Ok(SqlDialect::MySql),
            "postgres" | "postgresql" => Ok(SqlDialect::PostgreSql),
            other => Err(Error::InvalidArgumentError(format!(
                "unknown SQL dialect '{other}'"
            ))),
        }
    }
}
