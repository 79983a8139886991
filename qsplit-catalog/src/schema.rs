use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A secondary index: its name and ordered column list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSchema {
    #[serde(default)]
    pub name: String,
    pub columns: Vec<String>,
}

impl IndexSchema {
    pub fn new<N, I, C>(name: N, columns: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c.eq_ignore_ascii_case(column))
    }
}

/// What the splitter needs to know about one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    #[serde(default)]
    pub primary_key: Vec<String>,
    #[serde(default)]
    pub indexes: Vec<IndexSchema>,
}

impl TableSchema {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            primary_key: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn with_primary_key<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_index<N, I, C>(mut self, name: N, columns: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.indexes.push(IndexSchema::new(name, columns));
        self
    }

    /// Leading primary-key column, the default split column.
    pub fn first_primary_key_column(&self) -> Option<&str> {
        self.primary_key.first().map(String::as_str)
    }

    /// Whether `column` appears in the primary key or any secondary index,
    /// compared case-insensitively. Returns the catalog's spelling.
    pub fn indexed_column(&self, column: &str) -> Option<&str> {
        self.primary_key
            .iter()
            .chain(self.indexes.iter().flat_map(|index| index.columns.iter()))
            .find(|c| c.eq_ignore_ascii_case(column))
            .map(String::as_str)
    }
}

/// Narrow catalog interface consumed by the statement validator.
pub trait SchemaLookup {
    /// Look up a table by name. Returns `None` when the table does not exist.
    fn lookup_table(&self, name: &str) -> Option<Arc<TableSchema>>;
}

impl<T: SchemaLookup + ?Sized> SchemaLookup for &T {
    fn lookup_table(&self, name: &str) -> Option<Arc<TableSchema>> {
        (**self).lookup_table(name)
    }
}

impl<T: SchemaLookup + ?Sized> SchemaLookup for Arc<T> {
    fn lookup_table(&self, name: &str) -> Option<Arc<TableSchema>> {
        (**self).lookup_table(name)
    }
}
