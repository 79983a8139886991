use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use qsplit_result::Result;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::schema::{SchemaLookup, TableSchema};
use crate::validation::{ensure_non_blank, ensure_non_empty, ensure_unique_case_insensitive};

/// On-disk catalog layout.
///
/// ```json
/// {"tables": [{"name": "t", "primary_key": ["id"],
///              "indexes": [{"name": "by_c", "columns": ["c"]}]}]}
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub tables: Vec<TableSchema>,
}

/// In-memory [`SchemaLookup`] keyed by lower-cased table name.
#[derive(Debug, Clone, Default)]
pub struct MemCatalog {
    tables: FxHashMap<String, Arc<TableSchema>>,
}

impl MemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, replacing any previous table with the same name.
    pub fn register(&mut self, table: TableSchema) -> Result<()> {
        validate_table(&table)?;
        let key = table.name.to_ascii_lowercase();
        if let Some(previous) = self.tables.insert(key, Arc::new(table)) {
            tracing::debug!(table = %previous.name, "replaced existing catalog entry");
        }
        Ok(())
    }

    /// Builder-style [`MemCatalog::register`].
    pub fn with_table(mut self, table: TableSchema) -> Result<Self> {
        self.register(table)?;
        Ok(self)
    }

    pub fn from_document(document: CatalogDocument) -> Result<Self> {
        ensure_unique_case_insensitive(
            document.tables.iter().map(|t| t.name.as_str()),
            |name| format!("table '{name}' is declared more than once"),
        )?;
        let mut catalog = Self::new();
        for table in document.tables {
            catalog.register(table)?;
        }
        tracing::debug!(tables = catalog.len(), "loaded catalog document");
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.values().map(|t| t.name.as_str())
    }
}

impl SchemaLookup for MemCatalog {
    fn lookup_table(&self, name: &str) -> Option<Arc<TableSchema>> {
        self.tables.get(&name.to_ascii_lowercase()).cloned()
    }
}

fn validate_table(table: &TableSchema) -> Result<()> {
    ensure_non_blank(&table.name, || "table name must not be empty".into())?;
    ensure_unique_case_insensitive(table.primary_key.iter().map(String::as_str), |col| {
        format!(
            "primary key of table '{}' lists column '{col}' twice",
            table.name
        )
    })?;
    for index in &table.indexes {
        ensure_non_empty(&index.columns, || {
            format!(
                "index '{}' on table '{}' has no columns",
                index.name, table.name
            )
        })?;
    }
    Ok(())
}
