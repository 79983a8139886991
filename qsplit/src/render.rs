//! Text output for the command-line front end.

use std::fmt::Write as _;

use qsplit_catalog::MemCatalog;
use qsplit_result::Result;
use qsplit_sql::QuerySplit;

/// Pretty JSON array of splits.
pub fn splits_to_json(splits: &[QuerySplit]) -> Result<String> {
    Ok(serde_json::to_string_pretty(splits)?)
}

/// One commented block per split: a header, the bind variables in name
/// order, then the statement terminated by `;`.
pub fn splits_to_sql(splits: &[QuerySplit]) -> String {
    let mut out = String::new();
    for (i, split) in splits.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "-- split {} of {} (~{} rows)", i + 1, splits.len(), split.row_count);
        let mut names: Vec<&String> = split.bind_variables.keys().collect();
        names.sort();
        for name in names {
            let _ = writeln!(out, "-- :{name} = {}", split.bind_variables[name]);
        }
        let _ = writeln!(out, "{};", split.sql);
    }
    out
}

/// Sorted list of the catalog's tables, shown when a lookup misses.
pub fn known_tables_hint(catalog: &MemCatalog) -> String {
    if catalog.is_empty() {
        return "note: the catalog declares no tables".to_string();
    }
    let mut names: Vec<&str> = catalog.table_names().collect();
    names.sort_unstable_by_key(|name| name.to_ascii_lowercase());
    format!("note: known tables: {}", names.join(", "))
}
