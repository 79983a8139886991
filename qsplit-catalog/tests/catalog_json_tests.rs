use std::io::Write;

use qsplit_catalog::{MemCatalog, SchemaLookup};
use qsplit_result::ErrorKind;

const CATALOG_JSON: &str = r#"{
    "tables": [
        {
            "name": "orders",
            "primary_key": ["order_id", "line_no"],
            "indexes": [
                {"name": "by_customer", "columns": ["customer_id", "placed_at"]}
            ]
        },
        {"name": "audit_log"}
    ]
}"#;

#[test]
fn loads_tables_and_indexes_from_json() {
    let catalog = MemCatalog::from_json_str(CATALOG_JSON).expect("load catalog");
    assert_eq!(catalog.len(), 2);

    let orders = catalog.lookup_table("orders").expect("orders");
    assert_eq!(orders.primary_key, vec!["order_id", "line_no"]);
    assert_eq!(orders.first_primary_key_column(), Some("order_id"));
    assert_eq!(orders.indexed_column("placed_at"), Some("placed_at"));

    let audit = catalog.lookup_table("Audit_Log").expect("audit_log");
    assert!(audit.primary_key.is_empty());
}

#[test]
fn duplicate_tables_are_rejected() {
    let json = r#"{"tables": [{"name": "t"}, {"name": "T"}]}"#;
    let err = MemCatalog::from_json_str(json).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.to_string().contains("more than once"), "{err}");
}

#[test]
fn malformed_json_is_an_io_class_error() {
    let err = MemCatalog::from_json_str("{\"tables\": [").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn loads_from_path() {
    let path = std::env::temp_dir().join(format!("qsplit-catalog-{}.json", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).expect("create temp catalog");
        file.write_all(CATALOG_JSON.as_bytes()).expect("write");
    }
    let catalog = MemCatalog::from_path(&path).expect("load from path");
    std::fs::remove_file(&path).ok();
    assert!(catalog.lookup_table("orders").is_some());

    let missing = MemCatalog::from_path(path.with_extension("missing")).unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::Io);
}
