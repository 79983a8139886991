use qsplit::render::{splits_to_json, splits_to_sql};
use qsplit::{
    ErrorKind, MemCatalog, MinMaxResult, QuerySplitter, ScalarType, SplitOptions, SplitRequest,
    SqlDialect,
};

const CATALOG_JSON: &str = r#"{
    "tables": [
        {
            "name": "Orders",
            "primary_key": ["order_id"],
            "indexes": [{"name": "by_customer", "columns": ["customer_id"]}]
        }
    ]
}"#;

fn catalog() -> MemCatalog {
    MemCatalog::from_json_str(CATALOG_JSON).expect("catalog json")
}

#[test]
fn json_catalog_to_sql_script() {
    let request = SplitRequest::new("SELECT * FROM orders WHERE status = :status", 3)
        .with_bind_variable("status", "open");
    let splitter = QuerySplitter::new(request, &catalog()).unwrap();

    assert_eq!(
        splitter.min_max_query().unwrap(),
        "SELECT MIN(order_id), MAX(order_id) FROM orders WHERE status = :status"
    );

    let splits = splitter
        .split(ScalarType::Int64, Some(&MinMaxResult::single(100, 400)))
        .unwrap();
    assert_eq!(
        splits_to_sql(&splits),
        "-- split 1 of 3 (~100 rows)\n\
         -- :_splitquery_end = 200\n\
         -- :status = 'open'\n\
         SELECT * FROM orders WHERE (status = :status) AND (order_id < :_splitquery_end);\n\
         \n\
         -- split 2 of 3 (~100 rows)\n\
         -- :_splitquery_end = 300\n\
         -- :_splitquery_start = 200\n\
         -- :status = 'open'\n\
         SELECT * FROM orders WHERE (status = :status) AND (order_id >= :_splitquery_start AND order_id < :_splitquery_end);\n\
         \n\
         -- split 3 of 3 (~100 rows)\n\
         -- :_splitquery_start = 300\n\
         -- :status = 'open'\n\
         SELECT * FROM orders WHERE (status = :status) AND (order_id >= :_splitquery_start);\n"
    );

    let json: serde_json::Value = serde_json::from_str(&splits_to_json(&splits).unwrap()).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(3));
    assert_eq!(json[1]["bind_variables"]["_splitquery_start"], 200);
}

#[test]
fn mysql_quotes_awkward_split_columns() {
    let catalog = MemCatalog::from_json_str(
        r#"{"tables": [{"name": "events", "primary_key": ["event id"]}]}"#,
    )
    .unwrap();
    let splitter = QuerySplitter::with_options(
        SplitRequest::new("SELECT * FROM events", 2),
        &catalog,
        SplitOptions::default().with_dialect(SqlDialect::MySql),
    )
    .unwrap();
    let splits = splitter
        .split(ScalarType::Uint64, Some(&MinMaxResult::single(0, 8)))
        .unwrap();
    assert_eq!(splits[0].sql, "SELECT * FROM events WHERE `event id` < :_splitquery_end");
}

#[test]
fn errors_are_classified() {
    let err = QuerySplitter::new(SplitRequest::new("SELECT * FROM orders ORDER BY 1", 2), &catalog())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);

    let err = MemCatalog::from_json_str("{\"tables\": 3}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn trailing_primary_key_column_qualifies() {
    let catalog = qsplit_test_utils::sample_catalog();
    let request = SplitRequest::new("SELECT * FROM accounts", 2).with_split_column("REGION");
    let splitter = QuerySplitter::new(request, &catalog).unwrap();
    assert_eq!(splitter.resolved().split_column().value, "region");
    assert_eq!(splitter.resolved().primary_key(), ["account_id", "region"]);

    // Text columns are never divided.
    let splits = splitter
        .split(ScalarType::VarChar, Some(&MinMaxResult::single("ap", "us")))
        .unwrap();
    assert_eq!(splits.len(), 1);
    assert_eq!(splits[0].sql, "SELECT * FROM accounts");
}

#[test]
fn keyword_split_columns_are_quoted_in_every_split() {
    let catalog = MemCatalog::from_json_str(
        r#"{"tables": [{"name": "t", "primary_key": ["from"]},
                       {"name": "accounts", "primary_key": ["AccountId"]}]}"#,
    )
    .unwrap();
    let min_max = MinMaxResult::single(0, 10);

    let cases = [
        (
            "t",
            SqlDialect::Generic,
            [
                r#"SELECT * FROM t WHERE "from" < :_splitquery_end"#,
                r#"SELECT * FROM t WHERE "from" >= :_splitquery_start"#,
            ],
        ),
        (
            "t",
            SqlDialect::MySql,
            [
                "SELECT * FROM t WHERE `from` < :_splitquery_end",
                "SELECT * FROM t WHERE `from` >= :_splitquery_start",
            ],
        ),
        (
            "accounts",
            SqlDialect::PostgreSql,
            [
                r#"SELECT * FROM accounts WHERE "AccountId" < :_splitquery_end"#,
                r#"SELECT * FROM accounts WHERE "AccountId" >= :_splitquery_start"#,
            ],
        ),
    ];
    for (table, dialect, expected) in cases {
        let splitter = QuerySplitter::with_options(
            SplitRequest::new(format!("SELECT * FROM {table}"), 2),
            &catalog,
            SplitOptions::default().with_dialect(dialect),
        )
        .unwrap();
        let splits = splitter.split(ScalarType::Int64, Some(&min_max)).unwrap();
        let sql: Vec<&str> = splits.iter().map(|s| s.sql.as_str()).collect();
        assert_eq!(sql, expected, "{dialect}");
    }
}
