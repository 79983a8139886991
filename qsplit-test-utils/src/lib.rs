use std::sync::Once;

use qsplit_catalog::{MemCatalog, TableSchema};

static INIT: Once = Once::new();

/// Initialize tracing for test binaries. Safe to call multiple times.
///
/// Honours `RUST_LOG`; defaults to `warn` so test output stays quiet.
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::fmt;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

/// Catalog used across integration tests:
///
/// - `t(id)` with secondary indexes on `user_id` and `(score, name)`; column
///   `nickname` exists but is unindexed.
/// - `accounts(account_id, region)` with a composite primary key.
/// - `blobs(key)` keyed by a binary column.
/// - `heap` without a primary key.
pub fn sample_catalog() -> MemCatalog {
    let mut catalog = MemCatalog::new();
    let tables = [
        TableSchema::new("t")
            .with_primary_key(["id"])
            .with_index("by_user", ["user_id"])
            .with_index("by_score_name", ["score", "name"]),
        TableSchema::new("accounts").with_primary_key(["account_id", "region"]),
        TableSchema::new("blobs").with_primary_key(["key"]),
        TableSchema::new("heap"),
    ];
    for table in tables {
        if let Err(err) = catalog.register(table) {
            panic!("sample catalog is malformed: {err}");
        }
    }
    catalog
}

#[cfg(feature = "auto-init")]
mod auto {
    // Use ctor to run at binary init time to avoid having to call init in every test.
    use ctor::ctor;

    #[ctor]
    fn init() {
        super::init_tracing_for_tests();
    }
}
