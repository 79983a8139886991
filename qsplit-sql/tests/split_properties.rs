use qsplit_plan::{END_BIND_VAR, START_BIND_VAR};
use qsplit_result::ErrorKind;
use qsplit_sql::{QuerySplit, QuerySplitter, SplitOptions, SplitRequest};
use qsplit_test_utils::{init_tracing_for_tests, sample_catalog};
use qsplit_types::{BindValue, MinMaxResult, ScalarType};
use rand::{Rng, SeedableRng, rngs::SmallRng};

fn int_bound(split: &QuerySplit, name: &str) -> Option<i64> {
    split.bind_variables.get(name).map(|value| match value {
        BindValue::Int64(v) => *v,
        other => panic!("expected Int64 bound, got {other:?}"),
    })
}

fn contains(split: &QuerySplit, value: i64) -> bool {
    let above_start = int_bound(split, START_BIND_VAR).is_none_or(|start| value >= start);
    let below_end = int_bound(split, END_BIND_VAR).is_none_or(|end| value < end);
    above_start && below_end
}

#[test]
fn every_value_lands_in_exactly_one_split() {
    init_tracing_for_tests();
    let catalog = sample_catalog();
    let mut rng = SmallRng::seed_from_u64(0x5EED_0F_5711);

    for _ in 0..200 {
        let min = rng.random_range(-1_000i64..1_000);
        let max = min + rng.random_range(0i64..5_000);
        let count = rng.random_range(1i64..16);
        let splitter =
            QuerySplitter::new(SplitRequest::new("SELECT * FROM t", count), &catalog).unwrap();

        let splits = match splitter.split(ScalarType::Int64, Some(&MinMaxResult::single(min, max)))
        {
            Ok(splits) => splits,
            Err(err) => {
                assert_eq!(err.kind(), ErrorKind::RangeTooSmall, "{min}..{max}/{count}");
                assert!((max - min) < count, "{min}..{max}/{count} should be splittable");
                continue;
            }
        };
        assert_eq!(splits.len(), count as usize, "{min}..{max}/{count}");

        // Probe past both ends: the outer splits are unbounded.
        for value in (min - 3)..=(max + 3) {
            let hits = splits.iter().filter(|s| contains(s, value)).count();
            assert_eq!(hits, 1, "value {value} in {min}..{max}/{count}");
        }
    }
}

#[test]
fn adjacent_splits_share_their_boundary() {
    init_tracing_for_tests();
    let splitter =
        QuerySplitter::new(SplitRequest::new("SELECT * FROM t", 7), &sample_catalog()).unwrap();
    let splits = splitter
        .split(ScalarType::Int64, Some(&MinMaxResult::single(-500, 12_345)))
        .unwrap();

    assert_eq!(int_bound(&splits[0], START_BIND_VAR), None);
    assert_eq!(int_bound(splits.last().unwrap(), END_BIND_VAR), None);
    for pair in splits.windows(2) {
        let end = int_bound(&pair[0], END_BIND_VAR).expect("interior end");
        let start = int_bound(&pair[1], START_BIND_VAR).expect("interior start");
        assert_eq!(end, start);
    }
}

#[test]
fn splitting_is_repeatable_and_leaves_the_session_intact() {
    init_tracing_for_tests();
    let request = SplitRequest::new("SELECT id FROM t WHERE user_id = :uid", 5)
        .with_bind_variable("uid", 42);
    let splitter = QuerySplitter::new(request.clone(), &sample_catalog()).unwrap();
    let min_max = MinMaxResult::single(1, 1_000_000);

    let first = splitter.split(ScalarType::Int64, Some(&min_max)).unwrap();
    let second = splitter.split(ScalarType::Int64, Some(&min_max)).unwrap();
    assert_eq!(first, second);

    assert_eq!(splitter.request(), &request);
    assert_eq!(
        splitter.resolved().statement().to_string(),
        "SELECT id FROM t WHERE user_id = :uid"
    );
    let single = splitter.split(ScalarType::Int64, None).unwrap();
    assert_eq!(single[0].sql, request.sql);
}

#[test]
fn caller_bind_variables_survive_in_every_split() {
    init_tracing_for_tests();
    let request = SplitRequest::new("SELECT * FROM t WHERE user_id = :uid AND name = :name", 3)
        .with_bind_variable("uid", 9)
        .with_bind_variable("name", "ann");
    let splitter = QuerySplitter::new(request, &sample_catalog()).unwrap();
    let splits = splitter
        .split(ScalarType::Int64, Some(&MinMaxResult::single(0, 90)))
        .unwrap();

    for split in &splits {
        assert_eq!(split.bind_variables.get("uid"), Some(&BindValue::Int64(9)));
        assert_eq!(
            split.bind_variables.get("name"),
            Some(&BindValue::Text("ann".into()))
        );
        assert!(split.sql.starts_with("SELECT * FROM t WHERE (user_id = :uid AND name = :name) AND ("));
    }
}

#[test]
fn reserved_bind_names_are_rejected() {
    init_tracing_for_tests();
    let request = SplitRequest::new("SELECT * FROM t WHERE id > :_splitquery_start", 2)
        .with_bind_variable(START_BIND_VAR, 3);
    let err = QuerySplitter::new(request, &sample_catalog()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn custom_bind_names() {
    init_tracing_for_tests();
    let options = SplitOptions::default().with_bind_names("lo", "hi");
    let splitter = QuerySplitter::with_options(
        SplitRequest::new("SELECT * FROM t", 2),
        &sample_catalog(),
        options,
    )
    .unwrap();
    let splits = splitter
        .split(ScalarType::Int64, Some(&MinMaxResult::single(0, 10)))
        .unwrap();
    assert_eq!(splits[0].sql, r#"SELECT * FROM t WHERE "id" < :hi"#);
    assert_eq!(splits[1].sql, r#"SELECT * FROM t WHERE "id" >= :lo"#);
    assert_eq!(splits[0].bind_variables.get("hi"), Some(&BindValue::Int64(5)));
}

#[test]
fn splits_serialize_as_plain_json() {
    init_tracing_for_tests();
    let splitter =
        QuerySplitter::new(SplitRequest::new("SELECT * FROM t", 2), &sample_catalog()).unwrap();
    let splits = splitter
        .split(ScalarType::Int64, Some(&MinMaxResult::single(0, 10)))
        .unwrap();

    let json = serde_json::to_value(&splits[0]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "sql": r#"SELECT * FROM t WHERE "id" < :_splitquery_end"#,
            "bind_variables": { "_splitquery_end": 5 },
            "row_count": 5,
        })
    );

    let back: Vec<QuerySplit> =
        serde_json::from_str(&serde_json::to_string(&splits).unwrap()).unwrap();
    assert_eq!(back, splits);
}
