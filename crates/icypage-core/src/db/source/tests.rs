use crate::{
    db::{
        order::SortSpec,
        predicate::Predicate,
        source::{MemorySource, Queryable},
    },
    test_fixtures::{Release, id, name, three_releases, year},
    value::Value,
};

fn ids(rows: &[Release]) -> Vec<i64> {
    rows.iter().map(|row| row.id).collect()
}

#[test]
fn builder_calls_do_not_execute() {
    let source = MemorySource::new(three_releases());
    let counter = source.query_counter();

    let _query = source
        .filter(Predicate::gt(year(), 2022_i32))
        .order_by(&SortSpec::asc(name()))
        .skip(1)
        .take(1);

    assert_eq!(counter.get(), 0);
}

#[test]
fn pipeline_applies_filter_order_skip_take() {
    let source = MemorySource::new(three_releases());
    let counter = source.query_counter();

    let rows = source
        .filter(Predicate::gt(year(), 2022_i32))
        .order_by(&SortSpec::desc(year()))
        .skip(1)
        .take(5)
        .fetch()
        .expect("fetch");

    // B(2024), C(2023) after the filter; skip B
    assert_eq!(ids(&rows), vec![3]);
    assert_eq!(counter.get(), 1);
}

#[test]
fn filters_combine_with_and() {
    let rows = MemorySource::new(three_releases())
        .filter(Predicate::gt(year(), 2021_i32))
        .filter(Predicate::lt(id(), 3_i32))
        .order_by(&SortSpec::asc(id()))
        .fetch()
        .expect("fetch");

    assert_eq!(ids(&rows), vec![1, 2]);
}

#[test]
fn count_ignores_order_and_paging() {
    let source = MemorySource::new(three_releases())
        .filter(Predicate::gt(year(), 2022_i32))
        .order_by(&SortSpec::asc(id()))
        .skip(1)
        .take(1);

    assert_eq!(source.count().expect("count"), 2);
}

#[test]
fn project_materializes_value_tuples() {
    let values = MemorySource::new(three_releases())
        .order_by(&SortSpec::desc(id()))
        .take(2)
        .project(&[id(), name()])
        .expect("project");

    assert_eq!(
        values,
        vec![
            vec![Value::Int64(3), Value::Text("C".to_string())],
            vec![Value::Int64(2), Value::Text("B".to_string())],
        ]
    );
}

#[test]
fn counter_is_shared_across_clones() {
    let source = MemorySource::new(three_releases());
    let counter = source.query_counter();

    let _ = source.clone().count().expect("count");
    let _ = source.fetch().expect("fetch");

    assert_eq!(counter.get(), 2);
}
