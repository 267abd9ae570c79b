use crate::{
    config::PagingConfig,
    db::{
        access::FieldAccessor,
        cursor::{Cursor, CursorCodec, CursorDecodeError, CursorError, CursorToken},
        executor::{KeysetExecutor, OffsetExecutor, OrderingPolicy, Paginator},
        order::{OrderDirection, SortSpec},
        predicate::Predicate,
        request::{KeysetPageRequest, OffsetPageRequest, PageQuery},
        source::{MemorySource, Queryable},
    },
    error::{ErrorClass, PageError, PreconditionViolation, ValidationError},
    test_fixtures::{Release, id, name, name_year_id_spec, three_releases, year},
    value::Value,
};
use std::convert::Infallible;
use thiserror::Error as ThisError;

///
/// BackendDown
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[error("backend unavailable")]
struct BackendDown;

///
/// FailingSource
///

struct FailingSource;

impl Queryable<Release> for FailingSource {
    type Error = BackendDown;

    fn filter(self, _: Predicate<Release>) -> Self {
        self
    }

    fn order_by(self, _: &SortSpec<Release>) -> Self {
        self
    }

    fn skip(self, _: usize) -> Self {
        self
    }

    fn take(self, _: usize) -> Self {
        self
    }

    fn count(&self) -> Result<u64, BackendDown> {
        Err(BackendDown)
    }

    fn fetch(self) -> Result<Vec<Release>, BackendDown> {
        Err(BackendDown)
    }

    fn project(self, _: &[FieldAccessor<Release>]) -> Result<Vec<Vec<Value>>, BackendDown> {
        Err(BackendDown)
    }
}

fn names(rows: &[Release]) -> Vec<&str> {
    rows.iter().map(|row| row.name.as_str()).collect()
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

// ---- keyset --------------------------------------------------------------

#[test]
fn three_row_walk_with_raw_cursors() {
    let executor = KeysetExecutor::default();
    let spec = name_year_id_spec();
    let source = MemorySource::new(three_releases());

    let page1 = executor
        .execute(source.clone(), &spec, &KeysetPageRequest::first(1))
        .expect("page 1");
    assert_eq!(names(&page1.items), vec!["A"]);
    assert!(page1.has_next);
    assert_eq!(
        page1.next_cursor,
        Some(Cursor::new(vec![text("A"), Value::Int64(2022), Value::Int64(1)]))
    );

    let page2 = executor
        .execute(
            source.clone(),
            &spec,
            &KeysetPageRequest::after(1, page1.next_cursor.expect("cursor")),
        )
        .expect("page 2");
    assert_eq!(names(&page2.items), vec!["B"]);
    assert!(page2.has_next);
    assert_eq!(
        page2.next_cursor,
        Some(Cursor::new(vec![text("B"), Value::Int64(2024), Value::Int64(2)]))
    );

    let page3 = executor
        .execute(
            source,
            &spec,
            &KeysetPageRequest::after(1, page2.next_cursor.expect("cursor")),
        )
        .expect("page 3");
    assert_eq!(names(&page3.items), vec!["C"]);
    assert!(!page3.has_next);
    assert_eq!(page3.next_cursor, None);
    assert_eq!(page3.next_token, None);
}

#[test]
fn three_row_walk_with_tokens() {
    let executor = KeysetExecutor::default();
    let spec = name_year_id_spec();
    let source = MemorySource::new(three_releases());

    let mut request = KeysetPageRequest::first(1);
    let mut seen = Vec::new();

    loop {
        let page = executor
            .execute(source.clone(), &spec, &request)
            .expect("page");
        seen.extend(page.items.iter().map(|row| row.id));

        match page.next_token {
            Some(token) => request = KeysetPageRequest::after_token(1, token),
            None => break,
        }
    }

    assert_eq!(seen, vec![1, 2, 3]);
}

#[test]
fn next_cursor_comes_from_last_returned_row() {
    let executor = KeysetExecutor::default();
    let spec = SortSpec::asc(id());
    let rows: Vec<Release> = (1..=5).map(|n| Release::new(n, "X", 2000)).collect();

    let page = executor
        .execute(MemorySource::new(rows), &spec, &KeysetPageRequest::first(2))
        .expect("page");

    assert_eq!(page.items.len(), 2);
    assert_eq!(
        page.next_cursor,
        Some(Cursor::new(vec![Value::Int64(2)]))
    );
    let token = page.next_token.expect("token");
    let decoded = CursorCodec::default()
        .decode(Some(token.as_str()))
        .expect("decode")
        .expect("cursor");
    assert_eq!(decoded.values, vec![Value::Int32(2)]);
}

#[test]
fn exact_fit_page_has_no_successor() {
    let executor = KeysetExecutor::default();

    let page = executor
        .execute(
            MemorySource::new(three_releases()),
            &name_year_id_spec(),
            &KeysetPageRequest::first(3),
        )
        .expect("page");

    assert_eq!(page.items.len(), 3);
    assert!(!page.has_next);
    assert_eq!(page.next_cursor, None);
}

#[test]
fn zero_size_is_a_precondition_violation() {
    let source = MemorySource::new(three_releases());
    let counter = source.query_counter();

    let err = KeysetExecutor::default()
        .execute(source, &name_year_id_spec(), &KeysetPageRequest::first(0))
        .unwrap_err();

    assert!(matches!(
        err,
        PageError::Precondition(PreconditionViolation::NonPositivePageSize)
    ));
    assert_eq!(err.class(), ErrorClass::PreconditionViolation);
    assert_eq!(counter.get(), 0);
}

#[test]
fn oversize_page_is_a_validation_error() {
    let config = PagingConfig {
        max_page_size: 10,
        ..PagingConfig::default()
    };
    let source = MemorySource::new(three_releases());
    let counter = source.query_counter();

    let err = KeysetExecutor::new(config)
        .execute(source, &name_year_id_spec(), &KeysetPageRequest::first(11))
        .unwrap_err();

    assert!(matches!(
        err,
        PageError::Validation(ValidationError::PageSizeOutOfRange {
            size: 11,
            min: 1,
            max: 10
        })
    ));
    assert!(err.is_client_error());
    assert_eq!(counter.get(), 0);
}

#[test]
fn malformed_token_is_rejected_before_any_query() {
    let source = MemorySource::new(three_releases());
    let counter = source.query_counter();

    let err = KeysetExecutor::default()
        .execute(
            source,
            &name_year_id_spec(),
            &KeysetPageRequest::after_token(1, CursorToken::new("%%%")),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        PageError::MalformedCursor(CursorError::Decode(CursorDecodeError::InvalidBase64(_)))
    ));
    assert_eq!(err.class(), ErrorClass::MalformedCursor);
    assert_eq!(counter.get(), 0);
}

#[test]
fn token_arity_mismatch_is_a_malformed_cursor() {
    let codec = CursorCodec::default();
    let token = codec
        .encode(&Cursor::new(vec![text("B")]))
        .expect("encode");

    let err = KeysetExecutor::default()
        .execute(
            MemorySource::new(three_releases()),
            &name_year_id_spec(),
            &KeysetPageRequest::after_token(1, token),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        PageError::MalformedCursor(CursorError::Decode(CursorDecodeError::ArityMismatch {
            expected: 3,
            found: 1
        }))
    ));
}

#[test]
fn raw_cursor_arity_mismatch_is_a_precondition_violation() {
    let source = MemorySource::new(three_releases());
    let counter = source.query_counter();

    let err = KeysetExecutor::default()
        .execute(
            source,
            &name_year_id_spec(),
            &KeysetPageRequest::after(1, Cursor::new(vec![text("B")])),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        PageError::Precondition(PreconditionViolation::CursorArityMismatch {
            expected: 3,
            found: 1
        })
    ));
    assert!(!err.is_client_error());
    assert_eq!(counter.get(), 0);
}

#[test]
fn data_source_errors_pass_through_unmodified() {
    let err = KeysetExecutor::default()
        .execute(FailingSource, &name_year_id_spec(), &KeysetPageRequest::first(2))
        .unwrap_err();

    assert_eq!(err.data_source(), Some(&BackendDown));
    assert_eq!(err.class(), ErrorClass::DataSource);
    assert_eq!(err.display_with_class(), "data_source: data source failure: backend unavailable");
}

// ---- offset --------------------------------------------------------------

#[test]
fn offset_scenario_matches_expected_window() {
    let rows: Vec<Release> = (1..=10).map(|n| Release::new(n, "X", 2000)).collect();
    let request = OffsetPageRequest::new(2, 3, &PagingConfig::default()).expect("request");

    let page = OffsetExecutor
        .execute(MemorySource::new(rows), &SortSpec::asc(id()), &request)
        .expect("page");

    assert_eq!(
        page.items.iter().map(|row| row.id).collect::<Vec<_>>(),
        vec![4, 5, 6]
    );
    assert_eq!(page.total_count, 10);
    assert_eq!(page.total_pages, 4);
    assert!(page.has_previous_page);
    assert!(page.has_next_page);
}

#[test]
fn offset_count_failure_passes_through() {
    let request = OffsetPageRequest::new(1, 3, &PagingConfig::default()).expect("request");

    let err = OffsetExecutor
        .execute(FailingSource, &SortSpec::asc(id()), &request)
        .unwrap_err();

    assert!(matches!(err, PageError::DataSource(BackendDown)));
}

// ---- paginator -----------------------------------------------------------

fn release_paginator() -> Paginator<Release> {
    let policy = OrderingPolicy::new(SortSpec::asc(name()))
        .with_allow_list(vec![name(), year(), id()])
        .with_tie_breaker(id(), OrderDirection::Desc);

    Paginator::new(PagingConfig::default(), policy)
}

#[test]
fn paginator_resolves_client_ordering_and_tie_breaker() {
    let paginator = release_paginator();

    let spec = paginator.policy().resolve(Some("year desc")).expect("resolve");
    assert_eq!(spec.to_string(), "year desc, id desc");

    let fallback = paginator.policy().resolve(None).expect("resolve");
    assert_eq!(fallback.to_string(), "name asc, id desc");
}

#[test]
fn paginator_walks_pages_from_client_queries() {
    let paginator = release_paginator();
    let source = MemorySource::new(three_releases());

    let first = paginator
        .keyset(
            source.clone(),
            PageQuery {
                size: Some(2),
                order_by: Some("year desc".to_string()),
                ..PageQuery::default()
            },
        )
        .expect("page 1");
    assert_eq!(names(&first.items), vec!["B", "C"]);

    let second = paginator
        .keyset(
            source,
            PageQuery {
                size: Some(2),
                order_by: Some("year desc".to_string()),
                search_after_token: first.next_token.map(CursorToken::into_string),
                ..PageQuery::default()
            },
        )
        .expect("page 2");
    assert_eq!(names(&second.items), vec!["A"]);
    assert!(!second.has_next);
}

#[test]
fn paginator_rejects_disallowed_ordering_before_any_query() {
    let paginator = release_paginator();
    let source = MemorySource::new(three_releases());
    let counter = source.query_counter();

    let err = paginator
        .keyset(
            source,
            PageQuery {
                order_by: Some("rating desc".to_string()),
                ..PageQuery::default()
            },
        )
        .unwrap_err();

    assert!(matches!(
        err,
        PageError::Validation(ValidationError::DisallowedOrderField { ref field, .. }) if field == "rating"
    ));
    assert_eq!(counter.get(), 0);
}

#[test]
fn paginator_offset_applies_default_size() {
    let paginator = release_paginator();

    let page = paginator
        .offset(MemorySource::new(three_releases()), 1, None, Some("id"))
        .expect("page");

    assert_eq!(page.total_count, 3);
    assert_eq!(page.total_pages, 1);
    assert_eq!(
        page.items.iter().map(|row| row.id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn paginator_offset_rejects_page_zero() {
    let err: PageError<Infallible> = release_paginator()
        .offset(MemorySource::new(three_releases()), 0, Some(5), None)
        .unwrap_err();

    assert!(matches!(
        err,
        PageError::Validation(ValidationError::PageNumberOutOfRange { page: 0 })
    ));
}
