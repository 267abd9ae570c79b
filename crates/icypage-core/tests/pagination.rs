use icypage_core::{
    db::{
        access::FieldAccessor,
        cursor::{Cursor, CursorCodec},
        executor::KeysetExecutor,
        order::{OrderDirection, SortColumn, SortSpec},
        predicate::keyset_predicate,
        request::KeysetPageRequest,
        source::MemorySource,
    },
    model::{FieldKind, FieldModel, RowModel},
    traits::{FieldValue, FieldValues, RowKind},
    types::Decimal,
    value::{Value, canonical_cmp},
};
use proptest::prelude::*;
use std::cmp::Ordering;

///
/// Track
///

#[derive(Clone, Debug, PartialEq)]
struct Track {
    id: i64,
    artist: String,
    year: Option<i32>,
}

impl FieldValues for Track {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.to_value()),
            "artist" => Some(self.artist.to_value()),
            "year" => Some(self.year.to_value()),
            _ => None,
        }
    }
}

impl RowKind for Track {
    const MODEL: &'static RowModel = &RowModel {
        path: "pagination::Track",
        fields: &[
            FieldModel {
                name: "id",
                kind: FieldKind::Scalar,
                nested: None,
            },
            FieldModel {
                name: "artist",
                kind: FieldKind::Scalar,
                nested: None,
            },
            FieldModel {
                name: "year",
                kind: FieldKind::Scalar,
                nested: None,
            },
        ],
    };
}

fn artist() -> FieldAccessor<Track> {
    FieldAccessor::new("artist", |row: &Track| row.artist.to_value())
}

fn year() -> FieldAccessor<Track> {
    FieldAccessor::new("year", |row: &Track| row.year.to_value())
}

fn id() -> FieldAccessor<Track> {
    FieldAccessor::new("id", |row: &Track| row.id.to_value())
}

const fn direction(descending: bool) -> OrderDirection {
    if descending {
        OrderDirection::Desc
    } else {
        OrderDirection::Asc
    }
}

fn track(id: i64, artist: &str, year: i32) -> Track {
    Track {
        id,
        artist: artist.to_string(),
        year: Some(year),
    }
}

///
/// Quote
///

#[derive(Clone, Debug, PartialEq)]
struct Quote {
    id: i64,
    price: Decimal,
}

impl FieldValues for Quote {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.to_value()),
            "price" => Some(self.price.to_value()),
            _ => None,
        }
    }
}

impl RowKind for Quote {
    const MODEL: &'static RowModel = &RowModel {
        path: "pagination::Quote",
        fields: &[
            FieldModel {
                name: "id",
                kind: FieldKind::Scalar,
                nested: None,
            },
            FieldModel {
                name: "price",
                kind: FieldKind::Scalar,
                nested: None,
            },
        ],
    };
}

fn price() -> FieldAccessor<Quote> {
    FieldAccessor::new("price", |row: &Quote| row.price.to_value())
}

fn quote_id() -> FieldAccessor<Quote> {
    FieldAccessor::new("id", |row: &Quote| row.id.to_value())
}

fn quote(id: i64, price: &str) -> Quote {
    Quote {
        id,
        price: price.parse().expect("decimal literal"),
    }
}

// Walk every page through tokens and return the ids in page order.
fn walk(rows: Vec<Track>, spec: &SortSpec<Track>, size: u32) -> Vec<i64> {
    walk_ids(rows, spec, size, |row| row.id)
}

fn walk_ids<R>(
    rows: Vec<R>,
    spec: &SortSpec<R>,
    size: u32,
    id_of: fn(&R) -> i64,
) -> Vec<i64>
where
    R: RowKind + Clone,
{
    let executor = KeysetExecutor::default();
    let source = MemorySource::new(rows);
    let total = source.query_counter();

    let mut request = KeysetPageRequest::first(size);
    let mut seen = Vec::new();

    loop {
        let page = executor
            .execute(source.clone(), spec, &request)
            .expect("page");

        assert_eq!(page.next_cursor.is_some(), page.has_next);
        if page.has_next {
            assert_eq!(page.items.len(), size as usize);
        } else {
            assert!(page.items.len() <= size as usize);
        }
        seen.extend(page.items.iter().map(id_of));

        match page.next_token {
            Some(token) => request = KeysetPageRequest::after_token(size, token),
            None => break,
        }

        assert!(total.get() < 1_000, "pagination did not terminate");
    }

    seen
}

#[test]
fn end_to_end_three_row_scenario() {
    let rows = vec![
        track(1, "A", 2022),
        track(2, "B", 2024),
        track(3, "C", 2023),
    ];
    let spec = SortSpec::asc(artist()).then_desc(year()).then_desc(id());
    let executor = KeysetExecutor::default();
    let source = MemorySource::new(rows);

    let page1 = executor
        .execute(source.clone(), &spec, &KeysetPageRequest::first(1))
        .expect("page 1");
    assert_eq!(page1.items[0].id, 1);
    assert!(page1.has_next);

    let page2 = executor
        .execute(
            source.clone(),
            &spec,
            &KeysetPageRequest::after_token(1, page1.next_token.expect("token")),
        )
        .expect("page 2");
    assert_eq!(page2.items[0].id, 2);
    assert!(page2.has_next);

    let token = page2.next_token.expect("token");
    let boundary = CursorCodec::default()
        .decode_for(Some(token.as_str()), &spec)
        .expect("decode")
        .expect("cursor");
    assert_eq!(
        keyset_predicate(&spec, &boundary.values)
            .expect("predicate")
            .to_string(),
        r#"artist > "B" OR (artist == "B" AND year < 2024) OR (artist == "B" AND year == 2024 AND id < 2)"#
    );

    let page3 = executor
        .execute(source, &spec, &KeysetPageRequest::after_token(1, token))
        .expect("page 3");
    assert_eq!(page3.items[0].id, 3);
    assert!(!page3.has_next);
    assert_eq!(page3.next_token, None);
}

#[test]
fn nullable_column_pages_without_gaps_or_duplicates() {
    let rows = vec![
        Track {
            id: 1,
            artist: "A".to_string(),
            year: None,
        },
        track(2, "A", 2001),
        Track {
            id: 3,
            artist: "B".to_string(),
            year: None,
        },
        track(4, "B", 1999),
        track(5, "C", 2001),
    ];

    let asc = SortSpec::asc(year()).then_asc(id());
    assert_eq!(walk(rows.clone(), &asc, 2), vec![1, 3, 4, 2, 5]);

    let desc = SortSpec::desc(year()).then_asc(id());
    assert_eq!(walk(rows, &desc, 2), vec![2, 5, 4, 1, 3]);
}

#[test]
fn wide_decimal_keys_page_without_losing_rows() {
    let rows = vec![
        quote(5, "100000000000000000000"),
        quote(1, "100000000000000000001"),
    ];
    let spec = SortSpec::asc(price()).then_asc(quote_id());

    assert_eq!(walk_ids(rows.clone(), &spec, 1, |row| row.id), vec![5, 1]);

    let desc = SortSpec::desc(price()).then_asc(quote_id());
    assert_eq!(walk_ids(rows, &desc, 1, |row| row.id), vec![1, 5]);
}

#[test]
fn fractional_decimal_keys_page_in_exact_order() {
    let rows = vec![
        quote(1, "0.1000000000000000000000000002"),
        quote(2, "0.1"),
        quote(3, "0.1000000000000000000000000001"),
        quote(4, "-100000000000000000001"),
        quote(5, "0.10"),
        quote(6, "79228162514264337593543950335"),
    ];
    let spec = SortSpec::asc(price()).then_asc(quote_id());

    assert_eq!(
        walk_ids(rows, &spec, 2, |row| row.id),
        vec![4, 2, 5, 3, 1, 6]
    );
}

fn arb_decimal() -> impl Strategy<Value = Decimal> {
    let mantissa = -(1_i128 << 96) + 1..(1_i128 << 96);

    prop_oneof![
        (mantissa, 0..=28_u32).prop_map(|(mantissa, scale)| {
            Decimal::from(rust_decimal::Decimal::from_i128_with_scale(mantissa, scale))
        }),
        (i64::MAX as u64 + 1..=u64::MAX).prop_map(Decimal::from),
    ]
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::Int32),
        any::<i64>().prop_map(Value::from_i64_narrowed),
        arb_decimal().prop_map(Value::Decimal),
        any::<f64>()
            .prop_filter("finite", |x| x.is_finite())
            .prop_map(Value::from_f64),
        ".{0,12}".prop_map(Value::Text),
    ]
}

fn arb_numeric() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from_i64_narrowed),
        arb_decimal().prop_map(Value::Decimal),
        any::<f64>()
            .prop_filter("finite", |x| x.is_finite())
            .prop_map(Value::from_f64),
    ]
}

// Coarse family a value must keep across the wire.
fn family(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Int32(_) | Value::Int64(_) | Value::Decimal(_) => "exact",
        Value::Float64(_) => "float",
        Value::Text(_) => "text",
    }
}

// A few wide and fractional prices, so rows collide on the price column.
fn arb_quotes() -> impl Strategy<Value = Vec<Quote>> {
    const PRICES: [&str; 6] = [
        "100000000000000000000",
        "100000000000000000001",
        "-100000000000000000001",
        "0.1",
        "0.1000000000000000000000000001",
        "18446744073709551616",
    ];

    prop::collection::vec(0..PRICES.len(), 0..16).prop_map(|picks| {
        picks
            .into_iter()
            .enumerate()
            .map(|(index, pick)| {
                quote(i64::try_from(index).expect("small index") + 1, PRICES[pick])
            })
            .collect()
    })
}

fn arb_tracks() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(
        (0..3_usize, prop::option::of(1990..1994_i32)),
        0..24,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(index, (artist, year))| Track {
                id: i64::try_from(index).expect("small index") + 1,
                artist: ["A", "B", "C"][artist].to_string(),
                year,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn cursor_round_trip_is_value_preserving(values in prop::collection::vec(arb_scalar(), 0..8)) {
        let codec = CursorCodec::default();
        let cursor = Cursor::new(values);

        let token = codec.encode(&cursor).expect("encode");
        let decoded = codec
            .decode(Some(token.as_str()))
            .expect("decode")
            .expect("cursor");

        prop_assert_eq!(decoded.len(), cursor.len());
        for (before, after) in cursor.values.iter().zip(&decoded.values) {
            prop_assert_eq!(canonical_cmp(before, after), Ordering::Equal);
            prop_assert_eq!(family(before), family(after));
        }
    }

    #[test]
    fn paging_visits_every_row_once_in_order(
        rows in arb_tracks(),
        size in 1..6_u32,
        artist_desc in any::<bool>(),
        year_desc in any::<bool>(),
        id_desc in any::<bool>(),
    ) {
        let spec = SortSpec::new(vec![
            SortColumn::new(artist(), direction(artist_desc)),
            SortColumn::new(year(), direction(year_desc)),
            SortColumn::new(id(), direction(id_desc)),
        ])
        .expect("valid ordering");

        let mut expected = rows.clone();
        expected.sort_by(|a, b| spec.compare_rows(a, b));
        let expected: Vec<i64> = expected.iter().map(|row| row.id).collect();

        prop_assert_eq!(walk(rows, &spec, size), expected);
    }

    #[test]
    fn decimal_keyed_paging_visits_every_row_once(
        rows in arb_quotes(),
        size in 1..5_u32,
        price_desc in any::<bool>(),
    ) {
        let spec = SortSpec::new(vec![
            SortColumn::new(price(), direction(price_desc)),
            SortColumn::new(quote_id(), OrderDirection::Asc),
        ])
        .expect("valid ordering");

        let mut expected = rows.clone();
        expected.sort_by(|a, b| spec.compare_rows(a, b));
        let expected: Vec<i64> = expected.iter().map(|row| row.id).collect();

        prop_assert_eq!(walk_ids(rows, &spec, size, |row| row.id), expected);
    }

    #[test]
    fn numeric_ordering_is_transitive(
        a in arb_numeric(),
        b in arb_numeric(),
        c in arb_numeric(),
    ) {
        prop_assert_eq!(canonical_cmp(&a, &b), canonical_cmp(&b, &a).reverse());

        let mut sorted = [a, b, c];
        sorted.sort_by(canonical_cmp);
        prop_assert_ne!(canonical_cmp(&sorted[0], &sorted[1]), Ordering::Greater);
        prop_assert_ne!(canonical_cmp(&sorted[1], &sorted[2]), Ordering::Greater);
        prop_assert_ne!(canonical_cmp(&sorted[0], &sorted[2]), Ordering::Greater);
    }
}
