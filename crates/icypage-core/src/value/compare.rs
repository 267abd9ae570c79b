use crate::{
    types::{Decimal, Float64},
    value::Value,
};
use std::cmp::Ordering;

/// Total canonical comparator shared by ordering, predicates and cursors.
///
/// Ordering rules:
/// 1. Canonical family rank (`Null < Bool < numeric < Text`)
/// 2. Family-specific comparison for same-ranked values
///
/// Numeric variants compare by value, so a cursor value narrowed to `Int32`
/// still equals the `Int64` it was read from.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.canonical_rank_cmp(right);
    if rank != Ordering::Equal {
        return rank;
    }

    canonical_cmp_same_rank(left, right)
}

/// Equality under canonical comparison (not structural equality).
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    canonical_cmp(left, right) == Ordering::Equal
}

impl Value {
    fn canonical_rank_cmp(&self, other: &Self) -> Ordering {
        super::canonical_rank(self).cmp(&super::canonical_rank(other))
    }
}

fn canonical_cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => compare_ordinal(a, b),
        (Value::Null, Value::Null) => Ordering::Equal,
        _ => compare_numeric(left, right),
    }
}

// Explicit three-way ordinal comparison for text; byte order, no collation.
fn compare_ordinal(left: &str, right: &str) -> Ordering {
    left.as_bytes().cmp(right.as_bytes())
}

///
/// NumericKey
///
/// Total ordering key for numbers. Integers and decimals key on their exact
/// value. A float keys on its decimal value (`Decimal::from_f64`, so `0.1`
/// meets the decimal `0.1`) and then on itself; floats outside the decimal
/// range sort beyond every decimal. Exact values carry their nearest float
/// as the second component, so equal keys always mean equal values.
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
enum NumericKey {
    Below(Float64),
    Exact(Decimal, Float64),
    Above(Float64),
}

fn exact_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Int32(n) => Some(Decimal::from(i64::from(*n))),
        Value::Int64(n) => Some(Decimal::from(*n)),
        Value::Decimal(d) => Some(*d),
        _ => None,
    }
}

fn numeric_key(value: &Value) -> Option<NumericKey> {
    if let Value::Float64(x) = value {
        return Some(match Decimal::from_f64(x.get()) {
            Some(d) => NumericKey::Exact(d, *x),
            None if x.get() < 0.0 => NumericKey::Below(*x),
            None => NumericKey::Above(*x),
        });
    }

    let d = exact_value(value)?;
    let nearest = Float64::try_new(d.to_f64_lossy()).unwrap_or_default();

    Some(NumericKey::Exact(d, nearest))
}

// Integers and decimals compare exactly; anything involving a float goes
// through `NumericKey`, which keeps the order total and transitive.
fn compare_numeric(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Int32(a), Value::Int32(b)) => a.cmp(b),
        (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
        (Value::Float64(_), _) | (_, Value::Float64(_)) => {
            numeric_key(left).cmp(&numeric_key(right))
        }
        _ => exact_value(left).cmp(&exact_value(right)),
    }
}
