use crate::value::Value;

///
/// Canonical Value Rank
///
/// Stable rank used for cross-family ordering.
///
/// IMPORTANT:
/// Rank order is part of cursor behavior. `Null` ranks lowest so nulls sort
/// first ascending and last descending. All numeric variants share one rank
/// and are compared by numeric value.
///
#[must_use]
pub const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int32(_) | Value::Int64(_) | Value::Decimal(_) | Value::Float64(_) => 2,
        Value::Text(_) => 3,
    }
}
