mod compare;
mod rank;
mod wire;


use crate::types::{Decimal, Float64};
use serde::{Serialize, Serializer};
use std::fmt;

// re-exports
pub use compare::{canonical_cmp, values_equal};
pub use rank::canonical_rank;

///
/// Value
///
/// Scalar read off a row and carried in cursors.
///
/// Null        → the field has no value; orderable, sorts before everything.
/// Int32/Int64 → integer tiers of the coercion ladder.
/// Decimal     → integral values beyond i64 and exact fractions.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Decimal(Decimal),
    Float64(Float64),
    Text(String),
}

impl Value {
    /// Narrow a signed integer to the smallest tier that holds it.
    #[must_use]
    pub fn from_i64_narrowed(n: i64) -> Self {
        i32::try_from(n).map_or(Self::Int64(n), Self::Int32)
    }

    /// Narrow an unsigned integer to the smallest tier that holds it.
    #[must_use]
    pub fn from_u64_narrowed(n: u64) -> Self {
        i64::try_from(n).map_or_else(|_| Self::Decimal(Decimal::from(n)), Self::from_i64_narrowed)
    }

    /// Float constructor; non-finite input reads as `Null`.
    #[must_use]
    pub fn from_f64(n: f64) -> Self {
        Float64::try_new(n).map_or(Self::Null, Self::Float64)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

// Literal rendering used by predicate display.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int32(n) => write!(f, "{n}"),
            Self::Int64(n) => write!(f, "{n}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Float64(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

// Wire form is a bare JSON scalar; see `wire` for the decode ladder.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int32(n) => serializer.serialize_i32(*n),
            Self::Int64(n) => serializer.serialize_i64(*n),
            Self::Decimal(d) => d.serialize(serializer),
            Self::Float64(x) => serializer.serialize_f64(x.get()),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

///
/// CONVERSIONS
///

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! value_from_small_int {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Self::Int32(i32::from(n))
                }
            }
        )*
    };
}

value_from_small_int!(i8, i16, i32, u8, u16);

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::from_i64_narrowed(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int64(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or_else(|_| Self::Decimal(Decimal::from(n)), Self::Int64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::from_f64(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::from_f64(n)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<Float64> for Value {
    fn from(x: Float64) -> Self {
        Self::Float64(x)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
