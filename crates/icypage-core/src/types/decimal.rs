use derive_more::{Display, FromStr};
use rust_decimal::{
    Decimal as WrappedDecimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
};
use std::fmt;

///
/// Decimal
///
/// Arbitrary-precision tier of the value ladder. Integral values outside the
/// 64-bit ranges and exact fractions land here.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd)]
pub struct Decimal(WrappedDecimal);

impl Decimal {
    /// Key of the single-entry object carrying a decimal that has no exact
    /// JSON number form: `{"$dec": "<decimal text>"}`.
    pub const WIRE_TAG: &'static str = "$dec";

    #[must_use]
    /// Construct a decimal from mantissa and scale.
    pub fn new(num: i64, scale: u32) -> Self {
        Self(WrappedDecimal::new(num, scale))
    }

    /// Returns true if the decimal has no fractional component.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.fract().is_zero()
    }

    /// Exact signed conversion; `None` when fractional or out of range.
    #[must_use]
    pub fn to_i64_exact(&self) -> Option<i64> {
        if self.is_integer() {
            self.0.to_i64()
        } else {
            None
        }
    }

    /// Exact unsigned conversion; `None` when fractional or out of range.
    #[must_use]
    pub fn to_u64_exact(&self) -> Option<u64> {
        if self.is_integer() {
            self.0.to_u64()
        } else {
            None
        }
    }

    /// Nearest float of the normalized value.
    #[must_use]
    pub fn to_f64_lossy(&self) -> f64 {
        self.0.normalize().to_f64().unwrap_or(0.0)
    }

    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        WrappedDecimal::from_f64(value).map(Self)
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Self {
        Self(WrappedDecimal::from(n))
    }
}

impl From<u64> for Decimal {
    fn from(n: u64) -> Self {
        Self(WrappedDecimal::from(n))
    }
}

impl From<WrappedDecimal> for Decimal {
    fn from(d: WrappedDecimal) -> Self {
        Self(d)
    }
}

// Wire form: a bare JSON integer when the value is integral and fits 64 bits,
// otherwise the exact decimal text under `WIRE_TAG`. JSON numbers beyond
// 64 bits would be read back as floats.
impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(n) = self.to_i64_exact() {
            serializer.serialize_i64(n)
        } else if let Some(n) = self.to_u64_exact() {
            serializer.serialize_u64(n)
        } else {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry(Self::WIRE_TAG, &self.0.to_string())?;
            map.end()
        }
    }
}

/// Read the body of a `{"$dec": "..."}` object.
pub(crate) fn decimal_from_tagged_map<'de, A: MapAccess<'de>>(
    mut map: A,
) -> Result<Decimal, A::Error> {
    let Some(key) = map.next_key::<String>()? else {
        return Err(de::Error::custom(format!(
            "expected a '{}' decimal object",
            Decimal::WIRE_TAG
        )));
    };
    if key != Decimal::WIRE_TAG {
        return Err(de::Error::custom(format!("unexpected decimal object key '{key}'")));
    }

    let text: String = map.next_value()?;
    if map.next_key::<String>()?.is_some() {
        return Err(de::Error::custom("decimal object must have exactly one entry"));
    }

    text.parse()
        .map_err(|_| de::Error::custom(format!("invalid decimal string: '{text}'")))
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DecimalVisitor;

        impl<'de> Visitor<'de> for DecimalVisitor {
            type Value = Decimal;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal number or numeric string")
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Decimal, E> {
                Ok(Decimal::from(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Decimal, E> {
                Ok(Decimal::from(v))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Decimal, E> {
                Decimal::from_f64(v)
                    .ok_or_else(|| E::custom(format!("decimal out of range: {v}")))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Decimal, E> {
                v.parse()
                    .map_err(|_| E::custom(format!("invalid decimal string: '{v}'")))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Decimal, A::Error> {
                decimal_from_tagged_map(map)
            }
        }

        deserializer.deserialize_any(DecimalVisitor)
    }
}

///
/// TESTS
///
