use crate::{
    model::RowModel,
    types::{Decimal, Float64},
    value::Value,
};

///
/// FieldValue
///
/// Conversion of one Rust field into a runtime `Value`.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;
}

impl FieldValue for &str {
    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FieldValue for Decimal {
    fn to_value(&self) -> Value {
        Value::Decimal(*self)
    }
}

impl FieldValue for Float64 {
    fn to_value(&self) -> Value {
        Value::Float64(*self)
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

macro_rules! field_value_via_from {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl FieldValue for $ty {
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

field_value_via_from!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

///
/// FieldValues
///
/// Name-addressed read access to the fields of a row.
/// `get_nested` exposes related rows so dotted paths can traverse them.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;

    fn get_nested(&self, _field: &str) -> Option<&dyn FieldValues> {
        None
    }
}

///
/// RowKind
///
/// A row type with a static runtime model. Required for anything that
/// resolves field names at runtime (compiled accessors, allow-list fallback).
///

pub trait RowKind: FieldValues + Send + Sync + 'static {
    const MODEL: &'static RowModel;
}
