mod decimal;
mod float64;

pub use decimal::Decimal;
pub(crate) use decimal::decimal_from_tagged_map;
pub use float64::Float64;
