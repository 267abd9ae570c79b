//! Page executors: keyset and offset pagination over any `Queryable`.

mod keyset;
mod offset;
mod paginator;

#[cfg(test)]
mod tests;

// re-exports
pub use keyset::KeysetExecutor;
pub use offset::OffsetExecutor;
pub use paginator::{OrderingPolicy, Paginator};
