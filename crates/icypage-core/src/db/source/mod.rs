//! Data-source contract consumed by the page executors.

mod memory;

#[cfg(test)]
mod tests;

use crate::{
    db::{access::FieldAccessor, order::SortSpec, predicate::Predicate},
    value::Value,
};

// re-exports
pub use memory::{MemorySource, QueryCounter};

///
/// Queryable
///
/// Composable, lazily evaluated query over rows of `R`.
///
/// Builder calls (`filter`, `order_by`, `skip`, `take`) only describe the
/// query; `count`, `fetch` and `project` execute it. Filters combine with AND.
/// Execution applies filter, then order, then skip, then take.
/// Implementations own cancellation and deadlines.
///

pub trait Queryable<R>: Sized {
    type Error: std::error::Error + Send + Sync + 'static;

    #[must_use]
    fn filter(self, predicate: Predicate<R>) -> Self;

    #[must_use]
    fn order_by(self, spec: &SortSpec<R>) -> Self;

    #[must_use]
    fn skip(self, count: usize) -> Self;

    #[must_use]
    fn take(self, count: usize) -> Self;

    /// Count rows matching the filters, ignoring order, skip and take.
    fn count(&self) -> Result<u64, Self::Error>;

    /// Materialize the described rows.
    fn fetch(self) -> Result<Vec<R>, Self::Error>;

    /// Materialize the described rows as value tuples, one per accessor.
    fn project(self, fields: &[FieldAccessor<R>]) -> Result<Vec<Vec<Value>>, Self::Error>;
}
