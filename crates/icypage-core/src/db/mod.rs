//! Pagination runtime: accessors, ordering, predicates, cursors, sources
//! and the page executors that tie them together.

pub mod access;
pub mod cursor;
pub mod executor;
pub mod order;
pub mod predicate;
pub mod request;
pub mod response;
pub mod source;

// re-exports
pub use executor::{KeysetExecutor, OffsetExecutor, OrderingPolicy, Paginator};
pub use source::{MemorySource, Queryable};
