use crate::{
    db::{
        access::FieldAccessor,
        order::SortSpec,
        predicate::{Predicate, eval},
        source::Queryable,
    },
    value::Value,
};
use std::{
    convert::Infallible,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

///
/// QueryCounter
///
/// Shared count of executed queries (`count`, `fetch`, `project`) against one
/// `MemorySource` and everything derived from it.
///

#[derive(Clone, Debug, Default)]
pub struct QueryCounter(Arc<AtomicU64>);

impl QueryCounter {
    #[must_use]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

///
/// MemorySource
///
/// In-memory `Queryable` over a shared row set.
///

pub struct MemorySource<R> {
    rows: Arc<[R]>,
    filters: Vec<Predicate<R>>,
    order: Option<SortSpec<R>>,
    skip: usize,
    take: Option<usize>,
    queries: QueryCounter,
}

impl<R: Clone> MemorySource<R> {
    #[must_use]
    pub fn new(rows: impl Into<Arc<[R]>>) -> Self {
        Self {
            rows: rows.into(),
            filters: Vec::new(),
            order: None,
            skip: 0,
            take: None,
            queries: QueryCounter::default(),
        }
    }

    /// Handle observing every query executed through this source.
    #[must_use]
    pub fn query_counter(&self) -> QueryCounter {
        self.queries.clone()
    }

    fn matching(&self) -> Vec<&R> {
        self.rows
            .iter()
            .filter(|row| self.filters.iter().all(|predicate| eval(*row, predicate)))
            .collect()
    }

    fn window(&self) -> Vec<&R> {
        let mut rows = self.matching();
        if let Some(spec) = &self.order {
            rows.sort_by(|a, b| spec.compare_rows(a, b));
        }

        rows.into_iter()
            .skip(self.skip)
            .take(self.take.unwrap_or(usize::MAX))
            .collect()
    }
}

impl<R: Clone> Clone for MemorySource<R> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            filters: self.filters.clone(),
            order: self.order.clone(),
            skip: self.skip,
            take: self.take,
            queries: self.queries.clone(),
        }
    }
}

impl<R: Clone> Queryable<R> for MemorySource<R> {
    type Error = Infallible;

    fn filter(mut self, predicate: Predicate<R>) -> Self {
        self.filters.push(predicate);
        self
    }

    fn order_by(mut self, spec: &SortSpec<R>) -> Self {
        self.order = Some(spec.clone());
        self
    }

    fn skip(mut self, count: usize) -> Self {
        self.skip = self.skip.saturating_add(count);
        self
    }

    fn take(mut self, count: usize) -> Self {
        self.take = Some(self.take.map_or(count, |current| current.min(count)));
        self
    }

    fn count(&self) -> Result<u64, Self::Error> {
        self.queries.bump();

        Ok(u64::try_from(self.matching().len()).unwrap_or(u64::MAX))
    }

    fn fetch(self) -> Result<Vec<R>, Self::Error> {
        self.queries.bump();

        Ok(self.window().into_iter().cloned().collect())
    }

    fn project(self, fields: &[FieldAccessor<R>]) -> Result<Vec<Vec<Value>>, Self::Error> {
        self.queries.bump();

        Ok(self
            .window()
            .into_iter()
            .map(|row| fields.iter().map(|field| field.read(row)).collect())
            .collect())
    }
}
