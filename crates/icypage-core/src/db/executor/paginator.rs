use crate::{
    config::PagingConfig,
    db::{
        access::FieldAccessor,
        executor::{KeysetExecutor, OffsetExecutor},
        order::{OrderDirection, SortColumn, SortSpec, resolve_ordering},
        request::{OffsetPageRequest, PageQuery},
        response::{KeysetPage, OffsetPage},
        source::Queryable,
    },
    error::{PageError, ValidationError},
    traits::RowKind,
};

///
/// OrderingPolicy
///
/// How a client `orderBy` string becomes a `SortSpec`: the default ordering
/// used when none is given, an optional allow-list, and an optional unique
/// tie-breaker appended to every resolved ordering.
///

pub struct OrderingPolicy<R> {
    pub default: SortSpec<R>,
    pub allow_list: Option<Vec<FieldAccessor<R>>>,
    pub tie_breaker: Option<SortColumn<R>>,
}

impl<R: RowKind> OrderingPolicy<R> {
    #[must_use]
    pub const fn new(default: SortSpec<R>) -> Self {
        Self {
            default,
            allow_list: None,
            tie_breaker: None,
        }
    }

    #[must_use]
    pub fn with_allow_list(mut self, allow_list: Vec<FieldAccessor<R>>) -> Self {
        self.allow_list = Some(allow_list);
        self
    }

    #[must_use]
    pub fn with_tie_breaker(mut self, field: FieldAccessor<R>, direction: OrderDirection) -> Self {
        self.tie_breaker = Some(SortColumn::new(field, direction));
        self
    }

    /// Resolve a client ordering, falling back to the default.
    pub fn resolve(&self, order_by: Option<&str>) -> Result<SortSpec<R>, ValidationError> {
        let resolved = resolve_ordering(order_by.unwrap_or_default(), self.allow_list.as_deref())?;
        let spec = resolved.unwrap_or_else(|| self.default.clone());

        Ok(match &self.tie_breaker {
            Some(column) => spec.with_tie_breaker(column.field.clone(), column.direction),
            None => spec,
        })
    }
}

impl<R> Clone for OrderingPolicy<R> {
    fn clone(&self) -> Self {
        Self {
            default: self.default.clone(),
            allow_list: self.allow_list.clone(),
            tie_breaker: self.tie_breaker.clone(),
        }
    }
}

///
/// Paginator
///
/// Request-surface entry point: resolves the ordering through the policy,
/// applies configured limits, and runs the matching executor.
///

pub struct Paginator<R> {
    policy: OrderingPolicy<R>,
    keyset: KeysetExecutor,
    offset: OffsetExecutor,
}

impl<R: RowKind> Paginator<R> {
    #[must_use]
    pub const fn new(config: PagingConfig, policy: OrderingPolicy<R>) -> Self {
        Self {
            policy,
            keyset: KeysetExecutor::new(config),
            offset: OffsetExecutor,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &PagingConfig {
        self.keyset.config()
    }

    #[must_use]
    pub const fn policy(&self) -> &OrderingPolicy<R> {
        &self.policy
    }

    /// Run one keyset page for a client query.
    pub fn keyset<Q>(&self, source: Q, query: PageQuery) -> Result<KeysetPage<R>, PageError<Q::Error>>
    where
        Q: Queryable<R>,
    {
        let spec = self.policy.resolve(query.order_by.as_deref())?;
        let request = query.into_request(self.config())?;

        self.keyset.execute(source, &spec, &request)
    }

    /// Run one offset page; `size` defaults to the configured page size.
    pub fn offset<Q>(
        &self,
        source: Q,
        page: u32,
        size: Option<u32>,
        order_by: Option<&str>,
    ) -> Result<OffsetPage<R>, PageError<Q::Error>>
    where
        Q: Queryable<R>,
    {
        let spec = self.policy.resolve(order_by)?;
        let size = size.unwrap_or(self.config().default_page_size);
        let request = OffsetPageRequest::new(page, size, self.config())?;

        self.offset.execute(source, &spec, &request)
    }
}
