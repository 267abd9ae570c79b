use crate::{
    db::{
        order::SortSpec, request::OffsetPageRequest, response::OffsetPage, source::Queryable,
    },
    error::PageError,
    obs::sink::{PageKind, Span},
    traits::RowKind,
};

///
/// OffsetExecutor
///
/// Page-number pagination: count the filtered source, then fetch one ordered
/// window. Requests are validated when the `OffsetPageRequest` is built.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct OffsetExecutor;

impl OffsetExecutor {
    pub fn execute<R, Q>(
        &self,
        source: Q,
        spec: &SortSpec<R>,
        request: &OffsetPageRequest,
    ) -> Result<OffsetPage<R>, PageError<Q::Error>>
    where
        R: RowKind,
        Q: Queryable<R>,
    {
        let mut span = Span::<R>::new(PageKind::Offset);

        let total_count = source.count().map_err(PageError::DataSource)?;
        let rows = source
            .order_by(spec)
            .skip(request.skip())
            .take(request.take())
            .fetch()
            .map_err(PageError::DataSource)?;

        let page = OffsetPage::new(rows, total_count, request);

        span.set_rows(page.items.len() as u64);
        span.set_has_next(page.has_next_page);
        tracing::debug!(
            row = R::MODEL.path,
            order = %spec,
            page = request.page(),
            size = request.size(),
            total_count,
            "offset page"
        );

        Ok(page)
    }
}
