use crate::{
    config::PagingConfig,
    db::{
        cursor::{Cursor, CursorCodec},
        order::SortSpec,
        predicate::keyset_predicate,
        request::{CursorPosition, KeysetPageRequest},
        response::KeysetPage,
        source::Queryable,
    },
    error::{PageError, PreconditionViolation, ValidationError},
    obs::sink::{self, MetricsEvent, PageKind, Span},
    traits::RowKind,
};

///
/// KeysetExecutor
///
/// Runs one keyset page: validate, filter strictly after the cursor, fetch
/// `size + 1` rows, and derive the next cursor from the last returned row.
/// Every validation happens before the data source is queried.
///

#[derive(Clone, Debug, Default)]
pub struct KeysetExecutor {
    config: PagingConfig,
    codec: CursorCodec,
}

impl KeysetExecutor {
    #[must_use]
    pub const fn new(config: PagingConfig) -> Self {
        let codec = CursorCodec::from_config(&config);

        Self { config, codec }
    }

    #[must_use]
    pub const fn config(&self) -> &PagingConfig {
        &self.config
    }

    #[must_use]
    pub const fn codec(&self) -> &CursorCodec {
        &self.codec
    }

    pub fn execute<R, Q>(
        &self,
        source: Q,
        spec: &SortSpec<R>,
        request: &KeysetPageRequest,
    ) -> Result<KeysetPage<R>, PageError<Q::Error>>
    where
        R: RowKind,
        Q: Queryable<R>,
    {
        let mut span = Span::<R>::new(PageKind::Keyset);

        let size = self.check_size(request.size)?;
        let cursor = self.resolve_position(spec, &request.position)?;

        let mut query = source.order_by(spec);
        if let Some(cursor) = &cursor {
            query = query.filter(keyset_predicate(spec, &cursor.values)?);
        }

        let mut rows = query
            .take(size.saturating_add(1))
            .fetch()
            .map_err(PageError::DataSource)?;

        let has_next = rows.len() > size;
        rows.truncate(size);

        // next cursor comes from the last returned row, never the lookahead row
        let next_cursor = if has_next {
            rows.last().map(|row| spec.cursor_for(row))
        } else {
            None
        };
        let next_token = next_cursor
            .as_ref()
            .map(|cursor| self.codec.encode(cursor))
            .transpose()?;

        span.set_rows(rows.len() as u64);
        span.set_has_next(has_next);
        tracing::debug!(
            row = R::MODEL.path,
            order = %spec,
            size,
            returned = rows.len(),
            has_next,
            "keyset page"
        );

        Ok(KeysetPage {
            items: rows,
            has_next,
            next_cursor,
            next_token,
        })
    }

    // Page size must lie in [1, max_page_size].
    fn check_size<E>(&self, size: u32) -> Result<usize, PageError<E>>
    where
        E: std::error::Error + 'static,
    {
        if size == 0 {
            return Err(PreconditionViolation::NonPositivePageSize.into());
        }
        if size > self.config.max_page_size {
            return Err(ValidationError::PageSizeOutOfRange {
                size,
                min: 1,
                max: self.config.max_page_size,
            }
            .into());
        }

        Ok(size as usize)
    }

    // Turn the request position into a cursor of the right width.
    fn resolve_position<R, E>(
        &self,
        spec: &SortSpec<R>,
        position: &CursorPosition,
    ) -> Result<Option<Cursor>, PageError<E>>
    where
        R: RowKind,
        E: std::error::Error + 'static,
    {
        match position {
            CursorPosition::First => Ok(None),

            CursorPosition::After(cursor) => {
                if cursor.len() != spec.len() {
                    return Err(PreconditionViolation::CursorArityMismatch {
                        expected: spec.len(),
                        found: cursor.len(),
                    }
                    .into());
                }

                Ok(Some(cursor.clone()))
            }

            CursorPosition::AfterToken(token) => self
                .codec
                .decode_for(Some(token.as_str()), spec)
                .map_err(|err| {
                    tracing::warn!(row = R::MODEL.path, error = %err, "rejected cursor token");
                    sink::record(MetricsEvent::CursorRejected {
                        row_path: R::MODEL.path,
                    });

                    PageError::from(err)
                }),
        }
    }
}
