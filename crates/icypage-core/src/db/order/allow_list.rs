//! Allow-list validation of client-supplied ordering strings.
//!
//! This is the only path from free text to a `SortSpec`: every field named by
//! the client is matched either against an explicit allow-list of accessors or
//! against the addressable field paths of the row model.

use crate::{
    db::{
        access::{AccessorCache, AccessorError, FieldAccessor},
        order::{OrderClause, SortColumn, SortSpec, parse_ordering},
    },
    error::ValidationError,
    model::normalize_field_path,
    obs::sink::{self, MetricsEvent},
    traits::RowKind,
};

/// Parse `text` and check every clause's field.
///
/// With an allow-list, each field must match one of its accessors; without
/// one, it must be an addressable field path of `R`. The first violation is
/// returned and nothing is partially applied.
pub fn validate_ordering<R: RowKind>(
    text: &str,
    allow_list: Option<&[FieldAccessor<R>]>,
) -> Result<Vec<OrderClause>, ValidationError> {
    let result = parse_ordering(text).and_then(|clauses| {
        for clause in &clauses {
            check_clause(clause, allow_list)?;
        }

        Ok(clauses)
    });

    if let Err(err) = &result {
        reject::<R>(err);
    }

    result
}

/// Validate `text` and map it to trusted accessors.
///
/// Returns `Ok(None)` when `text` holds no clauses.
pub fn resolve_ordering<R: RowKind>(
    text: &str,
    allow_list: Option<&[FieldAccessor<R>]>,
) -> Result<Option<SortSpec<R>>, ValidationError> {
    let clauses = validate_ordering(text, allow_list)?;
    if clauses.is_empty() {
        return Ok(None);
    }

    let result = clauses
        .iter()
        .try_fold(
            Vec::with_capacity(clauses.len()),
            |mut columns: Vec<SortColumn<R>>, clause| -> Result<_, ValidationError> {
                let field = resolve_clause(clause, allow_list)?;
                if columns.iter().any(|column| column.field == field) {
                    return Err(ValidationError::DuplicateOrderField {
                        field: clause.field.clone(),
                    });
                }

                columns.push(SortColumn::new(field, clause.direction));
                Ok(columns)
            },
        );

    match result {
        Ok(columns) => Ok(Some(SortSpec { columns })),
        Err(err) => {
            reject::<R>(&err);
            Err(err)
        }
    }
}

// Map one validated clause to its trusted accessor.
fn resolve_clause<R: RowKind>(
    clause: &OrderClause,
    allow_list: Option<&[FieldAccessor<R>]>,
) -> Result<FieldAccessor<R>, ValidationError> {
    match allow_list {
        Some(allowed) => find_allowed(allowed, &clause.field)
            .cloned()
            .ok_or_else(|| disallowed(clause)),
        None => FieldAccessor::compiled(&clause.field).map_err(|err| match err {
            AccessorError::UnknownField { .. } => unknown(clause),
        }),
    }
}

fn check_clause<R: RowKind>(
    clause: &OrderClause,
    allow_list: Option<&[FieldAccessor<R>]>,
) -> Result<(), ValidationError> {
    match allow_list {
        Some(allowed) => find_allowed(allowed, &clause.field)
            .map(|_| ())
            .ok_or_else(|| disallowed(clause)),
        None => {
            let known = AccessorCache::global().field_names::<R>();
            let wanted = normalize_field_path(&clause.field);

            if known.iter().any(|path| path.eq_ignore_ascii_case(&wanted)) {
                Ok(())
            } else {
                Err(unknown(clause))
            }
        }
    }
}

fn find_allowed<'a, R>(
    allowed: &'a [FieldAccessor<R>],
    field: &str,
) -> Option<&'a FieldAccessor<R>> {
    let wanted = normalize_field_path(field);

    allowed
        .iter()
        .find(|accessor| normalize_field_path(accessor.name()).eq_ignore_ascii_case(&wanted))
}

fn disallowed(clause: &OrderClause) -> ValidationError {
    ValidationError::DisallowedOrderField {
        field: clause.field.clone(),
        clause: clause.clause.clone(),
    }
}

fn unknown(clause: &OrderClause) -> ValidationError {
    ValidationError::UnknownOrderField {
        field: clause.field.clone(),
        clause: clause.clause.clone(),
    }
}

fn reject<R: RowKind>(err: &ValidationError) {
    tracing::warn!(row = R::MODEL.path, error = %err, "rejected ordering");
    sink::record(MetricsEvent::OrderingRejected {
        row_path: R::MODEL.path,
    });
}
