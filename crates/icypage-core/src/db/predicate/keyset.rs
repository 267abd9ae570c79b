use crate::{
    db::{
        order::SortSpec,
        predicate::{CompareOp, Predicate},
    },
    error::PreconditionViolation,
    value::Value,
};

/// Build the "strictly after `values`" predicate for `spec`.
///
/// For columns `c0..ck` with cursor values `v0..vk` this is
///
/// ```text
/// OR over i: (c0 == v0 AND .. AND c(i-1) == v(i-1)) AND ci >/< vi
/// ```
///
/// where the strict comparison is `>` for ascending and `<` for descending
/// columns. A single column collapses to a bare comparison, and the first
/// branch carries no equality prefix.
pub fn keyset_predicate<R>(
    spec: &SortSpec<R>,
    values: &[Value],
) -> Result<Predicate<R>, PreconditionViolation> {
    let columns = spec.columns();
    if values.len() != columns.len() {
        return Err(PreconditionViolation::CursorArityMismatch {
            expected: columns.len(),
            found: values.len(),
        });
    }

    let mut branches: Vec<Predicate<R>> = columns
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (column, value))| {
            let op = if column.direction.is_descending() {
                CompareOp::Lt
            } else {
                CompareOp::Gt
            };
            let strict = Predicate::compare(column.field.clone(), op, value.clone());

            if i == 0 {
                return strict;
            }

            let mut terms: Vec<Predicate<R>> = columns[..i]
                .iter()
                .zip(values)
                .map(|(prev, prev_value)| {
                    Predicate::compare(prev.field.clone(), CompareOp::Eq, prev_value.clone())
                })
                .collect();
            terms.push(strict);

            Predicate::And(terms)
        })
        .collect();

    if branches.len() == 1 {
        return Ok(branches.remove(0));
    }

    Ok(Predicate::Or(branches))
}
