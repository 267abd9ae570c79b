use crate::{
    db::predicate::{ComparePredicate, Predicate},
    value::canonical_cmp,
};

///
/// Evaluate a predicate against a single row.
///
/// Pure runtime evaluation with the canonical comparator: `Null` is an
/// ordinary value that sorts first, and `null == null` holds.
/// An empty `And` is true, an empty `Or` is false.
///
#[must_use]
pub fn eval<R>(row: &R, predicate: &Predicate<R>) -> bool {
    match predicate {
        Predicate::True => true,
        Predicate::False => false,

        Predicate::And(children) => children.iter().all(|child| eval(row, child)),
        Predicate::Or(children) => children.iter().any(|child| eval(row, child)),
        Predicate::Not(inner) => !eval(row, inner),

        Predicate::Compare(cmp) => eval_compare(row, cmp),
        Predicate::IsNull(field) => field.read(row).is_null(),
    }
}

fn eval_compare<R>(row: &R, cmp: &ComparePredicate<R>) -> bool {
    let actual = cmp.field.read(row);

    cmp.op.accepts(canonical_cmp(&actual, &cmp.value))
}
