//! Row predicates: the filter vocabulary handed to data sources.
//!
//! Predicates reference fields only through `FieldAccessor`, so every field a
//! predicate touches has already been validated.

mod eval;
mod keyset;


use crate::{db::access::FieldAccessor, value::Value};
use std::{cmp::Ordering, fmt};

// re-exports
pub use eval::eval;
pub use keyset::keyset_predicate;

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    /// Whether `ordering` (row value against literal) satisfies this operator.
    #[must_use]
    pub const fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering.is_eq(),
            Self::Ne => ordering.is_ne(),
            Self::Lt => ordering.is_lt(),
            Self::Lte => ordering.is_le(),
            Self::Gt => ordering.is_gt(),
            Self::Gte => ordering.is_ge(),
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

///
/// ComparePredicate
///

pub struct ComparePredicate<R> {
    pub field: FieldAccessor<R>,
    pub op: CompareOp,
    pub value: Value,
}

impl<R> Clone for ComparePredicate<R> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            op: self.op,
            value: self.value.clone(),
        }
    }
}

impl<R> PartialEq for ComparePredicate<R> {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.op == other.op && self.value == other.value
    }
}

impl<R> Eq for ComparePredicate<R> {}

///
/// Predicate
///

pub enum Predicate<R> {
    True,
    False,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(ComparePredicate<R>),
    IsNull(FieldAccessor<R>),
}

impl<R> Predicate<R> {
    #[must_use]
    pub fn compare(field: FieldAccessor<R>, op: CompareOp, value: Value) -> Self {
        Self::Compare(ComparePredicate { field, op, value })
    }

    #[must_use]
    pub fn eq(field: FieldAccessor<R>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Eq, value.into())
    }

    #[must_use]
    pub fn lt(field: FieldAccessor<R>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lt, value.into())
    }

    #[must_use]
    pub fn gt(field: FieldAccessor<R>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gt, value.into())
    }

    #[must_use]
    pub const fn is_null(field: FieldAccessor<R>) -> Self {
        Self::IsNull(field)
    }

    #[must_use]
    pub fn and(children: Vec<Self>) -> Self {
        Self::And(children)
    }

    #[must_use]
    pub fn or(children: Vec<Self>) -> Self {
        Self::Or(children)
    }

    #[must_use]
    pub fn not(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    // Composite children are parenthesized when rendered inside another node.
    fn is_composite(&self) -> bool {
        matches!(self, Self::And(children) | Self::Or(children) if children.len() > 1)
    }
}

impl<R> Clone for Predicate<R> {
    fn clone(&self) -> Self {
        match self {
            Self::True => Self::True,
            Self::False => Self::False,
            Self::And(children) => Self::And(children.clone()),
            Self::Or(children) => Self::Or(children.clone()),
            Self::Not(inner) => Self::Not(inner.clone()),
            Self::Compare(cmp) => Self::Compare(cmp.clone()),
            Self::IsNull(field) => Self::IsNull(field.clone()),
        }
    }
}

impl<R> PartialEq for Predicate<R> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::True, Self::True) | (Self::False, Self::False) => true,
            (Self::And(a), Self::And(b)) | (Self::Or(a), Self::Or(b)) => a == b,
            (Self::Not(a), Self::Not(b)) => a == b,
            (Self::Compare(a), Self::Compare(b)) => a == b,
            (Self::IsNull(a), Self::IsNull(b)) => a == b,
            _ => false,
        }
    }
}

impl<R> Eq for Predicate<R> {}

impl<R> fmt::Display for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("TRUE"),
            Self::False => f.write_str("FALSE"),
            Self::And(children) => write_joined(f, children, " AND ", "TRUE"),
            Self::Or(children) => write_joined(f, children, " OR ", "FALSE"),
            Self::Not(inner) => {
                if inner.is_composite() {
                    write!(f, "NOT ({inner})")
                } else {
                    write!(f, "NOT {inner}")
                }
            }
            Self::Compare(cmp) => {
                write!(f, "{} {} {}", cmp.field.name(), cmp.op.symbol(), cmp.value)
            }
            Self::IsNull(field) => write!(f, "{} IS NULL", field.name()),
        }
    }
}

impl<R> fmt::Debug for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({self})")
    }
}

fn write_joined<R>(
    f: &mut fmt::Formatter<'_>,
    children: &[Predicate<R>],
    separator: &str,
    empty: &str,
) -> fmt::Result {
    if children.is_empty() {
        return f.write_str(empty);
    }

    for (index, child) in children.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        if child.is_composite() {
            write!(f, "({child})")?;
        } else {
            write!(f, "{child}")?;
        }
    }

    Ok(())
}
