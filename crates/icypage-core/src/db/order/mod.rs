//! Orderings: directions, sort columns and validated sort specifications.

mod allow_list;
mod parse;


use crate::{
    db::{access::FieldAccessor, cursor::Cursor},
    error::PreconditionViolation,
    value::canonical_cmp,
};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

// re-exports
pub use allow_list::{resolve_ordering, validate_ordering};
pub use parse::{OrderClause, parse_ordering};

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::Desc)
    }

    /// Apply this direction to an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// SortColumn
///

pub struct SortColumn<R> {
    pub field: FieldAccessor<R>,
    pub direction: OrderDirection,
}

impl<R> SortColumn<R> {
    #[must_use]
    pub const fn new(field: FieldAccessor<R>, direction: OrderDirection) -> Self {
        Self { field, direction }
    }

    #[must_use]
    pub const fn asc(field: FieldAccessor<R>) -> Self {
        Self::new(field, OrderDirection::Asc)
    }

    #[must_use]
    pub const fn desc(field: FieldAccessor<R>) -> Self {
        Self::new(field, OrderDirection::Desc)
    }
}

impl<R> Clone for SortColumn<R> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            direction: self.direction,
        }
    }
}

impl<R> fmt::Debug for SortColumn<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.name(), self.direction)
    }
}

impl<R> PartialEq for SortColumn<R> {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.direction == other.direction
    }
}

impl<R> Eq for SortColumn<R> {}

///
/// SortSpec
///
/// Non-empty, duplicate-free list of sort columns. The builders skip a field
/// that is already present; a repeated column never changes the ordering.
///

pub struct SortSpec<R> {
    columns: Vec<SortColumn<R>>,
}

impl<R> SortSpec<R> {
    /// Build a specification from explicit columns.
    pub fn new(columns: Vec<SortColumn<R>>) -> Result<Self, PreconditionViolation> {
        if columns.is_empty() {
            return Err(PreconditionViolation::EmptySortSpec);
        }

        for (index, column) in columns.iter().enumerate() {
            if columns[..index].iter().any(|prev| prev.field == column.field) {
                return Err(PreconditionViolation::DuplicateSortField {
                    field: column.field.name().to_string(),
                });
            }
        }

        Ok(Self { columns })
    }

    #[must_use]
    pub fn asc(field: FieldAccessor<R>) -> Self {
        Self {
            columns: vec![SortColumn::asc(field)],
        }
    }

    #[must_use]
    pub fn desc(field: FieldAccessor<R>) -> Self {
        Self {
            columns: vec![SortColumn::desc(field)],
        }
    }

    #[must_use]
    pub fn then_asc(self, field: FieldAccessor<R>) -> Self {
        self.then(field, OrderDirection::Asc)
    }

    #[must_use]
    pub fn then_desc(self, field: FieldAccessor<R>) -> Self {
        self.then(field, OrderDirection::Desc)
    }

    #[must_use]
    pub fn then(mut self, field: FieldAccessor<R>, direction: OrderDirection) -> Self {
        if !self.contains(field.name()) {
            self.columns.push(SortColumn::new(field, direction));
        }

        self
    }

    /// Append a unique key column so the ordering is total.
    /// No-op when the field is already part of the ordering.
    #[must_use]
    pub fn with_tie_breaker(self, field: FieldAccessor<R>, direction: OrderDirection) -> Self {
        self.then(field, direction)
    }

    #[must_use]
    pub fn columns(&self) -> &[SortColumn<R>] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column.field.name() == name)
    }

    /// Compare two rows column by column, directions applied.
    #[must_use]
    pub fn compare_rows(&self, left: &R, right: &R) -> Ordering {
        for column in &self.columns {
            let ordering = canonical_cmp(&column.field.read(left), &column.field.read(right));
            if ordering != Ordering::Equal {
                return column.direction.apply(ordering);
            }
        }

        Ordering::Equal
    }

    /// Capture the sort-key values of `row` in column order.
    #[must_use]
    pub fn cursor_for(&self, row: &R) -> Cursor {
        Cursor::new(
            self.columns
                .iter()
                .map(|column| column.field.read(row))
                .collect(),
        )
    }
}

impl<R> Clone for SortSpec<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R> fmt::Debug for SortSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.columns).finish()
    }
}

impl<R> fmt::Display for SortSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, column) in self.columns.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", column.field.name(), column.direction)?;
        }

        Ok(())
    }
}

impl<R> PartialEq for SortSpec<R> {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

impl<R> Eq for SortSpec<R> {}
