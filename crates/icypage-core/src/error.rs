use crate::db::cursor::CursorError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// ErrorClass
///
/// Stable classification of every pagination failure.
/// `Validation` and `MalformedCursor` are client input errors, the other two
/// are not.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    Validation,
    MalformedCursor,
    PreconditionViolation,
    DataSource,
}

impl ErrorClass {
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        matches!(self, Self::Validation | Self::MalformedCursor)
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Validation => "validation",
            Self::MalformedCursor => "malformed_cursor",
            Self::PreconditionViolation => "precondition_violation",
            Self::DataSource => "data_source",
        };
        write!(f, "{label}")
    }
}

///
/// ValidationError
///
/// Client-correctable request problems. Always raised before the data source
/// is touched.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidationError {
    #[error("unknown order field '{field}' in clause '{clause}'")]
    UnknownOrderField { field: String, clause: String },

    #[error("order field '{field}' is not allowed in clause '{clause}'")]
    DisallowedOrderField { field: String, clause: String },

    #[error("order field '{field}' appears more than once")]
    DuplicateOrderField { field: String },

    #[error("invalid order direction '{token}' in clause '{clause}'; expected 'asc' or 'desc'")]
    InvalidDirection { token: String, clause: String },

    #[error("malformed order clause '{clause}'; expected '<field> [asc|desc]'")]
    MalformedClause { clause: String },

    #[error("page size {size} is out of range [{min}, {max}]")]
    PageSizeOutOfRange { size: u32, min: u32, max: u32 },

    #[error("page number must be at least 1, found {page}")]
    PageNumberOutOfRange { page: u32 },

    #[error("searchAfter and searchAfterToken are mutually exclusive")]
    ConflictingCursorInputs,
}

///
/// PreconditionViolation
///
/// Programmer errors in the calling layer; not caused by client input.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PreconditionViolation {
    #[error("sort specification must contain at least one column")]
    EmptySortSpec,

    #[error("sort specification repeats field '{field}'")]
    DuplicateSortField { field: String },

    #[error("page size must be positive")]
    NonPositivePageSize,

    #[error("cursor has {found} values but the sort specification has {expected} columns")]
    CursorArityMismatch { expected: usize, found: usize },

    #[error("next cursor could not be encoded: {reason}")]
    CursorEncode { reason: String },
}

///
/// PageError
///
/// Failure of one page request. Data-source errors pass through unmodified.
///

#[derive(Debug, ThisError)]
pub enum PageError<E>
where
    E: std::error::Error + 'static,
{
    #[error("invalid page request: {0}")]
    Validation(#[from] ValidationError),

    #[error("malformed cursor: {0}")]
    MalformedCursor(#[source] CursorError),

    #[error("precondition violated: {0}")]
    Precondition(#[from] PreconditionViolation),

    #[error("data source failure: {0}")]
    DataSource(#[source] E),
}

// Decode failures come from client tokens; an encode failure is ours.
impl<E> From<CursorError> for PageError<E>
where
    E: std::error::Error + 'static,
{
    fn from(err: CursorError) -> Self {
        match err {
            CursorError::Encode(reason) => {
                Self::Precondition(PreconditionViolation::CursorEncode { reason })
            }
            decode @ CursorError::Decode(_) => Self::MalformedCursor(decode),
        }
    }
}

impl<E> PageError<E>
where
    E: std::error::Error + 'static,
{
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) => ErrorClass::Validation,
            Self::MalformedCursor(_) => ErrorClass::MalformedCursor,
            Self::Precondition(_) => ErrorClass::PreconditionViolation,
            Self::DataSource(_) => ErrorClass::DataSource,
        }
    }

    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.class().is_client_error()
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }

    /// Borrow the underlying data-source error, if that is what failed.
    #[must_use]
    pub const fn data_source(&self) -> Option<&E> {
        match self {
            Self::DataSource(err) => Some(err),
            _ => None,
        }
    }
}

///
/// TESTS
///
