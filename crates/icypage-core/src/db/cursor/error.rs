use thiserror::Error as ThisError;

///
/// CursorDecodeError
///
/// Why an incoming cursor token was rejected. Every variant is a client
/// error; no partial cursor is ever produced.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CursorDecodeError {
    #[error("cursor token exceeds max length: {len} chars (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("cursor token is not valid base64url: {0}")]
    InvalidBase64(String),

    #[error("cursor payload is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("cursor payload must be a JSON array")]
    NotAnArray,

    #[error("cursor element {index} is not a scalar")]
    NonScalarElement { index: usize },

    #[error("cursor has {found} values but the ordering has {expected} columns")]
    ArityMismatch { expected: usize, found: usize },
}

///
/// CursorError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CursorError {
    #[error("{0}")]
    Decode(#[from] CursorDecodeError),

    #[error("failed to encode cursor: {0}")]
    Encode(String),
}
