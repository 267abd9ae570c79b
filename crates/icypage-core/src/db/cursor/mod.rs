//! Cursors: the sort-key values of a boundary row, and their opaque token.

mod codec;
mod error;


use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use codec::CursorCodec;
pub use error::{CursorDecodeError, CursorError};

///
/// Cursor
///
/// Ordered sort-key values of the last row of a page, one per ordering
/// column. Values may be `Null`.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Cursor {
    pub values: Vec<Value>,
}

impl Cursor {
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<Value>> for Cursor {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

///
/// CursorToken
///
/// Opaque, URL-safe transport form of a `Cursor`.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CursorToken(String);

impl CursorToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CursorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CursorToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}
