//! Opaque wire-token format for cursors.
//!
//! A token is the base64url (no padding) encoding of a JSON array holding
//! the cursor values in column order. Decimals without an exact JSON number
//! form travel as `{"$dec": "<text>"}`. This module owns only the token
//! format; it carries no query semantics beyond the arity check in
//! `decode_for`.

use crate::{
    config::PagingConfig,
    db::{
        cursor::{Cursor, CursorDecodeError, CursorError, CursorToken},
        order::SortSpec,
    },
    types::Decimal,
    value::Value,
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;

///
/// CursorCodec
///
/// Encodes cursors to tokens and decodes untrusted tokens back, bounded by
/// `max_token_len`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CursorCodec {
    max_token_len: usize,
}

impl CursorCodec {
    #[must_use]
    pub const fn new(max_token_len: usize) -> Self {
        Self { max_token_len }
    }

    #[must_use]
    pub const fn from_config(config: &PagingConfig) -> Self {
        Self::new(config.max_cursor_token_len)
    }

    #[must_use]
    pub const fn max_token_len(&self) -> usize {
        self.max_token_len
    }

    /// Encode a cursor into its opaque token.
    pub fn encode(&self, cursor: &Cursor) -> Result<CursorToken, CursorError> {
        let json =
            serde_json::to_vec(&cursor.values).map_err(|err| CursorError::Encode(err.to_string()))?;

        Ok(CursorToken::new(URL_SAFE_NO_PAD.encode(json)))
    }

    /// Decode an untrusted token.
    ///
    /// Absent, empty or whitespace-only input means "first page" and yields
    /// `Ok(None)`. Any other failure rejects the whole token.
    pub fn decode(&self, token: Option<&str>) -> Result<Option<Cursor>, CursorError> {
        let Some(token) = token.map(str::trim).filter(|token| !token.is_empty()) else {
            return Ok(None);
        };

        if token.len() > self.max_token_len {
            return Err(CursorDecodeError::TooLong {
                len: token.len(),
                max: self.max_token_len,
            }
            .into());
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|err| CursorDecodeError::InvalidBase64(err.to_string()))?;
        let payload: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|err| CursorDecodeError::InvalidJson(err.to_string()))?;

        let serde_json::Value::Array(elements) = payload else {
            return Err(CursorDecodeError::NotAnArray.into());
        };

        let values = elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| decode_element(index, element))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Cursor::new(values)))
    }

    /// Decode a token and check its width against the active ordering.
    pub fn decode_for<R>(
        &self,
        token: Option<&str>,
        spec: &SortSpec<R>,
    ) -> Result<Option<Cursor>, CursorError> {
        let Some(cursor) = self.decode(token)? else {
            return Ok(None);
        };

        if cursor.len() != spec.len() {
            return Err(CursorDecodeError::ArityMismatch {
                expected: spec.len(),
                found: cursor.len(),
            }
            .into());
        }

        Ok(Some(cursor))
    }
}

impl Default for CursorCodec {
    fn default() -> Self {
        Self::from_config(&PagingConfig::default())
    }
}

// Nested arrays and objects are rejected, except the tagged decimal object;
// scalars go through the value coercion ladder.
fn decode_element(index: usize, element: serde_json::Value) -> Result<Value, CursorDecodeError> {
    let scalar = match &element {
        serde_json::Value::Array(_) => false,
        serde_json::Value::Object(map) => map.len() == 1 && map.contains_key(Decimal::WIRE_TAG),
        _ => true,
    };
    if !scalar {
        return Err(CursorDecodeError::NonScalarElement { index });
    }

    Value::deserialize(element).map_err(|err| CursorDecodeError::InvalidJson(err.to_string()))
}
