//! Page requests: keyset position, offset window and the wire-facing query DTO.

use crate::{
    config::PagingConfig,
    db::cursor::{Cursor, CursorToken},
    error::ValidationError,
};
use serde::{Deserialize, Serialize};

///
/// CursorPosition
///
/// Where a keyset page starts. A request carries at most one of a raw cursor
/// or a token.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum CursorPosition {
    #[default]
    First,
    After(Cursor),
    AfterToken(CursorToken),
}

///
/// KeysetPageRequest
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeysetPageRequest {
    pub size: u32,
    pub position: CursorPosition,
}

impl KeysetPageRequest {
    #[must_use]
    pub const fn first(size: u32) -> Self {
        Self {
            size,
            position: CursorPosition::First,
        }
    }

    #[must_use]
    pub const fn after(size: u32, cursor: Cursor) -> Self {
        Self {
            size,
            position: CursorPosition::After(cursor),
        }
    }

    #[must_use]
    pub const fn after_token(size: u32, token: CursorToken) -> Self {
        Self {
            size,
            position: CursorPosition::AfterToken(token),
        }
    }
}

///
/// OffsetPageRequest
///
/// 1-based page number and page size, validated at construction.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OffsetPageRequest {
    page: u32,
    size: u32,
}

impl OffsetPageRequest {
    pub const fn new(page: u32, size: u32, config: &PagingConfig) -> Result<Self, ValidationError> {
        if page < 1 {
            return Err(ValidationError::PageNumberOutOfRange { page });
        }
        if size < 1 || size > config.max_offset_page_size {
            return Err(ValidationError::PageSizeOutOfRange {
                size,
                min: 1,
                max: config.max_offset_page_size,
            });
        }

        Ok(Self { page, size })
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Rows to skip: `(page - 1) * size`.
    #[must_use]
    pub const fn skip(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.size as usize)
    }

    #[must_use]
    pub const fn take(&self) -> usize {
        self.size as usize
    }
}

///
/// PageQuery
///
/// Keyset page parameters as they arrive from a client.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_after: Option<Cursor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_after_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

impl PageQuery {
    /// Build the keyset request, applying the configured default size.
    ///
    /// A blank token counts as absent. Supplying both a raw cursor and a
    /// token is rejected.
    pub fn into_request(self, config: &PagingConfig) -> Result<KeysetPageRequest, ValidationError> {
        let size = self.size.unwrap_or(config.default_page_size);
        let token = self
            .search_after_token
            .filter(|token| !token.trim().is_empty());

        let position = match (self.search_after, token) {
            (Some(_), Some(_)) => return Err(ValidationError::ConflictingCursorInputs),
            (Some(cursor), None) => CursorPosition::After(cursor),
            (None, Some(token)) => CursorPosition::AfterToken(CursorToken::new(token)),
            (None, None) => CursorPosition::First,
        };

        Ok(KeysetPageRequest { size, position })
    }
}

///
/// TESTS
///
