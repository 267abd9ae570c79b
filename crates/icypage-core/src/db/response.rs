//! Page responses.

use crate::db::{
    cursor::{Cursor, CursorToken},
    request::OffsetPageRequest,
};
use serde::{Deserialize, Serialize};

///
/// KeysetPage
///
/// One keyset page. `next_cursor` is present exactly when `has_next` is set,
/// and a page with a successor always holds the full requested size.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct KeysetPage<T> {
    pub items: Vec<T>,

    #[serde(rename = "hasNextPage")]
    pub has_next: bool,

    #[serde(
        rename = "lastCursor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_cursor: Option<Cursor>,

    #[serde(
        rename = "cursorToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_token: Option<CursorToken>,
}

impl<T> KeysetPage<T> {
    /// Final page: no successor.
    #[must_use]
    pub const fn last(items: Vec<T>) -> Self {
        Self {
            items,
            has_next: false,
            next_cursor: None,
            next_token: None,
        }
    }

    /// Project every row, leaving the cursor state untouched.
    #[must_use]
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> KeysetPage<U> {
        KeysetPage {
            items: self.items.into_iter().map(f).collect(),
            has_next: self.has_next,
            next_cursor: self.next_cursor,
            next_token: self.next_token,
        }
    }
}

///
/// OffsetPage
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetPage<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> OffsetPage<T> {
    /// Assemble a page and derive its navigation flags from `total_count`.
    #[must_use]
    pub fn new(items: Vec<T>, total_count: u64, request: &OffsetPageRequest) -> Self {
        let total_pages = total_count.div_ceil(u64::from(request.size()));
        let page = u64::from(request.page());

        Self {
            items,
            total_count,
            total_pages,
            has_previous_page: page > 1,
            has_next_page: page < total_pages,
        }
    }

    #[must_use]
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> OffsetPage<U> {
        OffsetPage {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_pages: self.total_pages,
            has_previous_page: self.has_previous_page,
            has_next_page: self.has_next_page,
        }
    }
}

///
/// TESTS
///
