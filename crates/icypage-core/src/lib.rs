//! Core runtime for IcyPage: scalar values, row models, field accessors,
//! validated dynamic ordering, keyset predicates, cursor tokens, and the
//! keyset/offset page executors.
#![warn(unreachable_pub)]

extern crate self as icypage;

// public exports are one module level down
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use icypage_config as config;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No executors, caches, or codecs are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{
            access::FieldAccessor,
            cursor::{Cursor, CursorToken},
            order::{OrderDirection, SortSpec},
            request::{CursorPosition, KeysetPageRequest, OffsetPageRequest},
            response::{KeysetPage, OffsetPage},
        },
        model::RowModel,
        traits::{FieldValue, FieldValues, RowKind},
        value::Value,
    };
}
