//! ## Crate layout
//! - `config`: paging limits loaded from TOML.
//! - `db`: accessors, ordering, keyset predicates, cursor tokens, sources
//!   and the keyset/offset executors.
//! - `error`: validation, precondition and page errors.
//! - `model` / `traits`: the runtime row model and the traits the derives
//!   implement.
//! - `obs`: page and cache metrics.
//! - `types` / `value`: scalar values and their canonical ordering.
//!
//! `#[derive(FieldValues, RowKind)]` makes a struct addressable by field
//! path, which is all the executors need.

pub use icypage_core::{config, db, error, model, obs, traits, types, value};
pub use icypage_derive::{FieldValues, RowKind};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use icypage_core::prelude::*;
    pub use icypage_derive::{FieldValues, RowKind};
}
