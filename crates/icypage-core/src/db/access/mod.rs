//! Field accessors: the only trusted representation of "which field".
//!
//! Ordering, predicates and cursors all read rows through a `FieldAccessor`.
//! Accessors are either declared in code (`FieldAccessor::new`) or compiled
//! from a validated path against a row model (`FieldAccessor::compiled`).

mod cache;


use crate::{
    traits::{FieldValues, RowKind},
    value::Value,
};
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};
use thiserror::Error as ThisError;

pub use cache::{AccessorCache, CacheStats};

/// Type-erased row reader.
pub type ReadFn<R> = dyn Fn(&R) -> Value + Send + Sync;

///
/// AccessorError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum AccessorError {
    #[error("unknown field '{path}' on '{row}'")]
    UnknownField { path: String, row: &'static str },
}

///
/// FieldAccessor
///
/// Named, typed pointer to one readable field of `R`.
/// Equality and hashing use the name only.
///

pub struct FieldAccessor<R> {
    name: Arc<str>,
    read: Arc<ReadFn<R>>,
}

impl<R> FieldAccessor<R> {
    /// Declare an accessor from a name and a reader closure.
    pub fn new<F>(name: impl Into<Arc<str>>, read: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            read: Arc::new(read),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read this field off one row.
    #[must_use]
    pub fn read(&self, row: &R) -> Value {
        (self.read)(row)
    }
}

impl<R: RowKind> FieldAccessor<R> {
    /// Compile an accessor for a dotted path through the global cache.
    pub fn compiled(path: &str) -> Result<Self, AccessorError> {
        Self::compiled_in(AccessorCache::global(), path)
    }

    /// Compile an accessor for a dotted path through `cache`.
    ///
    /// The path is resolved case-insensitively; the accessor carries the
    /// canonical path as its name.
    pub fn compiled_in(cache: &AccessorCache, path: &str) -> Result<Self, AccessorError> {
        let segments = R::MODEL
            .resolve_path(path)
            .ok_or_else(|| AccessorError::UnknownField {
                path: path.to_string(),
                row: R::MODEL.path,
            })?;
        let canonical = segments.join(".");
        let signature = format!("{}::{canonical}", R::MODEL.path);

        let compiled = cache.get_or_compile(&signature, || CompiledReader::<R>::new(segments));

        Ok(Self {
            name: canonical.into(),
            read: Arc::new(move |row: &R| compiled.read(row)),
        })
    }
}

impl<R> Clone for FieldAccessor<R> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            read: Arc::clone(&self.read),
        }
    }
}

impl<R> fmt::Debug for FieldAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldAccessor").field(&self.name).finish()
    }
}

impl<R> fmt::Display for FieldAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<R> PartialEq for FieldAccessor<R> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<R> Eq for FieldAccessor<R> {}

impl<R> Hash for FieldAccessor<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

///
/// CompiledReader
///
/// Resolved path reader cached per (row type, canonical path).
/// Missing nested rows read as `Null`.
///

pub(crate) struct CompiledReader<R> {
    segments: Vec<&'static str>,
    _marker: std::marker::PhantomData<fn(&R)>,
}

impl<R: FieldValues> CompiledReader<R> {
    const fn new(segments: Vec<&'static str>) -> Self {
        Self {
            segments,
            _marker: std::marker::PhantomData,
        }
    }

    fn read(&self, row: &R) -> Value {
        let Some((field, parents)) = self.segments.split_last() else {
            return Value::Null;
        };

        let mut current: &dyn FieldValues = row;
        for parent in parents {
            match current.get_nested(parent) {
                Some(nested) => current = nested,
                None => return Value::Null,
            }
        }

        current.get_value(field).unwrap_or(Value::Null)
    }
}
