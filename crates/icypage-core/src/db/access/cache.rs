//! Process-lifetime memoization of compiled accessors and field-name sets.

use crate::{
    model::normalize_field_path,
    obs::sink::{self, MetricsEvent},
    traits::RowKind,
};
use std::{
    any::{Any, TypeId},
    collections::{BTreeSet, HashMap},
    sync::{
        Arc, Mutex, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
};

type Slot = Arc<dyn Any + Send + Sync>;

static GLOBAL: OnceLock<AccessorCache> = OnceLock::new();

///
/// CacheKey
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct CacheKey {
    kind: TypeId,
    signature: String,
}

///
/// CacheStats
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub compilations: u64,
    pub entries: usize,
}

///
/// AccessorCache
///
/// Get-or-insert map keyed by (artifact type, signature). The map lock is
/// held only to find or insert a slot; compilation runs inside the slot's
/// `OnceLock`, so each key compiles at most once. Entries are never evicted.
///

#[derive(Default)]
pub struct AccessorCache {
    slots: Mutex<HashMap<CacheKey, Slot>>,
    hits: AtomicU64,
    misses: AtomicU64,
    compilations: AtomicU64,
}

impl AccessorCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared cache for the lifetime of the process.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    /// Return the artifact cached under `signature`, compiling it on first use.
    ///
    /// Concurrent first callers for the same key block on one compilation and
    /// all receive clones of the same `Arc`.
    pub fn get_or_compile<T, F>(&self, signature: &str, compile: F) -> Arc<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let Some(slot) = self.slot::<T>(signature) else {
            // unreachable while keys carry the artifact's TypeId
            return Arc::new(compile());
        };

        let mut compiled_here = false;
        let value = slot.get_or_init(|| {
            compiled_here = true;
            self.compilations.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(signature, "compiled accessor cache entry");

            Arc::new(compile())
        });

        // Stats are best-effort; relaxed ordering is enough.
        if compiled_here {
            self.misses.fetch_add(1, Ordering::Relaxed);
            sink::record(MetricsEvent::AccessorCompiled);
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
            sink::record(MetricsEvent::AccessorCacheHit);
        }

        Arc::clone(value)
    }

    /// Normalized, addressable field paths of `R`.
    pub fn field_names<R: RowKind>(&self) -> Arc<BTreeSet<String>> {
        let signature = format!("{}#field_names", R::MODEL.path);

        self.get_or_compile(&signature, || {
            R::MODEL
                .field_paths()
                .iter()
                .map(|path| normalize_field_path(path))
                .collect::<BTreeSet<_>>()
        })
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let entries = self
            .slots
            .lock()
            .expect("accessor cache lock poisoned")
            .len();

        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            compilations: self.compilations.load(Ordering::Relaxed),
            entries,
        }
    }

    // Find or insert the typed slot for one key.
    fn slot<T>(&self, signature: &str) -> Option<Arc<OnceLock<Arc<T>>>>
    where
        T: Send + Sync + 'static,
    {
        let key = CacheKey {
            kind: TypeId::of::<T>(),
            signature: signature.to_string(),
        };

        let slot = {
            let mut slots = self.slots.lock().expect("accessor cache lock poisoned");
            Arc::clone(
                slots
                    .entry(key)
                    .or_insert_with(|| Arc::new(OnceLock::<Arc<T>>::new()) as Slot),
            )
        };

        slot.downcast::<OnceLock<Arc<T>>>().ok()
    }
}
