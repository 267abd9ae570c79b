use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    sync::Mutex,
    time::{SystemTime, UNIX_EPOCH},
};

///
/// EventState
/// Ephemeral, in-memory counters for page executions since `since_ms`.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub rows: BTreeMap<String, RowCounters>,
    pub since_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            rows: BTreeMap::new(),
            since_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Executor entrypoints
    pub keyset_pages: u64,
    pub offset_pages: u64,

    // Results
    pub rows_returned: u64,
    pub pages_with_next: u64,

    // Rejected client input
    pub cursor_rejections: u64,
    pub ordering_rejections: u64,

    // Accessor cache
    pub accessor_compilations: u64,
    pub accessor_cache_hits: u64,
}

///
/// RowCounters
/// Per row type counters, keyed by `RowModel::path`.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RowCounters {
    pub keyset_pages: u64,
    pub offset_pages: u64,
    pub rows_returned: u64,
    pub cursor_rejections: u64,
    pub ordering_rejections: u64,
}

static EVENT_STATE: Mutex<Option<EventState>> = Mutex::new(None);

/// Borrow metrics immutably.
pub(crate) fn with_state<T>(f: impl FnOnce(&EventState) -> T) -> T {
    let mut guard = EVENT_STATE.lock().expect("metrics lock poisoned");
    f(guard.get_or_insert_with(EventState::default))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<T>(f: impl FnOnce(&mut EventState) -> T) -> T {
    let mut guard = EVENT_STATE.lock().expect("metrics lock poisoned");
    f(guard.get_or_insert_with(EventState::default))
}

/// Reset all counters and restart the window.
pub fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Ephemeral runtime counters since `since_ms`.
    pub counters: Option<EventState>,
    /// Per row type counters and averages.
    pub row_counters: Vec<RowSummary>,
}

///
/// RowSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RowSummary {
    pub path: String,
    pub keyset_pages: u64,
    pub offset_pages: u64,
    pub rows_returned: u64,
    pub avg_rows_per_page: f64,
    pub cursor_rejections: u64,
    pub ordering_rejections: u64,
}

/// Build a report from the in-memory counters.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let mut row_counters: Vec<RowSummary> = snap
        .rows
        .iter()
        .map(|(path, ops)| {
            let pages = ops.keyset_pages.saturating_add(ops.offset_pages);
            let avg_rows_per_page = if pages > 0 {
                ops.rows_returned as f64 / pages as f64
            } else {
                0.0
            };

            RowSummary {
                path: path.clone(),
                keyset_pages: ops.keyset_pages,
                offset_pages: ops.offset_pages,
                rows_returned: ops.rows_returned,
                avg_rows_per_page,
                cursor_rejections: ops.cursor_rejections,
                ordering_rejections: ops.ordering_rejections,
            }
        })
        .collect();

    // busiest row types first
    row_counters.sort_by(|a, b| {
        b.rows_returned
            .cmp(&a.rows_returned)
            .then_with(|| a.path.cmp(&b.path))
    });

    EventReport {
        counters: Some(snap),
        row_counters,
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}
