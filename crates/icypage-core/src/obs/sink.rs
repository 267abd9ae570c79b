//! Metrics sink boundary.
//!
//! Pagination code MUST NOT touch `obs::metrics` directly.
//! All instrumentation flows through `MetricsEvent` and `MetricsSink`.
use crate::{obs::metrics, traits::RowKind};
use std::{cell::RefCell, marker::PhantomData, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// PageKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PageKind {
    Keyset,
    Offset,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    PageStart {
        kind: PageKind,
        row_path: &'static str,
    },
    PageFinish {
        kind: PageKind,
        row_path: &'static str,
        rows_returned: u64,
        has_next: bool,
    },
    CursorRejected {
        row_path: &'static str,
    },
    OrderingRejected {
        row_path: &'static str,
    },
    AccessorCompiled,
    AccessorCacheHit,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

///
/// GlobalMetricsSink
/// Default process-wide sink; used when no scoped override is installed.
///

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::PageStart { kind, row_path } => {
                metrics::with_state_mut(|m| {
                    let entry = m.rows.entry(row_path.to_string()).or_default();
                    match kind {
                        PageKind::Keyset => {
                            m.ops.keyset_pages = m.ops.keyset_pages.saturating_add(1);
                            entry.keyset_pages = entry.keyset_pages.saturating_add(1);
                        }
                        PageKind::Offset => {
                            m.ops.offset_pages = m.ops.offset_pages.saturating_add(1);
                            entry.offset_pages = entry.offset_pages.saturating_add(1);
                        }
                    }
                });
            }

            MetricsEvent::PageFinish {
                row_path,
                rows_returned,
                has_next,
                ..
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_returned = m.ops.rows_returned.saturating_add(rows_returned);
                    if has_next {
                        m.ops.pages_with_next = m.ops.pages_with_next.saturating_add(1);
                    }

                    let entry = m.rows.entry(row_path.to_string()).or_default();
                    entry.rows_returned = entry.rows_returned.saturating_add(rows_returned);
                });
            }

            MetricsEvent::CursorRejected { row_path } => {
                metrics::with_state_mut(|m| {
                    m.ops.cursor_rejections = m.ops.cursor_rejections.saturating_add(1);
                    let entry = m.rows.entry(row_path.to_string()).or_default();
                    entry.cursor_rejections = entry.cursor_rejections.saturating_add(1);
                });
            }

            MetricsEvent::OrderingRejected { row_path } => {
                metrics::with_state_mut(|m| {
                    m.ops.ordering_rejections = m.ops.ordering_rejections.saturating_add(1);
                    let entry = m.rows.entry(row_path.to_string()).or_default();
                    entry.ordering_rejections = entry.ordering_rejections.saturating_add(1);
                });
            }

            MetricsEvent::AccessorCompiled => {
                metrics::with_state_mut(|m| {
                    m.ops.accessor_compilations = m.ops.accessor_compilations.saturating_add(1);
                });
            }

            MetricsEvent::AccessorCacheHit => {
                metrics::with_state_mut(|m| {
                    m.ops.accessor_cache_hits = m.ops.accessor_cache_hits.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match override_sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with `sink` receiving every event recorded on this thread.
///
/// The previous sink is restored on all exits, including unwinding.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// Span
/// RAII guard that emits start/finish events for one page execution.
/// Finish accounting happens even when the execution fails or unwinds.
///

pub(crate) struct Span<R: RowKind> {
    kind: PageKind,
    rows: u64,
    has_next: bool,
    _marker: PhantomData<R>,
}

impl<R: RowKind> Span<R> {
    #[must_use]
    pub(crate) fn new(kind: PageKind) -> Self {
        record(MetricsEvent::PageStart {
            kind,
            row_path: R::MODEL.path,
        });

        Self {
            kind,
            rows: 0,
            has_next: false,
            _marker: PhantomData,
        }
    }

    pub(crate) const fn set_rows(&mut self, rows: u64) {
        self.rows = rows;
    }

    pub(crate) const fn set_has_next(&mut self, has_next: bool) {
        self.has_next = has_next;
    }
}

impl<R: RowKind> Drop for Span<R> {
    fn drop(&mut self) {
        record(MetricsEvent::PageFinish {
            kind: self.kind,
            row_path: R::MODEL.path,
            rows_returned: self.rows,
            has_next: self.has_next,
        });
    }
}
