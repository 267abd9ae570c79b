//! Observability: in-process pagination counters and sink abstractions.
//!
//! Logging goes through `tracing` at the call sites; counters flow through
//! `MetricsEvent` and `MetricsSink` only.

pub(crate) mod metrics;
pub(crate) mod sink;


// re-exports
pub use metrics::{EventOps, EventReport, EventState, RowSummary};
pub use sink::{
    MetricsEvent, MetricsSink, PageKind, metrics_report, metrics_reset_all, with_metrics_sink,
};
