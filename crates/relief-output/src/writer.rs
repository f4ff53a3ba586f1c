//! The `OutputWriter` trait implemented by backend writers.

use crate::{ArrivalRow, OutputResult, TickSummaryRow, VolunteerSnapshotRow};

/// Trait implemented by trace writers.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with [`TraceObserver::take_error`].
///
/// [`TraceObserver::take_error`]: crate::TraceObserver::take_error
pub trait OutputWriter {
    /// Write a batch of volunteer snapshots.
    fn write_snapshots(&mut self, rows: &[VolunteerSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write one delivery row.
    fn write_arrival(&mut self, row: &ArrivalRow) -> OutputResult<()>;

    /// Push buffered rows to disk without closing.
    fn flush(&mut self) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
