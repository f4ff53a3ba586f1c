//! `TraceObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use relief_core::{BatchId, ShelterId, Tick};
use relief_mobility::Volunteer;
use relief_sim::{Shelter, SimObserver};
use tracing::warn;

use crate::row::{ArrivalRow, TickSummaryRow, VolunteerSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes snapshots, tick summaries and deliveries
/// to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error] or call [`finish`][Self::finish].
pub struct TraceObserver<W: OutputWriter> {
    writer:     W,
    batch:      BatchId,
    batch_size: usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            batch:      BatchId(0),
            batch_size: 0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Close the writer, returning the first stored error if there was one.
    pub fn finish(&mut self) -> OutputResult<()> {
        let result = self.writer.finish();
        self.store_err(result);
        match self.last_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "trace write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for TraceObserver<W> {
    fn on_dispatch(&mut self, batch: BatchId, _tick: Tick, volunteers: &[Volunteer]) {
        self.batch = batch;
        self.batch_size = volunteers.len();
    }

    fn on_arrival(&mut self, tick: Tick, volunteer: &Volunteer, shelter: &Shelter) {
        let row = ArrivalRow {
            batch:             self.batch.0,
            tick:              tick.0,
            volunteer_id:      volunteer.id.0,
            shelter_id:        shelter.id().0,
            aid:               volunteer.aid,
            shelter_received:  shelter.received(),
            shelter_fulfilled: shelter.is_fulfilled(),
        };
        let result = self.writer.write_arrival(&row);
        self.store_err(result);
    }

    fn on_shelter_fulfilled(&mut self, _tick: Tick, _shelter: ShelterId) {}

    fn on_tick_end(&mut self, tick: Tick, in_transit: usize) {
        let row = TickSummaryRow {
            batch:      self.batch.0,
            tick:       tick.0,
            in_transit: in_transit as u64,
            delivered:  self.batch_size.saturating_sub(in_transit) as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, volunteers: &[Volunteer], _shelters: &[Shelter]) {
        let rows: Vec<VolunteerSnapshotRow> = volunteers
            .iter()
            .map(|v| VolunteerSnapshotRow {
                batch:          self.batch.0,
                tick:           tick.0,
                volunteer_id:   v.id.0,
                lat:            v.position.lat,
                lon:            v.position.lon,
                target_shelter: v.target.0,
                arrived:        v.arrived,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_batch_complete(&mut self, _batch: BatchId, _tick: Tick) {
        let result = self.writer.flush();
        self.store_err(result);
    }
}
