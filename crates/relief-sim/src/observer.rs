//! Simulation observer trait for presentation updates and data collection.

use relief_core::{BatchId, ShelterId, Tick};
use relief_mobility::Volunteer;

use crate::Shelter;

/// Callbacks invoked by [`Simulation`][crate::Simulation] as a batch runs.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  A map front-end would recolour a
/// marker in `on_arrival`, swap a shelter popup in `on_shelter_fulfilled`,
/// and update the status line in `on_batch_complete`.
///
/// # Example: arrival printer
///
/// ```rust,ignore
/// struct ArrivalPrinter;
///
/// impl SimObserver for ArrivalPrinter {
///     fn on_arrival(&mut self, tick: Tick, v: &Volunteer, shelter: &Shelter) {
///         println!("{tick}: {} delivered {} aid to {}", v.id, v.aid, shelter.id());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after a dispatch is accepted, before the first tick.
    fn on_dispatch(&mut self, _batch: BatchId, _tick: Tick, _volunteers: &[Volunteer]) {}

    /// Called at the very start of each tick, before any volunteer moves.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per volunteer, on the tick it arrives.
    ///
    /// `shelter` already includes this volunteer's aid in `received()`.
    fn on_arrival(&mut self, _tick: Tick, _volunteer: &Volunteer, _shelter: &Shelter) {}

    /// Called once per shelter, on the delivery that fulfils it.
    fn on_shelter_fulfilled(&mut self, _tick: Tick, _shelter: ShelterId) {}

    /// Called at the end of each tick with the number still in transit.
    fn on_tick_end(&mut self, _tick: Tick, _in_transit: usize) {}

    /// Called every `config.snapshot_interval_ticks` ticks with read-only
    /// access to the full batch and shelter state.
    fn on_snapshot(&mut self, _tick: Tick, _volunteers: &[Volunteer], _shelters: &[Shelter]) {}

    /// Called once when the last volunteer of `batch` has delivered.
    fn on_batch_complete(&mut self, _batch: BatchId, _tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call a `_with`
/// method but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Forward every callback to both observers, `A` first.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_dispatch(&mut self, batch: BatchId, tick: Tick, volunteers: &[Volunteer]) {
        self.0.on_dispatch(batch, tick, volunteers);
        self.1.on_dispatch(batch, tick, volunteers);
    }

    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }

    fn on_arrival(&mut self, tick: Tick, volunteer: &Volunteer, shelter: &Shelter) {
        self.0.on_arrival(tick, volunteer, shelter);
        self.1.on_arrival(tick, volunteer, shelter);
    }

    fn on_shelter_fulfilled(&mut self, tick: Tick, shelter: ShelterId) {
        self.0.on_shelter_fulfilled(tick, shelter);
        self.1.on_shelter_fulfilled(tick, shelter);
    }

    fn on_tick_end(&mut self, tick: Tick, in_transit: usize) {
        self.0.on_tick_end(tick, in_transit);
        self.1.on_tick_end(tick, in_transit);
    }

    fn on_snapshot(&mut self, tick: Tick, volunteers: &[Volunteer], shelters: &[Shelter]) {
        self.0.on_snapshot(tick, volunteers, shelters);
        self.1.on_snapshot(tick, volunteers, shelters);
    }

    fn on_batch_complete(&mut self, batch: BatchId, tick: Tick) {
        self.0.on_batch_complete(batch, tick);
        self.1.on_batch_complete(batch, tick);
    }
}

/// Forward through a mutable reference so callers can keep ownership.
impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_dispatch(&mut self, batch: BatchId, tick: Tick, volunteers: &[Volunteer]) {
        (**self).on_dispatch(batch, tick, volunteers);
    }

    fn on_tick_start(&mut self, tick: Tick) {
        (**self).on_tick_start(tick);
    }

    fn on_arrival(&mut self, tick: Tick, volunteer: &Volunteer, shelter: &Shelter) {
        (**self).on_arrival(tick, volunteer, shelter);
    }

    fn on_shelter_fulfilled(&mut self, tick: Tick, shelter: ShelterId) {
        (**self).on_shelter_fulfilled(tick, shelter);
    }

    fn on_tick_end(&mut self, tick: Tick, in_transit: usize) {
        (**self).on_tick_end(tick, in_transit);
    }

    fn on_snapshot(&mut self, tick: Tick, volunteers: &[Volunteer], shelters: &[Shelter]) {
        (**self).on_snapshot(tick, volunteers, shelters);
    }

    fn on_batch_complete(&mut self, batch: BatchId, tick: Tick) {
        (**self).on_batch_complete(batch, tick);
    }
}
