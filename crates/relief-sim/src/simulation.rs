//! The `Simulation` struct and its tick loop.

use relief_core::config::MAX_DISPATCH_COUNT;
use relief_core::{
    BatchId, CoreError, DistanceMetric, GeoPoint, Haversine, ShelterId, SimConfig, SimRng, Tick,
};
use relief_mobility::{Fleet, MovementParams, Stepper, Volunteer};
use tracing::{debug, info, trace, warn};

use crate::dispatch::{DispatchCount, spawn_batch};
use crate::{
    DispatchStatus, NoopObserver, Shelter, SimError, SimObserver, SimResult, TickOutcome,
};

/// Owns every shelter and the current volunteer batch.
///
/// Callers interact only through `add_shelter`, `dispatch` and `tick` (plus
/// read-only accessors for rendering).  All mutation goes through `&mut
/// self`, so two ticks can never overlap.
///
/// `M` is the distance metric the arrival threshold is measured in; the
/// default [`Haversine`] measures metres.
///
/// Create via [`SimulationBuilder`][crate::SimulationBuilder] or
/// [`Simulation::new`].
#[derive(Debug)]
pub struct Simulation<M: DistanceMetric = Haversine> {
    config:   SimConfig,
    stepper:  Stepper<M>,
    shelters: Vec<Shelter>,
    fleet:    Fleet,

    /// Generation of the last accepted dispatch; `BatchId(0)` before any.
    generation: BatchId,

    /// `true` once `on_batch_complete` has fired for the current batch.
    completion_reported: bool,

    /// Re-seeded per batch from `config.seed`.
    rng: SimRng,

    /// The last tick executed.  Monotonic across batches.
    clock: Tick,
}

impl Simulation<Haversine> {
    /// Great-circle simulation with no shelters.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        Self::with_metric(config, Haversine)
    }
}

impl<M: DistanceMetric> Simulation<M> {
    /// Validate `config` and build an empty simulation measuring with `metric`.
    pub fn with_metric(config: SimConfig, metric: M) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            stepper:             Stepper::new(metric, MovementParams::from_config(&config)),
            rng:                 SimRng::new(config.seed),
            config,
            shelters:            Vec::new(),
            fleet:               Fleet::default(),
            generation:          BatchId(0),
            completion_reported: false,
            clock:               Tick::ZERO,
        })
    }

    // ── Placement ─────────────────────────────────────────────────────────

    /// Place a shelter needing the configured default amount of aid.
    pub fn add_shelter(&mut self, location: GeoPoint) -> SimResult<ShelterId> {
        self.add_shelter_with_need(location, self.config.shelter_need)
    }

    /// Place a shelter with an explicit need.  `needed == 0` starts
    /// fulfilled.
    ///
    /// # Errors
    ///
    /// [`CoreError::NonFiniteLocation`] if either coordinate is NaN or
    /// infinite.
    pub fn add_shelter_with_need(
        &mut self,
        location: GeoPoint,
        needed:   u32,
    ) -> SimResult<ShelterId> {
        if !location.is_finite() {
            warn!(%location, "shelter rejected: location is not finite");
            return Err(CoreError::NonFiniteLocation(location).into());
        }
        let id = ShelterId(self.shelters.len() as u32);
        self.shelters.push(Shelter::new(id, location, needed));
        debug!(shelter = %id, %location, needed, "shelter placed");
        Ok(id)
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    /// Replace the current batch with `count` fresh volunteers.
    ///
    /// See [`dispatch_with`][Self::dispatch_with].
    pub fn dispatch(&mut self, count: u32) -> SimResult<BatchId> {
        self.dispatch_with(count, &mut NoopObserver)
    }

    /// Parse a user-typed count (see [`DispatchCount::parse`]) and dispatch.
    ///
    /// The shelter check comes first, so an empty map is rejected whatever
    /// was typed.
    pub fn dispatch_input(&mut self, raw: &str) -> SimResult<BatchId> {
        self.dispatch_input_with(raw, &mut NoopObserver)
    }

    /// [`dispatch_input`][Self::dispatch_input] with observer hooks.
    pub fn dispatch_input_with<O: SimObserver>(
        &mut self,
        raw:      &str,
        observer: &mut O,
    ) -> SimResult<BatchId> {
        if self.shelters.is_empty() {
            warn!("dispatch rejected: no shelters placed");
            return Err(SimError::NoShelters);
        }
        let parsed = DispatchCount::parse(raw, self.config.default_dispatch_count);
        if parsed.defaulted {
            warn!(input = raw, count = parsed.count, "unusable dispatch count, using default");
        }
        self.dispatch_with(parsed.count, observer)
    }

    /// Replace the current batch with `count` fresh volunteers.
    ///
    /// Every volunteer starts at the depot; volunteer `i` heads to shelter
    /// `i mod shelter_count`.  The batch generation is bumped so that
    /// continuations still holding the previous [`BatchId`] become stale.
    /// Shelter counters are kept.
    ///
    /// # Errors
    ///
    /// [`SimError::NoShelters`] if no shelter has been placed, or
    /// [`SimError::BatchTooLarge`] above [`MAX_DISPATCH_COUNT`].  Nothing is
    /// spawned and the current batch is left untouched.
    pub fn dispatch_with<O: SimObserver>(
        &mut self,
        count:    u32,
        observer: &mut O,
    ) -> SimResult<BatchId> {
        if self.shelters.is_empty() {
            warn!("dispatch rejected: no shelters placed");
            return Err(SimError::NoShelters);
        }
        if count > MAX_DISPATCH_COUNT {
            warn!(count, max = MAX_DISPATCH_COUNT, "dispatch rejected: batch too large");
            return Err(SimError::BatchTooLarge { requested: count, max: MAX_DISPATCH_COUNT });
        }

        if !self.fleet.all_arrived() {
            info!(
                batch = %self.generation,
                in_transit = self.fleet.in_transit(),
                "replacing batch still in transit"
            );
        }

        let batch = self.generation.next();
        self.rng = SimRng::for_batch(self.config.seed, batch);
        let volunteers = spawn_batch(
            count,
            self.config.depot,
            &self.shelters,
            self.config.aid,
            &mut self.rng,
        );
        self.fleet = Fleet::new(volunteers);
        self.generation = batch;
        self.completion_reported = false;

        info!(
            %batch,
            volunteers = count,
            shelters = self.shelters.len(),
            aid = %self.config.aid,
            "dispatching volunteers"
        );
        observer.on_dispatch(batch, self.clock, self.fleet.volunteers());
        Ok(batch)
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance the current batch by one step.
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_with(&mut NoopObserver)
    }

    /// Advance the current batch by one step, reporting to `observer`.
    ///
    /// Returns `Done` when there is no batch.
    pub fn tick_with<O: SimObserver>(&mut self, observer: &mut O) -> TickOutcome {
        match self.current_batch() {
            Some(batch) => self.tick_batch_with(batch, observer),
            None => TickOutcome::Done,
        }
    }

    /// Continuation entry point: advance only if `batch` is still current.
    pub fn tick_batch(&mut self, batch: BatchId) -> TickOutcome {
        self.tick_batch_with(batch, &mut NoopObserver)
    }

    /// Continuation entry point with observer hooks.
    ///
    /// A host that schedules one frame at a time should hold on to the
    /// [`BatchId`] returned by `dispatch` and pass it here.  After a newer
    /// dispatch the old id yields [`TickOutcome::Stale`] and no state is
    /// touched.
    pub fn tick_batch_with<O: SimObserver>(
        &mut self,
        batch:    BatchId,
        observer: &mut O,
    ) -> TickOutcome {
        if self.current_batch() != Some(batch) {
            trace!(%batch, current = %self.generation, "stale continuation");
            return TickOutcome::Stale;
        }

        if self.fleet.all_arrived() {
            self.report_completion(observer);
            return TickOutcome::Done;
        }

        self.clock = self.clock.next();
        let now = self.clock;
        observer.on_tick_start(now);

        // ── Phase 1: move every in-transit volunteer ──────────────────────
        let arrived = self.fleet.advance(&self.stepper, now, &mut self.rng);

        // ── Phase 2: deliver aid for this tick's arrivals ─────────────────
        //
        // Each id appears exactly once, on the tick its volunteer flipped to
        // arrived, so every volunteer's aid is counted once.
        for id in arrived {
            let Some(volunteer) = self.fleet.get(id) else {
                continue;
            };
            let shelter = &mut self.shelters[volunteer.target.index()];
            let newly_fulfilled = shelter.receive(volunteer.aid);
            debug!(
                tick = %now,
                volunteer = %id,
                shelter = %shelter.id(),
                aid = volunteer.aid,
                received = shelter.received(),
                needed = shelter.needed(),
                "volunteer delivered"
            );
            observer.on_arrival(now, volunteer, shelter);
            if newly_fulfilled {
                debug!(tick = %now, shelter = %shelter.id(), "shelter fulfilled");
                observer.on_shelter_fulfilled(now, shelter.id());
            }
        }

        // ── Phase 3: report ───────────────────────────────────────────────
        let in_transit = self.fleet.in_transit();
        trace!(tick = %now, in_transit, "tick complete");
        observer.on_tick_end(now, in_transit);
        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, self.fleet.volunteers(), &self.shelters);
        }

        if self.fleet.all_arrived() {
            self.report_completion(observer);
            TickOutcome::Done
        } else {
            TickOutcome::Continue
        }
    }

    fn report_completion<O: SimObserver>(&mut self, observer: &mut O) {
        if self.completion_reported {
            return;
        }
        self.completion_reported = true;
        info!(
            batch = %self.generation,
            tick = %self.clock,
            volunteers = self.fleet.len(),
            fulfilled = self.fulfilled_count(),
            shelters = self.shelters.len(),
            "all volunteers delivered"
        );
        observer.on_batch_complete(self.generation, self.clock);
    }

    // ── Read-only state ───────────────────────────────────────────────────

    /// The batch `tick()` advances, or `None` before the first dispatch.
    #[inline]
    pub fn current_batch(&self) -> Option<BatchId> {
        (self.generation.0 > 0).then_some(self.generation)
    }

    /// The last tick executed.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn shelters(&self) -> &[Shelter] {
        &self.shelters
    }

    /// Look up a shelter by id.
    pub fn shelter(&self, id: ShelterId) -> SimResult<&Shelter> {
        self.shelters
            .get(id.index())
            .ok_or(SimError::Core(CoreError::ShelterNotFound(id)))
    }

    /// Volunteers of the current batch, indexed by `VolunteerId`.
    #[inline]
    pub fn volunteers(&self) -> &[Volunteer] {
        self.fleet.volunteers()
    }

    /// Shelters with `received >= needed`.
    pub fn fulfilled_count(&self) -> usize {
        self.shelters.iter().filter(|s| s.is_fulfilled()).count()
    }

    /// Summary for the status line.
    pub fn status(&self) -> DispatchStatus {
        DispatchStatus {
            batch:              self.current_batch(),
            tick:               self.clock,
            total:              self.fleet.len(),
            in_transit:         self.fleet.in_transit(),
            delivered:          self.fleet.delivered(),
            shelters:           self.shelters.len(),
            fulfilled_shelters: self.fulfilled_count(),
        }
    }
}
