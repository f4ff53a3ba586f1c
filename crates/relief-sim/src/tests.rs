//! Tests for relief-sim: dispatch, the tick loop, and host drivers.

use relief_core::config::MAX_DISPATCH_COUNT;
use relief_core::{
    AidPolicy, BatchId, CoreError, GeoPoint, Planar, ShelterId, SimConfig, Tick, VolunteerId,
};
use relief_mobility::{Volunteer, ticks_to_arrival_bound};

use crate::{
    DispatchCount, Immediate, NoopObserver, Shelter, SimError, SimObserver, Simulation,
    SimulationBuilder, TickOutcome, round_robin, run_to_completion,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DEPOT: GeoPoint = GeoPoint { lat: -33.868, lon: 151.209 };

/// A few hundred metres around the depot.
fn near_shelters() -> [GeoPoint; 3] {
    [
        GeoPoint::new(-33.8688, 151.2093),
        GeoPoint::new(-33.8720, 151.2050),
        GeoPoint::new(-33.8650, 151.2140),
    ]
}

fn plain_config() -> SimConfig {
    SimConfig { depot: DEPOT, seed: 42, ..SimConfig::default() }
}

fn wiggle_config() -> SimConfig {
    SimConfig { depot: DEPOT, seed: 42, ..SimConfig::wiggle() }
}

fn sim_with_shelters(config: SimConfig, n: usize) -> Simulation {
    let mut builder = SimulationBuilder::new(config);
    for p in near_shelters().iter().cycle().take(n) {
        builder = builder.shelter(*p);
    }
    builder.build().unwrap()
}

/// Planar simulation: depot 1000 units east of a single shelter at the origin.
fn planar_sim() -> Simulation<Planar> {
    let config = SimConfig { depot: GeoPoint::new(0.0, 1000.0), ..SimConfig::default() };
    SimulationBuilder::new(config)
        .metric(Planar)
        .shelter(GeoPoint::new(0.0, 0.0))
        .build()
        .unwrap()
}

/// Tick until `Done`, panicking after `cap` ticks.
fn run_until_done<M: relief_core::DistanceMetric>(sim: &mut Simulation<M>, cap: u64) -> u64 {
    let mut ticks = 0;
    while sim.tick() == TickOutcome::Continue {
        ticks += 1;
        assert!(ticks < cap, "no completion after {cap} ticks");
    }
    ticks + 1
}

/// Per shelter: summed aid of arrived volunteers targeting it.
fn delivered_by_shelter(volunteers: &[Volunteer], shelter_count: usize) -> Vec<u32> {
    let mut sums = vec![0; shelter_count];
    for v in volunteers.iter().filter(|v| v.arrived) {
        sums[v.target.index()] += v.aid;
    }
    sums
}

#[derive(Default)]
struct Recorder {
    dispatches: Vec<(BatchId, usize)>,
    arrivals:   Vec<(Tick, VolunteerId, ShelterId, u32)>,
    fulfilled:  Vec<ShelterId>,
    tick_ends:  Vec<(Tick, usize)>,
    snapshots:  usize,
    completed:  Vec<(BatchId, Tick)>,
}

impl SimObserver for Recorder {
    fn on_dispatch(&mut self, batch: BatchId, _tick: Tick, volunteers: &[Volunteer]) {
        self.dispatches.push((batch, volunteers.len()));
    }

    fn on_arrival(&mut self, tick: Tick, volunteer: &Volunteer, shelter: &Shelter) {
        self.arrivals.push((tick, volunteer.id, shelter.id(), volunteer.aid));
    }

    fn on_shelter_fulfilled(&mut self, _tick: Tick, shelter: ShelterId) {
        self.fulfilled.push(shelter);
    }

    fn on_tick_end(&mut self, tick: Tick, in_transit: usize) {
        self.tick_ends.push((tick, in_transit));
    }

    fn on_snapshot(&mut self, _tick: Tick, _volunteers: &[Volunteer], _shelters: &[Shelter]) {
        self.snapshots += 1;
    }

    fn on_batch_complete(&mut self, batch: BatchId, tick: Tick) {
        self.completed.push((batch, tick));
    }
}

// ── Dispatch count parsing ────────────────────────────────────────────────────

#[cfg(test)]
mod count_tests {
    use super::*;

    fn parse(raw: &str) -> DispatchCount {
        DispatchCount::parse(raw, 10)
    }

    #[test]
    fn non_numeric_defaults() {
        assert_eq!(parse("abc"), DispatchCount { count: 10, defaulted: true });
        assert_eq!(parse(""), DispatchCount { count: 10, defaulted: true });
        assert_eq!(parse("   "), DispatchCount { count: 10, defaulted: true });
    }

    #[test]
    fn zero_and_negative_default() {
        assert!(parse("0").defaulted);
        assert!(parse("-4").defaulted);
        assert_eq!(parse("-4").count, 10);
    }

    #[test]
    fn leading_digits_are_read() {
        assert_eq!(parse("12abc").count, 12);
        assert_eq!(parse("3.9").count, 3);
        assert_eq!(parse("  7").count, 7);
        assert_eq!(parse("+5").count, 5);
        assert!(!parse("12abc").defaulted);
    }

    #[test]
    fn overflow_defaults() {
        assert!(parse("99999999999999999999").defaulted);
    }

    #[test]
    fn oversized_count_defaults() {
        assert_eq!(parse("4000000000"), DispatchCount { count: 10, defaulted: true });
        assert_eq!(parse(&(MAX_DISPATCH_COUNT + 1).to_string()).count, 10);
        let at_max = parse(&MAX_DISPATCH_COUNT.to_string());
        assert_eq!(at_max, DispatchCount { count: MAX_DISPATCH_COUNT, defaulted: false });
    }

    #[test]
    fn hex_prefix_is_not_read() {
        assert!(parse("0x10").defaulted);
    }

    #[test]
    fn custom_default_is_used() {
        assert_eq!(DispatchCount::parse("x", 3).count, 3);
    }
}

// ── Placement and dispatch ────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch_tests {
    use super::*;

    #[test]
    fn round_robin_wraps() {
        let targets: Vec<usize> = (0..7).map(|i| round_robin(i, 3)).collect();
        assert_eq!(targets, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn shelters_get_default_need() {
        let mut sim = Simulation::new(plain_config()).unwrap();
        let id = sim.add_shelter(near_shelters()[0]).unwrap();
        assert_eq!(id, ShelterId(0));
        let s = sim.shelter(id).unwrap();
        assert_eq!(s.needed(), 5);
        assert_eq!(s.received(), 0);
        assert!(!s.is_fulfilled());
    }

    #[test]
    fn zero_need_shelter_starts_fulfilled() {
        let mut sim = Simulation::new(plain_config()).unwrap();
        let id = sim.add_shelter_with_need(near_shelters()[0], 0).unwrap();
        assert!(sim.shelter(id).unwrap().is_fulfilled());
        assert_eq!(sim.fulfilled_count(), 1);
    }

    #[test]
    fn unknown_shelter_is_an_error() {
        let sim = Simulation::new(plain_config()).unwrap();
        assert!(matches!(sim.shelter(ShelterId(3)), Err(SimError::Core(_))));
    }

    #[test]
    fn non_finite_shelter_is_rejected() {
        let mut sim = Simulation::new(plain_config()).unwrap();
        for bad in [
            GeoPoint::new(f64::NAN, 151.21),
            GeoPoint::new(-33.87, f64::INFINITY),
            GeoPoint::new(f64::NEG_INFINITY, f64::NAN),
        ] {
            let err = sim.add_shelter(bad).unwrap_err();
            assert!(matches!(err, SimError::Core(CoreError::NonFiniteLocation(_))));
        }
        assert!(sim.shelters().is_empty());
        assert!(matches!(sim.dispatch(1), Err(SimError::NoShelters)));
    }

    #[test]
    fn builder_rejects_non_finite_shelter() {
        let result = SimulationBuilder::new(plain_config())
            .shelter(near_shelters()[0])
            .shelter_with_need(GeoPoint::new(f64::NAN, 151.21), 3)
            .build();
        assert!(matches!(result, Err(SimError::Core(CoreError::NonFiniteLocation(_)))));
    }

    #[test]
    fn oversized_batch_is_rejected() {
        let mut sim = sim_with_shelters(plain_config(), 1);
        sim.dispatch(2).unwrap();
        let err = sim.dispatch(MAX_DISPATCH_COUNT + 1).unwrap_err();
        assert!(matches!(err, SimError::BatchTooLarge { max: MAX_DISPATCH_COUNT, .. }));
        assert_eq!(sim.current_batch(), Some(BatchId(1)));
        assert_eq!(sim.volunteers().len(), 2);
    }

    #[test]
    fn invalid_config_rejected_at_build() {
        let config = SimConfig { alpha: 1.5, ..plain_config() };
        assert!(Simulation::new(config).is_err());
    }

    /// No shelters → rejected, nothing spawned, loop never starts.
    #[test]
    fn dispatch_without_shelters_is_rejected() {
        let mut sim = Simulation::new(plain_config()).unwrap();
        let err = sim.dispatch(5).unwrap_err();
        assert!(matches!(err, SimError::NoShelters));
        assert!(err.to_string().contains("add at least one shelter"));
        assert!(sim.volunteers().is_empty());
        assert_eq!(sim.current_batch(), None);

        assert_eq!(sim.tick(), TickOutcome::Done);
        assert_eq!(sim.current_tick(), Tick::ZERO);
        assert!(!sim.status().is_complete());
    }

    #[test]
    fn dispatch_input_without_shelters_is_rejected() {
        let mut sim = Simulation::new(plain_config()).unwrap();
        assert!(matches!(sim.dispatch_input("5"), Err(SimError::NoShelters)));
    }

    /// 3 shelters, 7 volunteers → {0,3,6}, {1,4}, {2,5}.
    #[test]
    fn seven_volunteers_over_three_shelters() {
        let mut sim = sim_with_shelters(plain_config(), 3);
        sim.dispatch(7).unwrap();

        let mut by_shelter: Vec<Vec<u32>> = vec![Vec::new(); 3];
        for v in sim.volunteers() {
            by_shelter[v.target.index()].push(v.id.0);
        }
        assert_eq!(by_shelter, vec![vec![0, 3, 6], vec![1, 4], vec![2, 5]]);
    }

    #[test]
    fn volunteers_start_at_depot_heading_to_target() {
        let mut sim = sim_with_shelters(plain_config(), 2);
        sim.dispatch(4).unwrap();
        for v in sim.volunteers() {
            assert_eq!(v.position, DEPOT);
            assert!(!v.arrived);
            assert_eq!(v.destination, sim.shelters()[v.target.index()].location());
            assert_eq!(v.aid, 1);
        }
    }

    /// "abc" → 10 volunteers.
    #[test]
    fn non_numeric_input_dispatches_default() {
        let mut sim = sim_with_shelters(plain_config(), 1);
        sim.dispatch_input("abc").unwrap();
        assert_eq!(sim.volunteers().len(), 10);
    }

    #[test]
    fn typed_input_reaches_observer() {
        let mut sim = sim_with_shelters(plain_config(), 2);
        let mut rec = Recorder::default();
        let batch = sim.dispatch_input_with(" 4 volunteers", &mut rec).unwrap();
        assert_eq!(rec.dispatches, vec![(batch, 4)]);
    }

    #[test]
    fn variable_aid_is_one_to_three() {
        let mut sim = sim_with_shelters(wiggle_config(), 2);
        sim.dispatch(50).unwrap();
        assert!(sim.volunteers().iter().all(|v| (1..=3).contains(&v.aid)));
    }

    #[test]
    fn generations_increment() {
        let mut sim = sim_with_shelters(plain_config(), 1);
        assert_eq!(sim.dispatch(1).unwrap(), BatchId(1));
        assert_eq!(sim.dispatch(1).unwrap(), BatchId(2));
        assert_eq!(sim.current_batch(), Some(BatchId(2)));
    }

    #[test]
    fn empty_batch_is_immediately_done() {
        let mut sim = sim_with_shelters(plain_config(), 1);
        let mut rec = Recorder::default();
        let batch = sim.dispatch_with(0, &mut rec).unwrap();
        assert!(sim.status().is_complete());
        assert_eq!(sim.tick_with(&mut rec), TickOutcome::Done);
        assert_eq!(sim.tick_with(&mut rec), TickOutcome::Done);
        assert_eq!(sim.current_tick(), Tick::ZERO);
        assert_eq!(rec.completed, vec![(batch, Tick::ZERO)]);
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use super::*;

    /// One shelter needing 5, five volunteers with 1 aid each.
    #[test]
    fn five_volunteers_fulfil_one_shelter() {
        let mut sim = sim_with_shelters(plain_config(), 1);
        sim.dispatch(5).unwrap();
        run_until_done(&mut sim, 10_000);

        let shelter = sim.shelter(ShelterId(0)).unwrap();
        assert_eq!(shelter.received(), 5);
        assert!(shelter.is_fulfilled());
        assert!(sim.volunteers().iter().all(|v| v.arrived));
        assert!(sim.status().is_complete());
    }

    /// 1000 units out, alpha 0.02, threshold 15.
    #[test]
    fn single_volunteer_arrives_within_bound() {
        let mut sim = planar_sim();
        sim.dispatch(1).unwrap();

        // ceil(ln(15 / 1000) / ln(0.98)) = 208
        let bound = 208;
        let target = GeoPoint::new(0.0, 0.0);
        let mut last = 1000.0;
        let mut ticks = 0;
        loop {
            let outcome = sim.tick();
            ticks += 1;
            let v = &sim.volunteers()[0];
            let d = v.position.lat.hypot(v.position.lon - target.lon);
            assert!(d < last, "tick {ticks}: distance {d} did not shrink from {last}");
            last = d;
            if outcome == TickOutcome::Done {
                break;
            }
            assert!(ticks <= bound, "not arrived within {bound} ticks");
        }
        assert!(ticks <= bound);
        assert_eq!(ticks, ticks_to_arrival_bound(1000.0, 15.0, 0.02));
        assert_eq!(sim.volunteers()[0].arrived_at, Some(Tick(ticks)));
    }

    #[test]
    fn received_matches_arrived_aid_every_tick() {
        let mut sim = sim_with_shelters(wiggle_config(), 3);
        sim.dispatch(12).unwrap();
        let mut ticks = 0;
        loop {
            let outcome = sim.tick();
            let expected = delivered_by_shelter(sim.volunteers(), 3);
            let actual: Vec<u32> = sim.shelters().iter().map(Shelter::received).collect();
            assert_eq!(actual, expected, "mismatch at tick {}", sim.current_tick());
            for s in sim.shelters() {
                assert_eq!(s.is_fulfilled(), s.received() >= s.needed());
            }
            if outcome == TickOutcome::Done {
                break;
            }
            ticks += 1;
            assert!(ticks < 100_000, "no completion");
        }
    }

    #[test]
    fn received_never_decreases() {
        let mut sim = sim_with_shelters(wiggle_config(), 2);
        sim.dispatch(9).unwrap();
        let mut last = vec![0u32; 2];
        let mut ticks = 0;
        while sim.tick() == TickOutcome::Continue {
            let now: Vec<u32> = sim.shelters().iter().map(Shelter::received).collect();
            assert!(now.iter().zip(&last).all(|(n, l)| n >= l));
            last = now;
            ticks += 1;
            assert!(ticks < 100_000);
        }
    }

    #[test]
    fn each_volunteer_reported_once() {
        let mut sim = sim_with_shelters(plain_config(), 3);
        let mut rec = Recorder::default();
        sim.dispatch_with(7, &mut rec).unwrap();
        run_to_completion(&mut sim, &mut Immediate, &mut rec, Some(10_000)).unwrap();

        let mut ids: Vec<u32> = rec.arrivals.iter().map(|(_, v, _, _)| v.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..7).collect::<Vec<_>>());
        for (tick, id, shelter, _) in &rec.arrivals {
            let v = &sim.volunteers()[id.index()];
            assert_eq!(v.arrived_at, Some(*tick));
            assert_eq!(v.target, *shelter);
        }
    }

    #[test]
    fn over_delivery_is_kept() {
        let mut sim = SimulationBuilder::new(plain_config())
            .shelter_with_need(near_shelters()[0], 2)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.dispatch_with(6, &mut rec).unwrap();
        run_to_completion(&mut sim, &mut Immediate, &mut rec, None).unwrap();

        let s = sim.shelter(ShelterId(0)).unwrap();
        assert_eq!(s.received(), 6);
        assert_eq!(s.shortfall(), 0);
        assert!(s.is_fulfilled());
        // Fulfilment fires once even though four more volunteers delivered.
        assert_eq!(rec.fulfilled, vec![ShelterId(0)]);
    }

    #[test]
    fn refresh_fulfilled_is_idempotent() {
        let mut shelter = Shelter::new(ShelterId(0), DEPOT, 1);
        assert!(shelter.receive(1));
        assert!(!shelter.refresh_fulfilled());
        assert!(!shelter.refresh_fulfilled());
        assert!(shelter.is_fulfilled());
        assert_eq!(shelter.received(), 1);
    }

    #[test]
    fn receive_below_need_does_not_fulfil() {
        let mut shelter = Shelter::new(ShelterId(0), DEPOT, 5);
        assert!(!shelter.receive(2));
        assert_eq!(shelter.shortfall(), 3);
        assert!(!shelter.refresh_fulfilled());
    }

    #[test]
    fn counters_accumulate_across_batches() {
        let mut sim = sim_with_shelters(plain_config(), 1);
        sim.dispatch(3).unwrap();
        run_until_done(&mut sim, 10_000);
        sim.dispatch(3).unwrap();
        run_until_done(&mut sim, 10_000);
        assert_eq!(sim.shelter(ShelterId(0)).unwrap().received(), 6);
        assert!(sim.shelter(ShelterId(0)).unwrap().is_fulfilled());
    }

    #[test]
    fn done_is_sticky_and_completion_fires_once() {
        let mut sim = sim_with_shelters(plain_config(), 1);
        let mut rec = Recorder::default();
        let batch = sim.dispatch_with(2, &mut rec).unwrap();
        while sim.tick_with(&mut rec) == TickOutcome::Continue {}
        let finished_at = sim.current_tick();

        assert_eq!(sim.tick_with(&mut rec), TickOutcome::Done);
        assert_eq!(sim.current_tick(), finished_at);
        assert_eq!(rec.completed, vec![(batch, finished_at)]);
    }

    #[test]
    fn tick_end_reports_in_transit() {
        let mut sim = sim_with_shelters(plain_config(), 2);
        let mut rec = Recorder::default();
        sim.dispatch_with(4, &mut rec).unwrap();
        run_to_completion(&mut sim, &mut Immediate, &mut rec, None).unwrap();

        assert_eq!(rec.dispatches, vec![(BatchId(1), 4)]);
        let counts: Vec<usize> = rec.tick_ends.iter().map(|(_, n)| *n).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(counts.last(), Some(&0));
        // snapshot_interval_ticks defaults to 1
        assert_eq!(rec.snapshots, rec.tick_ends.len());
    }

    #[test]
    fn snapshot_interval_is_honoured() {
        let config = SimConfig { snapshot_interval_ticks: 10, ..plain_config() };
        let mut sim = sim_with_shelters(config, 1);
        let mut rec = Recorder::default();
        sim.dispatch(1).unwrap();
        run_to_completion(&mut sim, &mut Immediate, &mut rec, None).unwrap();
        let ticks = sim.current_tick().0 as usize;
        assert_eq!(rec.snapshots, ticks / 10);
    }

    #[test]
    fn same_seed_replays_identically() {
        let run = || {
            let mut sim = sim_with_shelters(wiggle_config(), 3);
            sim.dispatch(8).unwrap();
            run_until_done(&mut sim, 100_000);
            (sim.current_tick(), sim.volunteers().to_vec())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn fixed_aid_policy_is_respected() {
        let config = SimConfig { aid: AidPolicy::Fixed { units: 2 }, ..plain_config() };
        let mut sim = sim_with_shelters(config, 1);
        sim.dispatch(3).unwrap();
        run_until_done(&mut sim, 10_000);
        assert_eq!(sim.shelter(ShelterId(0)).unwrap().received(), 6);
    }
}

// ── Generations and stale continuations ───────────────────────────────────────

#[cfg(test)]
mod generation_tests {
    use super::*;

    #[test]
    fn stale_continuation_touches_nothing() {
        let mut sim = sim_with_shelters(plain_config(), 2);
        let first = sim.dispatch(4).unwrap();
        assert_eq!(sim.tick_batch(first), TickOutcome::Continue);

        let second = sim.dispatch(4).unwrap();
        let positions: Vec<GeoPoint> = sim.volunteers().iter().map(|v| v.position).collect();
        let tick = sim.current_tick();

        assert_eq!(sim.tick_batch(first), TickOutcome::Stale);
        assert_eq!(sim.current_tick(), tick);
        let after: Vec<GeoPoint> = sim.volunteers().iter().map(|v| v.position).collect();
        assert_eq!(after, positions);

        assert_eq!(sim.tick_batch(second), TickOutcome::Continue);
    }

    #[test]
    fn redispatch_replaces_volunteers() {
        let mut sim = sim_with_shelters(plain_config(), 1);
        sim.dispatch(4).unwrap();
        sim.tick();
        sim.dispatch(2).unwrap();
        assert_eq!(sim.volunteers().len(), 2);
        assert!(sim.volunteers().iter().all(|v| v.position == DEPOT));
        assert_eq!(sim.status().in_transit, 2);
    }

    #[test]
    fn continuation_observer_sees_nothing_once_stale() {
        let mut sim = sim_with_shelters(plain_config(), 1);
        let old = sim.dispatch(3).unwrap();
        let mut rec = Recorder::default();
        sim.tick_batch_with(old, &mut rec);
        assert_eq!(rec.tick_ends.len(), 1);

        sim.dispatch(3).unwrap();
        assert_eq!(sim.tick_batch_with(old, &mut rec), TickOutcome::Stale);
        assert_eq!(rec.tick_ends.len(), 1);
        assert!(rec.completed.is_empty());
    }

    #[test]
    fn shelters_added_after_dispatch_join_next_batch() {
        let mut sim = sim_with_shelters(plain_config(), 1);
        sim.dispatch(4).unwrap();
        assert!(sim.volunteers().iter().all(|v| v.target == ShelterId(0)));
        sim.add_shelter(near_shelters()[1]).unwrap();
        sim.dispatch(4).unwrap();
        let targets: Vec<u32> = sim.volunteers().iter().map(|v| v.target.0).collect();
        assert_eq!(targets, vec![0, 1, 0, 1]);
    }
}

// ── Status surface ────────────────────────────────────────────────────────────

#[cfg(test)]
mod status_tests {
    use super::*;

    #[test]
    fn idle_status() {
        let sim = sim_with_shelters(plain_config(), 2);
        let status = sim.status();
        assert_eq!(status.batch, None);
        assert!(!status.is_complete());
        assert!(status.to_string().starts_with("No volunteers dispatched"));
    }

    #[test]
    fn in_progress_then_complete() {
        let mut sim = sim_with_shelters(plain_config(), 1);
        sim.dispatch(5).unwrap();
        let status = sim.status();
        assert_eq!(status.total, 5);
        assert_eq!(status.in_transit, 5);
        assert_eq!(status.delivered, 0);
        assert_eq!(status.to_string(), "Dispatching 5 volunteers... (0/5 delivered)");

        run_until_done(&mut sim, 10_000);
        let status = sim.status();
        assert!(status.is_complete());
        assert_eq!(status.delivered, 5);
        assert_eq!(status.fulfilled_shelters, 1);
        assert_eq!(status.to_string(), "All volunteers dispatched! (1/1 shelters fulfilled)");
    }

    #[test]
    fn outcome_should_continue() {
        assert!(TickOutcome::Continue.should_continue());
        assert!(!TickOutcome::Done.should_continue());
        assert!(!TickOutcome::Stale.should_continue());
    }
}

// ── Drivers ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod driver_tests {
    use std::time::Duration;

    use super::*;
    use crate::{FixedRate, FrameScheduler};

    #[test]
    fn run_without_batch_errors() {
        let mut sim = sim_with_shelters(plain_config(), 1);
        let result = run_to_completion(&mut sim, &mut Immediate, &mut NoopObserver, None);
        assert!(matches!(result, Err(SimError::NoActiveBatch)));
    }

    #[test]
    fn run_reports_ticks_and_done() {
        let mut sim = planar_sim();
        let batch = sim.dispatch(1).unwrap();
        let summary = run_to_completion(&mut sim, &mut Immediate, &mut NoopObserver, None).unwrap();
        assert_eq!(summary.batch, batch);
        assert_eq!(summary.outcome, TickOutcome::Done);
        assert_eq!(summary.ticks, 208);
    }

    #[test]
    fn tick_limit_stops_run_and_allows_resume() {
        let mut sim = planar_sim();
        sim.dispatch(1).unwrap();
        let err = run_to_completion(&mut sim, &mut Immediate, &mut NoopObserver, Some(50))
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::TickLimitExceeded { limit: 50, in_transit: 1, .. }
        ));
        assert_eq!(sim.current_tick(), Tick(50));

        let summary = run_to_completion(&mut sim, &mut Immediate, &mut NoopObserver, None).unwrap();
        assert_eq!(summary.ticks, 158);
        assert!(sim.status().is_complete());
    }

    #[test]
    fn zero_tick_limit_fails_without_ticking() {
        let mut sim = planar_sim();
        let batch = sim.dispatch(1).unwrap();
        let mut rec = Recorder::default();
        let err = run_to_completion(&mut sim, &mut Immediate, &mut rec, Some(0)).unwrap_err();
        assert!(matches!(
            err,
            SimError::TickLimitExceeded { limit: 0, in_transit: 1, .. }
        ));
        assert_eq!(sim.current_tick(), Tick::ZERO);
        assert!(rec.tick_ends.is_empty());
        assert_eq!(sim.current_batch(), Some(batch));
    }

    #[test]
    fn zero_tick_limit_on_empty_batch_completes() {
        let mut sim = planar_sim();
        sim.dispatch(0).unwrap();
        let summary =
            run_to_completion(&mut sim, &mut Immediate, &mut NoopObserver, Some(0)).unwrap();
        assert_eq!(summary.outcome, TickOutcome::Done);
        assert_eq!(summary.ticks, 0);
    }

    #[test]
    fn limit_equal_to_needed_ticks_succeeds() {
        let mut sim = planar_sim();
        sim.dispatch(1).unwrap();
        let summary =
            run_to_completion(&mut sim, &mut Immediate, &mut NoopObserver, Some(208)).unwrap();
        assert_eq!(summary.outcome, TickOutcome::Done);
    }

    #[test]
    fn fixed_rate_frame_duration() {
        assert_eq!(FixedRate::new(50).frame_duration(), Duration::from_millis(20));
        assert_eq!(FixedRate::new(0).frame_duration(), Duration::from_secs(1));
        assert_eq!(FixedRate::default().frame_duration(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn fixed_rate_paces_frames() {
        let mut pacer = FixedRate::new(200); // 5 ms frames
        let start = std::time::Instant::now();
        for _ in 0..5 {
            pacer.wait_for_frame();
        }
        // First frame is immediate, the next four wait ~5 ms each.
        assert!(start.elapsed() >= Duration::from_millis(18));
    }
}
