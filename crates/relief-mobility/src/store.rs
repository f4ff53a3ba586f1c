//! The `Fleet`: every volunteer of one dispatch batch.

use relief_core::{DistanceMetric, SimRng, Tick, VolunteerId};

use crate::{Step, Stepper, Volunteer};

/// Holds the volunteers of one batch plus a running in-transit count.
///
/// The `volunteers` vector is indexed by `VolunteerId` and never changes
/// length after construction; a new dispatch builds a new `Fleet`.
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    volunteers: Vec<Volunteer>,
    in_transit: usize,
}

impl Fleet {
    /// Wrap an already-spawned batch.  `volunteers[i].id` must be `i`.
    pub fn new(volunteers: Vec<Volunteer>) -> Self {
        debug_assert!(
            volunteers.iter().enumerate().all(|(i, v)| v.id.index() == i),
            "volunteer ids must match their index"
        );
        let in_transit = volunteers.iter().filter(|v| v.in_transit()).count();
        Self { volunteers, in_transit }
    }

    /// Step every in-transit volunteer once, in ascending `VolunteerId`
    /// order.  Returns the volunteers that arrived this tick.
    pub fn advance<M: DistanceMetric>(
        &mut self,
        stepper: &Stepper<M>,
        now:     Tick,
        rng:     &mut SimRng,
    ) -> Vec<VolunteerId> {
        let mut arrived = Vec::new();
        for volunteer in self.volunteers.iter_mut() {
            if let Step::Arrived { .. } = stepper.step(volunteer, now, rng) {
                arrived.push(volunteer.id);
            }
        }
        self.in_transit -= arrived.len();
        arrived
    }

    #[inline]
    pub fn get(&self, id: VolunteerId) -> Option<&Volunteer> {
        self.volunteers.get(id.index())
    }

    #[inline]
    pub fn volunteers(&self) -> &[Volunteer] {
        &self.volunteers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.volunteers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.volunteers.is_empty()
    }

    /// Volunteers still moving.
    #[inline]
    pub fn in_transit(&self) -> usize {
        self.in_transit
    }

    /// Volunteers that have delivered.
    #[inline]
    pub fn delivered(&self) -> usize {
        self.volunteers.len() - self.in_transit
    }

    /// `true` when nobody is left in transit (including an empty fleet).
    #[inline]
    pub fn all_arrived(&self) -> bool {
        self.in_transit == 0
    }
}
