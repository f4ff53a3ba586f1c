//! Per-volunteer movement state.

use relief_core::{GeoPoint, ShelterId, Tick, VolunteerId};

/// One volunteer of a dispatch batch.
///
/// A volunteer is either **in transit** (`arrived = false`, `position`
/// updated every tick) or **arrived** (`arrived = true`, frozen where the
/// arrival check succeeded).  It never goes back to in transit.
#[derive(Debug, Clone, PartialEq)]
pub struct Volunteer {
    /// Index within the batch.
    pub id: VolunteerId,

    /// Current coordinate.  Starts at the depot.
    pub position: GeoPoint,

    /// The shelter this volunteer delivers to.  A reference by index only;
    /// shelters are owned by the simulation.
    pub target: ShelterId,

    /// Location of `target`, copied at spawn.  Shelter locations are
    /// immutable, so the copy never goes stale.
    pub destination: GeoPoint,

    /// Units of aid carried.
    pub aid: u32,

    /// `true` once the volunteer has delivered.
    pub arrived: bool,

    /// Tick at which `arrived` became `true`.
    pub arrived_at: Option<Tick>,
}

impl Volunteer {
    /// Construct a volunteer standing at `origin`, heading to `target`.
    pub fn spawn(
        id:          VolunteerId,
        origin:      GeoPoint,
        target:      ShelterId,
        destination: GeoPoint,
        aid:         u32,
    ) -> Self {
        Self {
            id,
            position: origin,
            target,
            destination,
            aid,
            arrived: false,
            arrived_at: None,
        }
    }

    /// `true` while the volunteer still has to move.
    #[inline]
    pub fn in_transit(&self) -> bool {
        !self.arrived
    }

    /// Record arrival at `now`.  Returns `false` if already arrived.
    #[inline]
    pub fn mark_arrived(&mut self, now: Tick) -> bool {
        if self.arrived {
            return false;
        }
        self.arrived = true;
        self.arrived_at = Some(now);
        true
    }
}
