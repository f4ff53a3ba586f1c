//! Plain data row types written by output backends.

/// One volunteer's position at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolunteerSnapshotRow {
    pub batch:          u64,
    pub tick:           u64,
    pub volunteer_id:   u32,
    pub lat:            f64,
    pub lon:            f64,
    pub target_shelter: u32,
    pub arrived:        bool,
}

/// Progress of the batch at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub batch:      u64,
    pub tick:       u64,
    pub in_transit: u64,
    pub delivered:  u64,
}

/// One delivery, with the shelter's counters after it was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrivalRow {
    pub batch:             u64,
    pub tick:              u64,
    pub volunteer_id:      u32,
    pub shelter_id:        u32,
    pub aid:               u32,
    pub shelter_received:  u32,
    pub shelter_fulfilled: bool,
}
