//! Shelters and their aid counters.

use relief_core::{GeoPoint, ShelterId};

/// A destination that needs `needed` units of aid.
///
/// `received` only grows, and only through [`Shelter::receive`], which the
/// simulation calls exactly once per arriving volunteer.  Deliveries past
/// `needed` are kept; the counter is not capped.
#[derive(Debug, Clone, PartialEq)]
pub struct Shelter {
    id:        ShelterId,
    location:  GeoPoint,
    needed:    u32,
    received:  u32,
    fulfilled: bool,
}

impl Shelter {
    /// A shelter with nothing delivered yet.  `needed == 0` starts fulfilled.
    pub fn new(id: ShelterId, location: GeoPoint, needed: u32) -> Self {
        Self {
            id,
            location,
            needed,
            received: 0,
            fulfilled: needed == 0,
        }
    }

    #[inline]
    pub fn id(&self) -> ShelterId {
        self.id
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    #[inline]
    pub fn needed(&self) -> u32 {
        self.needed
    }

    #[inline]
    pub fn received(&self) -> u32 {
        self.received
    }

    #[inline]
    pub fn is_fulfilled(&self) -> bool {
        self.fulfilled
    }

    /// Units still missing; zero once fulfilled.
    #[inline]
    pub fn shortfall(&self) -> u32 {
        self.needed.saturating_sub(self.received)
    }

    /// Add one volunteer's delivery.
    ///
    /// Returns `true` only on the delivery that makes the shelter fulfilled.
    pub(crate) fn receive(&mut self, aid: u32) -> bool {
        self.received = self.received.saturating_add(aid);
        self.refresh_fulfilled()
    }

    /// Set the fulfilled flag if `received >= needed`.
    ///
    /// Returns `true` only when the flag flips; calling it again on a
    /// fulfilled shelter changes nothing and returns `false`.
    pub fn refresh_fulfilled(&mut self) -> bool {
        if self.fulfilled || self.received < self.needed {
            return false;
        }
        self.fulfilled = true;
        true
    }
}
