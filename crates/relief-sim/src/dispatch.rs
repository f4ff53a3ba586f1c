//! Dispatch-count parsing and batch spawning.

use relief_core::config::MAX_DISPATCH_COUNT;
use relief_core::{AidPolicy, GeoPoint, SimRng, VolunteerId};
use relief_mobility::Volunteer;

use crate::Shelter;

/// A volunteer count read from user input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DispatchCount {
    /// Volunteers to spawn.
    pub count: u32,
    /// `true` when `count` is the fallback rather than what the user typed.
    pub defaulted: bool,
}

impl DispatchCount {
    /// Read a count the way a browser prompt's `parseInt` would, falling back
    /// to `default` for anything unusable.
    ///
    /// Leading whitespace and an optional sign are accepted, then the leading
    /// run of ASCII digits is read and the rest ignored: `"12abc"` is 12 and
    /// `"3.9"` is 3.  No digits, a value `<= 0`, or a value above
    /// [`MAX_DISPATCH_COUNT`] yields `default`.
    ///
    /// Only decimal is read.  `parseInt("0x10")` would give 16; here the
    /// leading `0` is read, so the input falls back to `default`.
    pub fn parse(raw: &str, default: u32) -> Self {
        let fallback = Self { count: default, defaulted: true };

        let s = raw.trim_start();
        let (negative, s) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let digits_end = s.bytes().take_while(u8::is_ascii_digit).count();
        if digits_end == 0 {
            return fallback;
        }
        let Ok(value) = s[..digits_end].parse::<u32>() else {
            return fallback;
        };
        if negative || value == 0 || value > MAX_DISPATCH_COUNT {
            return fallback;
        }
        Self { count: value, defaulted: false }
    }
}

/// Shelter index assigned to volunteer `index` when there are
/// `shelter_count` shelters.  `shelter_count` must be non-zero.
#[inline]
pub fn round_robin(index: usize, shelter_count: usize) -> usize {
    index % shelter_count
}

/// Spawn `count` volunteers at `depot`, targets assigned round-robin.
///
/// Aid amounts are drawn in volunteer order from `rng`.  Callers must
/// reject an empty `shelters` slice first.
pub(crate) fn spawn_batch(
    count:    u32,
    depot:    GeoPoint,
    shelters: &[Shelter],
    aid:      AidPolicy,
    rng:      &mut SimRng,
) -> Vec<Volunteer> {
    debug_assert!(!shelters.is_empty(), "spawn_batch needs at least one shelter");
    (0..count)
        .map(|i| {
            let shelter = &shelters[round_robin(i as usize, shelters.len())];
            Volunteer::spawn(
                VolunteerId(i),
                depot,
                shelter.id(),
                shelter.location(),
                aid.draw(rng),
            )
        })
        .collect()
}
