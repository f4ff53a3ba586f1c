//! Typed identifiers.
//!
//! `ShelterId` and `VolunteerId` are dense indices: shelters in placement
//! order, volunteers in spawn order within their batch.  Index with
//! `.index()` rather than `id.0 as usize`.

use std::fmt;

/// Generate a `Copy` newtype over an integer with a short display label.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of a shelter in placement order.
    pub struct ShelterId(u32) => "shelter";
}

typed_id! {
    /// Index of a volunteer within its dispatch batch.
    pub struct VolunteerId(u32) => "volunteer";
}

typed_id! {
    /// Generation number of a dispatch batch.  `BatchId(0)` means nothing
    /// has been dispatched; the first accepted dispatch is `BatchId(1)`.
    pub struct BatchId(u64) => "batch";
}

impl BatchId {
    /// The generation that follows `self`.
    #[inline]
    pub fn next(self) -> BatchId {
        BatchId(self.0 + 1)
    }
}
