use relief_core::{BatchId, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Shown to the user verbatim when they press dispatch on an empty map.
    #[error("Please add at least one shelter by clicking on the map.")]
    NoShelters,

    #[error("cannot dispatch {requested} volunteers; at most {max} per batch")]
    BatchTooLarge { requested: u32, max: u32 },

    #[error("no dispatch batch is active")]
    NoActiveBatch,

    #[error("{batch} still has {in_transit} volunteer(s) in transit after {limit} ticks")]
    TickLimitExceeded {
        batch:      BatchId,
        limit:      u64,
        in_transit: usize,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
