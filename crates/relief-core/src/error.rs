//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `From`.

use thiserror::Error;

use crate::{GeoPoint, ShelterId};

/// The top-level error type for `relief-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("shelter {0} not found")]
    ShelterNotFound(ShelterId),

    #[error("location {0} is not a finite coordinate")]
    NonFiniteLocation(GeoPoint),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `relief-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
