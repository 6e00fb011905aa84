//! # Error Types
//!
//! Failure modes of the embedding core. Each kind is a separate variant so
//! callers can tell an oversize payload from a wrong key.

use thiserror::Error;

/// Errors returned by [`encode`](crate::encode), [`decode`](crate::decode)
/// and [`decode_exact`](crate::decode_exact).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// The payload holds more bytes than the image has pixels.
    #[error("image too small for payload: need {needed} bytes, capacity is {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    /// Lock and key images have different dimensions.
    #[error(
        "image sizes mismatch: lock is {}x{}, key is {}x{}; this key cannot be for this lock",
        .lock.0, .lock.1, .key.0, .key.1
    )]
    DimensionMismatch { lock: (u32, u32), key: (u32, u32) },

    /// A pixel's channel differences do not form a valid digit triple.
    #[error(
        "malformed payload at pixel ({x}, {y}): channel differences {differences:?} are not a valid byte"
    )]
    MalformedPayload {
        x: u32,
        y: u32,
        differences: [u8; 3],
    },
}

pub type Result<T> = std::result::Result<T, StegoError>;
