//! # Image Processing and Steganography
//!
//! This module hides payload bytes in images by nudging color channels and
//! recovers them by diffing the result against the original cover.

pub mod channel;
pub mod digits;
pub mod steganography;

// Re-export main functions for convenience
pub use channel::{narrow_channel, normalize, EXPANSION_FACTOR};
pub use digits::{channel_difference, choose_direction, DigitTriple};
pub use steganography::{capacity, decode, decode_exact, encode, image_capacity};
