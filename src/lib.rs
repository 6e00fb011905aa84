//! # steganotp
//!
//! Hides a byte sequence in a lossless image by nudging each pixel's color
//! channels, and recovers it by comparing the result (the "lock") against
//! the untouched cover image (the "key").
//!
//! Every pixel carries one byte, written as three octal digits on the R, G
//! and B channels. Without the key image the lock reveals nothing.
//!
//! ## Modules
//!
//! - [`processing`]: capacity, encoder, decoder and their pixel arithmetic
//! - [`common`]: configuration and PNG/file I/O
//! - [`error`]: failure kinds of the core

pub mod common;
pub mod error;
pub mod processing;

pub use error::StegoError;
pub use processing::{capacity, decode, decode_exact, encode, image_capacity};
