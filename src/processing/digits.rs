//! # Digit Triples
//!
//! A payload byte is written as three octal digits, one per color channel.
//! `0o377` (255) is the largest byte, so the leading digit never exceeds 3
//! for a valid triple even though each digit may range over 0..=7.

/// Largest value a single digit (and therefore a channel change) can take.
pub const MAX_DIGIT: u8 = 7;

/// Three base-8 digits of one payload byte, most significant first.
///
/// The digits map onto the red, green and blue channels in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DigitTriple(pub [u8; 3]);

impl DigitTriple {
    /// Digit triple of `byte`, zero-padded to three digits.
    pub fn from_byte(byte: u8) -> Self {
        Self([byte >> 6, (byte >> 3) & 0o7, byte & 0o7])
    }

    /// Reassemble a byte from three measured channel differences.
    ///
    /// Returns `None` when a difference is not an octal digit or the
    /// triple spells a value above 255.
    pub fn from_differences(differences: [u8; 3]) -> Option<Self> {
        if differences.iter().any(|&d| d > MAX_DIGIT) {
            return None;
        }
        let triple = Self(differences);
        if triple.value() > u8::MAX as u16 {
            return None;
        }
        Some(triple)
    }

    /// Numeric value of the triple, which may exceed a byte for
    /// unvalidated digits.
    pub fn value(&self) -> u16 {
        let [high, mid, low] = self.0;
        (high as u16) * 64 + (mid as u16) * 8 + low as u16
    }

    /// The byte this triple encodes.
    pub fn to_byte(&self) -> u8 {
        self.value() as u8
    }

    pub fn digits(&self) -> [u8; 3] {
        self.0
    }
}

/// Add-or-subtract rule for one channel.
///
/// Adds `digit` when the channel is strictly smaller than it, subtracts
/// otherwise. With `digit <= 7` the result always stays inside `0..=255`
/// and differs from `channel` by exactly `digit`.
pub fn choose_direction(channel: u8, digit: u8) -> u8 {
    debug_assert!(digit <= MAX_DIGIT);
    if channel < digit {
        channel + digit
    } else {
        channel - digit
    }
}

/// Magnitude of the change between a lock channel and its key channel.
pub fn channel_difference(lock: u8, key: u8) -> u8 {
    lock.abs_diff(key)
}
