//! # Difference-Based Steganography
//!
//! Hides one payload byte in every pixel of a cover image and recovers it by
//! comparing the resulting lock image against the untouched cover (the key).
//!
//! ## Algorithm
//!
//! ### Encoding Process
//! 1. Check the payload fits: one byte per pixel, `width * height` in total
//! 2. Walk pixels in raster order; pixel `x + y * width` carries payload byte
//!    of the same index, or `0` once the payload is exhausted
//! 3. Split the byte into three octal digits (R, G, B)
//! 4. Move each channel by its digit: add when the channel is smaller than
//!    the digit, subtract otherwise
//! 5. Copy alpha unchanged
//!
//! ### Decoding Process
//! 1. Check lock and key have the same dimensions
//! 2. For every pixel, the absolute R, G, B differences between lock and key
//!    are the three octal digits of the byte
//! 3. Strip trailing zero bytes
//!
//! Unlike LSB embedding nothing is readable from the lock image alone: the
//! key image is part of the decoding contract.
//!
//! ### Trailing zeros
//! Unused pixels encode `0`, so the decoder cannot tell padding from payload
//! bytes that happen to be zero at the end. [`decode`] drops them all;
//! callers that need them must carry the length themselves and use
//! [`decode_exact`].
//!
//! Rows are independent and are processed in parallel on the rayon pool.

use image::RgbaImage;
use log::debug;
use rayon::prelude::*;

use super::digits::{channel_difference, choose_direction, DigitTriple};
use crate::error::{Result, StegoError};

/// Bytes per RGBA pixel in an `RgbaImage` buffer.
const CHANNELS: usize = 4;

/// Maximum number of payload bytes an image of the given size can carry.
pub fn capacity(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Capacity of an already decoded image.
pub fn image_capacity(image: &RgbaImage) -> usize {
    let (width, height) = image.dimensions();
    capacity(width, height)
}

/// Embed `payload` into a copy of `cover`, producing the lock image.
///
/// # Errors
/// [`StegoError::CapacityExceeded`] if the payload has more bytes than the
/// cover has pixels. Nothing is written in that case.
///
/// # Example
/// ```
/// use image::{Rgba, RgbaImage};
///
/// let cover = RgbaImage::from_pixel(4, 4, Rgba([120, 64, 3, 255]));
/// let lock = steganotp::encode(&cover, b"hi").unwrap();
/// assert_eq!(steganotp::decode(&lock, &cover).unwrap(), b"hi");
/// ```
pub fn encode(cover: &RgbaImage, payload: &[u8]) -> Result<RgbaImage> {
    let (width, height) = cover.dimensions();
    let available = capacity(width, height);

    if payload.len() > available {
        return Err(StegoError::CapacityExceeded {
            needed: payload.len(),
            capacity: available,
        });
    }

    debug!(
        "Encoding {} bytes into {}x{} cover (capacity {})",
        payload.len(),
        width,
        height,
        available
    );

    let mut lock = cover.clone();
    if available == 0 {
        return Ok(lock);
    }

    let row_len = width as usize * CHANNELS;
    let pixels: &mut [u8] = &mut lock;

    pixels
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let row_start = y * width as usize;
            for (x, pixel) in row.chunks_exact_mut(CHANNELS).enumerate() {
                let byte = payload.get(row_start + x).copied().unwrap_or(0);
                let DigitTriple(digits) = DigitTriple::from_byte(byte);
                for (channel, digit) in pixel[..3].iter_mut().zip(digits) {
                    *channel = choose_direction(*channel, digit);
                }
            }
        });

    Ok(lock)
}

/// Recover the payload hidden in `lock`, using the original cover as `key`.
///
/// Trailing zero bytes are removed from the result, including zeros that were
/// part of the embedded payload.
///
/// # Errors
/// - [`StegoError::DimensionMismatch`] if the images differ in size
/// - [`StegoError::MalformedPayload`] for the first pixel (in raster order)
///   whose differences are not a valid byte, usually a wrong key
pub fn decode(lock: &RgbaImage, key: &RgbaImage) -> Result<Vec<u8>> {
    let mut payload = recover(lock, key)?;

    let kept = payload.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    payload.truncate(kept);

    debug!("Recovered {} payload bytes after trimming", payload.len());
    Ok(payload)
}

/// Recover exactly the first `len` bytes hidden in `lock`, zeros included.
///
/// # Errors
/// Same as [`decode`], plus [`StegoError::CapacityExceeded`] when `len` is
/// larger than the image can hold.
pub fn decode_exact(lock: &RgbaImage, key: &RgbaImage, len: usize) -> Result<Vec<u8>> {
    check_dimensions(lock, key)?;

    let available = image_capacity(lock);
    if len > available {
        return Err(StegoError::CapacityExceeded {
            needed: len,
            capacity: available,
        });
    }

    let mut payload = recover(lock, key)?;
    payload.truncate(len);
    Ok(payload)
}

fn check_dimensions(lock: &RgbaImage, key: &RgbaImage) -> Result<()> {
    if lock.dimensions() != key.dimensions() {
        return Err(StegoError::DimensionMismatch {
            lock: lock.dimensions(),
            key: key.dimensions(),
        });
    }
    Ok(())
}

/// Decode every pixel, one byte each, without trimming.
fn recover(lock: &RgbaImage, key: &RgbaImage) -> Result<Vec<u8>> {
    check_dimensions(lock, key)?;

    let (width, height) = lock.dimensions();
    let mut payload = vec![0u8; capacity(width, height)];
    if payload.is_empty() {
        return Ok(payload);
    }

    debug!("Decoding {}x{} lock image", width, height);

    let row_len = width as usize * CHANNELS;
    let rows: Vec<Result<()>> = payload
        .par_chunks_mut(width as usize)
        .zip(lock.as_raw().par_chunks(row_len))
        .zip(key.as_raw().par_chunks(row_len))
        .enumerate()
        .map(|(y, ((out, lock_row), key_row))| decode_row(y as u32, out, lock_row, key_row))
        .collect();

    // Rows come back in order, so the reported error is the first in raster order.
    rows.into_iter().collect::<Result<()>>()?;

    Ok(payload)
}

fn decode_row(y: u32, out: &mut [u8], lock_row: &[u8], key_row: &[u8]) -> Result<()> {
    let pixels = lock_row
        .chunks_exact(CHANNELS)
        .zip(key_row.chunks_exact(CHANNELS));

    for (x, (byte, (lock_px, key_px))) in out.iter_mut().zip(pixels).enumerate() {
        let differences = [0, 1, 2].map(|c| channel_difference(lock_px[c], key_px[c]));
        let triple = DigitTriple::from_differences(differences).ok_or(
            StegoError::MalformedPayload {
                x: x as u32,
                y,
                differences,
            },
        )?;
        *byte = triple.to_byte();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([
                (x * 37 % 256) as u8,
                (y * 91 % 256) as u8,
                ((x + y) * 13 % 256) as u8,
                200,
            ])
        })
    }

    #[test]
    fn test_capacity() {
        assert_eq!(capacity(0, 0), 0);
        assert_eq!(capacity(2, 1), 2);
        assert_eq!(capacity(640, 480), 307_200);
        assert_eq!(capacity(u32::MAX, 2), u32::MAX as usize * 2);
        assert_eq!(image_capacity(&gradient(7, 3)), 21);
    }

    #[test]
    fn test_concrete_two_pixel_scenario() {
        let mut cover = RgbaImage::new(2, 1);
        cover.put_pixel(0, 0, Rgba([10, 10, 10, 255]));
        cover.put_pixel(1, 0, Rgba([200, 200, 200, 255]));

        let lock = encode(&cover, &[0o007, 0o170]).unwrap();

        // digits 0,0,7: every channel is >= its digit, so all subtract
        assert_eq!(*lock.get_pixel(0, 0), Rgba([10, 10, 3, 255]));
        // digits 1,7,0
        assert_eq!(*lock.get_pixel(1, 0), Rgba([199, 193, 200, 255]));

        assert_eq!(decode(&lock, &cover).unwrap(), vec![7, 120]);
    }

    #[test]
    fn test_add_branch_on_dark_pixels() {
        let cover = RgbaImage::from_pixel(1, 1, Rgba([0, 3, 7, 9]));
        // 0o377 -> digits 3,7,7
        let lock = encode(&cover, &[255]).unwrap();
        assert_eq!(*lock.get_pixel(0, 0), Rgba([3, 10, 0, 9]));
        assert_eq!(decode(&lock, &cover).unwrap(), vec![255]);
    }

    #[test]
    fn test_capacity_boundary() {
        let cover = gradient(3, 2);
        assert!(encode(&cover, &[1; 6]).is_ok());
        assert_eq!(
            encode(&cover, &[1; 7]),
            Err(StegoError::CapacityExceeded {
                needed: 7,
                capacity: 6
            })
        );
    }

    #[test]
    fn test_empty_payload_leaves_cover_untouched() {
        let cover = gradient(5, 4);
        let lock = encode(&cover, &[]).unwrap();
        assert_eq!(lock, cover);
        assert!(decode(&lock, &cover).unwrap().is_empty());
    }

    #[test]
    fn test_zero_sized_image() {
        let cover = RgbaImage::new(0, 0);
        assert!(encode(&cover, &[]).unwrap().is_empty());
        assert!(matches!(
            encode(&cover, b"x"),
            Err(StegoError::CapacityExceeded { needed: 1, capacity: 0 })
        ));
        assert!(decode(&cover, &cover).unwrap().is_empty());
    }

    #[test]
    fn test_trailing_zeros_are_trimmed() {
        let cover = gradient(3, 1);
        let lock = encode(&cover, &[0x41, 0x00, 0x00]).unwrap();
        assert_eq!(decode(&lock, &cover).unwrap(), vec![0x41]);
        assert_eq!(
            decode_exact(&lock, &cover, 3).unwrap(),
            vec![0x41, 0x00, 0x00]
        );
    }

    #[test]
    fn test_inner_zeros_survive() {
        let cover = gradient(4, 4);
        let payload = [0, 0, 5, 0, 9];
        let lock = encode(&cover, &payload).unwrap();
        assert_eq!(decode(&lock, &cover).unwrap(), payload);
    }

    #[test]
    fn test_decode_exact_rejects_length_beyond_capacity() {
        let cover = gradient(2, 2);
        let lock = encode(&cover, b"ab").unwrap();
        assert_eq!(decode_exact(&lock, &cover, 4).unwrap(), b"ab\0\0");
        assert!(matches!(
            decode_exact(&lock, &cover, 5),
            Err(StegoError::CapacityExceeded { needed: 5, capacity: 4 })
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let lock = gradient(4, 3);
        let key = gradient(3, 4);
        assert_eq!(
            decode(&lock, &key),
            Err(StegoError::DimensionMismatch {
                lock: (4, 3),
                key: (3, 4)
            })
        );
        assert!(matches!(
            decode_exact(&lock, &key, 100),
            Err(StegoError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_wrong_key_is_malformed() {
        let cover = gradient(4, 2);
        let lock = encode(&cover, b"secret").unwrap();

        let mut wrong_key = cover.clone();
        let Rgba([r, g, b, a]) = *wrong_key.get_pixel(2, 1);
        wrong_key.put_pixel(2, 1, Rgba([r.wrapping_add(100), g, b, a]));

        assert!(matches!(
            decode(&lock, &wrong_key),
            Err(StegoError::MalformedPayload { x: 2, y: 1, .. })
        ));
    }

    #[test]
    fn test_first_malformed_pixel_in_raster_order_is_reported() {
        let key = RgbaImage::from_pixel(3, 3, Rgba([100, 100, 100, 255]));
        let mut lock = key.clone();
        lock.put_pixel(0, 2, Rgba([150, 100, 100, 255]));
        lock.put_pixel(2, 1, Rgba([100, 100, 50, 255]));
        // 0o400 is out of byte range even though every digit is octal
        lock.put_pixel(1, 1, Rgba([104, 100, 100, 255]));

        assert_eq!(
            decode(&lock, &key),
            Err(StegoError::MalformedPayload {
                x: 1,
                y: 1,
                differences: [4, 0, 0]
            })
        );
    }

    #[test]
    fn test_change_bounded_and_alpha_preserved() {
        let cover = gradient(16, 16);
        let payload: Vec<u8> = (0..=255).collect();
        let lock = encode(&cover, &payload).unwrap();

        for (cover_px, lock_px) in cover.pixels().zip(lock.pixels()) {
            for c in 0..3 {
                assert!(channel_difference(cover_px[c], lock_px[c]) <= 7);
            }
            assert_eq!(cover_px[3], lock_px[3]);
        }
    }

    #[test]
    fn test_deterministic() {
        let cover = gradient(9, 7);
        let payload = b"the same bytes every time";
        let first = encode(&cover, payload).unwrap();
        let second = encode(&cover, payload).unwrap();
        assert_eq!(first.as_raw(), second.as_raw());
        assert_eq!(
            decode(&first, &cover).unwrap(),
            decode(&second, &cover).unwrap()
        );
    }
}
