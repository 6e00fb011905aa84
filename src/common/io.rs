//! # Carrier I/O
//!
//! File and PNG plumbing around the embedding core. Images are always read
//! and written as PNG: the scheme needs exact channel values back, which a
//! lossy format cannot give.

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use crate::processing::{decode, encode, normalize};

/// Read a whole file into memory.
pub fn file_to_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

/// Open a PNG file and normalize it to 8-bit RGBA.
///
/// The format is forced to PNG regardless of the file extension.
pub fn open_image<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let decoded = image::load(BufReader::new(file), ImageFormat::Png)
        .with_context(|| format!("decoding {} as PNG", path.display()))?;
    Ok(normalize(&decoded))
}

/// Write an image as PNG.
pub fn save_image<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))
}

/// Decode PNG bytes into a normalized RGBA image.
pub fn load_image_from_memory(bytes: &[u8]) -> Result<RgbaImage> {
    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
    Ok(normalize(&decoded))
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut output_bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)?;
    Ok(output_bytes)
}

/// Embed `payload` into a PNG cover held in memory.
///
/// # Arguments
/// - `cover_png`: PNG bytes of the cover image (kept by the caller as the key)
/// - `payload`: bytes to hide, at most one per pixel
///
/// # Returns
/// - `Ok(Vec<u8>)`: PNG bytes of the lock image
/// - `Err`: the cover is not a PNG, or the payload does not fit
///
/// # Example
/// ```ignore
/// let cover = std::fs::read("cover.png")?;
/// let lock = embed_bytes(&cover, b"Secret message")?;
/// std::fs::write("lock.png", lock)?;
/// ```
pub fn embed_bytes(cover_png: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    let cover = load_image_from_memory(cover_png)?;
    let lock = encode(&cover, payload)?;
    encode_png(&lock)
}

/// Recover the payload from in-memory PNG lock and key images.
///
/// Trailing zero bytes are trimmed, as with [`decode`].
pub fn extract_bytes(lock_png: &[u8], key_png: &[u8]) -> Result<Vec<u8>> {
    let lock = load_image_from_memory(lock_png)?;
    let key = load_image_from_memory(key_png)?;
    Ok(decode(&lock, &key)?)
}
