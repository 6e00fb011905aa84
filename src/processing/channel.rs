//! # Channel Normalization
//!
//! Decoded images can carry 16-bit channels. An 8-bit value `v` expands to
//! `v * 257` in 16 bits, so dividing by the same factor recovers it exactly.
//! Every pixel handed to the encoder or decoder goes through here first.

use image::{DynamicImage, Rgba, RgbaImage};

/// Multiplier that maps an 8-bit channel onto the full 16-bit range.
pub const EXPANSION_FACTOR: u16 = 257;

/// Reduce a 16-bit channel value to 8 bits.
pub fn narrow_channel(value: u16) -> u8 {
    (value / EXPANSION_FACTOR) as u8
}

/// Convert any decoded image into an 8-bit RGBA grid.
///
/// 8-bit sources are expanded to RGBA without touching channel values.
/// 16-bit sources are narrowed with [`narrow_channel`], which differs from
/// the rounding the `image` crate applies in `to_rgba8`.
pub fn normalize(image: &DynamicImage) -> RgbaImage {
    match image {
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => {
            let wide = image.to_rgba16();
            RgbaImage::from_fn(wide.width(), wide.height(), |x, y| {
                let Rgba(channels) = *wide.get_pixel(x, y);
                Rgba(channels.map(narrow_channel))
            })
        }
        _ => image.to_rgba8(),
    }
}
