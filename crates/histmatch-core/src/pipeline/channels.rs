//! Channel plane helpers
//!
//! Extraction of per-channel planes and the grayscale copy used by the
//! grayscale-routed mode.

use crate::decoders::DecodedImage;

/// Split interleaved RGB data into three channel planes
pub fn split_channels(image: &DecodedImage) -> [Vec<u8>; 3] {
    let pixel_count = (image.width * image.height) as usize;
    let ch = image.channels as usize;

    let mut planes = [
        Vec::with_capacity(pixel_count),
        Vec::with_capacity(pixel_count),
        Vec::with_capacity(pixel_count),
    ];

    for pixel in image.data.chunks_exact(ch) {
        planes[0].push(pixel[0]);
        planes[1].push(pixel[1]);
        planes[2].push(pixel[2]);
    }

    planes
}

/// Convert the image to a single grayscale plane
///
/// Uses Rec.601 luma weights, rounded to the nearest integer.
pub fn luma_channel(image: &DecodedImage) -> Vec<u8> {
    let ch = image.channels as usize;

    image
        .data
        .chunks_exact(ch)
        .map(|pixel| {
            let luma =
                0.299 * pixel[0] as f32 + 0.587 * pixel[1] as f32 + 0.114 * pixel[2] as f32;
            luma.round().clamp(0.0, 255.0) as u8
        })
        .collect()
}
