//! Image matching pipeline
//!
//! Orchestrates lookup table construction and application for the two
//! supported modes:
//! - direct: remap each source channel through its own table slice
//! - grayscale-routed: remap a triple of the source's grayscale copy through
//!   the color-derived table

mod channels;


pub use channels::{luma_channel, split_channels};

use crate::decoders::DecodedImage;
use crate::lut::build_lookup_table;
use crate::models::MatchOptions;

/// Result of the matching pipeline
pub struct ProcessedImage {
    /// Image width
    pub width: u32,

    /// Image height
    pub height: u32,

    /// Remapped interleaved RGB data (8-bit)
    pub data: Vec<u8>,

    /// Number of channels
    pub channels: u8,
}

/// Match the source image's per-channel distributions to the reference image
///
/// Builds the lookup table from the full pixel arrays of both images, then
/// applies it either directly to the source channels or, when
/// `options.grayscale` is set, to a triple of the source's grayscale copy.
/// The table is always derived from the original color channels.
pub fn match_images(
    source: &DecodedImage,
    reference: &DecodedImage,
    options: &MatchOptions,
) -> Result<ProcessedImage, String> {
    if source.channels != 3 || reference.channels != 3 {
        return Err(format!(
            "Histogram matching requires 3-channel images, got {} and {}",
            source.channels, reference.channels
        ));
    }

    let table = build_lookup_table(source, reference);

    let planes = if options.grayscale {
        let luma = luma_channel(source);
        [luma.clone(), luma.clone(), luma]
    } else {
        split_channels(source)
    };

    let data = table.remap(&planes);

    Ok(ProcessedImage {
        width: source.width,
        height: source.height,
        data,
        channels: 3,
    })
}
