//! Image decoders for PNG and TIFF input
//!
//! Every input is normalized to interleaved 8-bit RGB: grayscale sources are
//! expanded to three channels, alpha channels are dropped, and 16-bit samples
//! are reduced to their high byte.

mod png;
mod tiff;


use std::path::Path;

/// Decoded image data
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Interleaved RGB data (8-bit)
    pub data: Vec<u8>,

    /// Number of channels (always 3 after decoding)
    pub channels: u8,

    /// Whether the source file was grayscale before expansion to RGB
    pub source_is_grayscale: bool,
}

/// Decode an image from a file path
///
/// The format is chosen from the file extension.
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<DecodedImage, String> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| "No file extension found".to_string())?;

    match extension.as_str() {
        "png" => png::decode_png(path),
        "tif" | "tiff" => tiff::decode_tiff(path),
        _ => Err(format!("Unsupported file format: {}", extension)),
    }
}
