//! TIFF image decoder

use std::path::Path;

use super::DecodedImage;

/// Decode a TIFF file
pub(crate) fn decode_tiff<P: AsRef<Path>>(path: P) -> Result<DecodedImage, String> {
    use std::fs::File;
    use std::io::BufReader;

    let file = File::open(path.as_ref()).map_err(|e| format!("Failed to open TIFF file: {}", e))?;

    let mut decoder = tiff::decoder::Decoder::new(BufReader::new(file))
        .map_err(|e| format!("Failed to create TIFF decoder: {}", e))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| format!("Failed to get TIFF dimensions: {}", e))?;

    let color_type = decoder
        .colortype()
        .map_err(|e| format!("Failed to get TIFF color type: {}", e))?;

    let image_data = decoder
        .read_image()
        .map_err(|e| format!("Failed to read TIFF image data: {}", e))?;

    let source_is_grayscale = matches!(color_type, tiff::ColorType::Gray(_));

    // Reduce the sample buffer to 8-bit, then lay it out as interleaved RGB
    let samples = match image_data {
        tiff::decoder::DecodingResult::U8(buf) => buf,
        tiff::decoder::DecodingResult::U16(buf) => buf.iter().map(|&v| (v >> 8) as u8).collect(),
        _ => {
            return Err("Only 8-bit and 16-bit unsigned TIFF formats are supported".to_string());
        }
    };

    let data = layout_tiff_samples(&samples, width, height, color_type)?;

    Ok(DecodedImage {
        width,
        height,
        data,
        channels: 3,
        source_is_grayscale,
    })
}

/// Convert an 8-bit sample buffer to interleaved RGB based on color type
fn layout_tiff_samples(
    samples: &[u8],
    width: u32,
    height: u32,
    color_type: tiff::ColorType,
) -> Result<Vec<u8>, String> {
    let channels: u32 = match color_type {
        tiff::ColorType::Gray(_) => 1,
        tiff::ColorType::RGB(_) => 3,
        tiff::ColorType::RGBA(_) => 4,
        _ => return Err(format!("Unsupported TIFF color type: {:?}", color_type)),
    };

    let expected_len = (width * height * channels) as usize;
    if samples.len() != expected_len {
        return Err(format!(
            "TIFF buffer size mismatch: expected {}, got {}",
            expected_len,
            samples.len()
        ));
    }

    match channels {
        1 => {
            // Grayscale: expand to RGB
            let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
            for &gray in samples {
                rgb_data.push(gray);
                rgb_data.push(gray);
                rgb_data.push(gray);
            }
            Ok(rgb_data)
        }
        4 => {
            // RGBA: drop the alpha channel
            let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
            for rgba in samples.chunks_exact(4) {
                rgb_data.push(rgba[0]);
                rgb_data.push(rgba[1]);
                rgb_data.push(rgba[2]);
            }
            Ok(rgb_data)
        }
        _ => Ok(samples.to_vec()),
    }
}
