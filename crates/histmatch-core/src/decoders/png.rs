//! PNG image decoder

use std::path::Path;

use super::DecodedImage;

/// Decode a PNG file
pub(crate) fn decode_png<P: AsRef<Path>>(path: P) -> Result<DecodedImage, String> {
    use std::fs::File;
    use std::io::BufReader;

    let file = File::open(path.as_ref()).map_err(|e| format!("Failed to open PNG file: {}", e))?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .map_err(|e| format!("Failed to read PNG info: {}", e))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    // Allocate buffer for image data
    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| "Failed to determine PNG buffer size".to_string())?;
    let mut buf = vec![0u8; buffer_size];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| format!("Failed to read PNG frame: {}", e))?;

    // Get the actual bytes used
    let bytes = &buf[..frame_info.buffer_size()];

    let source_is_grayscale = matches!(color_type, png::ColorType::Grayscale);

    // Convert to interleaved 8-bit RGB
    let data = match (color_type, bit_depth) {
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            decode_png_gray8(bytes, width, height)?
        }
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => {
            decode_png_gray16(bytes, width, height)?
        }
        (png::ColorType::Rgb, png::BitDepth::Eight) => decode_png_rgb8(bytes, width, height)?,
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => decode_png_rgb16(bytes, width, height)?,
        (png::ColorType::Rgba, png::BitDepth::Eight) => decode_png_rgba8(bytes, width, height)?,
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => decode_png_rgba16(bytes, width, height)?,
        (png::ColorType::GrayscaleAlpha, _) => {
            return Err("Grayscale+Alpha PNG not supported".to_string());
        }
        (png::ColorType::Indexed, _) => {
            return Err("Indexed PNG not supported".to_string());
        }
        _ => {
            return Err(format!(
                "Unsupported PNG format: {:?} with bit depth {:?}",
                color_type, bit_depth
            ));
        }
    };

    Ok(DecodedImage {
        width,
        height,
        data,
        channels: 3,
        source_is_grayscale,
    })
}

/// Decode 8-bit grayscale PNG, expanding to RGB
fn decode_png_gray8(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let expected_len = (width * height) as usize;
    if bytes.len() != expected_len {
        return Err(format!(
            "PNG buffer size mismatch: expected {}, got {}",
            expected_len,
            bytes.len()
        ));
    }

    let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
    for &gray in bytes {
        rgb_data.push(gray);
        rgb_data.push(gray);
        rgb_data.push(gray);
    }

    Ok(rgb_data)
}

/// Decode 16-bit grayscale PNG, expanding to RGB
fn decode_png_gray16(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let expected_len = (width * height * 2) as usize;
    if bytes.len() != expected_len {
        return Err(format!(
            "PNG buffer size mismatch: expected {}, got {}",
            expected_len,
            bytes.len()
        ));
    }

    // PNG 16-bit is big-endian; keep the high byte
    let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
    for chunk in bytes.chunks_exact(2) {
        let gray = chunk[0];
        rgb_data.push(gray);
        rgb_data.push(gray);
        rgb_data.push(gray);
    }

    Ok(rgb_data)
}

/// Decode 8-bit RGB PNG
fn decode_png_rgb8(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let expected_len = (width * height * 3) as usize;
    if bytes.len() != expected_len {
        return Err(format!(
            "PNG buffer size mismatch: expected {}, got {}",
            expected_len,
            bytes.len()
        ));
    }

    Ok(bytes.to_vec())
}

/// Decode 16-bit RGB PNG
fn decode_png_rgb16(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let expected_len = (width * height * 3 * 2) as usize;
    if bytes.len() != expected_len {
        return Err(format!(
            "PNG buffer size mismatch: expected {}, got {}",
            expected_len,
            bytes.len()
        ));
    }

    // PNG 16-bit is big-endian; keep the high byte
    let data: Vec<u8> = bytes.chunks_exact(2).map(|chunk| chunk[0]).collect();
    Ok(data)
}

/// Decode 8-bit RGBA PNG (drop alpha)
fn decode_png_rgba8(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let expected_len = (width * height * 4) as usize;
    if bytes.len() != expected_len {
        return Err(format!(
            "PNG buffer size mismatch: expected {}, got {}",
            expected_len,
            bytes.len()
        ));
    }

    let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
    for rgba in bytes.chunks_exact(4) {
        rgb_data.push(rgba[0]);
        rgb_data.push(rgba[1]);
        rgb_data.push(rgba[2]);
    }

    Ok(rgb_data)
}

/// Decode 16-bit RGBA PNG (drop alpha)
fn decode_png_rgba16(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let expected_len = (width * height * 4 * 2) as usize;
    if bytes.len() != expected_len {
        return Err(format!(
            "PNG buffer size mismatch: expected {}, got {}",
            expected_len,
            bytes.len()
        ));
    }

    // PNG 16-bit is big-endian; keep the high byte of R, G, B and skip alpha
    let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
    for rgba in bytes.chunks_exact(8) {
        rgb_data.push(rgba[0]);
        rgb_data.push(rgba[2]);
        rgb_data.push(rgba[4]);
    }

    Ok(rgb_data)
}
