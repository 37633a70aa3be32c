//! Image exporters for PNG and TIFF output
//!
//! Matched images are written as interleaved 8-bit RGB, with the format
//! chosen from the output file extension.

use std::path::Path;

use crate::pipeline::ProcessedImage;

/// Export a processed image, choosing the format from the file extension
pub fn export_image<P: AsRef<Path>>(image: &ProcessedImage, path: P) -> Result<(), String> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| "No file extension found".to_string())?;

    match extension.as_str() {
        "png" => export_png(image, path),
        "tif" | "tiff" => export_tiff8(image, path),
        _ => Err(format!("Unsupported output format: {}", extension)),
    }
}

/// Export a processed image to 8-bit RGB PNG
pub fn export_png<P: AsRef<Path>>(image: &ProcessedImage, path: P) -> Result<(), String> {
    use std::fs::File;
    use std::io::BufWriter;

    if image.channels != 3 {
        return Err(format!(
            "PNG export only supports 3-channel RGB, got {} channels",
            image.channels
        ));
    }

    let file =
        File::create(path.as_ref()).map_err(|e| format!("Failed to create PNG file: {}", e))?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width, image.height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| format!("Failed to write PNG header: {}", e))?;
    png_writer
        .write_image_data(&image.data)
        .map_err(|e| format!("Failed to write PNG image: {}", e))?;

    Ok(())
}

/// Export a processed image to 8-bit RGB TIFF
pub fn export_tiff8<P: AsRef<Path>>(image: &ProcessedImage, path: P) -> Result<(), String> {
    use std::fs::File;
    use std::io::BufWriter;

    if image.channels != 3 {
        return Err(format!(
            "TIFF export only supports 3-channel RGB, got {} channels",
            image.channels
        ));
    }

    let file =
        File::create(path.as_ref()).map_err(|e| format!("Failed to create TIFF file: {}", e))?;
    let writer = BufWriter::new(file);

    let mut encoder = tiff::encoder::TiffEncoder::new(writer)
        .map_err(|e| format!("Failed to create TIFF encoder: {}", e))?;

    encoder
        .write_image::<tiff::encoder::colortype::RGB8>(image.width, image.height, &image.data)
        .map_err(|e| format!("Failed to write TIFF image: {}", e))?;

    Ok(())
}
