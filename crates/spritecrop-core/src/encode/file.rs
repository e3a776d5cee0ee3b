//! Writing decoded images back to disk.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ExtendedColorType, ImageFormat};

use super::png::{encode_png, validate_rgba};
use super::EncodeError;
use crate::decode::DecodedImage;

/// Encode an image in the given container format.
///
/// PNG goes through [`encode_png`] with optimized settings; any other format
/// uses the `image` crate's default encoder for it. Formats that cannot
/// store RGBA8 report `EncodeError::EncodingFailed`.
pub fn encode_image(image: &DecodedImage, format: ImageFormat) -> Result<Vec<u8>, EncodeError> {
    if format == ImageFormat::Png {
        return encode_png(&image.pixels, image.width, image.height);
    }

    validate_rgba(&image.pixels, image.width, image.height)?;

    let mut buffer = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut buffer,
        &image.pixels,
        image.width,
        image.height,
        ExtendedColorType::Rgba8,
        format,
    )
    .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode `image` and write it to `path`, creating missing parent directories.
///
/// The image is fully encoded in memory before the destination is opened, so
/// an encoding failure never truncates an existing file.
pub fn save(image: &DecodedImage, path: &Path, format: ImageFormat) -> Result<(), EncodeError> {
    let bytes = encode_image(image, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| EncodeError::Io(e.to_string()))?;
    }
    fs::write(path, &bytes).map_err(|e| EncodeError::Io(e.to_string()))?;

    log::debug!(
        "Wrote {} ({}x{}, {} bytes)",
        path.display(),
        image.width,
        image.height,
        bytes.len()
    );
    Ok(())
}
