//! Reading image files into RGBA pixel buffers.
//!
//! Every source is converted to RGBA8 regardless of its stored color type, so
//! formats without an alpha channel decode as fully opaque.

use std::fs;
use std::io::{Cursor, ErrorKind};
use std::path::Path;

use image::{ImageError, ImageFormat, ImageReader};

use super::{DecodeError, DecodedFile, DecodedImage};

/// Read and decode the image file at `path`.
///
/// The file is read into memory in one call and the handle is released
/// before decoding starts. The container format is sniffed from the file
/// contents, falling back to the file extension.
///
/// # Errors
///
/// Returns `DecodeError::Io` if the file cannot be read,
/// `DecodeError::UnsupportedFormat` if the format is not recognized, and
/// `DecodeError::CorruptedFile` if decoding fails.
pub fn open(path: &Path) -> Result<DecodedFile, DecodeError> {
    let bytes = fs::read(path).map_err(|e| DecodeError::Io(e.to_string()))?;
    let hint = ImageFormat::from_path(path).ok();
    let decoded = decode_bytes(&bytes, hint)?;

    log::debug!(
        "Decoded {} ({}x{}, {:?})",
        path.display(),
        decoded.image.width,
        decoded.image.height,
        decoded.format
    );
    Ok(decoded)
}

/// Decode an in-memory image file.
///
/// `hint` is used only when the format cannot be detected from the bytes.
pub fn decode_bytes(bytes: &[u8], hint: Option<ImageFormat>) -> Result<DecodedFile, DecodeError> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        match hint {
            Some(format) => reader.set_format(format),
            None => return Err(DecodeError::UnsupportedFormat),
        }
    }
    let format = reader.format().ok_or(DecodeError::UnsupportedFormat)?;

    let img = reader.decode().map_err(map_image_error)?;

    Ok(DecodedFile {
        image: DecodedImage::from_rgba_image(img.into_rgba8()),
        format,
    })
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::UnsupportedFormat,
        ImageError::IoError(e) if e.kind() != ErrorKind::UnexpectedEof => {
            DecodeError::Io(e.to_string())
        }
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    // Minimal valid JPEG bytes (1x1 pixel)
    const MINIMAL_JPEG: &[u8] = &[
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xDB, 0x00, 0x43, 0x00, 0x08, 0x06, 0x06, 0x07, 0x06,
        0x05, 0x08, 0x07, 0x07, 0x07, 0x09, 0x09, 0x08, 0x0A, 0x0C, 0x14, 0x0D, 0x0C, 0x0B, 0x0B,
        0x0C, 0x19, 0x12, 0x13, 0x0F, 0x14, 0x1D, 0x1A, 0x1F, 0x1E, 0x1D, 0x1A, 0x1C, 0x1C, 0x20,
        0x24, 0x2E, 0x27, 0x20, 0x22, 0x2C, 0x23, 0x1C, 0x1C, 0x28, 0x37, 0x29, 0x2C, 0x30, 0x31,
        0x34, 0x34, 0x34, 0x1F, 0x27, 0x39, 0x3D, 0x38, 0x32, 0x3C, 0x2E, 0x33, 0x34, 0x32, 0xFF,
        0xC0, 0x00, 0x0B, 0x08, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01, 0x11, 0x00, 0xFF, 0xC4, 0x00,
        0x1F, 0x00, 0x00, 0x01, 0x05, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
        0xFF, 0xC4, 0x00, 0xB5, 0x10, 0x00, 0x02, 0x01, 0x03, 0x03, 0x02, 0x04, 0x03, 0x05, 0x05,
        0x04, 0x04, 0x00, 0x00, 0x01, 0x7D, 0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21,
        0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07, 0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08,
        0x23, 0x42, 0xB1, 0xC1, 0x15, 0x52, 0xD1, 0xF0, 0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A,
        0x16, 0x17, 0x18, 0x19, 0x1A, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x34, 0x35, 0x36, 0x37,
        0x38, 0x39, 0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4A, 0x53, 0x54, 0x55, 0x56,
        0x57, 0x58, 0x59, 0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6A, 0x73, 0x74, 0x75,
        0x76, 0x77, 0x78, 0x79, 0x7A, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8A, 0x92, 0x93,
        0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9,
        0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6,
        0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2,
        0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7,
        0xF8, 0xF9, 0xFA, 0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00, 0xFB, 0xD5,
        0xDB, 0x20, 0xA8, 0xF1, 0x7E, 0xFF, 0xD9,
    ];

    fn png_bytes(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
        let mut buffer = Vec::new();
        PngEncoder::new(&mut buffer)
            .write_image(pixels, width, height, ExtendedColorType::Rgba8)
            .unwrap();
        buffer
    }

    #[test]
    fn test_decode_png_keeps_alpha() {
        let pixels = [10, 20, 30, 0, 40, 50, 60, 128];
        let bytes = png_bytes(2, 1, &pixels);

        let decoded = decode_bytes(&bytes, None).unwrap();
        assert_eq!(decoded.format, ImageFormat::Png);
        assert_eq!(decoded.image.dimensions(), (2, 1));
        assert_eq!(decoded.image.pixels, pixels.to_vec());
    }

    #[test]
    fn test_decode_jpeg_is_opaque() {
        let decoded = decode_bytes(MINIMAL_JPEG, None).unwrap();
        assert_eq!(decoded.format, ImageFormat::Jpeg);
        assert_eq!(decoded.image.dimensions(), (1, 1));
        assert_eq!(decoded.image.pixels.len(), 4); // 1x1 RGBA = 4 bytes
        assert_eq!(decoded.image.alpha(0, 0), 255);
    }

    #[test]
    fn test_decode_unknown_bytes() {
        let result = decode_bytes(&[0x00, 0x01, 0x02, 0x03], None);
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_bytes(&[], None).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(4, 4, &[255u8; 4 * 4 * 4]);
        let truncated = &bytes[..bytes.len() / 2];

        assert!(decode_bytes(truncated, None).is_err());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = open(&dir.path().join("missing.png"));
        assert!(matches!(result, Err(DecodeError::Io(_))));
    }

    #[test]
    fn test_open_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.png");
        fs::write(&path, png_bytes(1, 1, &[1, 2, 3, 4])).unwrap();

        let decoded = open(&path).unwrap();
        assert_eq!(decoded.image.pixel(0, 0), [1, 2, 3, 4]);
    }
}
