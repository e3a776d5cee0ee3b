//! Pixel-exact cropping to a bounding box.
//!
//! The crop copies whole rows of RGBA bytes out of the source buffer. No
//! resampling or color conversion takes place, so every retained pixel is
//! bit-identical to its source.

use crate::bounds::BoundingBox;
use crate::decode::DecodedImage;

/// Crop an image to `bounds`.
///
/// # Arguments
///
/// * `image` - Source image to crop
/// * `bounds` - Region to keep, with exclusive right/bottom edges
///
/// # Returns
///
/// A new `DecodedImage` of `bounds.width()` x `bounds.height()` pixels.
///
/// # Behavior
///
/// - Edges beyond the image are clamped to the image size
/// - A box covering the whole image returns a copy of the original
pub fn crop_to_bounds(image: &DecodedImage, bounds: &BoundingBox) -> DecodedImage {
    // Fast path: full crop returns a clone
    if bounds.covers(image.width, image.height) {
        return image.clone();
    }

    let right = bounds.right.min(image.width);
    let bottom = bounds.bottom.min(image.height);
    let left = bounds.left.min(right);
    let top = bounds.top.min(bottom);

    let out_width = right - left;
    let out_height = bottom - top;

    let channels = DecodedImage::CHANNELS;
    let row_start = left as usize * channels;
    let row_end = right as usize * channels;

    let mut output = Vec::with_capacity(out_width as usize * out_height as usize * channels);

    // Copy pixel data row by row
    for y in top..bottom {
        output.extend_from_slice(&image.row(y)[row_start..row_end]);
    }

    DecodedImage::new(out_width, out_height, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255 - v]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_full_crop() {
        let img = test_image(100, 100);
        let result = crop_to_bounds(&img, &BoundingBox::new(0, 0, 100, 100));

        assert_eq!(result, img);
    }

    #[test]
    fn test_single_pixel_crop() {
        let img = test_image(10, 10);
        let result = crop_to_bounds(&img, &BoundingBox::new(3, 4, 4, 5));

        assert_eq!(result.dimensions(), (1, 1));
        // Value at (3, 4) = 4 * 10 + 3 = 43
        assert_eq!(result.pixels, vec![43, 43, 43, 255 - 43]);
    }

    #[test]
    fn test_center_crop() {
        let img = test_image(10, 10);
        let result = crop_to_bounds(&img, &BoundingBox::new(2, 2, 8, 8));

        assert_eq!(result.dimensions(), (6, 6));

        // First pixel should be from position (2, 2) in the original
        // Value at (2, 2) = (2 * 10 + 2) % 256 = 22
        assert_eq!(result.pixel(0, 0), img.pixel(2, 2));
        assert_eq!(result.pixels[0], 22);
        assert_eq!(result.pixel(5, 5), img.pixel(7, 7));
    }

    #[test]
    fn test_crop_rectangular() {
        let img = test_image(200, 100);

        // Vertical strip
        let result = crop_to_bounds(&img, &BoundingBox::new(0, 0, 50, 100));
        assert_eq!(result.dimensions(), (50, 100));

        // Horizontal strip along the bottom edge
        let result = crop_to_bounds(&img, &BoundingBox::new(0, 90, 200, 100));
        assert_eq!(result.dimensions(), (200, 10));
        assert_eq!(result.pixel(199, 9), img.pixel(199, 99));
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = test_image(10, 10);
        let result = crop_to_bounds(
            &img,
            &BoundingBox {
                left: 8,
                top: 8,
                right: 20,
                bottom: 20,
            },
        );

        assert_eq!(result.dimensions(), (2, 2));
        assert_eq!(result.pixel(1, 1), img.pixel(9, 9));
    }

    #[test]
    fn test_pixel_data_matches_dimensions() {
        let img = test_image(37, 23);
        let result = crop_to_bounds(&img, &BoundingBox::new(5, 3, 30, 21));

        assert_eq!(result.pixels.len(), 25 * 18 * 4);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
