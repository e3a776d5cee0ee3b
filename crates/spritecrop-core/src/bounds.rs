//! Detection of the visible content rectangle of an RGBA image.
//!
//! A pixel is *visible* when its alpha value is strictly greater than the
//! configured [`AlphaThreshold`]. The detector returns the smallest
//! rectangle containing every visible pixel, or `None` when there are none.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - `right` and `bottom` are exclusive, so a box can be passed straight to
//!   a crop and `right - left` is the cropped width

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decode::DecodedImage;

/// Alpha cutoff for visible pixels.
///
/// Values outside 0-255 are compared literally: a negative threshold makes
/// every pixel visible and 255 or above makes none visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlphaThreshold(pub i32);

impl AlphaThreshold {
    pub const DEFAULT: AlphaThreshold = AlphaThreshold(10);

    /// Whether a pixel with this alpha value counts as visible.
    #[inline]
    pub fn is_visible(self, alpha: u8) -> bool {
        i32::from(alpha) > self.0
    }
}

impl Default for AlphaThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Pixel rectangle with exclusive right/bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        debug_assert!(left < right && top < bottom, "Degenerate bounding box");
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// True if the box is non-empty and lies within a `width` x `height` image.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.left < self.right
            && self.right <= width
            && self.top < self.bottom
            && self.bottom <= height
    }

    /// True if the box spans an entire `width` x `height` image.
    pub fn covers(&self, width: u32, height: u32) -> bool {
        self.left == 0 && self.top == 0 && self.right == width && self.bottom == height
    }

    /// True if `(x, y)` lies inside the box.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.left..self.right).contains(&x) && (self.top..self.bottom).contains(&y)
    }

    /// Size of the empty border between the box and each image edge.
    pub fn margins(&self, width: u32, height: u32) -> Margins {
        Margins {
            left: self.left,
            top: self.top,
            right: width.saturating_sub(self.right),
            bottom: height.saturating_sub(self.bottom),
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "left={}, top={}, right={}, bottom={}",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Transparent border widths, in pixels, on each side of the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl fmt::Display for Margins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L={}px T={}px R={}px B={}px",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Find the tight bounding box of all pixels with alpha above `threshold`.
///
/// Returns `None` if no pixel qualifies, which includes zero-sized images.
/// A box equal to the full image is a normal result and distinct from `None`.
///
/// # Performance
///
/// Single pass over the pixel buffer, O(width * height) time and constant
/// extra memory. Each row is searched from both ends, so only the first
/// and last visible pixel of a row are compared against the running box.
pub fn detect_bounds(image: &DecodedImage, threshold: AlphaThreshold) -> Option<BoundingBox> {
    if image.is_empty() {
        return None;
    }

    let mut left = image.width;
    let mut top = image.height;
    let mut right = 0u32;
    let mut bottom = 0u32;
    let mut found = false;

    for y in 0..image.height {
        let mut alphas = image
            .row(y)
            .chunks_exact(DecodedImage::CHANNELS)
            .map(|px| px[3]);

        let Some(first) = alphas.position(|a| threshold.is_visible(a)) else {
            continue;
        };
        // `position` consumed the iterator up to and including `first`.
        let last = alphas
            .rposition(|a| threshold.is_visible(a))
            .map_or(first, |offset| first + 1 + offset);

        found = true;
        left = left.min(first as u32);
        right = right.max(last as u32 + 1);
        top = top.min(y);
        bottom = bottom.max(y + 1);
    }

    found.then(|| BoundingBox::new(left, top, right, bottom))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
