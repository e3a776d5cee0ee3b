//! Spritecrop Core - transparent border removal for sprite images
//!
//! This crate finds the tight bounding box of the visible pixels in an
//! image and crops the image to it, optionally backing up the original.
//!
//! # Module Structure
//!
//! - `bounds` - Alpha-threshold content detection
//! - `transform` - Pixel-exact cropping
//! - `process` - Per-image pipeline, outcomes and statistics
//! - `backup` - `_original` backup files
//! - `decode` / `encode` - File I/O through the `image` crate

pub mod backup;
pub mod bounds;
pub mod decode;
pub mod encode;
pub mod process;
pub mod transform;

pub use bounds::{detect_bounds, AlphaThreshold, BoundingBox, Margins};
pub use decode::{DecodeError, DecodedFile, DecodedImage};
pub use encode::EncodeError;
pub use process::{
    classify, inspect, process_one, CropError, CropOptions, CropOutcome, CropPlan, CropResult,
    Inspection, Savings,
};
pub use transform::crop_to_bounds;
