//! Image encoding for spritecrop.
//!
//! This module provides functionality for:
//! - Encoding RGBA images to PNG with lossless, size-optimized settings
//! - Writing a cropped image back in its source format
//!
//! # Examples
//!
//! ```ignore
//! use spritecrop_core::encode::encode_png;
//!
//! let pixels = vec![0u8; 32 * 32 * 4]; // Transparent image
//! let png_bytes = encode_png(&pixels, 32, 32).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod file;
mod png;

pub use file::{encode_image, save};
pub use png::{encode_png, EncodeError};
