//! Image decoding for spritecrop.
//!
//! Files are decoded with the `image` crate and normalized to RGBA8 so that
//! bounds detection can read the alpha channel of any supported format.
//!
//! # Examples
//!
//! ```ignore
//! use spritecrop_core::decode;
//!
//! let file = decode::open(Path::new("hero.png")).unwrap();
//! println!("Decoded {}x{} {:?}", file.image.width, file.image.height, file.format);
//! ```

mod file;
mod types;

pub use file::{decode_bytes, open};
pub use types::{DecodeError, DecodedFile, DecodedImage};
