//! Image transformation operations.
//!
//! # Coordinate System
//!
//! - Crop regions are integer pixel rectangles from [`crate::bounds`]
//! - Right and bottom edges are exclusive
//! - Origin is top-left corner

mod crop;

pub use crop::crop_to_bounds;
