//! Pure domain types with minimal dependencies
//!
//! Types here know nothing about tiny-skia, SVG or the filesystem.

pub mod geometry;
pub mod scene;

pub use geometry::*;
pub use scene::*;
