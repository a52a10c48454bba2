//! Scene rendering module
//!
//! This module contains:
//! - Geometry calculations shared between raster and vector output
//! - Raster rendering using tiny-skia (PNG)
//! - Vector rendering (SVG)
//! - Text rasterization with system fonts

pub mod geometry;
pub mod image;
pub mod svg;
pub mod text;
