//! Mask primitives: run-length encoding and polygon rasterization.

pub mod rasterize;
pub mod rle;
