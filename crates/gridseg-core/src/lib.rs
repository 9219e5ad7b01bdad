//! gridseg-core - Basic data structures for gridded-object segmentation
//!
//! This crate provides the fundamental data structures used throughout
//! the gridseg workspace:
//!
//! - [`ScalarGrid`] - Dense rectangular `i32` raster with a missing-value
//!   sentinel
//! - [`Pixel`] - A grid location plus its value
//! - [`ScalarStat`] - Streaming mean/variance accumulator
//!
//! Grids are produced upstream (population density readers, satellite
//! brightness-temperature decoders, crop/remap utilities) and consumed
//! read-only by the segmentation engines in `gridseg-segment`.

pub mod error;
pub mod grid;
pub mod pixel;
pub mod stat;

pub use error::{Error, Result};
pub use grid::ScalarGrid;
pub use pixel::Pixel;
pub use stat::ScalarStat;
