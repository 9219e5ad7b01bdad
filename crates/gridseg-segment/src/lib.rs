//! gridseg-segment - Object identification for dense scalar grids
//!
//! This crate provides the segmentation engines of the gridseg
//! workspace:
//!
//! - **Segmenter contract** - [`Segmenter`] / [`LabelResult`]: every
//!   strategy produces a background-0 grid of contiguous region ids
//! - **Baselines** - [`ThresholdSegmenter`] (single cut) and
//!   [`HysteresisSegmenter`] (dual-threshold growth)
//! - **Enhanced watershed** - [`EnhancedWatershedSegmenter`]: quantized,
//!   seed-driven region growing with a tunable merge tolerance,
//!   minimum object size, and peak-separation heuristic
//! - **Region properties** - [`RegionProperty`] streaming statistics,
//!   [`Ellipse`] fits, and size-based pruning
//!
//! # Examples
//!
//! ```
//! use gridseg_core::ScalarGrid;
//! use gridseg_segment::{Segmenter, ThresholdSegmenter};
//!
//! let data = ScalarGrid::from_rows(
//!     vec![vec![0, 9, 9], vec![0, 0, 0], vec![7, 0, 0]],
//!     -1,
//! ).unwrap();
//! let result = ThresholdSegmenter::new(5).label(&data);
//! assert_eq!(result.max_label, 2);
//! ```

pub mod error;
pub mod grow;
pub mod hysteresis;
pub mod property;
pub mod segmenter;
pub mod threshold;
pub mod watershed;

// Re-export core types
pub use gridseg_core;

// Re-export error types
pub use error::{SegmentError, SegmentResult};

// Re-export the segmenter contract
pub use segmenter::{LabelResult, Segmenter};

// Re-export the engines
pub use hysteresis::HysteresisSegmenter;
pub use threshold::ThresholdSegmenter;
pub use watershed::EnhancedWatershedSegmenter;

// Re-export region analysis
pub use grow::grow_region;
pub use property::{Ellipse, RegionProperty, prune, prune_by_size, region_pixels};
