//! gridseg - Object identification in dense scalar grids
//!
//! Partitions a dense 2D scalar raster (population density, satellite
//! brightness temperature, radar reflectivity) into disjoint labeled
//! objects. The workhorse is the enhanced watershed segmenter, with
//! threshold and hysteresis baselines sharing the same contract, plus
//! per-region streaming statistics for downstream classifiers and
//! trackers.
//!
//! # Example
//!
//! ```
//! use gridseg::{ScalarGrid, segment::{Segmenter, EnhancedWatershedSegmenter}};
//!
//! let mut data = ScalarGrid::new(20, 20, -1, -1).unwrap();
//! for i in 7..14usize {
//!     for j in 7..14usize {
//!         data.set(i, j, 50).unwrap();
//!     }
//! }
//! let seg = EnhancedWatershedSegmenter::new(0, 1, 100, 5, 2).unwrap();
//! let result = seg.label(&data);
//! assert_eq!(result.max_label, 1);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use gridseg_core::*;

// Re-export the segmentation crate as a module
pub use gridseg_segment as segment;
