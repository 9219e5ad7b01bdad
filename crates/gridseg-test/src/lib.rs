//! gridseg-test - Regression test support for the gridseg workspace
//!
//! Provides the [`RegParams`] harness used by the `tests/*_reg.rs`
//! suites (indexed value and grid comparisons with recorded failures)
//! and builders for the synthetic grids the suites segment.
//!
//! # Usage
//!
//! ```
//! use gridseg_test::RegParams;
//!
//! let mut rp = RegParams::new("example");
//! rp.compare_values(4.0, 2.0 + 2.0, 0.0);
//! assert!(rp.cleanup());
//! ```

mod params;
mod synthetic;

pub use params::RegParams;
pub use synthetic::{add_cone, cone_footprint, missing_grid};
