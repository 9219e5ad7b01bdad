//! Simple object identification based on a single threshold

use crate::grow::grow_region;
use crate::segmenter::{LabelResult, Segmenter};
use gridseg_core::ScalarGrid;

/// Labels every 8-connected component of cells strictly greater than a
/// single threshold.
///
/// The simplest [`Segmenter`]; it exists as a baseline for the
/// watershed engine and doubles as the connectivity relabeler of the
/// watershed finalize pass (threshold 0 over the claim-height grid).
#[derive(Debug, Clone, Copy)]
pub struct ThresholdSegmenter {
    thresh: i32,
}

impl ThresholdSegmenter {
    /// Create a segmenter keeping cells `> thresh`.
    pub fn new(thresh: i32) -> Self {
        Self { thresh }
    }
}

impl Segmenter for ThresholdSegmenter {
    fn label(&self, data: &ScalarGrid) -> LabelResult {
        let mut labels = ScalarGrid::like(data, 0, 0);
        let mut region_no = 0i32;
        for i in 0..data.rows() {
            for j in 0..data.cols() {
                if data.at(i, j) > self.thresh && labels.at(i, j) == 0 {
                    region_no += 1;
                    grow_region(data, i as i32, j as i32, self.thresh, &mut labels, region_no);
                }
            }
        }
        LabelResult {
            labels,
            max_label: region_no as usize,
        }
    }
}
