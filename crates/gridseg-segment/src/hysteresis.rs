//! Dual-threshold hysteresis segmentation

use crate::grow::grow_region;
use crate::segmenter::{LabelResult, Segmenter};
use gridseg_core::ScalarGrid;

/// Objects consist of cells `> t2` that are 8-connected to at least one
/// cell `> t1`.
///
/// The high threshold nominates seeds, the low threshold bounds the
/// growth, so weak edges of strong objects are kept while isolated weak
/// cells stay background.
#[derive(Debug, Clone, Copy)]
pub struct HysteresisSegmenter {
    t1: i32,
    t2: i32,
}

impl HysteresisSegmenter {
    /// Create a segmenter with a seed threshold and a growth threshold.
    /// The pair is reordered if necessary so the seed threshold is the
    /// larger of the two.
    pub fn new(thresh1: i32, thresh2: i32) -> Self {
        let (t1, t2) = if thresh1 < thresh2 {
            (thresh2, thresh1)
        } else {
            (thresh1, thresh2)
        };
        Self { t1, t2 }
    }
}

impl Segmenter for HysteresisSegmenter {
    fn label(&self, data: &ScalarGrid) -> LabelResult {
        let mut labels = ScalarGrid::like(data, 0, 0);
        let mut region_no = 0i32;
        for i in 0..data.rows() {
            for j in 0..data.cols() {
                if data.at(i, j) > self.t1 && labels.at(i, j) == 0 {
                    region_no += 1;
                    grow_region(data, i as i32, j as i32, self.t2, &mut labels, region_no);
                }
            }
        }
        LabelResult {
            labels,
            max_label: region_no as usize,
        }
    }
}
