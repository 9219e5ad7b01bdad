//! Segmenter contract
//!
//! A segmenter partitions a scalar grid into disjoint labeled objects.
//! The strategies form a small closed set (threshold cut, hysteresis
//! growth, enhanced watershed), selected by the caller; they all share
//! this trait.

use gridseg_core::ScalarGrid;

/// Result of segmentation. Each cell of `labels` holds the region id
/// that it belongs to; zero is the background value, and region ids are
/// contiguous `1..=max_label`.
#[derive(Debug, Clone)]
pub struct LabelResult {
    /// Label grid, same shape as the segmented input.
    pub labels: ScalarGrid,
    /// Largest region id (0 when the grid is entirely background).
    pub max_label: usize,
}

impl LabelResult {
    /// Per-region pixel counts, indexed by region id. Index 0 counts
    /// background cells.
    pub fn region_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.max_label + 1];
        for &v in self.labels.data() {
            if v >= 0 && (v as usize) <= self.max_label {
                sizes[v as usize] += 1;
            }
        }
        sizes
    }
}

/// Object identification technique.
///
/// Implementations guarantee: label 0 is reserved for background;
/// labels `1..=max_label` correspond to 8-connected components; the
/// result is deterministic for a fixed input because cells are visited
/// in raster-scan order.
pub trait Segmenter {
    /// Create a labeled grid where background cells are set to 0 and
    /// object labels go 1, 2, 3...
    fn label(&self, data: &ScalarGrid) -> LabelResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_sizes() {
        let labels =
            ScalarGrid::from_rows(vec![vec![0, 1, 1], vec![0, 0, 2], vec![2, 2, 2]], 0).unwrap();
        let result = LabelResult {
            labels,
            max_label: 2,
        };
        assert_eq!(result.region_sizes(), vec![3, 2, 4]);
    }
}
