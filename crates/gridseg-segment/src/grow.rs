//! Region growing primitive
//!
//! Iterative 8-connected flood fill over a threshold predicate. This is
//! the shared primitive behind the baseline segmenters and the
//! watershed finalize pass. Recursive fill is deliberately avoided: on
//! large rasters the recursion depth is the region size.

use gridseg_core::ScalarGrid;

/// Grow a region from `(seed_row, seed_col)`, writing `label_id` into
/// `labels` for every 8-connected cell whose data value is strictly
/// greater than `thresh` and whose label is still 0.
///
/// Uses an explicit stack; cells are expanded in LIFO order. The caller
/// is responsible for seeding only at cells that satisfy the predicate.
pub fn grow_region(
    data: &ScalarGrid,
    seed_row: i32,
    seed_col: i32,
    thresh: i32,
    labels: &mut ScalarGrid,
    label_id: i32,
) {
    let mut stack: Vec<(i32, i32)> = vec![(seed_row, seed_col)];
    while let Some((row, col)) = stack.pop() {
        if labels.get(row, col) != Some(0) {
            continue;
        }
        labels.set_unchecked(row as usize, col as usize, label_id);
        for i in (row - 1)..=(row + 1) {
            for j in (col - 1)..=(col + 1) {
                let Some(v) = data.get(i, j) else { continue };
                if v > thresh && labels.at(i as usize, j as usize) == 0 {
                    stack.push((i, j));
                }
            }
        }
    }
}
