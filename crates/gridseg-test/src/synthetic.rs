//! Synthetic grid builders for the regression suites

use gridseg_core::{Result, ScalarGrid};

/// An all-missing grid: every cell holds the `missing` sentinel.
pub fn missing_grid(rows: usize, cols: usize, missing: i32) -> Result<ScalarGrid> {
    ScalarGrid::new(rows, cols, missing, missing)
}

/// Paint a square-based cone onto `grid`: the cell at
/// `(center_row, center_col)` gets `peak`, and each Chebyshev-distance
/// ring outward drops by `peak / (radius + 1)`, down to distance
/// `radius`. Cells keep the larger of their existing and painted
/// values, so overlapping cones merge instead of overwriting.
pub fn add_cone(grid: &mut ScalarGrid, center_row: i32, center_col: i32, peak: i32, radius: i32) {
    let step = peak / (radius + 1);
    for i in (center_row - radius)..=(center_row + radius) {
        for j in (center_col - radius)..=(center_col + radius) {
            if !grid.in_bounds(i, j) {
                continue;
            }
            let d = (i - center_row).abs().max((j - center_col).abs());
            let val = peak - d * step;
            let current = grid.at(i as usize, j as usize);
            if grid.is_missing(current) || val > current {
                grid.set_unchecked(i as usize, j as usize, val);
            }
        }
    }
}

/// Number of cells a cone of the given radius covers when fully
/// in bounds.
pub fn cone_footprint(radius: i32) -> usize {
    let side = (2 * radius + 1) as usize;
    side * side
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cone_values() {
        let mut g = missing_grid(9, 9, -1).unwrap();
        add_cone(&mut g, 4, 4, 20, 3);
        assert_eq!(g.at(4, 4), 20);
        assert_eq!(g.at(4, 5), 15);
        assert_eq!(g.at(2, 4), 10);
        assert_eq!(g.at(1, 1), 5);
        assert_eq!(g.at(0, 0), -1);
        assert_eq!(g.count_valid(|_| true), cone_footprint(3));
    }

    #[test]
    fn test_cones_merge_by_max() {
        let mut g = missing_grid(9, 9, -1).unwrap();
        add_cone(&mut g, 4, 2, 20, 2);
        add_cone(&mut g, 4, 4, 7, 2);
        // the strong cone's flank beats the weak cone's center
        assert_eq!(g.at(4, 4), 20 - 2 * (20 / 3));
    }

    #[test]
    fn test_cone_clips_at_border() {
        let mut g = missing_grid(4, 4, -1).unwrap();
        add_cone(&mut g, 0, 0, 10, 2);
        assert_eq!(g.at(0, 0), 10);
        assert!(g.count_valid(|_| true) < cone_footprint(2));
    }
}
