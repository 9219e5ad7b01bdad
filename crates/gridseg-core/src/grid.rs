//! Dense scalar raster
//!
//! [`ScalarGrid`] is the fundamental data container: a rectangular,
//! row-major `i32` raster with a declared missing-value sentinel.
//! Upstream providers (population readers, brightness-temperature
//! decoders, crop/remap utilities) produce these; the segmentation
//! engines consume them read-only.
//!
//! # Coordinate convention
//!
//! Cells are addressed as `(row, col)` with row 0 at the top. Checked
//! accessors take signed coordinates so neighbor scans can probe
//! off-grid positions without pre-clamping.

use crate::error::{Error, Result};

/// Rectangular dense `i32` raster with a missing-value sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarGrid {
    rows: usize,
    cols: usize,
    missing: i32,
    data: Vec<i32>,
}

impl ScalarGrid {
    /// Create a grid of the given shape with every cell set to `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `rows` or `cols` is zero.
    pub fn new(rows: usize, cols: usize, fill: i32, missing: i32) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimension { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            missing,
            data: vec![fill; rows * cols],
        })
    }

    /// Create a grid from nested row vectors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for an empty input and
    /// [`Error::RaggedRow`] if any row has a different length than the
    /// first.
    pub fn from_rows(rows: Vec<Vec<i32>>, missing: i32) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        if nrows == 0 || ncols == 0 {
            return Err(Error::InvalidDimension {
                rows: nrows,
                cols: ncols,
            });
        }
        let mut data = Vec::with_capacity(nrows * ncols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(Error::RaggedRow {
                    row: i,
                    expected: ncols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(&row);
        }
        Ok(Self {
            rows: nrows,
            cols: ncols,
            missing,
            data,
        })
    }

    /// Create a grid with the same shape as `other`, every cell set to
    /// `fill`. Infallible because `other` already satisfies the shape
    /// invariants.
    pub fn like(other: &ScalarGrid, fill: i32, missing: i32) -> Self {
        Self {
            rows: other.rows,
            cols: other.cols,
            missing,
            data: vec![fill; other.rows * other.cols],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The missing-value sentinel.
    pub fn missing(&self) -> i32 {
        self.missing
    }

    /// Whether `val` is the missing sentinel.
    pub fn is_missing(&self, val: i32) -> bool {
        val == self.missing
    }

    /// Whether the signed coordinate lies inside the grid.
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Checked read with signed coordinates; `None` when off-grid.
    pub fn get(&self, row: i32, col: i32) -> Option<i32> {
        if self.in_bounds(row, col) {
            Some(self.data[row as usize * self.cols + col as usize])
        } else {
            None
        }
    }

    /// Unchecked read. Callers must guarantee the coordinate is in
    /// bounds; used in hot loops after an explicit bounds test.
    pub fn at(&self, row: usize, col: usize) -> i32 {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col]
    }

    /// Checked write.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinate is
    /// off-grid.
    pub fn set(&mut self, row: usize, col: usize, val: i32) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.data[row * self.cols + col] = val;
        Ok(())
    }

    /// Unchecked write; counterpart of [`ScalarGrid::at`].
    pub fn set_unchecked(&mut self, row: usize, col: usize, val: i32) {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col] = val;
    }

    /// Set every cell to `val`.
    pub fn fill(&mut self, val: i32) {
        self.data.fill(val);
    }

    /// Whether the two grids have the same shape.
    pub fn same_shape(&self, other: &ScalarGrid) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Maximum non-missing value, or `None` if every cell is missing.
    pub fn max_value(&self) -> Option<i32> {
        self.data
            .iter()
            .copied()
            .filter(|&v| v != self.missing)
            .max()
    }

    /// Count of non-missing cells satisfying the predicate.
    pub fn count_valid<F: Fn(i32) -> bool>(&self, pred: F) -> usize {
        self.data
            .iter()
            .copied()
            .filter(|&v| v != self.missing && pred(v))
            .count()
    }

    /// Raw row-major cell data.
    pub fn data(&self) -> &[i32] {
        &self.data
    }
}
