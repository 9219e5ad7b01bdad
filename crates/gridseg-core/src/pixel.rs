//! Grid point with location and value

use std::cmp::Ordering;

/// A cell in a spatial grid: location plus the value observed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    /// Row coordinate.
    pub row: i32,
    /// Column coordinate.
    pub col: i32,
    /// Grid value at this location.
    pub value: i32,
}

impl Pixel {
    /// Create a pixel.
    pub fn new(row: i32, col: i32, value: i32) -> Self {
        Self { row, col, value }
    }

    /// Squared Euclidean distance to another pixel, in cell units.
    pub fn distance_squared(&self, other: &Pixel) -> i64 {
        self.distance_squared_to(other.row, other.col)
    }

    /// Squared Euclidean distance to a location, in cell units.
    pub fn distance_squared_to(&self, row: i32, col: i32) -> i64 {
        let dr = (self.row - row) as i64;
        let dc = (self.col - col) as i64;
        dr * dr + dc * dc
    }

    /// Ordering by location only (row-major).
    pub fn cmp_location(&self, other: &Pixel) -> Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }

    /// Ordering by value only.
    pub fn cmp_value(&self, other: &Pixel) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Ord for Pixel {
    /// Value first, then row-major location.
    fn cmp(&self, other: &Self) -> Ordering {
        (self.value, self.row, self.col).cmp(&(other.value, other.row, other.col))
    }
}

impl PartialOrd for Pixel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
