//! Streaming scalar statistics
//!
//! [`ScalarStat`] accumulates mean, variance, and extrema of a stream of
//! samples without retaining the samples themselves. Region-property
//! computation feeds one of these per statistic per region, so the memory
//! cost is independent of region size.

/// Online mean/variance accumulator.
///
/// Variance is the population variance `E[x²] − mean²`; with the sample
/// counts involved in region statistics the bias correction is not worth
/// the divide.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarStat {
    sum: f64,
    sum_sq: f64,
    count: u64,
    min: f64,
    max: f64,
}

impl ScalarStat {
    /// New empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample.
    pub fn update(&mut self, x: f64) {
        self.update_weighted(x, 1);
    }

    /// Add one sample with an integer relative weight.
    pub fn update_weighted(&mut self, x: f64, weight: u64) {
        self.sum += x * weight as f64;
        self.sum_sq += x * x * weight as f64;
        if self.count == 0 {
            self.min = x;
            self.max = x;
        } else {
            self.min = self.min.min(x);
            self.max = self.max.max(x);
        }
        self.count += weight;
    }

    /// Merge another accumulator into this one.
    pub fn merge(&mut self, other: &ScalarStat) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            self.min = other.min;
            self.max = other.max;
        } else {
            self.min = self.min.min(other.min);
            self.max = self.max.max(other.max);
        }
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.count += other.count;
    }

    /// Number of samples seen.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean of the samples; 0 when empty.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Population variance; clamped at 0 against rounding.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let var = self.sum_sq / self.count as f64 - mean * mean;
        var.max(0.0)
    }

    /// Standard deviation.
    pub fn std_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Smallest sample; 0 when empty.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest sample; 0 when empty.
    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let s = ScalarStat::new();
        assert_eq!(s.count(), 0);
        assert_eq!(s.mean(), 0.0);
        assert_eq!(s.variance(), 0.0);
    }

    #[test]
    fn test_mean_variance() {
        let mut s = ScalarStat::new();
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            s.update(x);
        }
        assert_eq!(s.count(), 8);
        assert!((s.mean() - 5.0).abs() < 1e-12);
        assert!((s.variance() - 4.0).abs() < 1e-12);
        assert!((s.std_deviation() - 2.0).abs() < 1e-12);
        assert_eq!(s.min(), 2.0);
        assert_eq!(s.max(), 9.0);
    }

    #[test]
    fn test_weighted_matches_repeated() {
        let mut a = ScalarStat::new();
        a.update_weighted(3.0, 4);
        let mut b = ScalarStat::new();
        for _ in 0..4 {
            b.update(3.0);
        }
        assert_eq!(a.count(), b.count());
        assert_eq!(a.mean(), b.mean());
        assert_eq!(a.variance(), b.variance());
    }

    #[test]
    fn test_merge() {
        let mut a = ScalarStat::new();
        a.update(1.0);
        a.update(3.0);
        let mut b = ScalarStat::new();
        b.update(5.0);
        a.merge(&b);
        assert_eq!(a.count(), 3);
        assert!((a.mean() - 3.0).abs() < 1e-12);
        assert_eq!(a.max(), 5.0);
    }
}
