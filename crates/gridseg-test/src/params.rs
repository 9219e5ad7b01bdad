//! Regression test parameters and operations

use gridseg_core::ScalarGrid;

/// Regression test state
///
/// Tracks the test name, current comparison index, and overall success
/// status. Each comparison increments the index so a failure message
/// pinpoints which step of the suite went wrong.
pub struct RegParams {
    /// Name of the test (e.g., "watershed")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if the values match within `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
            false
        } else {
            true
        }
    }

    /// Record a named boolean check
    pub fn check(&mut self, what: &str, ok: bool) -> bool {
        self.index += 1;
        if !ok {
            let msg = format!(
                "Failure in {}_reg: check '{}' for index {}",
                self.test_name, what, self.index
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
        }
        ok
    }

    /// Compare two grids for exact equality (shape and every cell)
    pub fn compare_grids(&mut self, grid1: &ScalarGrid, grid2: &ScalarGrid) -> bool {
        self.index += 1;

        if !grid1.same_shape(grid2) {
            let msg = format!(
                "Failure in {}_reg: grid comparison for index {} - shape mismatch \
                 ({}x{} vs {}x{})",
                self.test_name,
                self.index,
                grid1.rows(),
                grid1.cols(),
                grid2.rows(),
                grid2.cols()
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
            return false;
        }

        for i in 0..grid1.rows() {
            for j in 0..grid1.cols() {
                if grid1.at(i, j) != grid2.at(i, j) {
                    let msg = format!(
                        "Failure in {}_reg: grid comparison for index {} - cell mismatch \
                         at ({}, {}): {} vs {}",
                        self.test_name,
                        self.index,
                        i,
                        j,
                        grid1.at(i, j),
                        grid2.at(i, j)
                    );
                    eprintln!("{}", msg);
                    self.failures.push(msg);
                    self.success = false;
                    return false;
                }
            }
        }

        true
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all comparisons passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all comparisons have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_grids() {
        let mut rp = RegParams::new("test");
        let a = ScalarGrid::new(2, 2, 1, -1).unwrap();
        let mut b = a.clone();
        assert!(rp.compare_grids(&a, &b));
        b.set(0, 0, 2).unwrap();
        assert!(!rp.compare_grids(&a, &b));
        assert!(!rp.is_success());
    }
}
