//! Regression test parameters and operations

use crate::error::TestError;
use rasterkit_core::Pix;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare results against expectations (default)
    #[default]
    Compare,
    /// Compare, and also dump every compared buffer to stderr
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse mode from a string; anything but "display" means compare
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the index of the current check, and every
/// failure seen so far. Each `compare_*` call advances the index by one.
pub struct RegParams {
    /// Name of the test (e.g., "resize")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Recorded failures
    failures: Vec<TestError>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is read from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        Self::with_mode(test_name, RegTestMode::from_env())
    }

    /// Create regression test parameters with an explicit mode
    pub fn with_mode(test_name: &str, mode: RegTestMode) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            })
        } else {
            true
        }
    }

    /// Compare two images for exact equality of size, format and pixels
    ///
    /// # Returns
    ///
    /// `true` if images are identical, `false` otherwise.
    pub fn compare_pix(&mut self, expected: &Pix, actual: &Pix) -> bool {
        self.index += 1;

        if self.display() {
            self.dump("expected", expected.width(), expected.data());
            self.dump("actual", actual.width(), actual.data());
        }

        if !expected.sizes_equal(actual) || expected.format() != actual.format() {
            let shape = |p: &Pix| format!("{}x{} {}", p.width(), p.height(), p.format());
            return self.fail(TestError::PixShapeMismatch {
                index: self.index,
                expected: shape(expected),
                actual: shape(actual),
            });
        }

        let width = expected.width().max(1) as usize;
        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(e, a)| e != a);

        match mismatch {
            Some(i) => self.fail(TestError::PixelMismatch {
                index: self.index,
                x: (i % width) as u32,
                y: (i / width) as u32,
                expected: expected.data()[i],
                actual: actual.data()[i],
            }),
            None => true,
        }
    }

    /// Compare two packed pixel arrays
    ///
    /// # Returns
    ///
    /// `true` if data is identical, `false` otherwise.
    pub fn compare_data(&mut self, expected: &[u32], actual: &[u32]) -> bool {
        self.index += 1;

        if self.display() {
            self.dump("expected", expected.len() as u32, expected);
            self.dump("actual", actual.len() as u32, actual);
        }

        let detail = if expected.len() != actual.len() {
            Some(format!("sizes: {} vs {}", expected.len(), actual.len()))
        } else {
            expected
                .iter()
                .zip(actual)
                .position(|(e, a)| e != a)
                .map(|i| {
                    format!(
                        "element {}: expected {:#010x}, got {:#010x}",
                        i, expected[i], actual[i]
                    )
                })
        };

        match detail {
            Some(detail) => self.fail(TestError::DataMismatch {
                index: self.index,
                detail,
            }),
            None => true,
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        let success = self.is_success();
        if success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Get list of failures
    pub fn failures(&self) -> &[TestError] {
        &self.failures
    }

    fn fail(&mut self, err: TestError) -> bool {
        eprintln!("Failure in {}_reg: {}", self.test_name, err);
        self.failures.push(err);
        false
    }

    /// Print a buffer as rows of hex values.
    fn dump(&self, label: &str, width: u32, data: &[u32]) {
        eprintln!("{}_reg index {} {}:", self.test_name, self.index, label);
        for row in data.chunks(width.max(1) as usize) {
            let line: Vec<String> = row.iter().map(|v| format!("{:08x}", v)).collect();
            eprintln!("  {}", line.join(" "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterkit_core::PixelFormat;

    #[test]
    fn test_mode_parse() {
        assert_eq!(RegTestMode::parse("display"), RegTestMode::Display);
        assert_eq!(RegTestMode::parse(" DISPLAY "), RegTestMode::Display);
        assert_eq!(RegTestMode::parse("compare"), RegTestMode::Compare);
        assert_eq!(RegTestMode::parse(""), RegTestMode::Compare);
    }

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::with_mode("test", RegTestMode::Compare);
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert_eq!(rp.index(), 2);
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::with_mode("test", RegTestMode::Compare);
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert!(matches!(
            rp.failures()[0],
            TestError::ValueMismatch { index: 1, .. }
        ));
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_compare_pix() {
        let a = Pix::from_data(2, 2, PixelFormat::GrayAlpha, &[1, 2, 3, 4]).unwrap();
        let b = Pix::from_data(2, 2, PixelFormat::GrayAlpha, &[1, 2, 3, 5]).unwrap();
        let c = Pix::from_data(2, 2, PixelFormat::Indexed, &[1, 2, 3, 4]).unwrap();

        let mut rp = RegParams::with_mode("test", RegTestMode::Display);
        assert!(rp.compare_pix(&a, &a.deep_clone()));
        assert!(!rp.compare_pix(&a, &b));
        assert!(!rp.compare_pix(&a, &c));
        assert_eq!(
            rp.failures()[0],
            TestError::PixelMismatch {
                index: 2,
                x: 1,
                y: 1,
                expected: 4,
                actual: 5
            }
        );
        assert!(matches!(
            rp.failures()[1],
            TestError::PixShapeMismatch { index: 3, .. }
        ));
    }

    #[test]
    fn test_compare_data() {
        let mut rp = RegParams::with_mode("test", RegTestMode::Compare);
        assert!(rp.compare_data(&[1, 2, 3], &[1, 2, 3]));
        assert!(!rp.compare_data(&[1, 2, 3], &[1, 2]));
        assert!(!rp.compare_data(&[1, 2, 3], &[1, 9, 3]));
        assert_eq!(rp.failures().len(), 2);
    }
}
