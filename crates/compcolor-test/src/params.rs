//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use compcolor_core::{Plane, RgbaPix};
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse a mode name; anything unrecognized means compare
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the running check index, the mode and every
/// failure seen so far. Checks never panic; the test asserts on
/// [`RegParams::cleanup`] at the end.
pub struct RegParams {
    /// Name of the test (e.g., "composite")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create parameters configured from `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        Self::with_mode(test_name, RegTestMode::from_env())
    }

    /// Create parameters with an explicit mode.
    pub fn with_mode(test_name: &str, mode: RegTestMode) -> Self {
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two values; `true` if they differ by at most `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        // NaN never compares within delta
        if diff <= delta {
            return true;
        }
        self.fail(format!(
            "Failure in {}_reg: value comparison for index {}\n\
             difference = {} but allowed delta = {}\n\
             expected = {}, actual = {}",
            self.test_name, self.index, diff, delta, expected, actual
        ));
        false
    }

    /// Compare two RGBA images for exact equality.
    pub fn compare_pix(&mut self, pix1: &RgbaPix, pix2: &RgbaPix) -> bool {
        self.index += 1;

        if !pix1.sizes_equal(pix2) {
            self.fail(format!(
                "Failure in {}_reg: pix comparison for index {} - size {:?} vs {:?}",
                self.test_name,
                self.index,
                pix1.dimensions(),
                pix2.dimensions()
            ));
            return false;
        }

        let width = pix1.width() as usize;
        let mismatch = pix1
            .data()
            .iter()
            .zip(pix2.data())
            .position(|(a, b)| a != b);
        if let Some(i) = mismatch {
            self.fail(format!(
                "Failure in {}_reg: pix comparison for index {} - pixel mismatch at ({}, {})",
                self.test_name,
                self.index,
                i % width,
                i / width
            ));
            return false;
        }

        true
    }

    /// Compare two planes sample by sample within `delta`.
    pub fn compare_planes(&mut self, plane1: &Plane, plane2: &Plane, delta: f32) -> bool {
        self.index += 1;

        if !plane1.sizes_equal(plane2) {
            self.fail(format!(
                "Failure in {}_reg: plane comparison for index {} - size {:?} vs {:?}",
                self.test_name,
                self.index,
                plane1.dimensions(),
                plane2.dimensions()
            ));
            return false;
        }

        // NaN on either side counts as an unbounded difference
        let worst = plane1
            .data()
            .iter()
            .zip(plane2.data())
            .map(|(a, b)| (a - b).abs())
            .map(|d| if d.is_nan() { f32::INFINITY } else { d })
            .fold(0.0f32, f32::max);
        if worst > delta {
            self.fail(format!(
                "Failure in {}_reg: plane comparison for index {} - max difference {} > {}",
                self.test_name, self.index, worst, delta
            ));
            return false;
        }

        true
    }

    /// Write an image as PNG to the regout directory and check it against
    /// its golden file.
    pub fn write_pix_and_check(&mut self, pix: &RgbaPix) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.png",
            regout_dir(),
            self.test_name,
            self.index
        );
        compcolor_io::write_png_file(pix, &local_path).map_err(|e| TestError::ImageWrite {
            path: local_path.clone(),
            message: e.to_string(),
        })?;

        self.check_file(&local_path)
    }

    /// Write raw data to the regout directory and check it against its
    /// golden file.
    pub fn write_data_and_check(&mut self, data: &[u8], ext: &str) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ext
        );
        fs::write(&local_path, data)?;
        self.check_file(&local_path)
    }

    /// Check a file against its golden counterpart
    ///
    /// In generate mode, copies the file to golden.
    /// In compare mode, compares with the golden file; a missing golden file
    /// is a failure.
    /// In display mode, does nothing.
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    self.fail(format!(
                        "Failure in {}_reg: golden file not found: {}",
                        self.test_name, golden_path
                    ));
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;

                if local_data != golden_data && !self.same_png_pixels(local_path, &golden_path)? {
                    self.fail(format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    ));
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Compare two PNG files by decoded pixels, so encoder differences do
    /// not count. Non-PNG files that differ byte-wise are different.
    fn same_png_pixels(&self, path1: &str, path2: &str) -> TestResult<bool> {
        if !path1.ends_with(".png") {
            return Ok(false);
        }
        let read = |path: &str| {
            compcolor_io::read_png_file(path).map_err(|e| TestError::ImageRead {
                path: path.to_string(),
                message: e.to_string(),
            })
        };
        Ok(read(path1)? == read(path2)?)
    }

    /// Report results; `true` if every check passed.
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

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
